//! Stable, table-safe identifiers for arbitrary Unicode strings.
//!
//! An identifier is `{label}_{codepoints}`. The codepoint part spells out
//! every `char` as `u` followed by at least four uppercase hex digits, so two
//! strings differing in a single codepoint never share an identifier. The
//! label is a lowercase ASCII transliteration, kept only for legibility.

use deunicode::deunicode;

/// Identifier used for the empty string.
pub const EMPTY_ID: &str = "empty";

pub fn compute_id(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_ID.to_string();
    }
    format!("{}_{}", slug(text), codepoints(text))
}

/// Lowercase ASCII alphanumerics of the transliterated input. May be empty
/// for symbols without a Latin counterpart.
pub fn slug(text: &str) -> String {
    deunicode(text)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn codepoints(text: &str) -> String {
    text.chars()
        .map(|c| format!("u{:04X}", c as u32))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_ascii() {
        assert_eq!(compute_id("k"), "k_u006B");
        assert_eq!(compute_id("ts"), "ts_u0074u0073");
    }

    #[test]
    fn t_ipa_label_is_folded() {
        let id = compute_id("kʰ");
        assert!(id.ends_with("_u006Bu02B0"), "{}", id);
        assert!(id.starts_with('k'));
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn t_distinct_codepoints_distinct_ids() {
        // Same transliteration, different codepoints.
        let plain = compute_id("a");
        let accented = compute_id("á");
        let decomposed = compute_id("a\u{0301}");
        assert_ne!(plain, accented);
        assert_ne!(accented, decomposed);
        assert_ne!(plain, decomposed);
    }

    #[test]
    fn t_astral_plane() {
        assert_eq!(codepoints("\u{1F600}"), "u1F600");
        assert_ne!(compute_id("\u{1F600}"), compute_id("\u{1F60}0"));
    }

    #[test]
    fn t_empty() {
        assert_eq!(compute_id(""), EMPTY_ID);
        assert!(compute_id("ʔ").contains("_u0294"));
    }

    #[test]
    fn t_deterministic() {
        for s in ["ɲ", "t͡ɕʰ", "(a)", "e̞"] {
            assert_eq!(compute_id(s), compute_id(s));
        }
    }

    #[test]
    fn t_no_delimiters() {
        let id = compute_id("a b,c;d\t");
        assert!(!id.contains(|c: char| c.is_whitespace() || c == ',' || c == ';'));
    }
}
