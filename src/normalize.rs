//! Canonicalization of raw segment strings.
//!
//! Graphemes are kept in NFD. The transcription catalog normalizes its own
//! keys through [`normalize`], so both sides always agree on the form.

use unicode_normalization::UnicodeNormalization;

const ENCLOSURES: [(char, char); 2] = [('(', ')'), ('[', ']')];

const MARGINAL_MARKER: char = '(';

/// Characters rewritten into the phonetic notation's own punctuation.
const SUBSTITUTIONS: [(char, char); 3] = [
    ('\u{2019}', '\u{02BC}'), // right single quotation mark -> modifier apostrophe
    ('\'', '\u{02BC}'),
    (':', '\u{02D0}'), // colon -> length mark
];

/// Whether the source marks the segment as marginal. Checked on the raw
/// segment, independently of [`normalize`].
pub fn is_marginal(raw: &str) -> bool {
    raw.trim_start().starts_with(MARGINAL_MARKER)
}

pub fn normalize(raw: &str) -> String {
    let substituted = raw
        .nfd()
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect::<String>();
    let mut text = substituted.trim();
    while let Some(inner) = strip_enclosure(text) {
        text = inner.trim();
    }
    text.to_string()
}

/// Removes one enclosing bracket pair if the opening bracket is closed by the
/// final character. `(a)(b)` is left untouched.
fn strip_enclosure(text: &str) -> Option<&str> {
    ENCLOSURES.iter().find_map(|(open, close)| {
        let inner = text.strip_prefix(*open)?.strip_suffix(*close)?;
        let mut depth = 1usize;
        for c in inner.chars() {
            if c == *open {
                depth += 1;
            } else if c == *close {
                depth -= 1;
                if depth == 0 {
                    return None;
                }
            }
        }
        Some(inner)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_marginal() {
        assert!(is_marginal("(a)"));
        assert!(is_marginal(" (kʰ)"));
        assert!(!is_marginal("t"));
        assert!(!is_marginal("[t]"));
        assert!(!is_marginal(""));
    }

    #[test]
    fn t_strip_brackets() {
        assert_eq!(normalize("(a)"), "a");
        assert_eq!(normalize("[a]"), "a");
        assert_eq!(normalize("([a])"), "a");
        assert_eq!(normalize("((kʰ))"), "kʰ");
        assert_eq!(normalize("( a )"), "a");
    }

    #[test]
    fn t_unbalanced_left_alone() {
        assert_eq!(normalize("(a)(b)"), "(a)(b)");
        assert_eq!(normalize("(a"), "(a");
        assert_eq!(normalize("a)"), "a)");
    }

    #[test]
    fn t_nfd() {
        assert_eq!(normalize("\u{00E1}"), "a\u{0301}");
        assert_eq!(normalize("\u{00E3}"), normalize("a\u{0303}"));
    }

    #[test]
    fn t_punctuation() {
        assert_eq!(normalize("k\u{2019}"), "k\u{02BC}");
        assert_eq!(normalize("k'"), "k\u{02BC}");
        assert_eq!(normalize("a:"), "a\u{02D0}");
    }

    #[test]
    fn t_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("()"), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn t_idempotent() {
        let samples = [
            "(a)", "((a))", "[(ŋ)]", "t\u{2019}", "ã", "(a)(b)", "  [ɛ:] ", "", "()", "(",
            "ʈ͡ʂʰ", "[ ( x ) ]",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {:?}", s);
        }
    }
}
