use serde::Serialize;
use std::collections::BTreeMap;

/// One distinct segment across the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IPA")]
    pub symbol: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// One listed segment of one inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Language_ID")]
    pub language_id: String,
    #[serde(rename = "Parameter_ID")]
    pub parameter_id: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Value_in_Source")]
    pub value_in_source: String,
    #[serde(rename = "Marginal")]
    pub marginal: bool,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Contribution_ID")]
    pub contribution_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Language_ID")]
    pub language_id: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Tones")]
    pub tones: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOccurrence {
    pub segment: String,
    pub language: String,
}

/// Graphemes the catalog could not resolve, with where they were seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownLog {
    entries: BTreeMap<String, Vec<UnknownOccurrence>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UnknownRow<'a> {
    pub grapheme: &'a str,
    pub segment: &'a str,
    pub language: &'a str,
}

impl UnknownLog {
    pub fn record(&mut self, grapheme: &str, segment: &str, language: &str) {
        self.entries
            .entry(grapheme.to_string())
            .or_default()
            .push(UnknownOccurrence {
                segment: segment.to_string(),
                language: language.to_string(),
            });
    }

    pub fn get(&self, grapheme: &str) -> Option<&[UnknownOccurrence]> {
        self.entries.get(grapheme).map(Vec::as_slice)
    }

    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct graphemes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn occurrences(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = UnknownRow<'_>> {
        self.entries.iter().flat_map(|(grapheme, occurrences)| {
            occurrences.iter().map(move |o| UnknownRow {
                grapheme,
                segment: &o.segment,
                language: &o.language,
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_unknown_log() {
        let mut log = UnknownLog::default();
        log.record("q̴", "(q̴)", "Komi");
        log.record("q̴", "q̴", "Mari");
        log.record("ʬ", "ʬ", "Komi");
        assert_eq!(log.len(), 2);
        assert_eq!(log.occurrences(), 3);
        assert_eq!(log.get("q̴").unwrap()[0].segment, "(q̴)");
        assert_eq!(log.get("q̴").unwrap()[1].language, "Mari");
        assert!(log.get("k").is_none());
        let rows = log.rows().map(|r| r.segment).collect::<Vec<_>>();
        assert_eq!(rows.len(), 3);
    }
}
