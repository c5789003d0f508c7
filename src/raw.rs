//! The raw inventory dump: a JSON object from inventory label to segment lists.

use crate::{PhonInvError, PhonInvResult};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawInventory {
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub vows: Vec<String>,
    #[serde(default)]
    pub tones: Vec<Option<String>>,
}

impl RawInventory {
    /// Consonants followed by vowels, in source order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.cons.iter().chain(self.vows.iter()).map(String::as_str)
    }

    /// Non-empty tones joined with `separator`.
    pub fn tones(&self, separator: &str) -> String {
        self.tones
            .iter()
            .flatten()
            .filter(|t| !t.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Inventories in the order the JSON object lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawData {
    pub inventories: Vec<(String, RawInventory)>,
}

impl RawData {
    pub fn from_reader<R: io::Read>(reader: R) -> PhonInvResult<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_reader(reader)?;
        let inventories = map
            .into_iter()
            .map(|(label, value)| -> PhonInvResult<(String, RawInventory)> {
                Ok((label, serde_json::from_value(value)?))
            })
            .collect::<PhonInvResult<Vec<_>>>()?;
        Ok(Self { inventories })
    }

    pub fn load(path: &Path) -> PhonInvResult<Self> {
        let file = File::open(path).map_err(|e| PhonInvError::io(path, e))?;
        let data = Self::from_reader(BufReader::new(file))?;
        info!("Read {} inventories from {}", data.len(), path.display());
        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }
}

/// Key joining an inventory label to the language mapping: the part before
/// the first `#`, without commas.
pub fn language_key(label: &str) -> String {
    label
        .split('#')
        .next()
        .unwrap_or_default()
        .replace(',', "")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_language_key() {
        assert_eq!(language_key("Komi#2"), "Komi");
        assert_eq!(language_key("Nenets, Tundra"), "Nenets Tundra");
        assert_eq!(language_key("Nenets, Forest#a#b"), "Nenets Forest");
        assert_eq!(language_key("#x"), "");
    }

    #[test]
    fn t_order_preserved() {
        let json = r#"{"Zyrian": {"cons": ["k"], "vows": [], "tones": []},
                       "Abkhaz": {"cons": [], "vows": ["a"], "tones": []},
                       "Mari": {"cons": ["p"], "vows": ["i"], "tones": []}}"#;
        let data = RawData::from_reader(json.as_bytes()).unwrap();
        let labels = data
            .inventories
            .iter()
            .map(|(l, _)| l.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Zyrian", "Abkhaz", "Mari"]);
    }

    #[test]
    fn t_segments_and_tones() {
        let json = r#"{"A": {"cons": ["k", "(kʰ)"], "vows": ["a"], "tones": ["", "H", null, "L"]}}"#;
        let data = RawData::from_reader(json.as_bytes()).unwrap();
        let (_, inventory) = &data.inventories[0];
        assert_eq!(inventory.segments().collect::<Vec<_>>(), vec!["k", "(kʰ)", "a"]);
        assert_eq!(inventory.tones(","), "H,L");
        assert_eq!(RawInventory::default().tones(","), "");
    }

    #[test]
    fn t_malformed() {
        assert!(matches!(
            RawData::from_reader("{\"A\": ".as_bytes()),
            Err(PhonInvError::Json(_))
        ));
        assert!(matches!(
            RawData::from_reader(r#"{"A": {"cons": 3}}"#.as_bytes()),
            Err(PhonInvError::Json(_))
        ));
    }
}
