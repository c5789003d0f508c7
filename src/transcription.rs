//! Resolution of normalized graphemes against a phonetic alphabet catalog.

use crate::normalize::normalize;
use crate::raw_data::{MODIFIERS, NON_PULMONIC_CONSONANTS, PULMONIC_CONSONANTS, VOWELS};
use crate::sounds::{parse_consonants, parse_csv_to_map, parse_vowels, Sound};
use crate::PhonInvError::GenericParseError;
use crate::{PhonInvError, PhonInvResult};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

const TIE_BARS: [char; 2] = ['\u{0361}', '\u{035C}'];

/// Outcome of looking a grapheme up in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    Resolved { symbol: String, description: String },
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }

    /// Standardized symbol, empty when unresolved.
    pub fn symbol(&self) -> &str {
        match self {
            Resolution::Resolved { symbol, .. } => symbol,
            Resolution::Unresolved => "",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Resolution::Resolved { description, .. } => description,
            Resolution::Unresolved => "",
        }
    }
}

pub trait TranscriptionResolver {
    fn resolve(&self, normalized: &str) -> Resolution;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogEntry {
    symbol: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    grapheme: String,
    symbol: String,
    description: String,
}

/// Read-only grapheme table, built once before a run.
#[derive(Debug, Default, Clone)]
pub struct SoundCatalog {
    entries: HashMap<String, CatalogEntry>,
    modifiers: HashMap<char, String>,
}

impl SoundCatalog {
    /// Catalog of the built-in vowel and consonant tables.
    pub fn builtin() -> PhonInvResult<Self> {
        let mut catalog = Self::default();
        catalog.load_modifiers(MODIFIERS.as_bytes())?;
        let sounds = parse_consonants(PULMONIC_CONSONANTS.as_bytes())?
            .into_iter()
            .chain(parse_consonants(NON_PULMONIC_CONSONANTS.as_bytes())?)
            .chain(parse_vowels(VOWELS.as_bytes())?);
        catalog.extend_sounds(sounds);
        info!("Built-in sound catalog holds {} graphemes", catalog.len());
        Ok(catalog)
    }

    /// Catalog from a `grapheme,symbol,description` table. Modifier
    /// diacritics still come from the built-in table.
    pub fn from_reader<R: io::Read>(reader: R) -> PhonInvResult<Self> {
        let mut catalog = Self::default();
        catalog.load_modifiers(MODIFIERS.as_bytes())?;
        let mut rdr = csv::Reader::from_reader(reader);
        for row in rdr.deserialize() {
            let row: CatalogRow = row?;
            catalog.insert(&row.grapheme, row.symbol, row.description);
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> PhonInvResult<Self> {
        let file = File::open(path).map_err(|e| PhonInvError::io(path, e))?;
        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded {} graphemes from catalog {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn extend_sounds(&mut self, sounds: impl IntoIterator<Item = Sound>) {
        for sound in sounds {
            let description = sound.description();
            self.insert(sound.representation(), sound.representation().to_string(), description);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first spelling registered for a key wins.
    fn insert(&mut self, grapheme: &str, symbol: String, description: String) {
        self.entries
            .entry(lookup_key(grapheme))
            .or_insert(CatalogEntry {
                symbol,
                description,
            });
    }

    fn load_modifiers<R: io::Read>(&mut self, reader: R) -> PhonInvResult<()> {
        for row in parse_csv_to_map(reader)? {
            let symbol = row
                .get("symbol")
                .map(|s| normalize(s))
                .ok_or_else(|| GenericParseError("No symbol defined".to_string()))?;
            let name = row
                .get("name")
                .ok_or_else(|| GenericParseError("No name defined".to_string()))?;
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    self.modifiers.insert(c, name.to_owned());
                }
                _ => {
                    return Err(GenericParseError(format!(
                        "Modifier '{}' is not a single character",
                        symbol
                    )))
                }
            }
        }
        Ok(())
    }

    /// Peels known modifiers off the end of `key` until the remainder is a
    /// catalog entry.
    fn resolve_with_modifiers(&self, key: &str) -> Option<Resolution> {
        let mut base = key;
        let mut names = vec![];
        while let Some(c) = base.chars().last() {
            let name = self.modifiers.get(&c)?;
            names.push(name.as_str());
            base = &base[..base.len() - c.len_utf8()];
            if let Some(entry) = self.entries.get(base) {
                names.reverse();
                return Some(Resolution::Resolved {
                    symbol: format!("{}{}", entry.symbol, &key[base.len()..]),
                    description: format!("{} {}", names.join(" "), entry.description),
                });
            }
        }
        None
    }
}

impl TranscriptionResolver for SoundCatalog {
    fn resolve(&self, normalized: &str) -> Resolution {
        let key = lookup_key(normalized);
        let resolution = match self.entries.get(&key) {
            Some(entry) => Resolution::Resolved {
                symbol: entry.symbol.clone(),
                description: entry.description.clone(),
            },
            None => self
                .resolve_with_modifiers(&key)
                .unwrap_or(Resolution::Unresolved),
        };
        debug!("{} -> {:?}", normalized, resolution);
        resolution
    }
}

/// Normalized form with spelling variants folded: tie bars are dropped and
/// script `ɡ` is read as `g`.
fn lookup_key(grapheme: &str) -> String {
    normalize(grapheme)
        .chars()
        .filter(|c| !TIE_BARS.contains(c))
        .map(|c| if c == '\u{0261}' { 'g' } else { c })
        .collect()
}
