//! Language metadata: the mapping from raw language names to glottocodes and
//! the Glottolog-style catalog those glottocodes resolve against.

use crate::identifier::{compute_id, slug};
use crate::{PhonInvError, PhonInvResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

/// Metadata for one languoid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Languoid {
    pub glottocode: String,
    pub name: String,
    #[serde(default)]
    pub family_glottocode: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub iso639p3code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// `;`-separated, the first one is used.
    #[serde(default)]
    pub macroarea: Option<String>,
}

pub trait LanguageCatalog {
    fn languoid(&self, glottocode: &str) -> Option<&Languoid>;
}

/// Catalog read from a CSV export with one row per languoid.
#[derive(Debug, Clone, Default)]
pub struct GlottologTable {
    languoids: HashMap<String, Languoid>,
}

impl GlottologTable {
    pub fn from_reader<R: io::Read>(reader: R) -> PhonInvResult<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut languoids = HashMap::new();
        for row in rdr.deserialize() {
            let languoid: Languoid = row?;
            languoids.insert(languoid.glottocode.clone(), languoid);
        }
        Ok(Self { languoids })
    }

    pub fn load(path: &Path) -> PhonInvResult<Self> {
        let file = File::open(path).map_err(|e| PhonInvError::io(path, e))?;
        let table = Self::from_reader(file)?;
        info!("Read {} languoids from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.languoids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languoids.is_empty()
    }
}

impl LanguageCatalog for GlottologTable {
    fn languoid(&self, glottocode: &str) -> Option<&Languoid> {
        self.languoids.get(glottocode)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MappingRow {
    name: String,
    #[serde(default)]
    glottocode: Option<String>,
}

/// One row of the language table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Glottocode")]
    pub glottocode: Option<String>,
    #[serde(rename = "Family_Glottocode")]
    pub family_glottocode: Option<String>,
    #[serde(rename = "Family_Name")]
    pub family_name: Option<String>,
    #[serde(rename = "ISO639P3code")]
    pub iso639p3code: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Macroarea")]
    pub macroarea: Option<String>,
    #[serde(rename = "Glottolog_Name")]
    pub glottolog_name: Option<String>,
}

impl LanguageRecord {
    pub fn bare(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn with_languoid(mut self, languoid: &Languoid) -> Self {
        self.glottocode = Some(languoid.glottocode.clone());
        self.family_glottocode = languoid.family_glottocode.clone();
        self.family_name = languoid.family_name.clone();
        self.iso639p3code = languoid.iso639p3code.clone();
        self.latitude = languoid.latitude;
        self.longitude = languoid.longitude;
        self.macroarea = languoid
            .macroarea
            .as_deref()
            .and_then(|m| m.split(';').map(str::trim).find(|m| !m.is_empty()))
            .map(str::to_string);
        self.glottolog_name = Some(languoid.name.clone());
        self
    }
}

/// Language rows keyed by the raw language name they were mapped from.
#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    records: Vec<LanguageRecord>,
    by_name: HashMap<String, usize>,
}

impl LanguageTable {
    pub fn from_reader<R: io::Read>(
        reader: R,
        catalog: &dyn LanguageCatalog,
    ) -> PhonInvResult<Self> {
        let mut table = Self::default();
        let mut rdr = csv::Reader::from_reader(reader);
        for row in rdr.deserialize() {
            let row: MappingRow = row?;
            if table.by_name.contains_key(&row.name) {
                warn!("Duplicate language mapping for '{}', keeping the first", row.name);
                continue;
            }
            let id = language_id(&row.name);
            if let Some(idx) = table.records.iter().position(|r| r.id == id) {
                warn!(
                    "Language '{}' has the same id '{}' as '{}', reusing that row",
                    row.name, id, table.records[idx].name
                );
                table.by_name.insert(row.name, idx);
                continue;
            }
            let mut record = LanguageRecord::bare(id, &row.name);
            if let Some(glottocode) = row.glottocode.filter(|g| !g.trim().is_empty()) {
                let glottocode = glottocode.trim();
                record = match catalog.languoid(glottocode) {
                    Some(languoid) => record.with_languoid(languoid),
                    None => {
                        warn!("Glottocode '{}' for '{}' not in catalog", glottocode, row.name);
                        LanguageRecord {
                            glottocode: Some(glottocode.to_string()),
                            ..record
                        }
                    }
                };
            }
            table.push(row.name, record);
        }
        Ok(table)
    }

    pub fn load(path: &Path, catalog: &dyn LanguageCatalog) -> PhonInvResult<Self> {
        let file = File::open(path).map_err(|e| PhonInvError::io(path, e))?;
        let table = Self::from_reader(file, catalog)?;
        info!("Read {} language mappings from {}", table.len(), path.display());
        Ok(table)
    }

    fn push(&mut self, name: String, record: LanguageRecord) {
        self.by_name.insert(name, self.records.len());
        self.records.push(record);
    }

    /// Id of the language mapped from `key`.
    pub fn language_id(&self, key: &str) -> Option<&str> {
        self.by_name
            .get(key)
            .map(|idx| self.records[*idx].id.as_str())
    }

    /// Id for `key`, adding a row without metadata if it is not mapped.
    pub fn language_id_or_insert(&mut self, key: &str) -> String {
        if let Some(id) = self.language_id(key) {
            return id.to_string();
        }
        let id = language_id(key);
        match self.records.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.by_name.insert(key.to_string(), idx);
            }
            None => self.push(key.to_string(), LanguageRecord::bare(id.clone(), key)),
        }
        id
    }

    pub fn into_records(self) -> Vec<LanguageRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Slug of the language name; names without any Latin transliteration fall
/// back to the codepoint identifier.
pub fn language_id(name: &str) -> String {
    let id = slug(name);
    if id.is_empty() {
        compute_id(name)
    } else {
        id
    }
}
