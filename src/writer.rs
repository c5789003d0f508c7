//! Persisting a finished [`Dataset`].

use crate::inventory::{Dataset, UnknownLog};
use crate::{PhonInvError, PhonInvResult};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LANGUAGE_TABLE: &str = "languages.csv";
pub const INVENTORY_TABLE: &str = "inventories.csv";
pub const PARAMETER_TABLE: &str = "parameters.csv";
pub const VALUE_TABLE: &str = "values.csv";

const LANGUAGE_COLUMNS: &[&str] = &[
    "ID",
    "Name",
    "Glottocode",
    "Family_Glottocode",
    "Family_Name",
    "ISO639P3code",
    "Latitude",
    "Longitude",
    "Macroarea",
    "Glottolog_Name",
];
const INVENTORY_COLUMNS: &[&str] = &["ID", "Name", "Language_ID", "Source", "Tones"];
const PARAMETER_COLUMNS: &[&str] = &["ID", "Name", "IPA", "Description"];
const VALUE_COLUMNS: &[&str] = &[
    "ID",
    "Language_ID",
    "Parameter_ID",
    "Value",
    "Value_in_Source",
    "Marginal",
    "Source",
    "Contribution_ID",
];

pub trait TableWriter {
    fn write(&mut self, dataset: &Dataset) -> PhonInvResult<()>;
}

/// Writes one CSV file per table into a directory.
pub struct CsvTableWriter {
    dir: PathBuf,
}

impl CsvTableWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableWriter for CsvTableWriter {
    fn write(&mut self, dataset: &Dataset) -> PhonInvResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PhonInvError::io(&self.dir, e))?;
        let dir = &self.dir;
        write_rows(&dir.join(LANGUAGE_TABLE), LANGUAGE_COLUMNS, &dataset.languages)?;
        write_rows(&dir.join(INVENTORY_TABLE), INVENTORY_COLUMNS, &dataset.inventories)?;
        write_rows(&dir.join(PARAMETER_TABLE), PARAMETER_COLUMNS, &dataset.parameters)?;
        write_rows(&dir.join(VALUE_TABLE), VALUE_COLUMNS, &dataset.values)?;
        info!("Wrote dataset to {}", self.dir.display());
        Ok(())
    }
}

/// Writes the unresolved graphemes as `grapheme,segment,language` rows.
pub fn write_unknown_report(path: &Path, unknowns: &UnknownLog) -> PhonInvResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(["grapheme", "segment", "language"])?;
    for row in unknowns.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| PhonInvError::io(path, e))?;
    info!(
        "Wrote {} unresolved graphemes to {}",
        unknowns.len(),
        path.display()
    );
    Ok(())
}

/// The header is written from `columns` so that empty tables still carry it.
fn write_rows<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> PhonInvResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(columns)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| PhonInvError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::inventory::{InventoryRecord, ParameterRecord, ValueRecord};
    use crate::languages::LanguageRecord;

    #[test]
    fn t_write_tables() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset {
            parameters: vec![ParameterRecord {
                id: "IPA_k_u006B".to_string(),
                name: "k".to_string(),
                symbol: "k".to_string(),
                description: "voiceless velar plosive consonant".to_string(),
            }],
            values: vec![ValueRecord {
                id: "1".to_string(),
                language_id: "komi".to_string(),
                parameter_id: "IPA_k_u006B".to_string(),
                value: "k".to_string(),
                value_in_source: "(k)".to_string(),
                marginal: true,
                source: "Nikolaev 2020".to_string(),
                contribution_id: "1".to_string(),
            }],
            ..Default::default()
        };
        let out = dir.path().join("out");
        CsvTableWriter::new(&out).write(&dataset).unwrap();

        let values = fs::read_to_string(out.join(VALUE_TABLE)).unwrap();
        let mut lines = values.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Language_ID,Parameter_ID,Value,Value_in_Source,Marginal,Source,Contribution_ID"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,komi,IPA_k_u006B,k,(k),true,Nikolaev 2020,1"
        );
        let parameters = fs::read_to_string(out.join(PARAMETER_TABLE)).unwrap();
        assert!(parameters.starts_with("ID,Name,IPA,Description\n"));
        // Empty tables still carry their header.
        assert_eq!(
            fs::read_to_string(out.join(LANGUAGE_TABLE)).unwrap(),
            format!("{}\n", LANGUAGE_COLUMNS.join(","))
        );
        assert_eq!(
            fs::read_to_string(out.join(INVENTORY_TABLE)).unwrap(),
            "ID,Name,Language_ID,Source,Tones\n"
        );
    }

    #[test]
    fn t_header_matches_records() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset {
            languages: vec![LanguageRecord::bare("komi".to_string(), "Komi")],
            inventories: vec![InventoryRecord {
                id: "1".to_string(),
                name: "Komi".to_string(),
                language_id: "komi".to_string(),
                source: "s1".to_string(),
                tones: String::new(),
            }],
            ..Default::default()
        };
        CsvTableWriter::new(dir.path()).write(&dataset).unwrap();
        let languages = fs::read_to_string(dir.path().join(LANGUAGE_TABLE)).unwrap();
        assert_eq!(
            languages,
            format!("{}\nkomi,Komi,,,,,,,,\n", LANGUAGE_COLUMNS.join(","))
        );
        let inventories = fs::read_to_string(dir.path().join(INVENTORY_TABLE)).unwrap();
        assert_eq!(inventories, "ID,Name,Language_ID,Source,Tones\n1,Komi,komi,s1,\n");
    }

    #[test]
    fn t_unknown_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unknown.csv");
        let mut log = UnknownLog::default();
        log.record("ʬ", "(ʬ)", "Komi");
        write_unknown_report(&path, &log).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "grapheme,segment,language\nʬ,(ʬ),Komi\n"
        );
    }
}
