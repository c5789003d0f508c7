//! Loads every input once and runs the [`InventoryBuilder`] over them.

use crate::config::PipelineSettings;
use crate::inventory::{Dataset, InventoryBuilder};
use crate::languages::{GlottologTable, LanguageTable};
use crate::raw::RawData;
use crate::sources::SourceList;
use crate::transcription::SoundCatalog;
use crate::PhonInvResult;
use log::warn;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PipelineInputs {
    /// JSON object of inventories.
    pub raw: PathBuf,
    /// One citation per inventory after a header line.
    pub sources: PathBuf,
    /// `name,glottocode` mapping.
    pub languages: PathBuf,
    pub glottolog: Option<PathBuf>,
    /// Replaces the built-in sound catalog.
    pub catalog: Option<PathBuf>,
}

pub fn run(inputs: &PipelineInputs, settings: &PipelineSettings) -> PhonInvResult<Dataset> {
    let catalog = match &inputs.catalog {
        Some(path) => SoundCatalog::load(path)?,
        None => SoundCatalog::builtin()?,
    };
    let glottolog = match &inputs.glottolog {
        Some(path) => GlottologTable::load(path)?,
        None => {
            warn!("No Glottolog catalog given, languages will carry no metadata");
            GlottologTable::default()
        }
    };
    let languages = LanguageTable::load(&inputs.languages, &glottolog)?;
    let raw = RawData::load(&inputs.raw)?;
    let sources = SourceList::load(&inputs.sources)?;

    InventoryBuilder::new(&catalog, languages, settings).build(&raw, &sources)
}
