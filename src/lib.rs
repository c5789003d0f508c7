#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod identifier;
pub mod inventory;
pub mod languages;
pub mod normalize;
pub mod pipeline;
mod raw_data;
pub mod raw;
pub mod sounds;
pub mod sources;
pub mod transcription;
pub mod writer;

pub use config::{MissingLanguagePolicy, PipelineSettings};
pub use identifier::compute_id;
pub use inventory::{Dataset, InventoryBuilder};
pub use normalize::{is_marginal, normalize};
pub use pipeline::{run, PipelineInputs};
pub use transcription::{Resolution, SoundCatalog, TranscriptionResolver};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhonInvError {
    #[error("failed to read or write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed raw inventory data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("source list has {sources} entries but raw data has {languages} inventories")]
    SourceAlignment { sources: usize, languages: usize },
    #[error("no language mapping for '{0}'")]
    MissingLanguage(String),
    #[error("Failed to parse ({0})")]
    GenericParseError(String),
}

pub type PhonInvResult<T> = Result<T, PhonInvError>;

impl PhonInvError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for PhonInvError {
    fn from(value: toml::de::Error) -> Self {
        Self::Config(value.to_string())
    }
}
