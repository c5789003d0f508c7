//! Turns raw inventories into the language, inventory, parameter and value tables.

mod records;

pub use records::*;

use crate::config::{MissingLanguagePolicy, PipelineSettings};
use crate::identifier::compute_id;
use crate::languages::{LanguageRecord, LanguageTable};
use crate::normalize::{is_marginal, normalize};
use crate::raw::{language_key, RawData, RawInventory};
use crate::sources::SourceList;
use crate::transcription::TranscriptionResolver;
use crate::{PhonInvError, PhonInvResult};
use itertools::Itertools;
use log::{info, warn};

/// Everything one run produces. Unknown graphemes are kept for auditing and
/// are not a table of their own.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub languages: Vec<LanguageRecord>,
    pub inventories: Vec<InventoryRecord>,
    pub parameters: Vec<ParameterRecord>,
    pub values: Vec<ValueRecord>,
    pub unknowns: UnknownLog,
}

pub struct InventoryBuilder<'a> {
    resolver: &'a dyn TranscriptionResolver,
    settings: &'a PipelineSettings,
    languages: LanguageTable,
    inventories: Vec<InventoryRecord>,
    parameters: Vec<ParameterRecord>,
    values: Vec<ValueRecord>,
    unknowns: UnknownLog,
    counter: usize,
}

impl<'a> InventoryBuilder<'a> {
    pub fn new(
        resolver: &'a dyn TranscriptionResolver,
        languages: LanguageTable,
        settings: &'a PipelineSettings,
    ) -> Self {
        Self {
            resolver,
            settings,
            languages,
            inventories: vec![],
            parameters: vec![],
            values: vec![],
            unknowns: UnknownLog::default(),
            counter: 1,
        }
    }

    /// Processes every inventory in source order. Citations are taken from
    /// `sources` by position.
    pub fn build(mut self, raw: &RawData, sources: &SourceList) -> PhonInvResult<Dataset> {
        sources.check_alignment(raw.len())?;
        for (idx, (label, inventory)) in raw.inventories.iter().enumerate() {
            self.add_inventory(idx, label, inventory, sources.get(idx)?)?;
        }
        Ok(self.finish())
    }

    fn add_inventory(
        &mut self,
        idx: usize,
        label: &str,
        inventory: &RawInventory,
        source: &str,
    ) -> PhonInvResult<()> {
        let key = language_key(label);
        let language_id = match self.languages.language_id(&key) {
            Some(id) => id.to_string(),
            None => match self.settings.missing_language {
                MissingLanguagePolicy::Skip => {
                    warn!("No language mapping for '{}', skipping inventory '{}'", key, label);
                    return Ok(());
                }
                MissingLanguagePolicy::NullFill => {
                    warn!("No language mapping for '{}', adding it without metadata", key);
                    self.languages.language_id_or_insert(&key)
                }
                MissingLanguagePolicy::Fail => return Err(PhonInvError::MissingLanguage(key)),
            },
        };

        let contribution_id = (idx + 1).to_string();
        self.inventories.push(InventoryRecord {
            id: contribution_id.clone(),
            name: label.to_string(),
            language_id: language_id.clone(),
            source: source.to_string(),
            tones: inventory.tones(&self.settings.tone_separator),
        });
        for segment in inventory.segments() {
            self.add_segment(segment, &key, &language_id, source, &contribution_id);
        }
        Ok(())
    }

    fn add_segment(
        &mut self,
        segment: &str,
        language_key: &str,
        language_id: &str,
        source: &str,
        contribution_id: &str,
    ) {
        let marginal = is_marginal(segment);
        let normalized = normalize(segment);
        let resolution = self.resolver.resolve(&normalized);
        let prefix = if resolution.is_resolved() {
            &self.settings.resolved_prefix
        } else {
            self.unknowns.record(&normalized, segment, language_key);
            &self.settings.unresolved_prefix
        };
        let parameter_id = format!("{}_{}", prefix, compute_id(&normalized));

        self.parameters.push(ParameterRecord {
            id: parameter_id.clone(),
            name: normalized.clone(),
            symbol: resolution.symbol().to_string(),
            description: resolution.description().to_string(),
        });
        self.values.push(ValueRecord {
            id: self.counter.to_string(),
            language_id: language_id.to_string(),
            parameter_id,
            value: normalized,
            value_in_source: segment.to_string(),
            marginal,
            source: source.to_string(),
            contribution_id: contribution_id.to_string(),
        });
        self.counter += 1;
    }

    fn finish(self) -> Dataset {
        let parameters = self.parameters.into_iter().unique().collect::<Vec<_>>();
        info!(
            "Built {} values over {} parameters from {} inventories",
            self.values.len(),
            parameters.len(),
            self.inventories.len()
        );
        if !self.unknowns.is_empty() {
            warn!(
                "{} graphemes ({} occurrences) could not be resolved: {}",
                self.unknowns.len(),
                self.unknowns.occurrences(),
                self.unknowns.graphemes().join(" ")
            );
        }
        Dataset {
            languages: self.languages.into_records(),
            inventories: self.inventories,
            parameters,
            values: self.values,
            unknowns: self.unknowns,
        }
    }
}
