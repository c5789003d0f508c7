//! Per-inventory source citations, one per line after a header line.

use crate::{PhonInvError, PhonInvResult};
use log::info;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceList {
    citations: Vec<String>,
}

impl SourceList {
    /// Blank lines inside the list keep their position; trailing ones are dropped.
    pub fn parse(text: &str) -> Self {
        let mut citations = text
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect::<Vec<_>>();
        while citations.last().is_some_and(|c| c.trim().is_empty()) {
            citations.pop();
        }
        Self { citations }
    }

    pub fn load(path: &Path) -> PhonInvResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| PhonInvError::io(path, e))?;
        let sources = Self::parse(&text);
        info!("Read {} source citations from {}", sources.len(), path.display());
        Ok(sources)
    }

    pub fn len(&self) -> usize {
        self.citations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }

    /// Citations are matched to inventories by position, so the counts must agree.
    pub fn check_alignment(&self, inventories: usize) -> PhonInvResult<()> {
        if self.citations.len() != inventories {
            return Err(PhonInvError::SourceAlignment {
                sources: self.citations.len(),
                languages: inventories,
            });
        }
        Ok(())
    }

    pub fn get(&self, idx: usize) -> PhonInvResult<&str> {
        self.citations
            .get(idx)
            .map(String::as_str)
            .ok_or(PhonInvError::SourceAlignment {
                sources: self.citations.len(),
                languages: idx + 1,
            })
    }
}
