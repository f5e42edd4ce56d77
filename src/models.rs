//! Core data structures and types for Climate TRACE processing.
//!
//! Defines table kinds, schema versions, the gas and year selectors accepted
//! by the readers, and processing statistics.

use crate::constants::{CONFIDENCE_ENTRY_SUFFIX, SOURCES_ENTRY_SUFFIX};
use crate::vocab::Gas;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kinds of CSV tables found in the sector packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Per-asset emissions (`*_emissions_sources.csv`)
    Sources,
    /// Confidence levels matching a sources table
    Confidence,
    /// National aggregates (`*_country_emissions.csv`)
    Country,
}

impl TableKind {
    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Sources => "sources",
            TableKind::Confidence => "confidence",
            TableKind::Country => "country",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upstream release generations with distinct column sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// 2023 release: no sector/subsector, country tables keyed by
    /// original inventory sector
    V2,
    /// 2024 release: sector and subsector on every table
    V3,
}

/// Which gases to read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GasSelector {
    /// Every gas with published packages
    #[default]
    All,
    One(Gas),
    Many(Vec<Gas>),
}

impl From<Gas> for GasSelector {
    fn from(gas: Gas) -> Self {
        GasSelector::One(gas)
    }
}

impl From<Vec<Gas>> for GasSelector {
    fn from(gases: Vec<Gas>) -> Self {
        GasSelector::Many(gases)
    }
}

impl From<&[Gas]> for GasSelector {
    fn from(gases: &[Gas]) -> Self {
        GasSelector::Many(gases.to_vec())
    }
}

/// Which years to read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearSelector {
    /// Every year of the release
    #[default]
    All,
    One(i32),
    Many(Vec<i32>),
}

impl From<i32> for YearSelector {
    fn from(year: i32) -> Self {
        YearSelector::One(year)
    }
}

impl From<Vec<i32>> for YearSelector {
    fn from(years: Vec<i32>) -> Self {
        YearSelector::Many(years)
    }
}

impl From<Option<i32>> for YearSelector {
    fn from(year: Option<i32>) -> Self {
        year.map_or(YearSelector::All, YearSelector::One)
    }
}

/// A sources CSV entry and its confidence companion inside one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntryPair {
    pub sources: String,
    pub confidence: String,
}

impl SourceEntryPair {
    /// Pair a sources entry with the confidence entry of the same subsector
    pub fn from_sources_entry(sources: &str) -> Self {
        Self {
            sources: sources.to_string(),
            confidence: sources.replace(SOURCES_ENTRY_SUFFIX, CONFIDENCE_ENTRY_SUFFIX),
        }
    }

    /// Entry name without directory and extension, e.g. `cement_emissions_sources`
    pub fn stem(&self) -> String {
        let name = self.sources.rsplit('/').next().unwrap_or(&self.sources);
        name.trim_end_matches(".csv").to_string()
    }
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub total_rows: usize,
    pub output_paths: Vec<PathBuf>,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_entry_pair() {
        let pair = SourceEntryPair::from_sources_entry("DATA/power/electricity-generation_emissions_sources.csv");
        assert_eq!(
            pair.confidence,
            "DATA/power/electricity-generation_emissions_sources_confidence.csv"
        );
        assert_eq!(pair.stem(), "electricity-generation_emissions_sources");
    }

    #[test]
    fn test_selectors_from() {
        assert_eq!(GasSelector::from(Gas::Co2), GasSelector::One(Gas::Co2));
        assert_eq!(YearSelector::from(None), YearSelector::All);
        assert_eq!(YearSelector::from(Some(2022)), YearSelector::One(2022));
    }
}
