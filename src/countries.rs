//! Country reference dataset and FIPS to ISO alpha-3 resolution.
//!
//! The dataset ships with the binary as a JSON asset and is indexed once
//! per run. Lookups are exact-match: no trimming and no case folding, the
//! dataset's convention is authoritative.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{RainmapError, Result};

/// Bundled reference table, one entry per country or territory.
pub const BUNDLED_DATASET: &str = include_str!("../data/countries.json");

/// One entry of the country reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// FIPS 10-4 code; a few territories have none assigned
    #[serde(default)]
    pub fips: Option<String>,
    /// ISO 3166-1 alpha-3 code
    pub iso3: String,
    /// English display name
    pub name: String,
}

/// FIPS-keyed index over a set of country records.
///
/// When two records carry the same FIPS code the first one in dataset
/// order wins and later duplicates are ignored, which keeps resolution
/// deterministic.
#[derive(Debug, Clone)]
pub struct CountryIndex {
    records: Vec<CountryRecord>,
    by_fips: HashMap<String, usize>,
}

impl CountryIndex {
    pub fn from_records(records: Vec<CountryRecord>) -> Self {
        let mut by_fips = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if let Some(fips) = &record.fips {
                // First occurrence wins
                by_fips.entry(fips.clone()).or_insert(i);
            }
        }
        Self { records, by_fips }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<CountryRecord> = serde_json::from_str(json)?;
        if records.is_empty() {
            return Err(RainmapError::Reference(
                "country dataset contains no entries".to_string(),
            ));
        }
        Ok(Self::from_records(records))
    }

    /// Load an alternate dataset from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RainmapError::Reference(format!(
                "Failed to read country dataset '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Full record for a FIPS code, `None` when the dataset has no entry.
    pub fn lookup_fips(&self, fips: &str) -> Option<&CountryRecord> {
        self.by_fips.get(fips).map(|&i| &self.records[i])
    }

    /// ISO alpha-3 code for a FIPS code, `None` when the dataset has no
    /// entry. Never fabricates a code.
    pub fn resolve_fips(&self, fips: &str) -> Option<&str> {
        self.lookup_fips(fips).map(|record| record.iso3.as_str())
    }

    /// All records, in dataset order.
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

static BUNDLED_INDEX: Lazy<CountryIndex> = Lazy::new(|| {
    // The bundled asset is validated by tests; a parse failure here means
    // a corrupted build
    CountryIndex::from_json(BUNDLED_DATASET).expect("bundled country dataset must parse")
});

/// Process-wide index over the bundled dataset, built on first use.
pub fn bundled() -> &'static CountryIndex {
    &BUNDLED_INDEX
}
