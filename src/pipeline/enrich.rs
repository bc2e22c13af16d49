//! FIPS to ISO alpha-3 enrichment of the measurement table.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::countries::CountryIndex;
use crate::types::{EnrichedMeasurement, Measurement};

/// Counts of how resolution went for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    pub resolved: usize,
    pub unmatched: usize,
}

/// Resolve every measurement's FIPS code against `index`.
///
/// Produces exactly one enriched row per input row, in input order. Codes
/// the dataset does not know are kept with `country_iso` set to `None`
/// and logged as warnings; rows are never dropped.
pub fn enrich_measurements(
    index: &CountryIndex,
    measurements: &[Measurement],
) -> (Vec<EnrichedMeasurement>, EnrichmentSummary) {
    let mut enriched = Vec::with_capacity(measurements.len());
    let mut summary = EnrichmentSummary::default();

    for measurement in measurements {
        let record = index.lookup_fips(&measurement.country);
        match record {
            Some(_) => summary.resolved += 1,
            None => {
                summary.unmatched += 1;
                warn!(fips = %measurement.country, "no reference entry for FIPS code");
            }
        }

        enriched.push(EnrichedMeasurement {
            measurement: measurement.clone(),
            country_iso: record.map(|r| r.iso3.clone()),
            label: record
                .map(|r| r.name.clone())
                .unwrap_or_else(|| measurement.country.clone()),
        });
    }

    (enriched, summary)
}
