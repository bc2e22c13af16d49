//! Summary statistics over the measurement column.

use serde::Serialize;

use crate::types::{EnrichedMeasurement, Measurement};

/// Aggregate statistics for one measurement table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Arithmetic mean plus range over the measurement column, `None` for an
/// empty table.
pub fn summarize(measurements: &[Measurement]) -> Option<MeasurementSummary> {
    if measurements.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for measurement in measurements {
        let value = measurement.avg_measurement;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    Some(MeasurementSummary {
        count: measurements.len(),
        mean: sum / measurements.len() as f64,
        min,
        max,
    })
}

/// Rows whose resolved ISO code equals `iso3`, for per-country diagnostics.
pub fn filter_by_iso<'a>(
    enriched: &'a [EnrichedMeasurement],
    iso3: &str,
) -> Vec<&'a EnrichedMeasurement> {
    enriched
        .iter()
        .filter(|e| e.country_iso.as_deref() == Some(iso3))
        .collect()
}
