use serde::{Deserialize, Serialize};

/// One input row: a FIPS-coded country and its average rainfall for the
/// period covered by the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// FIPS 10-4 country code, verbatim from the input
    pub country: String,
    /// Average measurement in millimeters
    pub avg_measurement: f64,
}

/// A measurement joined with its resolved ISO alpha-3 code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMeasurement {
    /// The original measurement row
    pub measurement: Measurement,
    /// ISO alpha-3 code from the reference dataset, `None` when the FIPS
    /// code has no entry there
    pub country_iso: Option<String>,
    /// Display label: the reference name when resolved, otherwise the raw
    /// FIPS code
    pub label: String,
}
