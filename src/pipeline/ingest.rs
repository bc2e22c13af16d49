//! CSV ingestion for measurement tables.

use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::info;

use crate::error::{RainmapError, Result};
use crate::types::Measurement;

const REQUIRED_COLUMNS: [&str; 2] = ["country", "avg_measurement"];

/// Load the measurement table from a headered CSV file, in input order.
///
/// The file must carry `country` and `avg_measurement` columns; extra
/// columns are ignored. A row that fails to deserialize (missing field,
/// non-numeric measurement) aborts the load with its line number.
pub fn load_measurements(path: &Path) -> Result<Vec<Measurement>> {
    let file = File::open(path).map_err(|e| {
        RainmapError::Input(format!("Failed to open input '{}': {}", path.display(), e))
    })?;

    let mut reader = ReaderBuilder::new().from_reader(file);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(RainmapError::Input(format!(
                "Input '{}' is missing required column '{}'",
                path.display(),
                required
            )));
        }
    }

    let mut measurements = Vec::new();
    for result in reader.deserialize::<Measurement>() {
        let measurement = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            RainmapError::InvalidRow {
                line,
                message: e.to_string(),
            }
        })?;
        measurements.push(measurement);
    }

    info!(rows = measurements.len(), path = %path.display(), "loaded measurement table");
    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_load_happy_path_preserves_order() {
        let file = write_csv("country,avg_measurement\nSP,650.0\nFR,867.0\nZZ,100.5\n");
        let measurements = load_measurements(file.path()).unwrap();

        assert_eq!(measurements.len(), 3);
        assert_eq!(measurements[0].country, "SP");
        assert_eq!(measurements[0].avg_measurement, 650.0);
        assert_eq!(measurements[2].country, "ZZ");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let file = write_csv("country,avg_measurement,year\nSP,650.0,2023\n");
        let measurements = load_measurements(file.path()).unwrap();
        assert_eq!(measurements.len(), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_measurements(Path::new("/nonexistent/rainfall.csv")).unwrap_err();
        assert!(matches!(err, RainmapError::Input(_)));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_csv("country,rainfall\nSP,650.0\n");
        let err = load_measurements(file.path()).unwrap_err();
        assert!(err.to_string().contains("avg_measurement"));
    }

    #[test]
    fn test_non_numeric_measurement_names_the_row() {
        let file = write_csv("country,avg_measurement\nSP,650.0\nFR,lots\n");
        let err = load_measurements(file.path()).unwrap_err();
        match err {
            RainmapError::InvalidRow { line, .. } => assert_eq!(line, 3),
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_table_loads_as_empty() {
        let file = write_csv("country,avg_measurement\n");
        let measurements = load_measurements(file.path()).unwrap();
        assert!(measurements.is_empty());
    }
}
