use anyhow::Result;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

use rainmap::config::{Config, OutputFormat};
use rainmap::countries::{CountryIndex, CountryRecord};
use rainmap::pipeline::Pipeline;

fn fixture_index() -> CountryIndex {
    CountryIndex::from_records(vec![
        CountryRecord {
            fips: Some("SP".to_string()),
            iso3: "ESP".to_string(),
            name: "Spain".to_string(),
        },
        CountryRecord {
            fips: Some("EK".to_string()),
            iso3: "GNQ".to_string(),
            name: "Equatorial Guinea".to_string(),
        },
    ])
}

fn write_input(dir: &std::path::Path) -> std::path::PathBuf {
    let input = dir.join("rainfall.csv");
    fs::write(
        &input,
        "country,avg_measurement\nSP,650.0\nZZ,100.5\nEK,2156.0\n",
    )
    .unwrap();
    input
}

#[test]
fn test_pipeline_renders_json_artifact_with_aligned_triples() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_input(temp_dir.path());
    let output = temp_dir.path().join("map.json");

    let mut config = Config::default();
    config.input.path = input;
    config.output.path = output.clone();
    config.output.format = OutputFormat::Json;

    let index = fixture_index();
    let artifact = Pipeline::new(&config, &index).run()?;
    assert_eq!(artifact, output);

    let figure: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    let trace = &figure["data"][0];

    // One triple per input row, index-aligned
    let locations = trace["locations"].as_array().unwrap();
    let values = trace["z"].as_array().unwrap();
    let labels = trace["text"].as_array().unwrap();
    assert_eq!(locations.len(), 3);
    assert_eq!(values.len(), 3);
    assert_eq!(labels.len(), 3);

    assert_eq!(locations[0], "ESP");
    assert_eq!(values[0], 650.0);
    assert_eq!(labels[0], "Spain");

    // The unknown code is kept as null, not dropped
    assert!(locations[1].is_null());
    assert_eq!(values[1], 100.5);
    assert_eq!(labels[1], "ZZ");

    assert_eq!(locations[2], "GNQ");
    Ok(())
}

#[test]
fn test_pipeline_renders_html_artifact() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_input(temp_dir.path());
    let output = temp_dir.path().join("map.html");

    let mut config = Config::default();
    config.input.path = input;
    config.output.path = output.clone();

    let index = fixture_index();
    Pipeline::new(&config, &index).run()?;

    let page = fs::read_to_string(&output)?;
    assert!(page.contains("Plotly.newPlot"));
    assert!(page.contains("\"choropleth\""));
    assert!(page.contains("ESP"));
    assert!(page.contains("Rainfall MM 2023"));
    Ok(())
}

#[test]
fn test_pipeline_with_bundled_dataset() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_input(temp_dir.path());
    let output = temp_dir.path().join("map.json");

    let mut config = Config::default();
    config.input.path = input;
    config.output.path = output.clone();
    config.output.format = OutputFormat::Json;

    Pipeline::new(&config, rainmap::countries::bundled()).run()?;

    let figure: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(figure["data"][0]["locations"][0], "ESP");
    assert_eq!(figure["data"][0]["locations"][2], "GNQ");
    Ok(())
}

#[test]
fn test_pipeline_fails_on_missing_input() {
    let temp_dir = tempdir().unwrap();

    let mut config = Config::default();
    config.input.path = temp_dir.path().join("missing.csv");
    config.output.path = temp_dir.path().join("map.html");

    let index = fixture_index();
    let result = Pipeline::new(&config, &index).run();
    assert!(result.is_err());
    assert!(!config.output.path.exists());
}
