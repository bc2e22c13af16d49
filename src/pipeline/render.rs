//! Choropleth figure construction and artifact output.
//!
//! The figure is a Plotly-schema JSON document (one choropleth trace plus
//! layout). It is either embedded into a self-contained HTML page that
//! loads the Plotly runtime from its CDN, or written out as raw JSON for
//! downstream tooling.

use chrono::Utc;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::{MapConfig, OutputFormat};
use crate::error::{RainmapError, Result};
use crate::types::EnrichedMeasurement;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// Index-aligned inputs for one choropleth trace.
///
/// `locations[i]`, `values[i]` and `labels[i]` all describe the same row.
/// Unresolved locations stay `None` and serialize to JSON null; what the
/// charting runtime does with them is its concern.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethSpec {
    pub locations: Vec<Option<String>>,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

impl ChoroplethSpec {
    /// Build the trace inputs from an enriched table, one triple per row.
    pub fn from_records(records: &[EnrichedMeasurement]) -> Self {
        let mut locations = Vec::with_capacity(records.len());
        let mut values = Vec::with_capacity(records.len());
        let mut labels = Vec::with_capacity(records.len());
        for record in records {
            locations.push(record.country_iso.clone());
            values.push(record.measurement.avg_measurement);
            labels.push(record.label.clone());
        }
        Self {
            locations,
            values,
            labels,
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Build the Plotly figure document for a spec.
pub fn build_figure(spec: &ChoroplethSpec, map: &MapConfig) -> Value {
    json!({
        "data": [{
            "type": "choropleth",
            "locations": spec.locations,
            "z": spec.values,
            "text": spec.labels,
            "colorscale": map.colorscale,
            "autocolorscale": true,
            "marker": { "line": { "color": map.marker_line_color } },
            "colorbar": { "title": map.colorbar_title },
        }],
        "layout": {
            "title": { "text": map.title },
            "geo": { "showcoastlines": map.show_coastlines },
        },
    })
}

/// Wrap a figure document into a standalone HTML page.
fn html_page(figure: &Value, title: &str) -> Result<String> {
    let payload = serde_json::to_string(figure)?;
    let generated_at = Utc::now().to_rfc3339();
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="generated-at" content="{generated_at}">
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="map" style="width:100%;height:100vh;"></div>
<script>
  const figure = {payload};
  Plotly.newPlot("map", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#
    ))
}

/// Render the enriched table to `path` in the requested format.
pub fn render(
    records: &[EnrichedMeasurement],
    map: &MapConfig,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let spec = ChoroplethSpec::from_records(records);
    if spec.is_empty() {
        return Err(RainmapError::Input(
            "Nothing to render: measurement table is empty".to_string(),
        ));
    }

    let figure = build_figure(&spec, map);
    let artifact = match format {
        OutputFormat::Html => html_page(&figure, &map.title)?,
        OutputFormat::Json => serde_json::to_string_pretty(&figure)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, artifact)?;

    info!(path = %path.display(), rows = spec.len(), "wrote choropleth artifact");
    Ok(())
}
