// Measurement processing pipeline: ingest, enrich, summarize, render

pub mod enrich;
pub mod ingest;
pub mod render;
pub mod stats;

use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::countries::CountryIndex;
use crate::error::Result;

/// One-shot run over a measurement CSV.
///
/// Stages run strictly in order with no retry logic: load the table,
/// resolve country codes, log the column summary, write the artifact.
pub struct Pipeline<'a> {
    config: &'a Config,
    countries: &'a CountryIndex,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, countries: &'a CountryIndex) -> Self {
        Self { config, countries }
    }

    /// Run the full pipeline and return the artifact path.
    pub fn run(&self) -> Result<PathBuf> {
        let measurements = ingest::load_measurements(&self.config.input.path)?;

        let (enriched, enrichment) = enrich::enrich_measurements(self.countries, &measurements);
        info!(
            resolved = enrichment.resolved,
            unmatched = enrichment.unmatched,
            "resolved country codes"
        );

        if let Some(summary) = stats::summarize(&measurements) {
            info!(
                count = summary.count,
                mean = summary.mean,
                min = summary.min,
                max = summary.max,
                "measurement column summary"
            );
        }

        let output = self.config.output.path.clone();
        render::render(
            &enriched,
            &self.config.map,
            self.config.output.format,
            &output,
        )?;
        Ok(output)
    }
}
