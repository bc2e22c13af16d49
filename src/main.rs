use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use rainmap::config::{Config, OutputFormat};
use rainmap::countries::{self, CountryIndex};
use rainmap::logging::init_logging;
use rainmap::pipeline::{enrich, ingest, stats, Pipeline};

#[derive(Parser)]
#[command(name = "rainmap")]
#[command(about = "Per-country rainfall choropleth map builder")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the choropleth from a measurement CSV
    Render {
        /// Measurement CSV path (overrides config)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Artifact path (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Artifact format (overrides config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Map title (overrides config)
        #[arg(long)]
        title: Option<String>,
        /// Config file path (default: config.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Alternate country reference dataset (JSON)
        #[arg(long)]
        countries: Option<PathBuf>,
    },
    /// Print summary statistics for a measurement CSV
    Stats {
        /// Measurement CSV path (overrides config)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Also print the rows resolving to this ISO alpha-3 code
        #[arg(long)]
        country: Option<String>,
        /// Config file path (default: config.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Alternate country reference dataset (JSON)
        #[arg(long)]
        countries: Option<PathBuf>,
    },
    /// Resolve FIPS codes against the reference dataset
    Resolve {
        /// FIPS codes to resolve
        #[arg(required = true)]
        codes: Vec<String>,
        /// Alternate country reference dataset (JSON)
        #[arg(long)]
        countries: Option<PathBuf>,
    },
    /// List the reference dataset entries
    Countries {
        /// Alternate country reference dataset (JSON)
        #[arg(long)]
        countries: Option<PathBuf>,
    },
}

/// Bundled dataset unless an alternate file was given on the command line.
fn load_index(path: Option<&Path>) -> rainmap::error::Result<CountryIndex> {
    match path {
        Some(path) => CountryIndex::from_path(path),
        None => Ok(countries::bundled().clone()),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            title,
            config,
            countries,
        } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(input) = input {
                config.input.path = input;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if let Some(title) = title {
                config.map.title = title;
            }

            let index = load_index(countries.as_deref())?;
            let artifact = Pipeline::new(&config, &index).run()?;
            println!("🗺️  Wrote {}", artifact.display());
        }
        Commands::Stats {
            input,
            country,
            config,
            countries,
        } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(input) = input {
                config.input.path = input;
            }

            let index = load_index(countries.as_deref())?;
            run_stats(&config.input.path, &index, country.as_deref())?;
        }
        Commands::Resolve { codes, countries } => {
            let index = load_index(countries.as_deref())?;
            for code in &codes {
                match index.lookup_fips(code) {
                    Some(record) => println!("{} -> {} ({})", code, record.iso3, record.name),
                    None => println!("{} -> no match", code),
                }
            }
        }
        Commands::Countries { countries } => {
            let index = load_index(countries.as_deref())?;
            for record in index.records() {
                let fips = record.fips.as_deref().unwrap_or("-");
                println!("{:>4}  {}  {}", fips, record.iso3, record.name);
            }
            println!("\n📋 {} reference entries", index.len());
        }
    }

    Ok(())
}

fn run_stats(input: &Path, index: &CountryIndex, country: Option<&str>) -> anyhow::Result<()> {
    let measurements = ingest::load_measurements(input)?;

    match stats::summarize(&measurements) {
        Some(summary) => {
            println!("📊 Measurement summary for '{}'", input.display());
            println!("  rows: {}", summary.count);
            println!("  mean: {:.2}", summary.mean);
            println!("  min:  {:.2}", summary.min);
            println!("  max:  {:.2}", summary.max);
        }
        None => {
            println!("📊 '{}' has no measurement rows", input.display());
            return Ok(());
        }
    }

    if let Some(iso3) = country {
        let (enriched, _) = enrich::enrich_measurements(index, &measurements);
        let hits = stats::filter_by_iso(&enriched, iso3);
        if hits.is_empty() {
            println!("\nNo rows resolve to {}", iso3);
        } else {
            println!("\nRows resolving to {}:", iso3);
            for row in hits {
                println!(
                    "  {}  {}  {:.2}",
                    row.measurement.country, row.label, row.measurement.avg_measurement
                );
            }
        }
    }

    Ok(())
}
