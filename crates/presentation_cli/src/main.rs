//! Weather contest CLI
//!
//! One-shot report generation from the command line.

#![allow(clippy::print_stdout)]

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use application::ForecastService;
use chrono::Utc;
use clap::Parser;
use domain::MissingDataPolicy;
use infrastructure::{
    AppConfig, ContestSettings, LogFormat, OpenMeteoForecastAdapter, OutputFormat,
    TemplateEngine, init_tracing,
};
use tracing::{info, warn};

use crate::cli::{Cli, Commands};

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(log_filter_from_verbosity(cli.verbose), LogFormat::Text)?;

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Forecast {
            format,
            output,
            strict,
        } => run_forecast(&config, format.into(), output, strict).await?,

        Commands::Stations => {
            let settings = config.contest_settings()?;
            print!("{}", station_listing(&settings));
        },

        Commands::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

async fn run_forecast(
    config: &AppConfig,
    format: OutputFormat,
    output: Option<PathBuf>,
    strict: bool,
) -> anyhow::Result<()> {
    let mut settings = config.contest_settings()?;
    if strict {
        settings.rules.missing_data = MissingDataPolicy::Strict;
    }

    let adapter = OpenMeteoForecastAdapter::with_config(config.weather.client_config())?;
    let service = ForecastService::new(
        Arc::new(adapter),
        Arc::new(settings.registry),
        settings.regions,
    )
    .with_rules(settings.rules)
    .with_rounding(settings.rounding)
    .with_concurrency(config.weather.fetch_concurrency);

    let window = config.window.resolve(Utc::now())?;
    let report = service.build_report(window).await;
    if report.is_empty() {
        warn!("No station returned forecast data");
    }

    let rendered = TemplateEngine::new()?.render_report(&report, settings.rounding, format)?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            info!(path = %path.display(), %format, "Report written");
        },
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Registry listing with each station's coordinates and regions
fn station_listing(settings: &ContestSettings) -> String {
    let width = settings
        .registry
        .names()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("Stations ({})\n", settings.registry.len());
    for station in &settings.registry {
        let regions: Vec<&str> = settings
            .regions
            .iter()
            .filter(|region| region.subset.includes(station.name()))
            .map(|region| region.name.as_str())
            .collect();
        out += &format!(
            "  {:<width$}  {:>8.4} {:>9.4}  {}\n",
            station.name(),
            station.location().latitude(),
            station.location().longitude(),
            regions.join(", ")
        );
    }

    out += &format!("\nRegions ({})\n", settings.regions.len());
    for region in &settings.regions {
        let members = region.subset.members(&settings.registry);
        out += &format!(
            "  {} [{}]: {}\n",
            region.name,
            region.label,
            members.join(", ")
        );        if region.rainy_subset != region.subset {
            let rainy = region.rainy_subset.members(&settings.registry);
            out += &format!("    rainy count over: {}\n", rainy.join(", "));
        }
    }
    out
}
