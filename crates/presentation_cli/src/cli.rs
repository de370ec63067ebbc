//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use infrastructure::OutputFormat;

/// Weather contest CLI
#[derive(Debug, Parser)]
#[command(name = "weather-contest")]
#[command(author, version, about = "ECMWF vs GFS forecast contest report", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to config.toml if present)
    #[arg(short, long, global = true, env = "WEATHER_CONTEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch both models for every station and print the reconciled report
    ///
    /// Example: weather-contest forecast --format html --output dashboard.html
    Forecast {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat an empty model series as unavailable instead of zero
        #[arg(long)]
        strict: bool,
    },

    /// List registered stations and their regions
    Stations,

    /// Print the effective configuration as TOML
    Config,
}

/// Report format accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned table and text bar charts
    Text,
    /// Standalone HTML dashboard
    Html,
    /// Unrounded report as JSON
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Html => Self::Html,
            Format::Json => Self::Json,
        }
    }
}
