use crate::types::{LogLevel, OutputFormat};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dwsd-events")]
#[command(about = "Normalize Legistar meeting records into city-scrapers events", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $DWSD_EVENTS_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "jsonl", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a raw record dump, stopping at the first bad record
    Normalize {
        /// JSON or JSONL dump, or "-" for stdin
        input: String,

        #[arg(
            long,
            help = "Write events here instead of stdout; replaced only when every record normalizes"
        )]
        output: Option<PathBuf>,

        #[arg(
            long,
            value_parser = parse_now,
            help = "Reference time for status (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, agency local time)"
        )]
        now: Option<NaiveDateTime>,
    },

    /// Report which records of a dump normalize and which fail
    Check {
        /// JSON or JSONL dump, or "-" for stdin
        input: String,

        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Print the effective configuration
    Config,
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got '{}'", value))
}
