use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::types::OutputFormat;

/// Print the effective config; TOML unless JSON was asked for
pub fn handle(config: &Config, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Jsonl | OutputFormat::Plain => {
            println!("# {}", path.display());
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
