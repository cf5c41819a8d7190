use super::args::{Cli, Commands};
use super::handlers;
use crate::config::{Config, resolve_config_path};
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = Config::load_from(&config_path)?;

    match cli.command {
        Commands::Normalize { input, output, now } => handlers::normalize::handle(
            &input,
            output.as_deref(),
            now,
            config.agency,
            cli.format,
        ),

        Commands::Check { input, now } => {
            handlers::check::handle(&input, now, config.agency, cli.format)
        }

        Commands::Config => handlers::config::handle(&config, &config_path, cli.format),
    }
}
