//! Command-line interface: argument parsing, configuration merging and
//! subcommand dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, LogLevel};

use crate::config::Settings;
use crate::config::error::ConfigError;
use crate::logger::init_logger;

/// Loads configuration files, then applies and validates command-line overrides.
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigurationMerger::from_cli(cli)?.merge_cli_args(cli)
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)?;
    Ok(())
}
