//! Applies command-line overrides on top of file and environment configuration.
//!
//! Precedence, lowest first: configuration files, `BLOG_*` variables,
//! global flags (`--verbose`/`--quiet`), subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the unvalidated base configuration selected by `--config` and `--env`.
    ///
    /// Validation is deferred to [`merge_cli_args`](Self::merge_cli_args) so a
    /// flag can repair a value the files got wrong.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(env) = cli.env {
            loader = loader.with_environment(env);
        }
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Returns the base configuration with every override applied, validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use clap::Parser;

    fn memory_config() -> Settings {
        let mut config = Settings::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(memory_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_new_keeps_base_config() {
        let merger = ConfigurationMerger::new(memory_config());
        assert_eq!(merger.config(), &memory_config());
    }

    #[test]
    fn test_verbose_and_quiet_set_level() {
        assert_eq!(merge(&["blog-api", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["blog-api", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides_address() {
        let config = merge(&["blog-api", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(config.server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_command_log_level_beats_global_flag() {
        let config = merge(&["blog-api", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(config.logger.level, "warn");
    }

    #[test]
    fn test_merged_config_is_validated() {
        let cli = Cli::try_parse_from(["blog-api", "serve"]).unwrap();
        // Postgres backend with no database URL.
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "database.url"
        ));
    }
}
