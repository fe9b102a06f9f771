//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Environment;

/// HTTP API for users, posts, categories and comments
#[derive(Parser, Debug)]
#[command(name = "blog-api")]
#[command(about = "HTTP API for users, posts, categories and comments")]
#[command(long_about = "
blog-api serves a JSON CRUD API over PostgreSQL or an in-memory store.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    blog-api serve

    # Bind to all interfaces on port 8080
    blog-api serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    blog-api --config /etc/blog-api/production.toml serve

    # Check configuration without starting the server
    blog-api serve --dry-run

    # Apply, preview or revert database migrations
    blog-api migrate
    blog-api migrate --dry-run
    blog-api migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load this TOML file instead of the layered configuration directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Environment whose `{env}.toml` layer is loaded (overrides BLOG_APP_ENV)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, e.g. 127.0.0.1 or 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// TCP port to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level for this run; takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate the configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, preview or revert the embedded database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the given number of most recent migrations (1-100)
        #[arg(long, value_name = "STEPS", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["blog-api", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_subcommand_defaults() {
        let cli = Cli::try_parse_from(["blog-api"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
        assert!(!cli.verbose && !cli.quiet);
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "blog-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warning",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                dry_run,
            }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert_eq!(log_level, Some(LogLevel::Warn));
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["blog-api", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
    }

    #[test]
    fn test_migrate_flags_conflict() {
        let err = Cli::try_parse_from(["blog-api", "migrate", "--dry-run", "--rollback", "2"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["blog-api", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_validate_rejects_constructed_conflict() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(1),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        assert!(cli.validate().is_err());
    }
}
