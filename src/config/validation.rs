//! Configuration validation logic
//!
//! Each section validates itself; [`Settings::validate`] runs them in order
//! and stops at the first failure.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings, StorageBackend,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Server host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a `postgres://` or `postgresql://` connection string
    /// - Connection counts must be positive with min <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.is_valid_database_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration sections.
    ///
    /// The `[database]` section is only checked when the Postgres backend
    /// is selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::StorageConfig;

    fn valid_database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/blog".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_server_rejects_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_server_rejects_zero_request_timeout() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "server.request_timeout"));
    }

    #[test]
    fn test_database_requires_url() {
        let err = DatabaseConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "database.url"));
    }

    #[test]
    fn test_database_rejects_non_postgres_scheme() {
        let config = DatabaseConfig {
            url: "mysql://localhost/blog".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(valid_database().validate().is_ok());
    }

    #[test]
    fn test_database_min_cannot_exceed_max() {
        let config = DatabaseConfig {
            min_connections: 20,
            max_connections: 5,
            ..valid_database()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_logger_rejects_unknown_level() {
        let config = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logger_requires_path_when_file_enabled() {
        let config = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: "  ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logger.file.path"));
    }

    #[test]
    fn test_memory_backend_skips_database_validation() {
        let settings = Settings {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
            },
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_postgres_backend_validates_database() {
        let settings = Settings::default();
        assert!(settings.validate().is_err());

        let settings = Settings {
            database: valid_database(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }
}
