use crate::config::error::ConfigError;
use crate::error::DatabaseErrorConverter;
use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Storage backends report constraint failures through dedicated variants
/// (`ReferenceViolation`, `RestrictViolation`, `Duplicate`, `NotFound`)
/// instead of vendor error codes, so the HTTP layer can tell a missing
/// foreign key apart from every other failure.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
        /// Storage message, returned to clients unchanged
        message: String,
    },

    /// A written row references a parent row that does not exist
    #[error("Invalid reference: {entity}.{field} = '{value}' does not exist")]
    ReferenceViolation {
        entity: String,
        field: String,
        value: String,
    },

    /// Client-facing form of a reference violation raised on create
    #[error("{message}")]
    InvalidReference { message: String },

    /// A delete was rejected because dependent rows still reference the parent
    #[error("{message}")]
    RestrictViolation { entity: String, message: String },

    /// Request body or path parameters could not be decoded
    #[error("{message}")]
    MalformedInput { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// The underlying failure message, passed to clients verbatim.
    ///
    /// Wrapper variants expose their source rather than the context line.
    pub fn detail(&self) -> String {
        match self {
            AppError::Database { source, .. }
            | AppError::Configuration { source, .. }
            | AppError::ConnectionPool { source }
            | AppError::Internal { source } => source.to_string(),
            AppError::Duplicate { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Replaces a reference violation with a fixed client message.
    ///
    /// Any other error passes through untouched.
    pub fn with_reference_message(self, message: &str) -> Self {
        match self {
            AppError::ReferenceViolation {
                entity,
                field,
                value,
            } => {
                tracing::debug!(%entity, %field, %value, "Rejected write with missing reference");
                AppError::InvalidReference {
                    message: message.to_string(),
                }
            }
            other => other,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<PoolError> for AppError {
    fn from(error: PoolError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::anyhow!("{}", error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_exposes_source_message() {
        let error = AppError::Database {
            operation: "insert user".to_string(),
            source: anyhow::anyhow!("relation \"users\" does not exist"),
        };
        assert_eq!(error.to_string(), "Database operation failed: insert user");
        assert_eq!(error.detail(), "relation \"users\" does not exist");
    }

    #[test]
    fn test_duplicate_detail_is_storage_message() {
        let error = AppError::Duplicate {
            entity: "users".to_string(),
            field: "email".to_string(),
            value: "a@b.c".to_string(),
            message: "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Duplicate entry: users.email = 'a@b.c' already exists"
        );
        assert_eq!(
            error.detail(),
            "duplicate key value violates unique constraint \"users_email_key\""
        );
    }

    #[test]
    fn test_with_reference_message_replaces_reference_violation() {
        let error = AppError::ReferenceViolation {
            entity: "posts".to_string(),
            field: "author_id".to_string(),
            value: "42".to_string(),
        }
        .with_reference_message("Invalid authorId or categoryId.");

        match error {
            AppError::InvalidReference { message } => {
                assert_eq!(message, "Invalid authorId or categoryId.")
            }
            other => panic!("Expected InvalidReference, got: {:?}", other),
        }
    }

    #[test]
    fn test_with_reference_message_keeps_other_errors() {
        let error = AppError::NotFound {
            entity: "post".to_string(),
            field: "id".to_string(),
            value: "7".to_string(),
        }
        .with_reference_message("unused");

        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[test]
    fn test_config_error_conversion_keeps_field() {
        let error: AppError = ConfigError::validation("server.port", "bad").into();
        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration, got: {:?}", other),
        }
    }
}
