use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Diesel surfaces the Postgres SQLSTATE as a [`DatabaseErrorKind`]; this
/// converter turns the kinds the API cares about into typed variants and
/// keeps the raw message for everything else.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();
        // The key/value pair lives in the DETAIL line, not the primary message
        let full_message = match info.details() {
            Some(details) => format!("{}\nDETAIL: {}", message, details),
            None => message.to_string(),
        };

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                match ConstraintParser::parse_unique_violation(&full_message, constraint_name) {
                    Some((entity, field, value)) => AppError::Duplicate {
                        entity,
                        field,
                        value,
                        message: message.to_string(),
                    },
                    None => Self::raw(operation, message),
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                if let Some(restricted) =
                    ConstraintParser::parse_restricted_delete(&full_message, constraint_name)
                {
                    return AppError::RestrictViolation {
                        entity: restricted.parent,
                        message: message.to_string(),
                    };
                }

                match ConstraintParser::parse_foreign_key_violation(&full_message, constraint_name) {
                    Some((entity, field, value)) => AppError::ReferenceViolation {
                        entity,
                        field,
                        value,
                    },
                    None => Self::raw(operation, message),
                }
            }
            _ => Self::raw(operation, message),
        }
    }

    fn raw(operation: &str, message: &str) -> AppError {
        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(message.to_string()),
        }
    }
}
