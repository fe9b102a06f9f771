use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Postgres reports the offending key and tables inside the human readable
/// message, so the parser pulls them back out with cached regex patterns
/// and falls back to the constraint name (`<table>_<column>_key`,
/// `<table>_<column>_fkey`) when the message is not conclusive.
pub struct ConstraintParser;

/// A foreign key violation raised while deleting a referenced row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictedDelete {
    /// Table the delete was issued against
    pub parent: String,
    /// Table whose rows still reference the parent
    pub dependent: String,
}

struct RegexPatterns {
    key_value: Regex,
    table_name: Regex,
    referenced_from: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (author_id)=(999)"
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("key/value pattern"),
            // First `table "name"` in the message
            table_name: Regex::new(r#"table "([^"]+)""#).expect("table pattern"),
            // `is still referenced from table "posts"`
            referenced_from: Regex::new(r#"referenced from table "([^"]+)""#)
                .expect("referenced-from pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

const RESTRICT_PREFIX: &str = "update or delete on table";

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation into `(entity, field, value)`.
    ///
    /// # Examples
    /// ```ignore
    /// let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(a@b.c) already exists.";
    /// let result = ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
    /// assert_eq!(result, Some(("users".into(), "email".into(), "a@b.c".into())));
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = Self::extract_value_from_message(message)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses an insert-side foreign key violation into
    /// `(entity, field, referenced_value)`.
    ///
    /// Returns `None` for delete-side violations, see
    /// [`ConstraintParser::parse_restricted_delete`].
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if Self::is_restricted_delete(message) {
            return None;
        }

        if let Some((entity, field)) =
            constraint_name.and_then(Self::parse_foreign_key_constraint_name)
        {
            let value = Self::extract_value_from_message(message)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Whether a foreign key message was raised by deleting a parent row
    /// that dependents still reference.
    pub fn is_restricted_delete(message: &str) -> bool {
        message.starts_with(RESTRICT_PREFIX)
    }

    /// Parses a delete-side foreign key violation.
    ///
    /// ```text
    /// update or delete on table "users" violates foreign key constraint
    /// "posts_author_id_fkey" on table "posts"
    /// DETAIL: Key (id)=(1) is still referenced from table "posts".
    /// ```
    pub fn parse_restricted_delete(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<RestrictedDelete> {
        if !Self::is_restricted_delete(message) {
            return None;
        }

        let parent = Self::extract_table_from_message(message)?;
        let dependent = Self::patterns()
            .referenced_from
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .or_else(|| {
                constraint_name
                    .and_then(Self::parse_foreign_key_constraint_name)
                    .map(|(entity, _)| entity)
            })?;

        Some(RestrictedDelete { parent, dependent })
    }

    /// Splits a `<table>_<column>_<suffix>` constraint name.
    ///
    /// - "users_email_key" -> ("users", "email")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let (rest, _suffix) = constraint_name.rsplit_once('_')?;
        let (entity, field) = rest.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Splits a `<table>_<column>_fkey` constraint name.
    ///
    /// - "comments_post_id_fkey" -> ("comments", "post_id")
    pub fn parse_foreign_key_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let without_suffix = constraint_name.strip_suffix("_fkey")?;
        let (entity, field) = without_suffix.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Extracts the first quoted table name from a message.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` detail line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    /// Extracts the offending value, preferring the `Key (..)=(value)`
    /// detail over the first quoted string.
    pub fn extract_value_from_message(message: &str) -> Option<String> {
        if let Some((_, value)) = Self::extract_key_value_from_message(message) {
            return Some(value);
        }

        let start = message.find('"')?;
        let end = message[start + 1..].find('"')?;
        Some(message[start + 1..start + 1 + end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSERT_FK_MESSAGE: &str = "insert or update on table \"posts\" violates foreign key constraint \"posts_author_id_fkey\"\nDETAIL: Key (author_id)=(999) is not present in table \"users\".";
    const DELETE_FK_MESSAGE: &str = "update or delete on table \"users\" violates foreign key constraint \"posts_author_id_fkey\" on table \"posts\"\nDETAIL: Key (id)=(1) is still referenced from table \"posts\".";

    #[test]
    fn test_parse_unique_violation_with_constraint_name() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(test@example.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
        assert_eq!(
            result,
            Some((
                "users".to_string(),
                "email".to_string(),
                "test@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (email)=(a@b.c) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some(("resource".to_string(), "email".to_string(), "a@b.c".to_string()))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let result =
            ConstraintParser::parse_foreign_key_violation(INSERT_FK_MESSAGE, Some("posts_author_id_fkey"));
        assert_eq!(
            result,
            Some(("posts".to_string(), "author_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation_without_constraint_name() {
        let result = ConstraintParser::parse_foreign_key_violation(INSERT_FK_MESSAGE, None);
        assert_eq!(
            result,
            Some(("posts".to_string(), "author_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_delete_side_violation_is_not_a_reference_violation() {
        assert!(ConstraintParser::is_restricted_delete(DELETE_FK_MESSAGE));
        assert!(!ConstraintParser::is_restricted_delete(INSERT_FK_MESSAGE));
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(DELETE_FK_MESSAGE, Some("posts_author_id_fkey")),
            None
        );
    }

    #[test]
    fn test_parse_restricted_delete() {
        let result =
            ConstraintParser::parse_restricted_delete(DELETE_FK_MESSAGE, Some("posts_author_id_fkey"));
        assert_eq!(
            result,
            Some(RestrictedDelete {
                parent: "users".to_string(),
                dependent: "posts".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_restricted_delete_falls_back_to_constraint_name() {
        let message = "update or delete on table \"posts\" violates foreign key constraint";
        let result = ConstraintParser::parse_restricted_delete(message, Some("comments_post_id_fkey"));
        assert_eq!(
            result,
            Some(RestrictedDelete {
                parent: "posts".to_string(),
                dependent: "comments".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            Some(("users".to_string(), "email".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("invalid"), None);
    }

    #[test]
    fn test_parse_foreign_key_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("comments_post_id_fkey"),
            Some(("comments".to_string(), "post_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("posts_category_id_fkey"),
            Some(("posts".to_string(), "category_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("not_a_foreign_key"),
            None
        );
    }

    #[test]
    fn test_extract_value_from_message() {
        assert_eq!(
            ConstraintParser::extract_value_from_message("Key (email)=(x@y.z) already exists"),
            Some("x@y.z".to_string())
        );
        assert_eq!(
            ConstraintParser::extract_value_from_message("error with \"quoted_value\" in it"),
            Some("quoted_value".to_string())
        );
    }

    #[test]
    fn test_regex_patterns_caching() {
        let patterns1 = ConstraintParser::patterns();
        let patterns2 = ConstraintParser::patterns();
        assert!(std::ptr::eq(patterns1, patterns2));
    }

    #[test]
    fn test_graceful_parsing_failures() {
        let message = "completely unrelated error message";
        assert_eq!(ConstraintParser::parse_unique_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_foreign_key_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_restricted_delete(message, None), None);
    }
}
