//! Error types for query parsing and keyword registration.

use thiserror::Error;

use crate::warning::Warning;

/// Message key for a query over the length limit.
const QUERY_TOO_LONG: &str = "query-too-long";

/// Message key for a query over the length limit after keyword exemptions were subtracted.
const QUERY_TOO_LONG_WITH_EXEMPTIONS: &str = "query-too-long-with-exemptions";

/// The query is longer than the parser accepts.
///
/// This is the only condition that aborts a parse. Lengths are counted in characters
/// (Unicode scalar values), not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query is {length} characters long, which exceeds the limit of {limit}")]
pub struct QueryTooLong {
    /// Length that was compared against the limit.
    ///
    /// When `exemptions_applied` is set this is the length left after exempt keyword
    /// clauses were subtracted.
    pub length: usize,
    /// The limit that was exceeded.
    pub limit: usize,
    /// Whether exempt keyword clauses were subtracted before the comparison.
    pub exemptions_applied: bool,
}

impl QueryTooLong {
    /// Returns the message key describing this failure.
    pub fn message_key(&self) -> &'static str {
        if self.exemptions_applied {
            QUERY_TOO_LONG_WITH_EXEMPTIONS
        } else {
            QUERY_TOO_LONG
        }
    }

    /// Converts the failure into a presentable message key with its arguments.
    pub fn to_warning(&self) -> Warning {
        Warning::new(
            self.message_key(),
            [self.length.to_string(), self.limit.to_string()],
        )
    }
}

/// Errors raised while assembling a keyword registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two features claim the same keyword.
    #[error("keyword '{keyword}' from {second} is already registered by {first}")]
    DuplicateKeyword {
        /// The contested keyword, lowercased.
        keyword: String,
        /// Source that registered the keyword first.
        first: String,
        /// Source that tried to register it again.
        second: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_long_display() {
        let err = QueryTooLong {
            length: 301,
            limit: 300,
            exemptions_applied: false,
        };
        assert_eq!(
            err.to_string(),
            "query is 301 characters long, which exceeds the limit of 300"
        );
    }

    #[test]
    fn too_long_message_key_reflects_exemptions() {
        let mut err = QueryTooLong {
            length: 11,
            limit: 10,
            exemptions_applied: false,
        };
        assert_eq!(err.message_key(), "query-too-long");
        err.exemptions_applied = true;
        assert_eq!(err.message_key(), "query-too-long-with-exemptions");
    }

    #[test]
    fn too_long_warning_carries_numbers() {
        let err = QueryTooLong {
            length: 11,
            limit: 10,
            exemptions_applied: true,
        };
        let warning = err.to_warning();
        assert_eq!(warning.key, "query-too-long-with-exemptions");
        assert_eq!(warning.args, vec!["11", "10"]);
    }

    #[test]
    fn duplicate_keyword_display() {
        let err = RegistryError::DuplicateKeyword {
            keyword: "pageid".into(),
            first: "builtin".into(),
            second: "extension".into(),
        };
        let display = err.to_string();
        assert!(display.contains("pageid"));
        assert!(display.contains("builtin"));
        assert!(display.contains("extension"));
    }
}
