//! Recoverable issues reported alongside a successful parse.

use std::fmt;

use serde::Serialize;

/// Message keys emitted by this crate.
pub mod keys {
    /// A list-valued keyword had more entries than its cap. Args: keyword, cap.
    pub const TOO_MANY_CONDITIONS: &str = "feature-too-many-conditions";
    /// `pageid:` entries that are not decimal integers. Args: entries, count.
    pub const PAGEID_INVALID_ID: &str = "feature-pageid-invalid-id";
    /// `articletopic:` entries outside the topic taxonomy. Args: entries, count.
    pub const ARTICLETOPIC_INVALID_TOPIC: &str = "feature-articletopic-invalid-topic";
    /// A file numeric keyword whose value is not a number or range. Args: keyword, value.
    pub const FILE_NUMERIC_NOT_A_NUMBER: &str = "file-numeric-feature-not-a-number";
}

/// A non-fatal issue found while parsing or rewriting a query.
///
/// Warnings are a message key plus positional arguments. Rendering them for users is left
/// to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Message key identifying the kind of issue.
    pub key: String,
    /// Positional message arguments.
    pub args: Vec<String>,
}

impl Warning {
    /// Creates a warning from a message key and its arguments.
    pub fn new<I, S>(key: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}: {}", self.key, self.args.join(", "))
        }
    }
}

/// Sink for warnings raised during a single parse or fallback evaluation.
pub trait WarningCollector {
    /// Records a warning.
    fn add_warning(&mut self, warning: Warning);
}

impl WarningCollector for Vec<Warning> {
    fn add_warning(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Collects warnings in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningList {
    /// Warnings collected so far.
    warnings: Vec<Warning>,
}

impl WarningList {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no warnings were collected.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Returns the number of collected warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Returns the collected warnings.
    pub fn as_slice(&self) -> &[Warning] {
        &self.warnings
    }

    /// Consumes the collector, returning its warnings.
    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }
}

impl WarningCollector for WarningList {
    fn add_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_args() {
        let warning = Warning::new(keys::TOO_MANY_CONDITIONS, ["pageid", "1000"]);
        assert_eq!(
            warning.to_string(),
            "feature-too-many-conditions: pageid, 1000"
        );
    }

    #[test]
    fn display_without_args() {
        let warning = Warning::new("something", Vec::<String>::new());
        assert_eq!(warning.to_string(), "something");
    }

    #[test]
    fn list_keeps_order() {
        let mut list = WarningList::new();
        assert!(list.is_empty());
        list.add_warning(Warning::new("a", ["1"]));
        list.add_warning(Warning::new("b", ["2"]));
        assert_eq!(list.len(), 2);
        let keys: Vec<_> = list.into_vec().into_iter().map(|w| w.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn vec_is_a_collector() {
        let mut sink: Vec<Warning> = Vec::new();
        let collector: &mut dyn WarningCollector = &mut sink;
        collector.add_warning(Warning::new("k", ["v"]));
        assert_eq!(sink.len(), 1);
    }
}
