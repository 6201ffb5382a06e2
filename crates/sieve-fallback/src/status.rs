//! Outcomes of a fallback method.

use std::fmt;

use serde::Serialize;

use crate::result::ResultSet;

/// What a fallback method decided to do.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackStatus {
    /// Leave the results alone.
    NoAction,
    /// Attach a "did you mean" suggestion to the current results.
    SuggestQuery {
        /// The suggested query.
        text: String,
        /// Display form of the suggested query.
        snippet: String,
    },
    /// Show these results instead, produced by a rewritten query.
    ReplaceLocalResults(ResultSet),
}

/// The kind of a [`FallbackStatus`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    /// Nothing changed.
    NoAction,
    /// A suggestion was attached.
    SuggestQuery,
    /// The results were replaced.
    ReplaceLocalResults,
}

impl fmt::Display for FallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoAction => "no action",
            Self::SuggestQuery => "suggest query",
            Self::ReplaceLocalResults => "replace local results",
        };
        write!(f, "{name}")
    }
}

impl FallbackStatus {
    /// Returns the kind of this status.
    pub fn action(&self) -> FallbackAction {
        match self {
            Self::NoAction => FallbackAction::NoAction,
            Self::SuggestQuery { .. } => FallbackAction::SuggestQuery,
            Self::ReplaceLocalResults(_) => FallbackAction::ReplaceLocalResults,
        }
    }

    /// Returns true for [`FallbackStatus::NoAction`].
    pub fn is_no_action(&self) -> bool {
        matches!(self, Self::NoAction)
    }

    /// Writes the status into `results`, returning the results to show.
    pub fn apply(self, mut results: ResultSet) -> ResultSet {
        match self {
            Self::NoAction => results,
            Self::SuggestQuery { text, snippet } => {
                results.suggestion_query = Some(text);
                results.suggestion_snippet = Some(snippet);
                results
            }
            Self::ReplaceLocalResults(replacement) => replacement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_action_leaves_results() {
        let results = ResultSet {
            total_hits: 3,
            ..ResultSet::default()
        };
        assert_eq!(FallbackStatus::NoAction.apply(results.clone()), results);
    }

    #[test]
    fn suggestion_fills_slots() {
        let status = FallbackStatus::SuggestQuery {
            text: "cats".into(),
            snippet: "<em>cats</em>".into(),
        };
        assert_eq!(status.action(), FallbackAction::SuggestQuery);
        let results = status.apply(ResultSet::default());
        assert_eq!(results.suggestion_query.as_deref(), Some("cats"));
        assert_eq!(results.suggestion_snippet.as_deref(), Some("<em>cats</em>"));
        assert!(results.has_suggestion());
        assert!(!results.has_rewritten_query());
    }

    #[test]
    fn replacement_wins() {
        let replacement = ResultSet {
            total_hits: 9,
            rewritten_query: Some("cats".into()),
            ..ResultSet::default()
        };
        let status = FallbackStatus::ReplaceLocalResults(replacement.clone());
        assert!(!status.is_no_action());
        assert_eq!(status.apply(ResultSet::default()), replacement);
    }

    #[test]
    fn action_names() {
        assert_eq!(FallbackAction::ReplaceLocalResults.to_string(), "replace local results");
        assert!(FallbackStatus::NoAction.is_no_action());
    }
}
