//! Search results as seen by fallback methods.

use serde::Serialize;

/// A query proposed in place of the one the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// The proposed query.
    pub text: String,
    /// The proposed query with changed parts highlighted, for display.
    pub snippet: String,
}

impl Suggestion {
    /// Creates a suggestion.
    pub fn new(text: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            snippet: snippet.into(),
        }
    }
}

/// One matching page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    /// Page id.
    pub page_id: u64,
    /// Page title.
    pub title: String,
    /// Relevance score assigned by the backend.
    pub score: f32,
}

/// The response to one backend search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    /// Total number of matches, which may exceed `entries.len()`.
    pub total_hits: u64,
    /// Returned page of matches.
    pub entries: Vec<ResultEntry>,
    /// Correction proposed by the backend's phrase suggester.
    pub phrase_suggestion: Option<Suggestion>,
    /// Query shown to the user as "did you mean".
    pub suggestion_query: Option<String>,
    /// Display form of `suggestion_query`.
    pub suggestion_snippet: Option<String>,
    /// Query these results were actually produced by, when it was rewritten.
    pub rewritten_query: Option<String>,
    /// Display form of `rewritten_query`.
    pub rewritten_query_snippet: Option<String>,
}

impl ResultSet {
    /// Returns true if a "did you mean" suggestion is already attached.
    pub fn has_suggestion(&self) -> bool {
        self.suggestion_query.is_some()
    }

    /// Returns true if these results came from a rewritten query.
    pub fn has_rewritten_query(&self) -> bool {
        self.rewritten_query.is_some()
    }

    /// Returns true if a fallback has already acted on these results.
    pub fn is_revised(&self) -> bool {
        self.has_suggestion() || self.has_rewritten_query()
    }
}
