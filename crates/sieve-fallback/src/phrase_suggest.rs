//! "Did you mean" from the backend's phrase suggester.

use sieve_query::ParsedQuery;
use tracing::{debug, warn};

use crate::{
    context::FallbackContext,
    method::FallbackMethod,
    profile::PhraseSuggestSettings,
    result::Suggestion,
    status::FallbackStatus,
};

/// Approximation reported when a usable suggestion is present.
const SUGGESTION_APPROXIMATION: f32 = 0.5;

/// Turns the phrase suggestion returned with the initial results into a suggestion, and
/// runs it instead of the original query when the original found too little.
#[derive(Debug, Clone)]
pub struct PhraseSuggestFallback {
    /// The query as typed.
    query: String,
    /// Method settings.
    settings: PhraseSuggestSettings,
}

impl PhraseSuggestFallback {
    /// Builds the method for `query`.
    ///
    /// Returns `None` when disabled or when the query has no free text to correct.
    pub fn build(query: &ParsedQuery, settings: PhraseSuggestSettings) -> Option<Self> {
        if !settings.enabled || !query.has_candidate_terms() {
            return None;
        }
        Some(Self {
            query: query.query().to_string(),
            settings,
        })
    }

    /// Returns the backend's suggestion when it is worth acting on.
    fn usable_suggestion<'c>(&self, context: &'c FallbackContext<'_>) -> Option<&'c Suggestion> {
        let initial = context.initial_results();
        if initial.is_revised() {
            return None;
        }
        initial
            .phrase_suggestion
            .as_ref()
            .filter(|suggestion| suggestion.text != self.query)
    }
}

impl FallbackMethod for PhraseSuggestFallback {
    fn name(&self) -> &'static str {
        "phrase_suggest"
    }

    fn success_approximation(&self, context: &FallbackContext<'_>) -> f32 {
        if self.usable_suggestion(context).is_some() {
            SUGGESTION_APPROXIMATION
        } else {
            0.0
        }
    }

    fn rewrite(&self, context: &mut FallbackContext<'_>) -> FallbackStatus {
        let Some(suggestion) = self.usable_suggestion(context).cloned() else {
            return FallbackStatus::NoAction;
        };
        let suggest = FallbackStatus::SuggestQuery {
            text: suggestion.text.clone(),
            snippet: suggestion.snippet.clone(),
        };

        if !self.settings.rewrite
            || context.initial_results().total_hits >= self.settings.rewrite_hits_threshold
        {
            return suggest;
        }

        match context.costly_call(|backend| backend.search(&suggestion.text)) {
            None => suggest,
            Some(Err(err)) => {
                warn!(query = %suggestion.text, error = %err, "rewritten query failed");
                suggest
            }
            Some(Ok(results)) if results.total_hits == 0 => {
                debug!(query = %suggestion.text, "rewritten query found nothing");
                suggest
            }
            Some(Ok(mut results)) => {
                results.rewritten_query = Some(suggestion.text);
                results.rewritten_query_snippet = Some(suggestion.snippet);
                FallbackStatus::ReplaceLocalResults(results)
            }
        }
    }
}
