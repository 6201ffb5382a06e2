//! Suggestions from a lookup index of known good queries.

use sieve_query::ParsedQuery;
use tracing::{debug, warn};

use crate::{
    context::FallbackContext, method::FallbackMethod, profile::IndexLookupSettings,
    status::FallbackStatus,
};

/// Approximation reported when the original query found nothing.
const NO_HITS_APPROXIMATION: f32 = 0.4;

/// Approximation reported when the original query found something.
const SOME_HITS_APPROXIMATION: f32 = 0.1;

/// Asks the backend's lookup index for a better query.
///
/// The lookup itself is a costly call. When the original query found nothing and rewriting is
/// enabled, the looked-up query is run as well, budget permitting.
#[derive(Debug, Clone)]
pub struct IndexLookupFallback {
    /// The query as typed.
    query: String,
    /// Free text of the query, used as the lookup key.
    lookup_key: String,
    /// Method settings.
    settings: IndexLookupSettings,
}

impl IndexLookupFallback {
    /// Builds the method for `query`.
    ///
    /// Returns `None` when disabled or when the query has no free text to look up.
    pub fn build(query: &ParsedQuery, settings: IndexLookupSettings) -> Option<Self> {
        if !settings.enabled || !query.has_candidate_terms() {
            return None;
        }
        Some(Self {
            query: query.query().to_string(),
            lookup_key: query.free_text(),
            settings,
        })
    }
}

impl FallbackMethod for IndexLookupFallback {
    fn name(&self) -> &'static str {
        "index_lookup"
    }

    fn success_approximation(&self, context: &FallbackContext<'_>) -> f32 {
        let initial = context.initial_results();
        if initial.is_revised() || !context.costly_call_allowed() {
            0.0
        } else if initial.total_hits == 0 {
            NO_HITS_APPROXIMATION
        } else {
            SOME_HITS_APPROXIMATION
        }
    }

    fn rewrite(&self, context: &mut FallbackContext<'_>) -> FallbackStatus {
        if context.initial_results().is_revised() {
            return FallbackStatus::NoAction;
        }

        let suggestion = match context.costly_call(|backend| backend.lookup(&self.lookup_key)) {
            None => return FallbackStatus::NoAction,
            Some(Err(err)) => {
                warn!(key = %self.lookup_key, error = %err, "index lookup failed");
                return FallbackStatus::NoAction;
            }
            Some(Ok(None)) => return FallbackStatus::NoAction,
            Some(Ok(Some(suggestion))) => suggestion,
        };
        if suggestion.text == self.query {
            debug!(query = %self.query, "lookup returned the original query");
            return FallbackStatus::NoAction;
        }

        let suggest = FallbackStatus::SuggestQuery {
            text: suggestion.text.clone(),
            snippet: suggestion.snippet.clone(),
        };
        if !self.settings.rewrite || context.initial_results().total_hits > 0 {
            return suggest;
        }

        match context.costly_call(|backend| backend.search(&suggestion.text)) {
            Some(Ok(mut results)) if results.total_hits > 0 => {
                results.rewritten_query = Some(suggestion.text);
                results.rewritten_query_snippet = Some(suggestion.snippet);
                FallbackStatus::ReplaceLocalResults(results)
            }
            Some(Err(err)) => {
                warn!(query = %suggestion.text, error = %err, "rewritten query failed");
                suggest
            }
            _ => suggest,
        }
    }
}
