//! Runs fallback methods in order of promise until one acts.

use serde::Serialize;
use sieve_query::ParsedQuery;
use tracing::debug;

use crate::{
    backend::SearchBackend,
    context::FallbackContext,
    index_lookup::IndexLookupFallback,
    method::FallbackMethod,
    phrase_suggest::PhraseSuggestFallback,
    profile::FallbackProfile,
    result::ResultSet,
    status::FallbackAction,
};

/// What a fallback run did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackOutcome {
    /// Results to show: the initial ones, possibly revised.
    pub results: ResultSet,
    /// What was done.
    pub action: FallbackAction,
    /// Name of the method that acted, if any.
    pub method: Option<&'static str>,
    /// Costly calls made during the run.
    pub costly_calls: usize,
}

/// Evaluates fallback methods against a request's initial results.
///
/// Methods are tried by descending success approximation, ties in registration order.
/// Methods scoring zero are skipped and the run stops at the first method that does
/// something.
#[derive(Debug, Default)]
pub struct FallbackRunner {
    /// Candidate methods, in registration order.
    methods: Vec<Box<dyn FallbackMethod>>,
    /// Costly calls allowed per run.
    costly_call_budget: usize,
}

impl FallbackRunner {
    /// Creates a runner over the given methods.
    pub fn new(methods: Vec<Box<dyn FallbackMethod>>, costly_call_budget: usize) -> Self {
        Self {
            methods,
            costly_call_budget,
        }
    }

    /// Builds the methods the profile enables for `query`.
    pub fn from_profile(query: &ParsedQuery, profile: &FallbackProfile) -> Self {
        let mut methods: Vec<Box<dyn FallbackMethod>> = Vec::new();
        if let Some(method) = PhraseSuggestFallback::build(query, profile.phrase_suggest) {
            methods.push(Box::new(method));
        }
        if let Some(method) = IndexLookupFallback::build(query, profile.index_lookup) {
            methods.push(Box::new(method));
        }
        Self::new(methods, profile.costly_call_budget)
    }

    /// Returns the names of the built methods, in registration order.
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|m| m.name()).collect()
    }

    /// Returns true if no method applies to the query.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Runs the methods against `initial`.
    pub fn run(&self, backend: &dyn SearchBackend, initial: ResultSet) -> FallbackOutcome {
        let (acted, costly_calls) = {
            let mut context = FallbackContext::new(backend, &initial, self.costly_call_budget);

            let mut scored: Vec<(&dyn FallbackMethod, f32)> = self
                .methods
                .iter()
                .map(|method| {
                    let score = method.success_approximation(&context);
                    debug!(method = method.name(), score, "fallback scored");
                    (&**method, score)
                })
                .filter(|(_, score)| *score > 0.0)
                .collect();
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));

            let mut acted = None;
            for (method, _) in scored {
                let status = method.rewrite(&mut context);
                if !status.is_no_action() {
                    debug!(method = method.name(), action = %status.action(), "fallback acted");
                    acted = Some((method.name(), status));
                    break;
                }
            }
            (acted, context.costly_calls_made())
        };

        match acted {
            Some((name, status)) => FallbackOutcome {
                action: status.action(),
                results: status.apply(initial),
                method: Some(name),
                costly_calls,
            },
            None => FallbackOutcome {
                results: initial,
                action: FallbackAction::NoAction,
                method: None,
                costly_calls,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        profile::{IndexLookupSettings, PhraseSuggestSettings},
        result::Suggestion,
        status::FallbackStatus,
        test_support::{MockBackend, parse, with_hits},
    };

    /// Method with a fixed score and outcome.
    #[derive(Debug)]
    struct Scripted {
        name: &'static str,
        score: f32,
        status: FallbackStatus,
        calls: Cell<usize>,
    }

    impl Scripted {
        fn boxed(name: &'static str, score: f32, status: FallbackStatus) -> Box<dyn FallbackMethod> {
            Box::new(Self {
                name,
                score,
                status,
                calls: Cell::new(0),
            })
        }
    }

    impl FallbackMethod for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn success_approximation(&self, _context: &FallbackContext<'_>) -> f32 {
            self.score
        }

        fn rewrite(&self, _context: &mut FallbackContext<'_>) -> FallbackStatus {
            self.calls.set(self.calls.get() + 1);
            self.status.clone()
        }
    }

    fn suggest(text: &str) -> FallbackStatus {
        FallbackStatus::SuggestQuery {
            text: text.into(),
            snippet: text.into(),
        }
    }

    #[test]
    fn highest_score_acts_first() {
        let runner = FallbackRunner::new(
            vec![
                Scripted::boxed("low", 0.2, suggest("low")),
                Scripted::boxed("high", 0.9, suggest("high")),
            ],
            1,
        );
        let outcome = runner.run(&MockBackend::default(), ResultSet::default());
        assert_eq!(outcome.method, Some("high"));
        assert_eq!(outcome.action, FallbackAction::SuggestQuery);
        assert_eq!(outcome.results.suggestion_query.as_deref(), Some("high"));
    }

    #[test]
    fn ties_keep_registration_order() {
        let runner = FallbackRunner::new(
            vec![
                Scripted::boxed("first", 0.5, suggest("first")),
                Scripted::boxed("second", 0.5, suggest("second")),
            ],
            1,
        );
        let outcome = runner.run(&MockBackend::default(), ResultSet::default());
        assert_eq!(outcome.method, Some("first"));
    }

    #[test]
    fn no_action_falls_through() {
        let runner = FallbackRunner::new(
            vec![
                Scripted::boxed("idle", 0.9, FallbackStatus::NoAction),
                Scripted::boxed("busy", 0.1, suggest("busy")),
            ],
            1,
        );
        let outcome = runner.run(&MockBackend::default(), ResultSet::default());
        assert_eq!(outcome.method, Some("busy"));
    }

    #[test]
    fn zero_scores_skipped() {
        let runner = FallbackRunner::new(vec![Scripted::boxed("zero", 0.0, suggest("zero"))], 1);
        let initial = with_hits(2);
        let outcome = runner.run(&MockBackend::default(), initial.clone());
        assert_eq!(outcome.action, FallbackAction::NoAction);
        assert_eq!(outcome.method, None);
        assert_eq!(outcome.results, initial);
    }

    #[test]
    fn profile_builds_enabled_methods() {
        let query = parse("catz");
        let runner = FallbackRunner::from_profile(&query, &FallbackProfile::default());
        assert_eq!(runner.method_names(), vec!["phrase_suggest"]);

        let profile = FallbackProfile {
            index_lookup: IndexLookupSettings {
                enabled: true,
                rewrite: false,
            },
            phrase_suggest: PhraseSuggestSettings {
                enabled: false,
                ..PhraseSuggestSettings::default()
            },
            ..FallbackProfile::default()
        };
        let runner = FallbackRunner::from_profile(&query, &profile);
        assert_eq!(runner.method_names(), vec!["index_lookup"]);

        let keywords_only = parse("pageid:1");
        assert!(FallbackRunner::from_profile(&keywords_only, &FallbackProfile::default()).is_empty());
    }

    #[test]
    fn phrase_suggestion_rewrites_empty_results() {
        let query = parse("catz");
        let runner = FallbackRunner::from_profile(&query, &FallbackProfile::default());
        let backend = MockBackend::with_search(with_hits(3));
        let initial = ResultSet {
            phrase_suggestion: Some(Suggestion::new("cats", "<em>cats</em>")),
            ..ResultSet::default()
        };

        let outcome = runner.run(&backend, initial);
        assert_eq!(outcome.action, FallbackAction::ReplaceLocalResults);
        assert_eq!(outcome.method, Some("phrase_suggest"));
        assert_eq!(outcome.results.total_hits, 3);
        assert_eq!(outcome.results.rewritten_query.as_deref(), Some("cats"));
        assert_eq!(outcome.costly_calls, 1);
    }

    #[test]
    fn budget_shared_between_methods() {
        let query = parse("catz");
        let profile = FallbackProfile {
            costly_call_budget: 1,
            index_lookup: IndexLookupSettings {
                enabled: true,
                rewrite: true,
            },
            ..FallbackProfile::default()
        };
        let runner = FallbackRunner::from_profile(&query, &profile);
        let backend = MockBackend::default().lookup_answer(Suggestion::new("cats", "cats"));

        let outcome = runner.run(&backend, ResultSet::default());
        assert_eq!(outcome.method, Some("index_lookup"));
        assert_eq!(outcome.action, FallbackAction::SuggestQuery);
        assert_eq!(outcome.costly_calls, 1);
        assert_eq!(backend.searches(), 0);
    }

    #[test]
    fn already_suggested_results_untouched() {
        let query = parse("catz");
        let runner = FallbackRunner::from_profile(&query, &FallbackProfile::default());
        let backend = MockBackend::with_search(with_hits(3));
        let initial = ResultSet {
            phrase_suggestion: Some(Suggestion::new("cats", "cats")),
            suggestion_query: Some("dogs".into()),
            ..ResultSet::default()
        };

        let outcome = runner.run(&backend, initial.clone());
        assert_eq!(outcome.action, FallbackAction::NoAction);
        assert_eq!(outcome.results, initial);
        assert_eq!(outcome.costly_calls, 0);
        assert_eq!(backend.searches(), 0);
    }
}
