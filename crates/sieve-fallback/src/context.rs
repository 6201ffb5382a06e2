//! Per-request state shared by fallback methods.

use tracing::debug;

use crate::{
    backend::{BackendError, SearchBackend},
    result::ResultSet,
};

/// What fallback methods see while scoring and rewriting.
///
/// Holds the initial results and the budget of costly calls for the request. The budget is
/// shared by all methods of a run.
pub struct FallbackContext<'a> {
    /// Backend used for secondary queries.
    backend: &'a dyn SearchBackend,
    /// Results of the query the user typed.
    initial_results: &'a ResultSet,
    /// Costly calls still allowed.
    remaining: usize,
    /// Costly calls made so far.
    made: usize,
}

impl<'a> FallbackContext<'a> {
    /// Creates a context allowing `costly_call_budget` secondary queries.
    pub fn new(
        backend: &'a dyn SearchBackend,
        initial_results: &'a ResultSet,
        costly_call_budget: usize,
    ) -> Self {
        Self {
            backend,
            initial_results,
            remaining: costly_call_budget,
            made: 0,
        }
    }

    /// Returns the results of the original query.
    pub fn initial_results(&self) -> &ResultSet {
        self.initial_results
    }

    /// Returns true if another costly call fits in the budget.
    pub fn costly_call_allowed(&self) -> bool {
        self.remaining > 0
    }

    /// Returns the number of costly calls made so far.
    pub fn costly_calls_made(&self) -> usize {
        self.made
    }

    /// Runs `call` against the backend if the budget allows it.
    ///
    /// Returns `None` without calling when the budget is exhausted. A failed call still uses
    /// up budget.
    pub fn costly_call<T>(
        &mut self,
        call: impl FnOnce(&dyn SearchBackend) -> Result<T, BackendError>,
    ) -> Option<Result<T, BackendError>> {
        if !self.costly_call_allowed() {
            debug!(made = self.made, "costly call budget exhausted");
            return None;
        }
        self.remaining -= 1;
        self.made += 1;
        Some(call(self.backend))
    }
}
