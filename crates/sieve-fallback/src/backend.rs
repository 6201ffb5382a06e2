//! The search backend seen from fallback methods.

use thiserror::Error;

use crate::result::{ResultSet, Suggestion};

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend rejected or failed the request.
    #[error("backend request failed: {0}")]
    Request(String),
    /// The backend did not answer in time.
    #[error("backend request timed out")]
    Timeout,
}

/// Executes secondary queries on behalf of fallback methods.
///
/// Every call counts as costly; methods reach the backend only through
/// [`FallbackContext::costly_call`](crate::FallbackContext::costly_call), which enforces the
/// per-request budget.
pub trait SearchBackend {
    /// Runs a query and returns its results.
    fn search(&self, query: &str) -> Result<ResultSet, BackendError>;

    /// Looks `query` up in the suggestion index. `None` when nothing is known.
    fn lookup(&self, query: &str) -> Result<Option<Suggestion>, BackendError>;
}
