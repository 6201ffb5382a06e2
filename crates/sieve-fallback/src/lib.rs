//! Fallbacks for queries with weak results.
//!
//! After the initial search, a [`FallbackRunner`] asks each applicable [`FallbackMethod`] how
//! likely it is to help, then lets the most promising ones act in turn until one proposes a
//! "did you mean" suggestion or replaces the results with those of a rewritten query.
//!
//! Secondary queries are costly. They go through [`FallbackContext::costly_call`], which
//! enforces a per-request budget shared by all methods.

#![warn(missing_docs)]

mod backend;
mod context;
mod index_lookup;
mod method;
mod phrase_suggest;
mod profile;
mod result;
mod runner;
mod status;
#[cfg(test)]
mod test_support;

pub use backend::{BackendError, SearchBackend};
pub use context::FallbackContext;
pub use index_lookup::IndexLookupFallback;
pub use method::FallbackMethod;
pub use phrase_suggest::PhraseSuggestFallback;
pub use profile::{
    DEFAULT_COSTLY_CALL_BUDGET, DEFAULT_REWRITE_HITS_THRESHOLD, FallbackProfile,
    IndexLookupSettings, PhraseSuggestSettings,
};
pub use result::{ResultEntry, ResultSet, Suggestion};
pub use runner::{FallbackOutcome, FallbackRunner};
pub use status::{FallbackAction, FallbackStatus};
