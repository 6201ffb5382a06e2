//! The fallback method interface.

use std::fmt;

use crate::{context::FallbackContext, status::FallbackStatus};

/// A strategy proposing an alternative when a query's results are weak.
///
/// Methods are built for one query and discarded after the run. Building returns `None` when
/// the method does not apply to the query at all.
pub trait FallbackMethod: fmt::Debug {
    /// Short name, reported in the run outcome.
    fn name(&self) -> &'static str;

    /// Estimates how likely [`rewrite`](Self::rewrite) is to help, in `[0, 1]`.
    ///
    /// Must be cheap and make no backend calls. Zero means the method would certainly do
    /// nothing and is skipped.
    fn success_approximation(&self, context: &FallbackContext<'_>) -> f32;

    /// Decides what to do with the results.
    ///
    /// Secondary queries go through [`FallbackContext::costly_call`]; when the budget is
    /// exhausted the method settles for an outcome that needs no further calls.
    fn rewrite(&self, context: &mut FallbackContext<'_>) -> FallbackStatus;
}
