//! Settings that decide which fallback methods run and how far they may go.

/// Default number of costly calls per request.
pub const DEFAULT_COSTLY_CALL_BUDGET: usize = 1;

/// Default hit count below which phrase suggestion rewrites the query.
pub const DEFAULT_REWRITE_HITS_THRESHOLD: u64 = 1;

/// Settings of [`PhraseSuggestFallback`](crate::PhraseSuggestFallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseSuggestSettings {
    /// Whether the method is built at all.
    pub enabled: bool,
    /// Whether the method may run the suggestion in place of the original query.
    pub rewrite: bool,
    /// Rewrite only when the initial results have fewer hits than this.
    pub rewrite_hits_threshold: u64,
}

impl Default for PhraseSuggestSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            rewrite: true,
            rewrite_hits_threshold: DEFAULT_REWRITE_HITS_THRESHOLD,
        }
    }
}

/// Settings of [`IndexLookupFallback`](crate::IndexLookupFallback).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexLookupSettings {
    /// Whether the method is built at all.
    pub enabled: bool,
    /// Whether the method may run the looked-up query when the original found nothing.
    pub rewrite: bool,
}

/// The fallback profile of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackProfile {
    /// Costly calls allowed per request, shared by all methods.
    pub costly_call_budget: usize,
    /// Phrase suggestion settings.
    pub phrase_suggest: PhraseSuggestSettings,
    /// Index lookup settings.
    pub index_lookup: IndexLookupSettings,
}

impl Default for FallbackProfile {
    fn default() -> Self {
        Self {
            costly_call_budget: DEFAULT_COSTLY_CALL_BUDGET,
            phrase_suggest: PhraseSuggestSettings::default(),
            index_lookup: IndexLookupSettings::default(),
        }
    }
}
