//! Test helpers shared across sieve-fallback unit tests.

use std::{cell::RefCell, sync::Arc};

use sieve_query::{KeywordRegistry, ParsedQuery, ParserConfig, QueryStringParser};

use crate::{
    backend::{BackendError, SearchBackend},
    result::{ResultEntry, ResultSet, Suggestion},
};

/// Parses a query with the built-in keywords.
pub fn parse(input: &str) -> ParsedQuery {
    QueryStringParser::new(Arc::new(KeywordRegistry::builtin()), ParserConfig::default())
        .parse(input)
        .unwrap()
}

/// Returns a result set with `total_hits` matches and one entry per hit, up to ten.
pub fn with_hits(total_hits: u64) -> ResultSet {
    let entries = (1..=total_hits.min(10))
        .map(|page_id| ResultEntry {
            page_id,
            title: format!("Page {page_id}"),
            score: 1.0,
        })
        .collect();
    ResultSet {
        total_hits,
        entries,
        ..ResultSet::default()
    }
}

/// Backend returning canned answers and recording calls.
#[derive(Debug, Default)]
pub struct MockBackend {
    /// Answer to every search; empty results when unset.
    search_result: Option<ResultSet>,
    /// Answer to every lookup.
    lookup_result: Option<Suggestion>,
    /// Whether every call fails.
    fail: bool,
    /// Queries passed to `search`.
    searched: RefCell<Vec<String>>,
    /// Queries passed to `lookup`.
    looked_up: RefCell<Vec<String>>,
}

impl MockBackend {
    /// Backend answering every search with `results`.
    pub fn with_search(results: ResultSet) -> Self {
        Self {
            search_result: Some(results),
            ..Self::default()
        }
    }

    /// Backend whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Sets the answer to lookups.
    pub fn lookup_answer(mut self, suggestion: Suggestion) -> Self {
        self.lookup_result = Some(suggestion);
        self
    }

    /// Number of searches run.
    pub fn searches(&self) -> usize {
        self.searched.borrow().len()
    }

    /// Keys looked up, in order.
    pub fn looked_up_keys(&self) -> Vec<String> {
        self.looked_up.borrow().clone()
    }

    /// Queries searched, in order.
    pub fn searched_queries(&self) -> Vec<String> {
        self.searched.borrow().clone()
    }
}

impl SearchBackend for MockBackend {
    fn search(&self, query: &str) -> Result<ResultSet, BackendError> {
        self.searched.borrow_mut().push(query.to_string());
        if self.fail {
            return Err(BackendError::Timeout);
        }
        Ok(self.search_result.clone().unwrap_or_default())
    }

    fn lookup(&self, query: &str) -> Result<Option<Suggestion>, BackendError> {
        self.looked_up.borrow_mut().push(query.to_string());
        if self.fail {
            return Err(BackendError::Request("lookup index unavailable".into()));
        }
        Ok(self.lookup_result.clone())
    }
}
