//! Backend filter expressions built from keyword directives.

use serde::Serialize;

/// A backend filter.
///
/// This is the shape handed to the search backend; how it is rendered into the backend's
/// own request format is the backend's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterExpression {
    /// Matches every document.
    MatchAll,
    /// Matches no document.
    MatchNone,
    /// Document id is one of `values`.
    Ids {
        /// Accepted document ids.
        values: Vec<u64>,
    },
    /// Field contains exactly `value`.
    Term {
        /// Field name.
        field: String,
        /// Exact value.
        value: String,
    },
    /// Field contains any of `values`.
    Terms {
        /// Field name.
        field: String,
        /// Accepted values.
        values: Vec<String>,
    },
    /// Numeric field within bounds, both inclusive.
    Range {
        /// Field name.
        field: String,
        /// Lower bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        gte: Option<u64>,
        /// Upper bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        lte: Option<u64>,
    },
    /// Boolean combination.
    Bool {
        /// All must match.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        must: Vec<Self>,
        /// At least one should match.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        should: Vec<Self>,
        /// None may match.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        must_not: Vec<Self>,
    },
}

impl FilterExpression {
    /// Creates a term filter.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a disjunction, flattening nested disjunctions.
    ///
    /// A single expression is returned as is; an empty list matches nothing.
    pub fn any_of(exprs: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = exprs
            .into_iter()
            .flat_map(|e| match e {
                Self::Bool {
                    must,
                    should,
                    must_not,
                } if must.is_empty() && must_not.is_empty() => should,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => Self::MatchNone,
            1 => flattened.remove(0),
            _ => Self::Bool {
                must: Vec::new(),
                should: flattened,
                must_not: Vec::new(),
            },
        }
    }

    /// Creates a conjunction, flattening nested conjunctions.
    ///
    /// A single expression is returned as is; an empty list matches everything.
    pub fn all_of(exprs: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = exprs
            .into_iter()
            .flat_map(|e| match e {
                Self::Bool {
                    must,
                    should,
                    must_not,
                } if should.is_empty() && must_not.is_empty() => must,
                Self::MatchAll => Vec::new(),
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => Self::MatchAll,
            1 => flattened.remove(0),
            _ => Self::Bool {
                must: flattened,
                should: Vec::new(),
                must_not: Vec::new(),
            },
        }
    }
}

/// Settings available to keyword features while building filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterContext {
    /// Match keyword values exactly instead of case-folded.
    pub strict_matching: bool,
}
