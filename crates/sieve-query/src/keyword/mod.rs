//! Keyword features: `key:value` directives with their own value grammar.
//!
//! Each feature answers to one or more keyword names, parses the value written after the
//! colon, and compiles the parsed value into a backend filter. Features are registered in a
//! [`KeywordRegistry`](crate::KeywordRegistry) and shared read-only between parses.

mod category;
mod file_numeric;
mod page_id;
mod recommendation;
mod topic;

use std::{fmt, sync::Arc};

pub use category::{DEFAULT_MAX_CATEGORIES, InCategoryFeature};
pub use file_numeric::FileNumericFeature;
pub use page_id::{DEFAULT_MAX_PAGE_IDS, PageIdFeature};
pub use recommendation::{DEFAULT_MAX_RECOMMENDATION_FLAGS, HasRecommendationFeature};
use serde::Serialize;
pub use topic::{ArticleTopicFeature, DEFAULT_MAX_TOPICS, KNOWN_TOPICS};

use crate::{
    filter::{FilterContext, FilterExpression},
    warning::{Warning, WarningCollector, keys},
};

/// Separator between entries of list-valued keywords.
pub const VALUE_SEPARATOR: char = '|';

/// The value half of a keyword directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordValue<'a> {
    /// Keyword as typed.
    pub key: &'a str,
    /// Value with quotes stripped and escapes resolved.
    pub value: &'a str,
    /// Value as written, including quotes when quoted.
    pub quoted_value: &'a str,
    /// Quote character delimiting the value, if any.
    pub delimiter: Option<char>,
    /// Characters after the closing quote.
    pub suffix: &'a str,
}

/// A numeric range on a single field. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumericRange {
    /// Backend field the range applies to.
    pub field: String,
    /// Lower bound.
    pub gte: Option<u64>,
    /// Upper bound.
    pub lte: Option<u64>,
}

/// A keyword value as understood by its feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParsedValue {
    /// Explicit page ids.
    PageIds(Vec<u64>),
    /// Category names.
    Categories(Vec<String>),
    /// Recommendation flag names.
    RecommendationFlags(Vec<String>),
    /// Topic ids from the topic taxonomy.
    Topics(Vec<String>),
    /// A numeric range.
    NumericRange(NumericRange),
    /// A list of terms, for features outside this crate.
    Terms(Vec<String>),
    /// Free text, for features outside this crate.
    Text(String),
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageIds(ids) => {
                let ids: Vec<String> = ids.iter().map(u64::to_string).collect();
                write!(f, "page ids [{}]", ids.join(", "))
            }
            Self::Categories(values) => write!(f, "categories {values:?}"),
            Self::RecommendationFlags(values) => write!(f, "recommendation flags {values:?}"),
            Self::Topics(values) => write!(f, "topics {values:?}"),
            Self::NumericRange(range) => {
                let low = range.gte.map_or_else(|| "*".to_string(), |v| v.to_string());
                let high = range.lte.map_or_else(|| "*".to_string(), |v| v.to_string());
                write!(f, "{} in [{low}, {high}]", range.field)
            }
            Self::Terms(values) => write!(f, "terms {values:?}"),
            Self::Text(text) => write!(f, "text {text:?}"),
        }
    }
}

/// A pluggable `key:value` directive.
///
/// Implementations are shared between concurrent parses and must not keep per-query state.
pub trait KeywordFeature: fmt::Debug + Send + Sync {
    /// Short human-readable name, used in listings.
    fn name(&self) -> &'static str;

    /// Keyword names this feature answers to. Matching is case-insensitive.
    fn keywords(&self) -> &[&'static str];

    /// Whether a quoted value (`key:"a b"`) is accepted.
    ///
    /// A rejected quoted value leaves the directive as literal text.
    fn accepts_quoted_value(&self) -> bool {
        true
    }

    /// Parses the value of a directive.
    ///
    /// Returns `None` when the value is not usable and the directive should be treated as
    /// literal text. Problems with individual entries are reported through `warnings` and
    /// parsing carries on with whatever is left.
    fn parse_value(
        &self,
        value: &KeywordValue<'_>,
        warnings: &mut dyn WarningCollector,
    ) -> Option<ParsedValue>;

    /// Compiles a parsed value into a backend filter.
    ///
    /// Returns `None` when the value leaves nothing that could match. Callers treat that as
    /// "no results possible" for the whole query, never as "no filter".
    fn build_filter(&self, value: &ParsedValue, context: &FilterContext)
    -> Option<FilterExpression>;
}

/// Caps on list-valued built-in keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordLimits {
    /// Maximum entries for `pageid:`.
    pub max_page_ids: usize,
    /// Maximum entries for `hasrecommendation:`.
    pub max_recommendation_flags: usize,
    /// Maximum entries for `incategory:`.
    pub max_categories: usize,
    /// Maximum entries for `articletopic:`.
    pub max_topics: usize,
}

impl Default for KeywordLimits {
    fn default() -> Self {
        Self {
            max_page_ids: DEFAULT_MAX_PAGE_IDS,
            max_recommendation_flags: DEFAULT_MAX_RECOMMENDATION_FLAGS,
            max_categories: DEFAULT_MAX_CATEGORIES,
            max_topics: DEFAULT_MAX_TOPICS,
        }
    }
}

/// Returns the built-in features, in registration order.
pub fn builtin_features(limits: &KeywordLimits) -> Vec<Arc<dyn KeywordFeature>> {
    vec![
        Arc::new(InCategoryFeature::new(limits.max_categories)),
        Arc::new(ArticleTopicFeature::new(limits.max_topics)),
        Arc::new(PageIdFeature::new(limits.max_page_ids)),
        Arc::new(HasRecommendationFeature::new(
            limits.max_recommendation_flags,
        )),
        Arc::new(FileNumericFeature),
    ]
}

/// Splits a list value on `|`, trimming entries and dropping empty ones.
pub fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Truncates `values` to `max` entries.
///
/// Emits one `feature-too-many-conditions` warning naming `key` and `max` when entries are
/// dropped.
pub fn truncate_values<T>(
    key: &str,
    values: &mut Vec<T>,
    max: usize,
    warnings: &mut dyn WarningCollector,
) {
    if values.len() > max {
        warnings.add_warning(Warning::new(
            keys::TOO_MANY_CONDITIONS,
            [key.to_string(), max.to_string()],
        ));
        values.truncate(max);
    }
}

/// Splits a list value and caps it at `max` entries.
pub fn split_capped_values(
    key: &str,
    value: &str,
    max: usize,
    warnings: &mut dyn WarningCollector,
) -> Vec<String> {
    let mut values: Vec<String> = split_values(value).map(String::from).collect();
    truncate_values(key, &mut values, max, warnings);
    values
}
