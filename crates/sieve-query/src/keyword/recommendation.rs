//! `hasrecommendation:` matches pages flagged with a recommendation.

use super::{KeywordFeature, KeywordValue, ParsedValue, split_capped_values};
use crate::{
    filter::{FilterContext, FilterExpression},
    warning::WarningCollector,
};

/// Default cap on flags in one `hasrecommendation:` directive.
pub const DEFAULT_MAX_RECOMMENDATION_FLAGS: usize = 5;

/// Legacy field carrying `recommendation.<flag>/exists` markers.
const LEGACY_FIELD: &str = "weighted_tags";

/// Current field carrying `<flag>/exists` markers.
const CURRENT_FIELD: &str = "recommendation_tags";

/// Matches pages carrying any of the `|`-separated recommendation flags.
///
/// Flags are free-form; each one probes both the legacy and the current field.
#[derive(Debug, Clone)]
pub struct HasRecommendationFeature {
    /// Maximum number of flags kept.
    max_flags: usize,
}

impl HasRecommendationFeature {
    /// Creates the feature with the given cap on flags.
    pub fn new(max_flags: usize) -> Self {
        Self { max_flags }
    }
}

impl Default for HasRecommendationFeature {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECOMMENDATION_FLAGS)
    }
}

/// Builds the disjunction of exists markers for one flag.
fn flag_filter(flag: &str) -> FilterExpression {
    FilterExpression::any_of(vec![
        FilterExpression::term(LEGACY_FIELD, format!("recommendation.{flag}/exists")),
        FilterExpression::term(CURRENT_FIELD, format!("{flag}/exists")),
    ])
}

impl KeywordFeature for HasRecommendationFeature {
    fn name(&self) -> &'static str {
        "has recommendation"
    }

    fn keywords(&self) -> &[&'static str] {
        &["hasrecommendation"]
    }

    fn parse_value(
        &self,
        value: &KeywordValue<'_>,
        warnings: &mut dyn WarningCollector,
    ) -> Option<ParsedValue> {
        let flags = split_capped_values(value.key, value.value, self.max_flags, warnings);
        if flags.is_empty() {
            return None;
        }
        Some(ParsedValue::RecommendationFlags(flags))
    }

    fn build_filter(
        &self,
        value: &ParsedValue,
        _context: &FilterContext,
    ) -> Option<FilterExpression> {
        match value {
            ParsedValue::RecommendationFlags(flags) if !flags.is_empty() => Some(
                FilterExpression::any_of(flags.iter().map(|f| flag_filter(f)).collect()),
            ),
            _ => None,
        }
    }
}
