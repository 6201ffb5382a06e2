//! `incategory:` restricts results to pages in any of the named categories.

use super::{KeywordFeature, KeywordValue, ParsedValue, split_capped_values};
use crate::{
    filter::{FilterContext, FilterExpression},
    warning::WarningCollector,
};

/// Default cap on categories in one `incategory:` directive.
pub const DEFAULT_MAX_CATEGORIES: usize = 100;

/// Field holding category names as written.
const EXACT_FIELD: &str = "category";

/// Field holding lowercased category names.
const FOLDED_FIELD: &str = "category.lowercase_keyword";

/// Matches pages in any of the `|`-separated categories.
///
/// Underscores in names are read as spaces, so `incategory:Living_people` and
/// `incategory:"Living people"` are the same directive.
#[derive(Debug, Clone)]
pub struct InCategoryFeature {
    /// Maximum number of categories kept.
    max_categories: usize,
}

impl InCategoryFeature {
    /// Creates the feature with the given cap on categories.
    pub fn new(max_categories: usize) -> Self {
        Self { max_categories }
    }
}

impl Default for InCategoryFeature {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CATEGORIES)
    }
}

impl KeywordFeature for InCategoryFeature {
    fn name(&self) -> &'static str {
        "in category"
    }

    fn keywords(&self) -> &[&'static str] {
        &["incategory"]
    }

    fn parse_value(
        &self,
        value: &KeywordValue<'_>,
        warnings: &mut dyn WarningCollector,
    ) -> Option<ParsedValue> {
        let normalized = value.value.replace('_', " ");
        let categories =
            split_capped_values(value.key, &normalized, self.max_categories, warnings);
        if categories.is_empty() {
            return None;
        }
        Some(ParsedValue::Categories(categories))
    }

    fn build_filter(
        &self,
        value: &ParsedValue,
        context: &FilterContext,
    ) -> Option<FilterExpression> {
        let ParsedValue::Categories(categories) = value else {
            return None;
        };
        if categories.is_empty() {
            return None;
        }

        let filter = if context.strict_matching {
            FilterExpression::Terms {
                field: EXACT_FIELD.to_string(),
                values: categories.clone(),
            }
        } else {
            FilterExpression::Terms {
                field: FOLDED_FIELD.to_string(),
                values: categories.iter().map(|c| c.to_lowercase()).collect(),
            }
        };
        Some(filter)
    }
}
