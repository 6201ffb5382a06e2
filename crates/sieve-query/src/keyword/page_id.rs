//! `pageid:` restricts results to explicit page ids.

use super::{KeywordFeature, KeywordValue, ParsedValue, split_values, truncate_values};
use crate::{
    filter::{FilterContext, FilterExpression},
    warning::{Warning, WarningCollector, keys},
};

/// Default cap on the number of ids in one `pageid:` directive.
pub const DEFAULT_MAX_PAGE_IDS: usize = 1000;

/// Filters on `|`-separated decimal page ids.
///
/// Entries that are not decimal integers are dropped and reported together in one warning.
/// An id list that ends up empty makes the whole query unsatisfiable.
#[derive(Debug, Clone)]
pub struct PageIdFeature {
    /// Maximum number of ids kept.
    max_ids: usize,
}

impl PageIdFeature {
    /// Creates the feature with the given cap on ids.
    pub fn new(max_ids: usize) -> Self {
        Self { max_ids }
    }
}

impl Default for PageIdFeature {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGE_IDS)
    }
}

/// Parses one id entry. Only plain ASCII digits are accepted.
fn parse_page_id(entry: &str) -> Option<u64> {
    if entry.bytes().all(|b| b.is_ascii_digit()) {
        entry.parse().ok()
    } else {
        None
    }
}

impl KeywordFeature for PageIdFeature {
    fn name(&self) -> &'static str {
        "page id"
    }

    fn keywords(&self) -> &[&'static str] {
        &["pageid"]
    }

    fn parse_value(
        &self,
        value: &KeywordValue<'_>,
        warnings: &mut dyn WarningCollector,
    ) -> Option<ParsedValue> {
        let mut ids = Vec::new();
        let mut invalid = Vec::new();
        for entry in split_values(value.value) {
            match parse_page_id(entry) {
                Some(id) => ids.push(id),
                None => invalid.push(entry),
            }
        }

        if !invalid.is_empty() {
            warnings.add_warning(Warning::new(
                keys::PAGEID_INVALID_ID,
                [invalid.join(", "), invalid.len().to_string()],
            ));
        }
        truncate_values(value.key, &mut ids, self.max_ids, warnings);

        Some(ParsedValue::PageIds(ids))
    }

    fn build_filter(
        &self,
        value: &ParsedValue,
        _context: &FilterContext,
    ) -> Option<FilterExpression> {
        match value {
            ParsedValue::PageIds(ids) if !ids.is_empty() => {
                Some(FilterExpression::Ids { values: ids.clone() })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(raw: &str) -> KeywordValue<'_> {
        KeywordValue {
            key: "pageid",
            value: raw,
            quoted_value: raw,
            delimiter: None,
            suffix: "",
        }
    }

    fn parse(feature: &PageIdFeature, raw: &str) -> (Option<ParsedValue>, Vec<Warning>) {
        let mut warnings = Vec::new();
        let parsed = feature.parse_value(&value(raw), &mut warnings);
        (parsed, warnings)
    }

    #[test]
    fn parses_ids() {
        let (parsed, warnings) = parse(&PageIdFeature::default(), "1|22|333");
        assert_eq!(parsed, Some(ParsedValue::PageIds(vec![1, 22, 333])));
        assert!(warnings.is_empty());
    }

    #[test]
    fn invalid_ids_reported_together() {
        let (parsed, warnings) = parse(&PageIdFeature::default(), "1|abc|2|-3|4x");
        assert_eq!(parsed, Some(ParsedValue::PageIds(vec![1, 2])));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, keys::PAGEID_INVALID_ID);
        assert_eq!(warnings[0].args, vec!["abc, -3, 4x", "3"]);
    }

    #[test]
    fn overflowing_id_is_invalid() {
        let (parsed, warnings) = parse(&PageIdFeature::default(), "99999999999999999999999");
        assert_eq!(parsed, Some(ParsedValue::PageIds(vec![])));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn truncates_to_cap() {
        let feature = PageIdFeature::new(3);
        let (parsed, warnings) = parse(&feature, "1|2|3|4|5|6|7|8");
        assert_eq!(parsed, Some(ParsedValue::PageIds(vec![1, 2, 3])));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, keys::TOO_MANY_CONDITIONS);
        assert_eq!(warnings[0].args, vec!["pageid", "3"]);
    }

    #[test]
    fn invalid_and_truncated_warn_separately() {
        let feature = PageIdFeature::new(2);
        let (parsed, warnings) = parse(&feature, "x|1|2|3");
        assert_eq!(parsed, Some(ParsedValue::PageIds(vec![1, 2])));
        let found: Vec<&str> = warnings.iter().map(|w| w.key.as_str()).collect();
        assert_eq!(found, vec![keys::PAGEID_INVALID_ID, keys::TOO_MANY_CONDITIONS]);
    }

    #[test]
    fn filter_on_ids() {
        let feature = PageIdFeature::default();
        let filter = feature.build_filter(
            &ParsedValue::PageIds(vec![7, 9]),
            &FilterContext::default(),
        );
        assert_eq!(filter, Some(FilterExpression::Ids { values: vec![7, 9] }));
    }

    #[test]
    fn empty_ids_have_no_filter() {
        let feature = PageIdFeature::default();
        let filter = feature.build_filter(&ParsedValue::PageIds(vec![]), &FilterContext::default());
        assert_eq!(filter, None);
    }
}
