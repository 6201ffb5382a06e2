//! `articletopic:` matches pages classified under any of the named topics.

use super::{KeywordFeature, KeywordValue, ParsedValue, split_values, truncate_values};
use crate::{
    filter::{FilterContext, FilterExpression},
    warning::{Warning, WarningCollector, keys},
};

/// Default cap on topics in one `articletopic:` directive.
pub const DEFAULT_MAX_TOPICS: usize = 50;

/// Field holding classification markers.
const TOPIC_FIELD: &str = "weighted_tags";

/// Prefix of topic classification markers.
const TOPIC_PREFIX: &str = "classification.articletopic/";

/// Topic ids of the article topic taxonomy.
pub const KNOWN_TOPICS: &[&str] = &[
    "biography",
    "women",
    "geographical",
    "africa",
    "asia",
    "europe",
    "north-america",
    "oceania",
    "south-america",
    "stem",
    "biology",
    "chemistry",
    "computing",
    "engineering",
    "mathematics",
    "physics",
    "medicine-and-health",
    "technology",
    "culture",
    "architecture",
    "literature",
    "music",
    "sports",
    "visual-arts",
    "film",
    "history",
    "history-and-society",
    "politics-and-government",
    "economics",
    "education",
    "military-and-warfare",
    "transportation",
    "society",
    "environment",
    "food-and-drink",
];

/// Matches pages carrying any of the `|`-separated topics.
///
/// Topic ids are case-insensitive. Unknown ids are dropped and reported together; a directive
/// naming only unknown topics can match nothing.
#[derive(Debug, Clone)]
pub struct ArticleTopicFeature {
    /// Maximum number of topics kept.
    max_topics: usize,
}

impl ArticleTopicFeature {
    /// Creates the feature with the given cap on topics.
    pub fn new(max_topics: usize) -> Self {
        Self { max_topics }
    }
}

impl Default for ArticleTopicFeature {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOPICS)
    }
}

impl KeywordFeature for ArticleTopicFeature {
    fn name(&self) -> &'static str {
        "article topic"
    }

    fn keywords(&self) -> &[&'static str] {
        &["articletopic"]
    }

    fn parse_value(
        &self,
        value: &KeywordValue<'_>,
        warnings: &mut dyn WarningCollector,
    ) -> Option<ParsedValue> {
        let entries: Vec<String> = split_values(value.value).map(str::to_lowercase).collect();
        if entries.is_empty() {
            return None;
        }

        let (mut topics, unknown): (Vec<String>, Vec<String>) = entries
            .into_iter()
            .partition(|topic| KNOWN_TOPICS.contains(&topic.as_str()));

        if !unknown.is_empty() {
            warnings.add_warning(Warning::new(
                keys::ARTICLETOPIC_INVALID_TOPIC,
                [unknown.join(", "), unknown.len().to_string()],
            ));
        }
        truncate_values(value.key, &mut topics, self.max_topics, warnings);

        Some(ParsedValue::Topics(topics))
    }

    fn build_filter(
        &self,
        value: &ParsedValue,
        _context: &FilterContext,
    ) -> Option<FilterExpression> {
        match value {
            ParsedValue::Topics(topics) if !topics.is_empty() => Some(FilterExpression::Terms {
                field: TOPIC_FIELD.to_string(),
                values: topics
                    .iter()
                    .map(|topic| format!("{TOPIC_PREFIX}{topic}"))
                    .collect(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> (Option<ParsedValue>, Vec<Warning>) {
        let mut warnings = Vec::new();
        let value = KeywordValue {
            key: "articletopic",
            value: raw,
            quoted_value: raw,
            delimiter: None,
            suffix: "",
        };
        let parsed = ArticleTopicFeature::default().parse_value(&value, &mut warnings);
        (parsed, warnings)
    }

    #[test]
    fn known_topics_case_insensitive() {
        let (parsed, warnings) = parse("Music|STEM");
        assert_eq!(
            parsed,
            Some(ParsedValue::Topics(vec!["music".into(), "stem".into()]))
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_topics_reported_together() {
        let (parsed, warnings) = parse("music|cooking|knitting");
        assert_eq!(parsed, Some(ParsedValue::Topics(vec!["music".into()])));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, keys::ARTICLETOPIC_INVALID_TOPIC);
        assert_eq!(warnings[0].args, vec!["cooking, knitting", "2"]);
    }

    #[test]
    fn only_unknown_topics_match_nothing() {
        let (parsed, warnings) = parse("cooking");
        let parsed = parsed.unwrap();
        assert_eq!(parsed, ParsedValue::Topics(vec![]));
        assert_eq!(warnings.len(), 1);
        let filter = ArticleTopicFeature::default().build_filter(&parsed, &FilterContext::default());
        assert_eq!(filter, None);
    }

    #[test]
    fn blank_value_is_literal() {
        let (parsed, warnings) = parse("|");
        assert_eq!(parsed, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn filter_uses_classification_markers() {
        let filter = ArticleTopicFeature::default().build_filter(
            &ParsedValue::Topics(vec!["music".into(), "film".into()]),
            &FilterContext::default(),
        );
        assert_eq!(
            filter,
            Some(FilterExpression::Terms {
                field: "weighted_tags".into(),
                values: vec![
                    "classification.articletopic/music".into(),
                    "classification.articletopic/film".into(),
                ],
            })
        );
    }
}
