//! Configuration system for sieve.
//!
//! sieve uses TOML configuration files named `.sieve.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.sieve.toml` files found, then loading `~/.sieve.toml` as the global config with lowest
//! precedence.
//!
//! ```toml
//! [parser]
//! max_query_length = 300
//! exempt_keywords = ["incategory", "articletopic", "pageid"]
//! default_occur = "must"
//!
//! [keywords]
//! max_page_ids = 1000
//! disabled = "hasrecommendation"
//!
//! [fallback.phrase_suggest]
//! rewrite_hits_threshold = 1
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, Discovery, WalkEnd, global_config_path};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawFallbackSettings, RawIndexLookupSettings, RawKeywordSettings,
    RawParserSettings, RawPhraseSuggestSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
use sieve_fallback::{
    DEFAULT_COSTLY_CALL_BUDGET, DEFAULT_REWRITE_HITS_THRESHOLD, FallbackProfile,
    IndexLookupSettings, PhraseSuggestSettings,
};
use sieve_query::{
    DEFAULT_EXEMPT_KEYWORDS, DEFAULT_MAX_QUERY_LENGTH, KeywordLimits, KeywordRegistry, Occur,
    ParserConfig, keyword,
};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sieve.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.sieve.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parser settings.
    pub parser: ParserSettings,
    /// Keyword feature settings.
    pub keywords: KeywordSettings,
    /// Fallback settings.
    pub fallback: FallbackSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sieve.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&Discovery::from_dir(cwd).files())
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        debug!(files = parsed.len(), "loaded config files");
        Ok(merge_configs(&parsed))
    }

    /// Returns the parser settings as a [`ParserConfig`].
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            max_query_length: Some(self.parser.max_query_length),
            allow_leading_wildcard: self.parser.allow_leading_wildcard,
            strict_matching: self.parser.strict_matching,
            exempt_keywords: self
                .parser
                .exempt_keywords
                .iter()
                .map(|k| k.to_ascii_lowercase())
                .collect(),
            default_occur: self.parser.default_occur.into(),
        }
    }

    /// Returns the caps of the list-valued built-in keywords.
    pub fn keyword_limits(&self) -> KeywordLimits {
        KeywordLimits {
            max_page_ids: self.keywords.max_page_ids,
            max_recommendation_flags: self.keywords.max_recommendation_flags,
            max_categories: self.keywords.max_categories,
            max_topics: self.keywords.max_topics,
        }
    }

    /// Builds the keyword registry: the built-in features with the configured caps, minus
    /// any feature answering to a disabled keyword.
    pub fn keyword_registry(&self) -> Result<KeywordRegistry, ConfigError> {
        let disabled = &self.keywords.disabled;
        let registry = KeywordRegistry::builder()
            .with_builtins(&self.keyword_limits())
            .retain(|feature: &dyn keyword::KeywordFeature| {
                !feature
                    .keywords()
                    .iter()
                    .any(|k| disabled.iter().any(|d| d.eq_ignore_ascii_case(k)))
            })
            .build()?;
        Ok(registry)
    }

    /// Returns the fallback settings as a [`FallbackProfile`].
    pub fn fallback_profile(&self) -> FallbackProfile {
        FallbackProfile {
            costly_call_budget: self.fallback.costly_call_budget,
            phrase_suggest: PhraseSuggestSettings {
                enabled: self.fallback.phrase_suggest.enabled,
                rewrite: self.fallback.phrase_suggest.rewrite,
                rewrite_hits_threshold: self.fallback.phrase_suggest.rewrite_hits_threshold,
            },
            index_lookup: IndexLookupSettings {
                enabled: self.fallback.index_lookup.enabled,
                rewrite: self.fallback.index_lookup.rewrite,
            },
        }
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A soft length limit above the hard ceiling
    /// - Exempt keywords no registered feature answers to
    /// - Disabled keywords that are not built-in keywords
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.sieve.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            parser: &self.parser,
            keywords: &self.keywords,
            fallback: &self.fallback,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Occurrence of clauses written without a prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurSetting {
    /// Every unprefixed clause must match.
    #[default]
    Must,
    /// Unprefixed clauses should match.
    Should,
}

impl From<OccurSetting> for Occur {
    fn from(setting: OccurSetting) -> Self {
        match setting {
            OccurSetting::Must => Self::Must,
            OccurSetting::Should => Self::Should,
        }
    }
}

/// `[parser]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Soft limit on query length in characters.
    pub max_query_length: usize,
    /// Whether terms may start with a wildcard.
    pub allow_leading_wildcard: bool,
    /// Whether keyword values match exactly instead of case-folded.
    pub strict_matching: bool,
    /// Keywords whose clauses do not count towards the length limit.
    pub exempt_keywords: Vec<String>,
    /// Occurrence of unprefixed clauses.
    pub default_occur: OccurSetting,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
            allow_leading_wildcard: true,
            strict_matching: false,
            exempt_keywords: DEFAULT_EXEMPT_KEYWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            default_occur: OccurSetting::Must,
        }
    }
}

/// `[keywords]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordSettings {
    /// Cap on `pageid:` entries.
    pub max_page_ids: usize,
    /// Cap on `hasrecommendation:` entries.
    pub max_recommendation_flags: usize,
    /// Cap on `incategory:` entries.
    pub max_categories: usize,
    /// Cap on `articletopic:` entries.
    pub max_topics: usize,
    /// Keywords whose features are not registered.
    pub disabled: Vec<String>,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        let limits = KeywordLimits::default();
        Self {
            max_page_ids: limits.max_page_ids,
            max_recommendation_flags: limits.max_recommendation_flags,
            max_categories: limits.max_categories,
            max_topics: limits.max_topics,
            disabled: Vec::new(),
        }
    }
}

/// `[fallback]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackSettings {
    /// Costly calls allowed per request.
    pub costly_call_budget: usize,
    /// `[fallback.phrase_suggest]` settings.
    pub phrase_suggest: PhraseSuggestConfig,
    /// `[fallback.index_lookup]` settings.
    pub index_lookup: IndexLookupConfig,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            costly_call_budget: DEFAULT_COSTLY_CALL_BUDGET,
            phrase_suggest: PhraseSuggestConfig::default(),
            index_lookup: IndexLookupConfig::default(),
        }
    }
}

/// `[fallback.phrase_suggest]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhraseSuggestConfig {
    /// Whether the method runs.
    pub enabled: bool,
    /// Whether the method may rewrite the query.
    pub rewrite: bool,
    /// Rewrite when the initial results have fewer hits than this.
    pub rewrite_hits_threshold: u64,
}

impl Default for PhraseSuggestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rewrite: true,
            rewrite_hits_threshold: DEFAULT_REWRITE_HITS_THRESHOLD,
        }
    }
}

/// `[fallback.index_lookup]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexLookupConfig {
    /// Whether the method runs.
    pub enabled: bool,
    /// Whether the method may rewrite the query.
    pub rewrite: bool,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Parser settings.
    parser: &'a ParserSettings,
    /// Keyword settings.
    keywords: &'a KeywordSettings,
    /// Fallback settings.
    fallback: &'a FallbackSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn defaults_match_library_defaults() {
        let config = Config::default();
        assert_eq!(config.parser_config(), ParserConfig::default());
        assert_eq!(config.keyword_limits(), KeywordLimits::default());
        assert_eq!(config.fallback_profile(), FallbackProfile::default());
        assert_eq!(config.keyword_registry().unwrap().len(), 5);
    }

    #[test]
    fn load_merges_discovered_files() {
        let dir = TestDir::new();
        dir.create_config("", "root = true\n[parser]\nmax_query_length = 80\nstrict_matching = true\n");
        dir.create_config("project", "[parser]\nmax_query_length = 40\n");
        let cwd = dir.create_dir("project/src");

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.parser.max_query_length, 40);
        assert!(config.parser.strict_matching);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.config_root, Some(dir.path().join("project")));
    }

    #[test]
    fn parse_error_names_file() {
        let dir = TestDir::new();
        let path = dir.create_config("", "root = true\n[parser\n");
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn parser_config_lowercases_exemptions() {
        let mut config = Config::default();
        config.parser.exempt_keywords = vec!["InCategory".into()];
        config.parser.default_occur = OccurSetting::Should;
        let parser = config.parser_config();
        assert!(parser.is_exempt("incategory"));
        assert!(parser.is_exempt("INCATEGORY"));
        assert_eq!(parser.default_occur, Occur::Should);
    }

    #[test]
    fn disabled_keywords_drop_whole_feature() {
        let mut config = Config::default();
        config.keywords.disabled = vec!["FileW".into(), "pageid".into()];
        let registry = config.keyword_registry().unwrap();
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_registered("fileh"));
        assert!(!registry.is_registered("pageid"));
        assert!(registry.is_registered("incategory"));
    }

    #[test]
    fn caps_reach_features() {
        let mut config = Config::default();
        config.keywords.max_page_ids = 2;
        let registry = config.keyword_registry().unwrap();
        let feature = registry.find("pageid").unwrap();
        let mut warnings = Vec::new();
        let value = keyword::KeywordValue {
            key: "pageid",
            value: "1|2|3",
            quoted_value: "1|2|3",
            delimiter: None,
            suffix: "",
        };
        let parsed = feature.parse_value(&value, &mut warnings);
        assert_eq!(parsed, Some(keyword::ParsedValue::PageIds(vec![1, 2])));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let mut config = Config::default();
        config.parser.max_query_length = 123;
        config.keywords.disabled = vec!["hasrecommendation".into()];
        config.fallback.index_lookup.enabled = true;

        let toml = config.settings_to_toml().unwrap();
        assert!(toml.contains("[parser]"));
        assert!(toml.contains("max_query_length = 123"));
        assert!(toml.contains("[fallback.phrase_suggest]"));

        let raw = parse_config_str(&toml, Path::new("rendered.toml")).unwrap();
        let reparsed = merge_configs(&[ParsedConfig {
            path: PathBuf::from("/rendered/.sieve.toml"),
            config: raw,
        }]);
        assert_eq!(reparsed.parser, config.parser);
        assert_eq!(reparsed.keywords, config.keywords);
        assert_eq!(reparsed.fallback, config.fallback);
    }
}
