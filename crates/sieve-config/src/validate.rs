//! Configuration validation.
//!
//! Reports settings that load fine but probably do not do what the author meant.

use std::fmt;

use sieve_query::{HARD_QUERY_LENGTH_LIMIT, KeywordRegistry};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The soft length limit is above the hard ceiling and has no effect beyond it.
    SoftLimitAboveHardCeiling {
        /// Configured soft limit.
        configured: usize,
        /// The hard ceiling.
        ceiling: usize,
    },
    /// An exempt keyword is not answered to by any registered feature.
    ExemptKeywordUnregistered {
        /// The keyword as configured.
        keyword: String,
    },
    /// A disabled keyword is not a built-in keyword.
    DisabledKeywordUnknown {
        /// The keyword as configured.
        keyword: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SoftLimitAboveHardCeiling {
                configured,
                ceiling,
            } => write!(
                f,
                "max_query_length {configured} is above the hard ceiling of {ceiling}"
            ),
            Self::ExemptKeywordUnregistered { keyword } => {
                write!(f, "exempt keyword '{keyword}' is not registered")
            }
            Self::DisabledKeywordUnknown { keyword } => {
                write!(f, "disabled keyword '{keyword}' is not a known keyword")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.parser.max_query_length > HARD_QUERY_LENGTH_LIMIT {
        warnings.push(ConfigWarning::SoftLimitAboveHardCeiling {
            configured: config.parser.max_query_length,
            ceiling: HARD_QUERY_LENGTH_LIMIT,
        });
    }

    let builtin = KeywordRegistry::builtin();
    for keyword in &config.keywords.disabled {
        if !builtin.is_registered(keyword) {
            warnings.push(ConfigWarning::DisabledKeywordUnknown {
                keyword: keyword.clone(),
            });
        }
    }

    if let Ok(registry) = config.keyword_registry() {
        for keyword in &config.parser.exempt_keywords {
            if !registry.is_registered(keyword) {
                warnings.push(ConfigWarning::ExemptKeywordUnregistered {
                    keyword: keyword.clone(),
                });
            }
        }
    }

    warnings
}
