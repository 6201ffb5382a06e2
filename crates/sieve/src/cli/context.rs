//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use sieve_config::Config;
use sieve_query::{KeywordRegistry, Occur, ParserConfig, QueryStringParser};

use super::args::ParserArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Registry built from the configuration on first use.
    registry: Option<Arc<KeywordRegistry>>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            registry: None,
        })
    }

    /// Returns the keyword registry, building it on first use.
    pub fn registry(&mut self) -> Result<Arc<KeywordRegistry>, ExitCode> {
        if let Some(registry) = &self.registry {
            return Ok(Arc::clone(registry));
        }

        let registry = match self.config.keyword_registry() {
            Ok(registry) => Arc::new(registry),
            Err(e) => {
                eprintln!("error: failed to build keyword registry: {e}");
                return Err(ExitCode::FAILURE);
            }
        };
        self.registry = Some(Arc::clone(&registry));
        Ok(registry)
    }

    /// Returns the parser settings with command-line overrides applied.
    pub fn parser_config(&self, overrides: &ParserArgs) -> ParserConfig {
        let mut config = self.config.parser_config();
        if let Some(max_length) = overrides.max_length {
            config.max_query_length = Some(max_length);
        }
        if overrides.strict {
            config.strict_matching = true;
        }
        if overrides.should {
            config.default_occur = Occur::Should;
        }
        config
    }

    /// Builds a parser over the configured registry.
    pub fn parser(&mut self, overrides: &ParserArgs) -> Result<QueryStringParser, ExitCode> {
        let registry = self.registry()?;
        Ok(QueryStringParser::new(
            registry,
            self.parser_config(overrides),
        ))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
