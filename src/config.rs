//! TOML configuration.
//!
//! Every section is optional and every field has a default, so an empty
//! or missing file yields a working configuration. Command-line flags
//! override file values at the call site.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::ingest::ChunkerConfig;
use crate::wordlist::CombineOptions;

/// Errors loading configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(
        code(wordloom::config::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(wordloom::config::parse),
        help("The config file must be valid TOML. See README.md for the schema.")
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for config results.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordloomConfig {
    pub combine: CombineOptions,
    pub chunker: ChunkerConfig,
    pub practice: PracticeConfig,
}

/// Practice question settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    /// Fixed RNG seed for reproducible question sets. Random when unset.
    pub seed: Option<u64>,
}

impl WordloomConfig {
    /// Load configuration from a TOML file. A missing file is not an
    /// error; it yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::PriorityStrategy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_defaults() {
        let config = WordloomConfig::load(Path::new("/nonexistent/wordloom.toml")).unwrap();
        assert_eq!(config, WordloomConfig::default());
        assert_eq!(config.combine.max_words, 30);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config = WordloomConfig::load(file.path()).unwrap();
        assert_eq!(config, WordloomConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[combine]\nmax_words = 20\nstrategy = \"first-chunk\"").unwrap();
        writeln!(file, "[practice]\nseed = 7").unwrap();

        let config = WordloomConfig::load(file.path()).unwrap();
        assert_eq!(config.combine.max_words, 20);
        assert_eq!(config.combine.strategy, PriorityStrategy::FirstChunk);
        assert_eq!(config.practice.seed, Some(7));
        assert_eq!(config.chunker, ChunkerConfig::default());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [[[").unwrap();
        let err = WordloomConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
