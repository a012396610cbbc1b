//! Word pairs and their validity rules.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// A single bilingual vocabulary entry: a source-language word and its
/// translation.
///
/// Invariant once validated: both fields are non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    /// Source-language text (e.g., an English word).
    pub source: String,
    /// Target-language text (e.g., its translation).
    pub target: String,
}

impl WordPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether both fields are non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.source.trim().is_empty() && !self.target.trim().is_empty()
    }

    /// Copy with leading/trailing whitespace removed from both fields.
    pub fn trimmed(&self) -> WordPair {
        WordPair::new(self.source.trim(), self.target.trim())
    }

    /// Decode a word pair from an arbitrary JSON value.
    ///
    /// Returns `Some` only if the value is an object with string-typed
    /// `source` and `target` fields. Malformed input yields `None`, never
    /// an error. This is the lenient boundary for untyped upstream payloads.
    pub fn from_value(value: &serde_json::Value) -> Option<WordPair> {
        let source = value.get("source")?.as_str()?;
        let target = value.get("target")?.as_str()?;
        Some(WordPair::new(source, target))
    }
}

/// Validity predicate shared by the sanitizer and the combiner.
pub fn is_valid_word_pair(pair: &WordPair) -> bool {
    pair.is_valid()
}

/// Identity key for duplicate detection: NFC-normalized, trimmed,
/// lower-cased source text.
///
/// `"Hello"` and `" hello "` share a key, as do composed and decomposed
/// renderings of the same accented word.
pub fn dedup_key(source: &str) -> String {
    source.trim().nfc().collect::<String>().to_lowercase()
}
