//! The wordlist combiner: merges per-chunk extraction results into one
//! bounded, deduplicated vocabulary list.
//!
//! Chunks are merged in ascending `position` order regardless of the order
//! the upstream extraction completed in, so the output is a pure function
//! of the input set. Within a chunk, extraction order is kept. The first
//! occurrence of a source word wins; later duplicates are counted and
//! discarded. Traversal stops the moment the output reaches the cap, and
//! pairs past that point are never examined.

use std::collections::HashSet;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wordlist::chunk::ChunkResult;
use crate::wordlist::pair::{WordPair, dedup_key};

/// Lowest accepted `max_words` value.
pub const MIN_WORDS_FLOOR: usize = 10;
/// Highest accepted `max_words` value.
pub const MAX_WORDS_CEILING: usize = 50;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the combiner. Malformed word pairs are never an error; they
/// are filtered the same way the sanitizer filters them.
#[derive(Debug, Error, Diagnostic)]
pub enum CombineError {
    /// `max_words` outside the accepted range. The combiner does no partial
    /// work and returns no partial result.
    #[error("invalid max_words: {got} is outside the accepted range {min} to {max}")]
    #[diagnostic(
        code(wordloom::combine::invalid_max_words),
        help(
            "Choose a max_words value between {min} and {max} inclusive. \
             Note that saving a wordlist applies its own separate 1 to 40 cap."
        )
    )]
    InvalidMaxWords { got: usize, min: usize, max: usize },

    /// A reserved priority strategy was selected.
    #[error("priority strategy \"{strategy}\" is not implemented")]
    #[diagnostic(
        code(wordloom::combine::strategy_not_implemented),
        help(
            "Only the first-chunk strategy is implemented. The frequency and \
             random strategies are reserved pending a defined semantics."
        )
    )]
    StrategyNotImplemented { strategy: PriorityStrategy },
}

/// Convenience alias for combiner results.
pub type CombineResult<T> = std::result::Result<T, CombineError>;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How competing pairs are prioritized during the merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityStrategy {
    /// Ascending chunk position, then within-chunk order. First seen wins.
    #[default]
    FirstChunk,
    /// Reserved. Selecting it fails with `StrategyNotImplemented`.
    Frequency,
    /// Reserved. Selecting it fails with `StrategyNotImplemented`.
    Random,
}

impl PriorityStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstChunk => "first-chunk",
            Self::Frequency => "frequency",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Display for PriorityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PriorityStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-chunk" | "first_chunk" => Ok(Self::FirstChunk),
            "frequency" => Ok(Self::Frequency),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "unknown priority strategy \"{other}\" (expected first-chunk, frequency, or random)"
            )),
        }
    }
}

/// Combiner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineOptions {
    /// Upper bound on the combined list length. Accepted range 10 to 50.
    pub max_words: usize,
    /// Merge prioritization. Only `FirstChunk` is implemented.
    pub strategy: PriorityStrategy,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            max_words: 30,
            strategy: PriorityStrategy::FirstChunk,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Merge accounting for one combine call.
///
/// `words_before_limit` counts valid pairs examined before truncation
/// (kept plus duplicates), so `words_before_limit == words_after_limit +
/// duplicates_removed` always holds. Pairs past the truncation point count
/// toward nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineMetadata {
    /// Total chunks handed to the combiner.
    pub total_chunks_processed: usize,
    /// Chunks that contributed at least one valid pair.
    pub successful_chunks: usize,
    /// Chunks with zero valid pairs.
    pub failed_chunks: usize,
    /// Valid pairs discarded as duplicates before the cap was reached.
    pub duplicates_removed: usize,
    /// Valid pairs examined before truncation.
    pub words_before_limit: usize,
    /// Final list length.
    pub words_after_limit: usize,
}

/// The combined, bounded, deduplicated wordlist plus its accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult {
    /// At most `max_words` pairs, no two sharing a dedup key, in
    /// chunk-position-then-within-chunk order, whitespace-trimmed.
    pub words: Vec<WordPair>,
    pub metadata: CombineMetadata,
}

// ---------------------------------------------------------------------------
// Combine
// ---------------------------------------------------------------------------

/// Merge per-chunk extraction results into one bounded wordlist.
///
/// Pure and deterministic: identical inputs yield an identical result.
/// Empty input is not an error; it yields an empty list with zeroed
/// metadata.
///
/// # Errors
///
/// - [`CombineError::InvalidMaxWords`] when `options.max_words` is outside
///   10 to 50
/// - [`CombineError::StrategyNotImplemented`] for the reserved `Frequency`
///   and `Random` strategies
pub fn combine(chunks: &[ChunkResult], options: &CombineOptions) -> CombineResult<CombinedResult> {
    if options.max_words < MIN_WORDS_FLOOR || options.max_words > MAX_WORDS_CEILING {
        return Err(CombineError::InvalidMaxWords {
            got: options.max_words,
            min: MIN_WORDS_FLOOR,
            max: MAX_WORDS_CEILING,
        });
    }

    match options.strategy {
        PriorityStrategy::FirstChunk => Ok(combine_with_cap(chunks, options.max_words)),
        reserved => Err(CombineError::StrategyNotImplemented { strategy: reserved }),
    }
}

/// First-chunk merge with an already-validated cap.
///
/// Invalid pairs are skipped inline with the same predicate the sanitizer
/// uses, so unsanitized input is tolerated and a sanitizer pre-pass changes
/// nothing.
fn combine_with_cap(chunks: &[ChunkResult], cap: usize) -> CombinedResult {
    let mut order: Vec<&ChunkResult> = chunks.iter().collect();
    // sort_by_key is stable: chunks sharing a position keep input order.
    order.sort_by_key(|c| c.position);

    let mut metadata = CombineMetadata {
        total_chunks_processed: chunks.len(),
        ..Default::default()
    };

    // Success/failure partition covers every chunk, including any the
    // truncation below never reaches.
    for chunk in &order {
        if chunk.words.iter().any(|p| p.is_valid()) {
            metadata.successful_chunks += 1;
        } else {
            metadata.failed_chunks += 1;
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut words: Vec<WordPair> = Vec::new();

    'merge: for chunk in order {
        for pair in chunk.words.iter().filter(|p| p.is_valid()) {
            if words.len() >= cap {
                break 'merge;
            }
            if seen.insert(dedup_key(&pair.source)) {
                words.push(pair.trimmed());
            } else {
                metadata.duplicates_removed += 1;
            }
        }
    }

    metadata.words_after_limit = words.len();
    metadata.words_before_limit = metadata.words_after_limit + metadata.duplicates_removed;

    CombinedResult { words, metadata }
}
