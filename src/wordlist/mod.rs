//! Wordlist core: word pairs, chunk sanitization, and the bounded
//! deduplicating combiner.
//!
//! This module is pure and synchronous. It knows nothing about documents,
//! storage, or how chunk results were produced; it consumes already
//! materialized [`ChunkResult`]s and emits one [`CombinedResult`].

pub mod chunk;
pub mod combine;
pub mod pair;

pub use chunk::{ChunkResult, sanitize_chunk_results};
pub use combine::{
    CombineError, CombineMetadata, CombineOptions, CombinedResult, MAX_WORDS_CEILING,
    MIN_WORDS_FLOOR, PriorityStrategy, combine,
};
pub use pair::{WordPair, dedup_key, is_valid_word_pair};
