//! Per-chunk extraction results and sanitization.

use serde::{Deserialize, Serialize};

use crate::wordlist::pair::WordPair;

/// The outcome of extracting word pairs from one document chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkResult {
    /// Opaque identifier of the originating chunk.
    pub chunk_id: String,
    /// Merge priority: chunks with lower positions are consumed first.
    pub position: u32,
    /// Extracted pairs in extraction order. Earlier entries within a chunk
    /// win ties against later ones.
    pub words: Vec<WordPair>,
}

impl ChunkResult {
    pub fn new(chunk_id: impl Into<String>, position: u32, words: Vec<WordPair>) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            position,
            words,
        }
    }

    /// Copy of this chunk keeping only valid word pairs, order preserved.
    pub fn sanitized(&self) -> ChunkResult {
        ChunkResult {
            chunk_id: self.chunk_id.clone(),
            position: self.position,
            words: self.words.iter().filter(|p| p.is_valid()).cloned().collect(),
        }
    }
}

/// Filter every chunk's words down to valid pairs.
///
/// Chunks that end up with zero valid words are kept: the combiner counts
/// them as failed chunks, which is not this function's call to make.
pub fn sanitize_chunk_results(chunks: &[ChunkResult]) -> Vec<ChunkResult> {
    chunks.iter().map(ChunkResult::sanitized).collect()
}
