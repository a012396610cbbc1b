//! Word-pair extraction seam.
//!
//! [`WordExtractor`] is the boundary to whatever produces vocabulary pairs
//! from chunk text; the hosted application fills it with a remote
//! generation service. [`GlossaryExtractor`] is the built-in deterministic
//! implementation: it matches chunk tokens against a bilingual glossary.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rayon::prelude::*;
use regex::Regex;

use crate::ingest::chunker::TextChunk;
use crate::ingest::{IngestError, IngestResult};
use crate::wordlist::{ChunkResult, WordPair};

/// Produces word pairs from one chunk of document text.
pub trait WordExtractor {
    /// Extract pairs in first-occurrence order. An empty result marks the
    /// chunk as failed when combined; it is not an error here.
    fn extract(&self, chunk_text: &str) -> Vec<WordPair>;
}

/// Extract word pairs from every chunk in parallel.
///
/// Each [`ChunkResult`] carries its chunk's document position, so the
/// combiner's position sort makes the outcome independent of which chunk
/// finished first.
pub fn extract_chunks<E>(chunks: &[TextChunk], extractor: &E) -> Vec<ChunkResult>
where
    E: WordExtractor + Sync,
{
    chunks
        .par_iter()
        .map(|chunk| {
            ChunkResult::new(
                format!("chunk-{}", chunk.position),
                chunk.position,
                extractor.extract(&chunk.text),
            )
        })
        .collect()
}

/// Bilingual glossary extractor.
///
/// Holds a source-word → translation map and emits one pair per glossary
/// hit, in first-occurrence order of the chunk text. Matching is
/// case-insensitive; repeats within a chunk collapse to the first hit
/// (cross-chunk dedup belongs to the combiner).
pub struct GlossaryExtractor {
    entries: HashMap<String, String>,
    token_re: Regex,
}

impl GlossaryExtractor {
    /// Build from `(source, target)` entries.
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(source, target)| (source.trim().to_lowercase(), target))
            .collect();
        Self {
            entries,
            token_re: Regex::new(r"[\p{Alphabetic}][\p{Alphabetic}'-]*")
                .expect("static regex must parse"),
        }
    }

    /// Load a TSV glossary: one `source<TAB>target` entry per line.
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_tsv(path: &Path) -> IngestResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| IngestError::Glossary {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut entries = Vec::new();
        for (lineno, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((source, target)) = line.split_once('\t') else {
                return Err(IngestError::Glossary {
                    path: path.display().to_string(),
                    message: format!("line {}: expected source<TAB>target", lineno + 1),
                });
            };
            entries.push((source.to_string(), target.to_string()));
        }
        Ok(Self::new(entries))
    }

    /// Number of glossary entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WordExtractor for GlossaryExtractor {
    fn extract(&self, chunk_text: &str) -> Vec<WordPair> {
        let mut pairs = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for token in self.token_re.find_iter(chunk_text) {
            let key = token.as_str().to_lowercase();
            if let Some(target) = self.entries.get(&key) {
                if seen.insert(key) {
                    pairs.push(WordPair::new(token.as_str(), target.clone()));
                }
            }
        }
        pairs
    }
}

impl std::fmt::Debug for GlossaryExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlossaryExtractor")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glossary() -> GlossaryExtractor {
        GlossaryExtractor::new([
            ("cat".to_string(), "猫".to_string()),
            ("dog".to_string(), "狗".to_string()),
            ("bird".to_string(), "鸟".to_string()),
        ])
    }

    #[test]
    fn extracts_in_first_occurrence_order() {
        let pairs = glossary().extract("A dog chased the cat; the bird watched the dog.");
        assert_eq!(
            pairs,
            vec![
                WordPair::new("dog", "狗"),
                WordPair::new("cat", "猫"),
                WordPair::new("bird", "鸟"),
            ]
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_keeps_document_casing() {
        let pairs = glossary().extract("The Cat slept.");
        assert_eq!(pairs, vec![WordPair::new("Cat", "猫")]);
    }

    #[test]
    fn no_hits_yields_empty_chunk() {
        assert!(glossary().extract("nothing matches here").is_empty());
    }

    #[test]
    fn extract_chunks_assigns_positions() {
        let chunks = vec![
            TextChunk {
                position: 0,
                text: "the cat".into(),
                word_count: 2,
            },
            TextChunk {
                position: 1,
                text: "the dog".into(),
                word_count: 2,
            },
        ];
        let mut results = extract_chunks(&chunks, &glossary());
        results.sort_by_key(|c| c.position);
        assert_eq!(results[0].chunk_id, "chunk-0");
        assert_eq!(results[0].words, vec![WordPair::new("cat", "猫")]);
        assert_eq!(results[1].words, vec![WordPair::new("dog", "狗")]);
    }

    #[test]
    fn tsv_roundtrip_and_malformed_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("glossary.tsv");
        std::fs::write(&good, "# pets\ncat\t猫\n\ndog\t狗\n").unwrap();
        let extractor = GlossaryExtractor::from_tsv(&good).unwrap();
        assert_eq!(extractor.len(), 2);

        let bad = dir.path().join("bad.tsv");
        std::fs::write(&bad, "cat 猫\n").unwrap();
        let err = GlossaryExtractor::from_tsv(&bad).unwrap_err();
        assert!(matches!(err, IngestError::Glossary { .. }));
    }
}
