//! Positional chunker: split document text into chunks sized for
//! per-chunk word extraction.
//!
//! Positions are assigned 0-based in document order, so the combiner's
//! ascending position sort reproduces document order downstream.

use serde::{Deserialize, Serialize};

/// Chunk sizing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Minimum words per chunk; a short trailing buffer is merged backward.
    pub min_words: usize,
    /// Target words per chunk.
    pub target_words: usize,
    /// Hard per-chunk limit; longer buffers split at sentence boundaries.
    pub max_words: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_words: 30,
            target_words: 150,
            max_words: 250,
        }
    }
}

/// A position-numbered run of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// 0-based position in document order.
    pub position: u32,
    /// The text content of this chunk.
    pub text: String,
    /// Word count.
    pub word_count: usize,
}

/// Split document text into consistent-sized chunks.
///
/// Paragraphs (blank-line separated) are buffered up to `target_words`;
/// buffers above `max_words` split at sentence boundaries; a trailing
/// buffer below `min_words` is merged into the previous chunk.
pub fn chunk_text(text: &str, config: &ChunkerConfig) -> Vec<TextChunk> {
    let paragraphs: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.is_empty() {
        return Vec::new();
    }

    let mut result: Vec<TextChunk> = Vec::new();
    let mut buffer = String::new();
    let mut buffer_words = 0usize;

    for para in paragraphs {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(para);
        buffer_words += para.split_whitespace().count();

        if buffer_words >= config.target_words {
            emit_chunk(&mut result, &buffer, config);
            buffer.clear();
            buffer_words = 0;
        }
    }

    if !buffer.is_empty() {
        if buffer_words < config.min_words && !result.is_empty() {
            let last = result.last_mut().unwrap();
            last.text.push(' ');
            last.text.push_str(&buffer);
            last.word_count += buffer_words;
        } else {
            emit_chunk(&mut result, &buffer, config);
        }
    }

    result
}

/// Emit one or more chunks from a text buffer, splitting at sentence
/// boundaries if the buffer exceeds `max_words`.
fn emit_chunk(result: &mut Vec<TextChunk>, text: &str, config: &ChunkerConfig) {
    let word_count = text.split_whitespace().count();
    if word_count <= config.max_words {
        let position = result.len() as u32;
        result.push(TextChunk {
            position,
            text: text.to_string(),
            word_count,
        });
        return;
    }

    let mut current = String::new();
    let mut current_words = 0usize;

    for sentence in split_at_sentences(text) {
        let sentence_words = sentence.split_whitespace().count();
        if current_words + sentence_words > config.max_words && !current.is_empty() {
            let position = result.len() as u32;
            result.push(TextChunk {
                position,
                text: current.trim().to_string(),
                word_count: current_words,
            });
            current.clear();
            current_words = 0;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&sentence);
        current_words += sentence_words;
    }

    if !current.is_empty() {
        let position = result.len() as u32;
        result.push(TextChunk {
            position,
            text: current.trim().to_string(),
            word_count: current_words,
        });
    }
}

/// Split text at sentence boundaries (`.`, `!`, `?` followed by whitespace).
fn split_at_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let chars: Vec<char> = text.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);
        if (ch == '.' || ch == '!' || ch == '?')
            && i + 1 < chars.len()
            && chars[i + 1].is_whitespace()
        {
            let trimmed = current.trim().to_string();
            if !trimmed.is_empty() {
                sentences.push(trimmed);
            }
            current.clear();
        }
    }
    let trimmed = current.trim().to_string();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: usize, target: usize, max: usize) -> ChunkerConfig {
        ChunkerConfig {
            min_words: min,
            target_words: target,
            max_words: max,
        }
    }

    #[test]
    fn empty_input() {
        assert!(chunk_text("", &ChunkerConfig::default()).is_empty());
        assert!(chunk_text("\n\n  \n\n", &ChunkerConfig::default()).is_empty());
    }

    #[test]
    fn short_paragraphs_merged() {
        let text = "Hello world.\n\nAnother sentence.\n\nThird one.";
        let chunks = chunk_text(text, &config(2, 10, 50));
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.contains("Hello world."));
        assert!(chunks[0].text.contains("Third one."));
    }

    #[test]
    fn long_text_splits_at_sentences() {
        let sentence = "This is a test sentence with multiple words in it.";
        let text = std::iter::repeat(sentence)
            .take(30)
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = chunk_text(&text, &config(5, 40, 60));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            // Small tolerance for a trailing sentence.
            assert!(chunk.word_count <= 60 + 10);
        }
    }

    #[test]
    fn positions_are_sequential_document_order() {
        let text = (0..12)
            .map(|i| format!("Paragraph number {i} with a handful of words in it."))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = chunk_text(&text, &config(3, 20, 40));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.position, i as u32);
        }
    }

    #[test]
    fn tiny_tail_merges_backward() {
        let text = "One two three four five six seven eight nine ten.\n\nTail.";
        let chunks = chunk_text(text, &config(3, 10, 50));
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.ends_with("Tail."));
    }
}
