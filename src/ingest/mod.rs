//! Document-to-chunk extraction pipeline.
//!
//! Orchestrates: parse → chunk → per-chunk word extraction. The output is
//! a set of [`ChunkResult`]s ready for the combiner. Extraction fans out in
//! parallel; positions assigned by the chunker make the eventual combine
//! independent of completion order.

pub mod chunker;
pub mod extract;
pub mod parser;

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};

use crate::wordlist::ChunkResult;
pub use chunker::ChunkerConfig;

use chunker::chunk_text;
use extract::WordExtractor;
use parser::{DocumentFormat, detect_format, parser_for};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the extraction pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("unsupported document format: \"{path}\"")]
    #[diagnostic(
        code(wordloom::ingest::unsupported_format),
        help(
            "Supported formats are pdf, html, and plain text (.txt/.md). \
             If your file uses a different extension, pass --format explicitly."
        )
    )]
    UnsupportedFormat { path: String },

    #[error("parse error in {format} document: {message}")]
    #[diagnostic(
        code(wordloom::ingest::parse_error),
        help("The document could not be parsed. Verify the file is valid {format} and not corrupted.")
    )]
    ParseError { format: String, message: String },

    #[error("empty document: no text extracted from \"{origin}\"")]
    #[diagnostic(
        code(wordloom::ingest::empty_document),
        help(
            "The parser could not extract any text from the source. \
             The file may be empty or contain only non-text elements."
        )
    )]
    EmptyDocument { origin: String },

    #[error("glossary error in \"{path}\": {message}")]
    #[diagnostic(
        code(wordloom::ingest::glossary),
        help("Glossary files are UTF-8 TSV: one `source<TAB>target` entry per line.")
    )]
    Glossary { path: String, message: String },

    #[error("I/O error: {source}")]
    #[diagnostic(
        code(wordloom::ingest::io),
        help("A filesystem operation failed. Check file paths and permissions.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for pipeline results.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Configuration for document extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Override extension-based format detection.
    pub format: Option<DocumentFormat>,
    /// Chunk sizing.
    pub chunker: ChunkerConfig,
}

/// Output of [`extract_document`]: per-chunk results plus totals.
#[derive(Debug)]
pub struct ExtractionReport {
    /// One result per chunk, carrying document-order positions.
    pub chunks: Vec<ChunkResult>,
    /// Number of chunks the document was split into.
    pub chunk_count: usize,
    /// Total extracted pairs across all chunks, before combining.
    pub pair_count: usize,
}

/// Run the full pipeline on raw document bytes.
///
/// `origin` is used for format detection (file extension) and error
/// messages; pass the file path or any descriptive label when the format
/// is given explicitly.
pub fn extract_document<E>(
    data: &[u8],
    origin: &str,
    extractor: &E,
    config: &ExtractConfig,
) -> IngestResult<ExtractionReport>
where
    E: WordExtractor + Sync,
{
    let format = match config.format {
        Some(format) => format,
        None => detect_format(origin).ok_or_else(|| IngestError::UnsupportedFormat {
            path: origin.to_string(),
        })?,
    };

    let parser = parser_for(format);
    let text = parser.parse(data)?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyDocument {
            origin: origin.to_string(),
        });
    }

    let chunks = chunk_text(&text, &config.chunker);
    info!(%format, chunks = chunks.len(), "parsed document");

    let results = extract::extract_chunks(&chunks, extractor);
    let pair_count = results.iter().map(|c| c.words.len()).sum();
    debug!(pairs = pair_count, "extraction complete");

    Ok(ExtractionReport {
        chunk_count: results.len(),
        pair_count,
        chunks: results,
    })
}

/// Convenience wrapper: read and extract a document from a file path.
pub fn extract_file<E>(
    path: &Path,
    extractor: &E,
    config: &ExtractConfig,
) -> IngestResult<ExtractionReport>
where
    E: WordExtractor + Sync,
{
    let data = std::fs::read(path).map_err(|e| IngestError::Io { source: e })?;
    extract_document(&data, &path.to_string_lossy(), extractor, config)
}
