//! Document parser trait and format detection.
//!
//! Each supported format (plain text, PDF, HTML) implements
//! [`DocumentParser`], reducing raw bytes to plain text. Chunking and word
//! extraction happen downstream and are format-independent.

pub mod html;
pub mod pdf;

use crate::ingest::IngestResult;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Html,
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Human-readable name for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::PlainText => "text",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            "text" | "txt" | "plain" => Ok(Self::PlainText),
            other => Err(format!(
                "unknown document format \"{other}\" (expected html, pdf, or text)"
            )),
        }
    }
}

/// Trait for format-specific document parsers.
pub trait DocumentParser {
    /// Reduce raw bytes to plain text with blank-line paragraph breaks.
    fn parse(&self, data: &[u8]) -> IngestResult<String>;

    /// The format this parser handles.
    fn format(&self) -> DocumentFormat;
}

/// Get the appropriate parser for a document format.
pub fn parser_for(format: DocumentFormat) -> Box<dyn DocumentParser> {
    match format {
        DocumentFormat::Html => Box::new(html::HtmlParser),
        DocumentFormat::Pdf => Box::new(pdf::PdfParser),
        DocumentFormat::PlainText => Box::new(PlainTextParser),
    }
}

/// Detect the document format from a file extension.
pub fn detect_format(path: &str) -> Option<DocumentFormat> {
    let lower = path.to_lowercase();
    if lower.ends_with(".html") || lower.ends_with(".htm") || lower.ends_with(".xhtml") {
        Some(DocumentFormat::Html)
    } else if lower.ends_with(".pdf") {
        Some(DocumentFormat::Pdf)
    } else if lower.ends_with(".txt") || lower.ends_with(".md") || lower.ends_with(".text") {
        Some(DocumentFormat::PlainText)
    } else {
        None
    }
}

/// Plain-text parser: bytes as lossy UTF-8, passed through unchanged.
struct PlainTextParser;

impl DocumentParser for PlainTextParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }

    fn parse(&self, data: &[u8]) -> IngestResult<String> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}
