//! HTML parser backed by `scraper` (servo's html5ever).
//!
//! Collects text from content-bearing elements in document order, one
//! paragraph per element. Script, style, and markup-only nodes contribute
//! nothing.

use scraper::{Html, Selector};

use crate::ingest::IngestResult;
use crate::ingest::parser::{DocumentFormat, DocumentParser};

/// HTML document parser.
pub struct HtmlParser;

impl DocumentParser for HtmlParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Html
    }

    fn parse(&self, data: &[u8]) -> IngestResult<String> {
        let raw = String::from_utf8_lossy(data);
        let document = Html::parse_document(&raw);

        let content_selector = Selector::parse("h1, h2, h3, h4, h5, h6, p, li, blockquote, td, pre")
            .expect("static selector must parse");

        let mut blocks = Vec::new();
        for el in document.select(&content_selector) {
            let text = el.text().collect::<String>();
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                blocks.push(text);
            }
        }

        Ok(blocks.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_paragraphs_in_document_order() {
        let html = b"<html><body>\
            <h1>Pets</h1>\
            <p>The cat sat.</p>\
            <ul><li>dog</li></ul>\
            <script>ignored();</script>\
            </body></html>";
        let text = HtmlParser.parse(html).unwrap();
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks[0], "Pets");
        assert_eq!(blocks[1], "The cat sat.");
        assert!(blocks.contains(&"dog"));
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn collapses_internal_whitespace() {
        let html = b"<p>The \n   cat\t sat.</p>";
        let text = HtmlParser.parse(html).unwrap();
        assert_eq!(text, "The cat sat.");
    }
}
