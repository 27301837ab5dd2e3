//! HTML text-block extraction via `scraper`.
//!
//! Block-level elements become candidate layout blocks; the shared
//! normalization and minimum-token filter decide which survive. Input bytes
//! are decoded with encoding detection first, since legacy report exports are
//! frequently not UTF-8.

use crate::corpus::DocumentReport;
use crate::encoding::decode_to_utf8;
use crate::pdf::document_name;
use once_cell::sync::Lazy;
use rationalize_core::segment::{filter_block, ExtractOptions, TextSegment};
use rationalize_core::{RationalizeError, Result};
use scraper::{Html, Selector};
use std::path::Path;

/// Block-level elements treated as layout blocks.
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, h1, h2, h3, h4, h5, h6, li, td, pre")
        .expect("selector is compile-time constant")
});

/// Extract filtered text segments from an HTML file.
///
/// # Errors
/// Returns [`RationalizeError::DocumentUnreadable`] when the file cannot be
/// read.
pub fn extract_html(path: &Path, options: &ExtractOptions) -> Result<DocumentReport> {
    let bytes = std::fs::read(path).map_err(|e| RationalizeError::unreadable(path, e))?;
    let (text, encoding) = decode_to_utf8(&bytes);
    log::debug!("detected encoding for {}: {encoding}", path.display());

    let name = document_name(path);
    let segments = segments_from_html(&text, &name, options);

    Ok(DocumentReport {
        name,
        segments,
        // HTML reports have no pagination; count each as a single page.
        page_count: 1,
    })
}

/// Extract segments from already-decoded HTML text.
#[must_use]
pub fn segments_from_html(html: &str, origin: &str, options: &ExtractOptions) -> Vec<TextSegment> {
    let document = Html::parse_document(html);
    let mut segments = Vec::new();

    for element in document.select(&BLOCK_SELECTOR) {
        let block: String = element.text().collect();
        if let Some(content) = filter_block(&block, options) {
            let ordinal = segments.len();
            segments.push(TextSegment::new(content, origin, ordinal));
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAGRAPH: &str =
        "The quarterly compliance report covers all regional offices and their filings.";

    #[test]
    fn test_paragraphs_become_segments() {
        let html = format!("<html><body><p>{PARAGRAPH}</p><p>Short.</p></body></html>");
        let segments = segments_from_html(&html, "report.html", &ExtractOptions::default());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, PARAGRAPH.to_lowercase());
        assert_eq!(segments[0].origin, "report.html");
        assert_eq!(segments[0].ordinal, 0);
    }

    #[test]
    fn test_headings_and_cells_are_candidates() {
        let html = format!(
            "<h2>{PARAGRAPH}</h2><table><tr><td>{PARAGRAPH}</td></tr></table>"
        );
        let segments = segments_from_html(&html, "r.html", &ExtractOptions::default());
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_inline_markup_is_flattened() {
        let html = "<p>The quarterly <b>compliance</b> report covers all regional \
                    offices and their filings.</p>";
        let segments = segments_from_html(html, "r.html", &ExtractOptions::default());
        assert_eq!(segments.len(), 1);
        assert!(segments[0].content.contains("quarterly compliance report"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = format!("<p>{PARAGRAPH}</p><p>{PARAGRAPH} Again and again and again.</p>");
        let opts = ExtractOptions::default();
        let first = segments_from_html(&html, "r.html", &opts);
        let second = segments_from_html(&html, "r.html", &opts);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_document_yields_no_segments() {
        let segments =
            segments_from_html("<html><body></body></html>", "r.html", &ExtractOptions::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = extract_html(Path::new("/nonexistent/missing.html"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, RationalizeError::DocumentUnreadable { .. }));
    }
}
