//! PDF text-block extraction via `lopdf`.
//!
//! Page text is pulled with `lopdf`'s text extractor and split into layout
//! blocks on blank lines. Encrypted documents and parse failures surface as
//! [`RationalizeError::DocumentUnreadable`]; a single unreadable page is
//! logged and skipped without failing the document.

use crate::corpus::DocumentReport;
use rationalize_core::segment::{filter_block, ExtractOptions, TextSegment};
use rationalize_core::{RationalizeError, Result};
use std::path::Path;

/// Extract filtered text segments from a PDF file.
///
/// # Errors
/// Returns [`RationalizeError::DocumentUnreadable`] when the file cannot be
/// loaded or is encrypted.
pub fn extract_pdf(path: &Path, options: &ExtractOptions) -> Result<DocumentReport> {
    let document =
        lopdf::Document::load(path).map_err(|e| RationalizeError::unreadable(path, e))?;

    if document.is_encrypted() {
        return Err(RationalizeError::unreadable(path, "encrypted"));
    }

    let pages = document.get_pages();
    let page_count = pages.len();
    let name = document_name(path);

    let mut segments = Vec::new();
    for &page_number in pages.keys() {
        let page_text = match document.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                log::warn!(
                    "error reading page {page_number} of {}: {e}",
                    path.display()
                );
                continue;
            }
        };

        for block in split_blocks(&page_text) {
            if let Some(content) = filter_block(&block, options) {
                let ordinal = segments.len();
                segments.push(TextSegment::new(content, name.clone(), ordinal));
            }
        }
    }

    Ok(DocumentReport {
        name,
        segments,
        page_count,
    })
}

/// Split extracted page text into layout blocks on blank lines.
///
/// Lines within a block are rejoined with newlines so multi-line paragraphs
/// stay one unit, mirroring how layout extractors group spans.
fn split_blocks(page_text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in page_text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Document identifier: the file name, lossily decoded.
pub(crate) fn document_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks_on_blank_lines() {
        let text = "first line\nsecond line\n\nnext block\n\n\nlast block\n";
        let blocks = split_blocks(text);
        assert_eq!(
            blocks,
            vec!["first line\nsecond line", "next block", "last block"]
        );
    }

    #[test]
    fn test_split_blocks_whitespace_only_lines_break_blocks() {
        let blocks = split_blocks("alpha\n   \nbeta");
        assert_eq!(blocks, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_split_blocks_empty_input() {
        assert!(split_blocks("").is_empty());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = extract_pdf(Path::new("/nonexistent/missing.pdf"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RationalizeError::DocumentUnreadable { .. }
        ));
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();
        let err = extract_pdf(&path, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            RationalizeError::DocumentUnreadable { .. }
        ));
    }

    #[test]
    fn test_document_name_uses_file_name() {
        assert_eq!(document_name(Path::new("dir/sub/report.pdf")), "report.pdf");
    }
}
