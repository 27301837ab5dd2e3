//! Text segments: the atomic unit of comparison.
//!
//! A layout block extracted from a document becomes a [`TextSegment`] only if
//! it survives normalization and the minimum-token filter. Normalization is
//! deliberately cheap: lower-case, trim, and (optionally) strip long runs of
//! `x`/`X` placeholder characters left behind by redaction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum number of whitespace-separated tokens for a block to count as a
/// segment. Filters titles, page numbers and stray labels.
pub const MIN_SEGMENT_TOKENS: usize = 10;

/// Runs of five or more `x`/`X` characters are redaction filler, not content.
static REDACTION_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[xX]{5,}\b").expect("pattern is compile-time constant"));

/// A normalized block of extracted document text.
///
/// Immutable once created; `ordinal` records insertion order within the
/// originating document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    /// Normalized text content.
    pub content: String,
    /// Identifier of the originating document (file name).
    pub origin: String,
    /// Position within the document, in extraction order.
    pub ordinal: usize,
}

impl TextSegment {
    /// Create a segment. Callers are expected to pass already-normalized text.
    pub fn new(content: impl Into<String>, origin: impl Into<String>, ordinal: usize) -> Self {
        Self {
            content: content.into(),
            origin: origin.into(),
            ordinal,
        }
    }
}

/// Options controlling block normalization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Minimum whitespace-separated token count for a block to survive.
    pub min_tokens: usize,

    /// Strip runs of five-or-more repeated `x`/`X` placeholder characters
    /// (redaction marks) before filtering.
    pub strip_redaction_runs: bool,
}

impl ExtractOptions {
    /// Set the minimum token count.
    #[inline]
    #[must_use = "returns options with the token minimum configured"]
    pub const fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    /// Enable or disable redaction-run stripping.
    #[inline]
    #[must_use = "returns options with redaction stripping configured"]
    pub const fn with_redaction_stripping(mut self, enable: bool) -> Self {
        self.strip_redaction_runs = enable;
        self
    }
}

impl Default for ExtractOptions {
    #[inline]
    fn default() -> Self {
        Self {
            min_tokens: MIN_SEGMENT_TOKENS,
            strip_redaction_runs: false,
        }
    }
}

/// Normalize raw block text: lower-case, trim, optional redaction stripping.
#[must_use]
pub fn normalize_block(text: &str, options: &ExtractOptions) -> String {
    let lowered = text.to_lowercase();
    let lowered = if options.strip_redaction_runs {
        REDACTION_RUN.replace_all(&lowered, "").into_owned()
    } else {
        lowered
    };
    lowered.trim().to_string()
}

/// Normalize a block and apply the minimum-token filter.
///
/// Returns `None` when the normalized block is too short to be a meaningful
/// paragraph.
#[must_use]
pub fn filter_block(text: &str, options: &ExtractOptions) -> Option<String> {
    let normalized = normalize_block(text, options);
    if normalized.split_whitespace().count() >= options.min_tokens {
        Some(normalized)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        let opts = ExtractOptions::default();
        assert_eq!(normalize_block("  Hello WORLD  ", &opts), "hello world");
    }

    #[test]
    fn test_normalize_strips_redaction_runs() {
        let opts = ExtractOptions::default().with_redaction_stripping(true);
        let out = normalize_block("account xxxxxxx closed", &opts);
        assert_eq!(out, "account  closed");
    }

    #[test]
    fn test_normalize_keeps_short_x_runs() {
        // Four x's is a word, not a redaction mark.
        let opts = ExtractOptions::default().with_redaction_stripping(true);
        assert_eq!(normalize_block("xxxx marks", &opts), "xxxx marks");
    }

    #[test]
    fn test_normalize_without_stripping_keeps_runs() {
        let opts = ExtractOptions::default();
        assert_eq!(
            normalize_block("account XXXXXXX closed", &opts),
            "account xxxxxxx closed"
        );
    }

    #[test]
    fn test_filter_rejects_short_blocks() {
        let opts = ExtractOptions::default();
        assert!(filter_block("Page 4", &opts).is_none());
        assert!(filter_block("one two three four five six seven eight nine", &opts).is_none());
    }

    #[test]
    fn test_filter_accepts_ten_tokens() {
        let opts = ExtractOptions::default();
        let block = "one two three four five six seven eight nine ten";
        assert_eq!(filter_block(block, &opts), Some(block.to_string()));
    }

    #[test]
    fn test_filter_counts_tokens_after_normalization() {
        // The redaction run must not count as a token.
        let opts = ExtractOptions::default()
            .with_min_tokens(10)
            .with_redaction_stripping(true);
        let block = "one two three four five six seven eight nine XXXXXXXX";
        assert!(filter_block(block, &opts).is_none());
    }

    #[test]
    fn test_custom_min_tokens() {
        let opts = ExtractOptions::default().with_min_tokens(2);
        assert_eq!(filter_block("two words", &opts), Some("two words".to_string()));
        assert!(filter_block("one", &opts).is_none());
    }

    #[test]
    fn test_segment_construction() {
        let seg = TextSegment::new("body text", "report.pdf", 3);
        assert_eq!(seg.content, "body text");
        assert_eq!(seg.origin, "report.pdf");
        assert_eq!(seg.ordinal, 3);
    }
}
