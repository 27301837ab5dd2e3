//! Match aggregation: grouping raw similarity triples by segment content.
//!
//! [`ComparisonResult`] preserves the order triples were produced in: segments
//! appear in first-seen order and so do the matches within each segment. No
//! deduplication is performed — if the same document contributes the same
//! score twice, both entries are kept.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One segment resembling one other document above threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    /// Name of the document the segment was found in.
    pub matched_document: String,
    /// Similarity percentage in [0, 100], rounded to two decimals.
    pub score: f64,
}

/// A segment together with every match recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMatches {
    /// Normalized segment text (the grouping key).
    pub content: String,
    /// Matches in the order the pairwise scan produced them.
    pub matches: Vec<SimilarityMatch>,
}

/// Insertion-ordered mapping from segment content to its matches.
///
/// Invariant: an entry exists only once its first match is pushed, so there
/// is never an entry with zero matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonResult {
    entries: Vec<SegmentMatches>,
    index: HashMap<String, usize>,
}

impl ComparisonResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one (segment, matched-document, score) triple.
    pub fn push(&mut self, content: &str, matched_document: &str, score: f64) {
        let idx = match self.index.get(content) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push(SegmentMatches {
                    content: content.to_string(),
                    matches: Vec::new(),
                });
                self.index.insert(content.to_string(), idx);
                idx
            }
        };
        self.entries[idx].matches.push(SimilarityMatch {
            matched_document: matched_document.to_string(),
            score,
        });
    }

    /// Segments with their matches, in first-seen order.
    #[must_use]
    pub fn entries(&self) -> &[SegmentMatches] {
        &self.entries
    }

    /// Number of distinct segments with at least one match.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no segment matched anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (segment, match) pairs across all entries.
    #[must_use]
    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|e| e.matches.len()).sum()
    }
}
