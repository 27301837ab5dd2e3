//! TF-IDF vectorization and cosine-similarity comparison.
//!
//! The vectorizer is fit jointly over every segment taking part in a
//! comparison (query and corpus share one vocabulary), then each segment is
//! mapped to an L2-normalized sparse term-weight vector. Cosine similarity of
//! two normalized vectors reduces to their dot product, a value in [0, 1].
//!
//! Weighting matches the conventional smoothed form:
//!
//! ```text
//! tf(t, d)  = raw count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! Tokens are runs of two-or-more Unicode word characters; segment text is
//! already lower-cased during normalization.

use crate::aggregate::ComparisonResult;
use crate::segment::TextSegment;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// A pair is reported as a match only when cosine similarity strictly
/// exceeds this value (10%).
pub const DEFAULT_THRESHOLD: f64 = 0.10;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("pattern is compile-time constant"));

/// Comparison topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// The first `reference_count` segments are the reference document; each
    /// is scored against every later segment only. Self-comparison is
    /// excluded by index range, not by content checks.
    OneVsMany {
        /// Number of leading segments belonging to the reference document.
        reference_count: usize,
    },
    /// Upper-triangular scan over the whole corpus: each unordered pair of
    /// segments is considered exactly once.
    AllVsAll,
}

/// Split text into comparison tokens.
fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// L2-normalized sparse term-weight vector.
///
/// Term ids are sorted ascending, which lets [`TfidfVector::dot`] run as a
/// linear merge.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfVector {
    terms: Vec<(usize, f64)>,
}

impl TfidfVector {
    /// Dot product of two normalized vectors: the cosine similarity.
    ///
    /// Zero-information vectors (no known terms) score 0.0 against anything.
    /// The accumulated sum is clamped to 1.0: identical vectors can drift a
    /// few ulps above it, which would break strict-threshold comparisons at
    /// the boundary.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.terms.len() && j < other.terms.len() {
            let (ta, wa) = self.terms[i];
            let (tb, wb) = other.terms[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum.min(1.0)
    }

    /// True when the vector carries no weight at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

/// TF-IDF vectorizer fit over a fixed set of documents.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and document frequencies over `texts`.
    ///
    /// An empty slice produces an empty vocabulary; every transformed vector
    /// is then zero and all similarities are 0. Callers short-circuit the
    /// empty case before reaching here.
    #[must_use]
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for text in texts {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokenize(text.as_ref()) {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(token.to_string()).or_insert(next_id);
                if id == document_frequency.len() {
                    document_frequency.push(0);
                }
                if !seen.contains(&id) {
                    seen.push(id);
                    document_frequency[id] += 1;
                }
            }
        }

        let n = texts.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Number of distinct terms in the fitted vocabulary.
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Map a document to its L2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored.
    #[must_use]
    pub fn transform(&self, text: &str) -> TfidfVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&id) = self.vocabulary.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut terms: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();
        terms.sort_unstable_by_key(|&(id, _)| id);

        let norm = terms.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for term in &mut terms {
                term.1 /= norm;
            }
        }

        TfidfVector { terms }
    }
}

/// Round a raw cosine value to a percentage with two decimal places.
#[must_use]
pub fn score_percent(similarity: f64) -> f64 {
    (similarity * 10_000.0).round() / 100.0
}

/// Compare segments pairwise and aggregate matches above `threshold`.
///
/// The threshold applies to the raw cosine value (strictly greater), before
/// percentage rounding. An empty segment set short-circuits to an empty
/// result rather than fitting an empty vector space.
#[must_use]
pub fn compare_segments(
    segments: &[TextSegment],
    mode: ComparisonMode,
    threshold: f64,
) -> ComparisonResult {
    let mut result = ComparisonResult::new();
    if segments.is_empty() {
        return result;
    }

    let contents: Vec<&str> = segments.iter().map(|s| s.content.as_str()).collect();
    let vectorizer = TfidfVectorizer::fit(&contents);
    let vectors: Vec<TfidfVector> = contents.iter().map(|c| vectorizer.transform(c)).collect();

    log::debug!(
        "comparing {} segments over {} terms",
        segments.len(),
        vectorizer.vocabulary_len()
    );

    match mode {
        ComparisonMode::OneVsMany { reference_count } => {
            let reference_count = reference_count.min(segments.len());
            for i in 0..reference_count {
                for j in reference_count..segments.len() {
                    let similarity = vectors[i].dot(&vectors[j]);
                    if similarity > threshold {
                        result.push(
                            &segments[i].content,
                            &segments[j].origin,
                            score_percent(similarity),
                        );
                    }
                }
            }
        }
        ComparisonMode::AllVsAll => {
            for i in 0..segments.len() {
                for j in (i + 1)..segments.len() {
                    let similarity = vectors[i].dot(&vectors[j]);
                    if similarity > threshold {
                        result.push(
                            &segments[i].content,
                            &segments[j].origin,
                            score_percent(similarity),
                        );
                    }
                }
            }
        }
    }

    result
}
