//! # rationalize-core
//!
//! Core types and algorithms for document rationalization: text segments,
//! TF-IDF/cosine similarity comparison, match aggregation, keyword
//! categorization rules, and the run configuration/error taxonomy shared by
//! the extraction and reporting crates.
//!
//! ## Quick start
//!
//! ```
//! use rationalize_core::segment::TextSegment;
//! use rationalize_core::similarity::{compare_segments, ComparisonMode, DEFAULT_THRESHOLD};
//!
//! let shared = "this paragraph appears verbatim in two documents and is long enough to keep";
//! let segments = vec![
//!     TextSegment::new(shared, "a.pdf", 0),
//!     TextSegment::new(shared, "b.pdf", 0),
//! ];
//! let result = compare_segments(&segments, ComparisonMode::AllVsAll, DEFAULT_THRESHOLD);
//! assert_eq!(result.entries()[0].matches[0].score, 100.00);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod rules;
pub mod segment;
pub mod similarity;

pub use aggregate::{ComparisonResult, SegmentMatches, SimilarityMatch};
pub use config::RunConfig;
pub use error::{RationalizeError, Result};
pub use segment::{ExtractOptions, TextSegment, MIN_SEGMENT_TOKENS};
pub use similarity::{compare_segments, ComparisonMode, DEFAULT_THRESHOLD};
