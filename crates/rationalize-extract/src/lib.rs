//! # rationalize-extract
//!
//! Text-block extraction backends for rationalize-rs: PDF (via `lopdf`) and
//! HTML (via `scraper` with encoding detection), plus corpus discovery with
//! parallel batch extraction and rule-catalog parsing for exported HTML rule
//! definitions.
//!
//! Segmentation policy (minimum token count, normalization, redaction
//! stripping) lives in `rationalize-core`; this crate only turns file formats
//! into raw layout blocks and feeds them through that policy.

pub mod corpus;
pub mod encoding;
pub mod html;
pub mod pdf;
pub mod rules;

pub use corpus::{
    discover_documents, extract_directory, extract_document, CorpusExtraction, DocumentReport,
    ExtractionFailure, RECOGNIZED_EXTENSIONS,
};
pub use encoding::{decode_to_utf8, detect_encoding, DetectedEncoding};
pub use html::extract_html;
pub use pdf::extract_pdf;
pub use rules::{collect_rules, rules_from_html, ExtractedRule};
