//! Error types for rationalization runs.
//!
//! Per-document failures (`DocumentUnreadable`) are caught and logged at the
//! extraction boundary and never reach the aggregate computation. Corpus-level
//! emptiness (`EmptyCorpus`) halts a run before any output file is created.

use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur during extraction, comparison and reporting.
#[derive(Error, Debug)]
pub enum RationalizeError {
    /// The document could not be opened, parsed, or is access-protected.
    ///
    /// Documents failing this way are skipped with a logged warning; the
    /// failure is recorded in the batch failure log, not propagated.
    #[error("document unreadable: {path}: {reason}")]
    DocumentUnreadable {
        /// Path of the offending document.
        path: PathBuf,
        /// Human-readable cause (parser message, "encrypted", ...).
        reason: String,
    },

    /// No valid documents survived extraction and filtering.
    ///
    /// The run halts with a user-visible message and no output files.
    #[error("no valid documents found in {0}")]
    EmptyCorpus(PathBuf),

    /// File I/O error reading inputs or writing reports.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (machine-readable report dumps).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workbook construction or save failure.
    #[error("spreadsheet error: {0}")]
    Report(String),
}

impl RationalizeError {
    /// Build a `DocumentUnreadable` from anything displayable.
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::DocumentUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Type alias for [`Result<T, RationalizeError>`].
pub type Result<T> = std::result::Result<T, RationalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_display() {
        let err = RationalizeError::unreadable("reports/a.pdf", "encrypted");
        assert_eq!(
            format!("{err}"),
            "document unreadable: reports/a.pdf: encrypted"
        );
    }

    #[test]
    fn test_empty_corpus_display() {
        let err = RationalizeError::EmptyCorpus(PathBuf::from("allpdf"));
        assert_eq!(format!("{err}"), "no valid documents found in allpdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RationalizeError = io_err.into();
        match err {
            RationalizeError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(RationalizeError::Report("bad sheet".to_string()))
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        match outer() {
            Err(RationalizeError::Report(msg)) => assert_eq!(msg, "bad sheet"),
            other => panic!("expected Report error, got {other:?}"),
        }
    }
}
