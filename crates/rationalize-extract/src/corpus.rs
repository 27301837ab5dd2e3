//! Corpus discovery and parallel batch extraction.
//!
//! Each document is an independent extraction task scheduled on a rayon pool
//! scoped to the batch. Tasks share no mutable state; a failing document is
//! captured as an [`ExtractionFailure`] and never aborts its siblings. The
//! caller re-sorts by document name, so completion order is irrelevant.

use crate::html::extract_html;
use crate::pdf::extract_pdf;
use rationalize_core::segment::{ExtractOptions, TextSegment};
use rationalize_core::{RationalizeError, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// File extensions accepted as corpus documents.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["pdf", "html", "htm"];

/// Per-document extraction result.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    /// Document identifier (file name).
    pub name: String,
    /// Filtered, normalized segments in extraction order.
    pub segments: Vec<TextSegment>,
    /// Page count (PDF page tree; 1 for HTML).
    pub page_count: usize,
}

/// One document that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    /// Path of the failed document.
    pub path: PathBuf,
    /// Error message, as logged.
    pub reason: String,
}

/// Outcome of a batch extraction: surviving documents plus failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusExtraction {
    /// Successfully extracted documents, sorted by name.
    pub documents: Vec<DocumentReport>,
    /// Documents that failed, in discovery order.
    pub failures: Vec<ExtractionFailure>,
}

impl CorpusExtraction {
    /// Total segment count across all documents.
    #[must_use]
    pub fn total_segments(&self) -> usize {
        self.documents.iter().map(|d| d.segments.len()).sum()
    }

    /// Total page count across all documents.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.documents.iter().map(|d| d.page_count).sum()
    }
}

/// List recognized documents in `dir`, sorted by path.
///
/// # Errors
/// Returns an error when the directory cannot be read.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_lowercase)
                    .is_some_and(|ext| RECOGNIZED_EXTENSIONS.contains(&ext.as_str()))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Extract one document, dispatching on its extension.
///
/// # Errors
/// Returns [`RationalizeError::DocumentUnreadable`] for unreadable files or
/// unrecognized extensions.
pub fn extract_document(path: &Path, options: &ExtractOptions) -> Result<DocumentReport> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("pdf") => extract_pdf(path, options),
        Some("html" | "htm") => extract_html(path, options),
        _ => Err(RationalizeError::unreadable(path, "unrecognized extension")),
    }
}

/// Extract every recognized document in `dir` in parallel.
///
/// The worker pool lives only for this call. Failures are logged with one
/// warning line each and collected; they never propagate.
///
/// # Errors
/// Returns an error when the directory cannot be read or the pool cannot be
/// built.
pub fn extract_directory(
    dir: &Path,
    options: &ExtractOptions,
    workers: Option<usize>,
) -> Result<CorpusExtraction> {
    let paths = discover_documents(dir)?;
    extract_paths(&paths, options, workers)
}

/// Extract an explicit list of documents in parallel.
///
/// # Errors
/// Returns an error when the worker pool cannot be built.
pub fn extract_paths(
    paths: &[PathBuf],
    options: &ExtractOptions,
    workers: Option<usize>,
) -> Result<CorpusExtraction> {
    // A locally-built pool keeps the batch's parallelism scoped to this call
    // instead of mutating the global pool.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .build()
        .map_err(|e| RationalizeError::Report(format!("failed to build worker pool: {e}")))?;

    let outcomes: Vec<(PathBuf, Result<DocumentReport>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| (path.clone(), extract_document(path, options)))
            .collect()
    });

    let mut extraction = CorpusExtraction::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(report) => extraction.documents.push(report),
            Err(e) => {
                log::warn!("{e}");
                extraction.failures.push(ExtractionFailure {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    // Completion order is scheduling-dependent; key results by name instead.
    extraction.documents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(extraction)
}
