//! Run configuration.
//!
//! All knobs for one comparison run travel in a single explicitly-passed
//! struct; there is no process-wide configuration state.

use crate::segment::ExtractOptions;
use crate::similarity::DEFAULT_THRESHOLD;
use std::path::PathBuf;

/// Configuration for one rationalization run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Directory holding the corpus documents.
    pub corpus_dir: PathBuf,

    /// Directory holding the reference document (one-vs-many mode only).
    pub reference_dir: Option<PathBuf>,

    /// Base directory for outputs; the timestamped report directory and the
    /// failure log are created underneath it.
    pub output_dir: PathBuf,

    /// Raw cosine similarity threshold, strictly exceeded to count a match.
    pub threshold: f64,

    /// Block normalization and filtering options.
    pub extract: ExtractOptions,

    /// Extraction worker count; `None` uses available parallelism.
    pub workers: Option<usize>,
}

impl RunConfig {
    /// Create a config with default threshold and extraction options.
    pub fn new(corpus_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            corpus_dir: corpus_dir.into(),
            reference_dir: None,
            output_dir: output_dir.into(),
            threshold: DEFAULT_THRESHOLD,
            extract: ExtractOptions::default(),
            workers: None,
        }
    }

    /// Set the reference directory (switches the run to one-vs-many).
    #[must_use = "returns a config with the reference directory set"]
    pub fn with_reference_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reference_dir = Some(dir.into());
        self
    }

    /// Override the match threshold.
    #[inline]
    #[must_use = "returns a config with the threshold set"]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Override extraction options.
    #[inline]
    #[must_use = "returns a config with extraction options set"]
    pub const fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Pin the extraction worker count.
    #[inline]
    #[must_use = "returns a config with the worker count set"]
    pub const fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::new("allpdf", "result");
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert!(config.reference_dir.is_none());
        assert!(config.workers.is_none());
        assert_eq!(config.extract, ExtractOptions::default());
    }

    #[test]
    fn test_builder_chaining() {
        let config = RunConfig::new("allpdf", "result")
            .with_reference_dir("singlepdf")
            .with_threshold(0.25)
            .with_workers(Some(4));
        assert_eq!(config.reference_dir, Some(PathBuf::from("singlepdf")));
        assert_eq!(config.threshold, 0.25);
        assert_eq!(config.workers, Some(4));
    }
}
