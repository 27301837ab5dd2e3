//! Plain-text effort reduction summary.
//!
//! The headline numbers: what share of segments matched something, and the
//! projected page count if matching content were consolidated.

use rationalize_core::{RationalizeError, Result};
use std::path::{Path, PathBuf};

/// File name of the text summary.
pub const SUMMARY_NAME: &str = "effort_reduction_summary.txt";

/// Inputs for the effort reduction estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffortSummary {
    /// Segments analyzed across the corpus.
    pub total_segments: usize,
    /// Total (segment, match) pairs above threshold. A segment matching
    /// several documents counts once per match.
    pub match_count: usize,
    /// Page count across the corpus.
    pub total_pages: usize,
}

impl EffortSummary {
    /// Matches found relative to segments analyzed, in percent.
    ///
    /// Can exceed 100 when segments match multiple documents each.
    #[must_use]
    pub fn effort_reduction_percent(&self) -> f64 {
        if self.total_segments == 0 {
            return 0.0;
        }
        self.match_count as f64 / self.total_segments as f64 * 100.0
    }

    /// Projected page count after consolidating matching content.
    ///
    /// The reduction ratio is capped at 1, and the projection never drops
    /// below one page: a document set cannot rationalize away to nothing.
    #[must_use]
    pub fn projected_pages(&self) -> usize {
        let ratio = (self.effort_reduction_percent() / 100.0).min(1.0);
        let projected = (self.total_pages as f64 * (1.0 - ratio)).round() as usize;
        projected.max(1)
    }

    /// Render the summary as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Effort Reduction Summary\n\
             ========================\n\
             Total paragraphs analyzed:      {}\n\
             Template matches found:         {}\n\
             Estimated effort reduction:     {:.2}%\n\
             Pages before rationalization:   {}\n\
             Projected pages after:          {}\n",
            self.total_segments,
            self.match_count,
            self.effort_reduction_percent(),
            self.total_pages,
            self.projected_pages()
        )
    }
}

/// Write the summary into `output_dir` and return its path.
///
/// # Errors
/// Returns [`RationalizeError::Report`] when the file cannot be written.
pub fn write_summary(summary: &EffortSummary, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(SUMMARY_NAME);
    std::fs::write(&path, summary.render())
        .map_err(|e| RationalizeError::Report(format!("writing {}: {e}", path.display())))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_reduction_is_match_share() {
        let summary = EffortSummary {
            total_segments: 200,
            match_count: 50,
            total_pages: 40,
        };
        assert!((summary.effort_reduction_percent() - 25.0).abs() < 1e-9);
        assert_eq!(summary.projected_pages(), 30);
    }

    #[test]
    fn test_every_match_counts_toward_reduction() {
        // One segment matching three documents contributes three matches.
        let summary = EffortSummary {
            total_segments: 10,
            match_count: 3,
            total_pages: 20,
        };
        assert!((summary.effort_reduction_percent() - 30.0).abs() < 1e-9);
        assert_eq!(summary.projected_pages(), 14);
    }

    #[test]
    fn test_reduction_over_one_hundred_caps_page_ratio() {
        let summary = EffortSummary {
            total_segments: 10,
            match_count: 15,
            total_pages: 12,
        };
        assert!((summary.effort_reduction_percent() - 150.0).abs() < 1e-9);
        assert_eq!(summary.projected_pages(), 1);
    }

    #[test]
    fn test_empty_corpus_reduces_nothing() {
        let summary = EffortSummary {
            total_segments: 0,
            match_count: 0,
            total_pages: 0,
        };
        assert_eq!(summary.effort_reduction_percent(), 0.0);
        assert_eq!(summary.projected_pages(), 1);
    }

    #[test]
    fn test_projected_pages_floor_is_one() {
        let summary = EffortSummary {
            total_segments: 10,
            match_count: 10,
            total_pages: 12,
        };
        assert_eq!(summary.projected_pages(), 1);
    }

    #[test]
    fn test_render_carries_two_decimal_percent() {
        let summary = EffortSummary {
            total_segments: 3,
            match_count: 1,
            total_pages: 6,
        };
        let text = summary.render();
        assert!(text.contains("33.33%"));
        assert!(text.contains("Total paragraphs analyzed:      3"));
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let summary = EffortSummary {
            total_segments: 4,
            match_count: 2,
            total_pages: 8,
        };
        let path = write_summary(&summary, dir.path()).unwrap();
        assert!(path.ends_with(SUMMARY_NAME));
        assert!(std::fs::read_to_string(path)
            .unwrap()
            .contains("50.00%"));
    }
}
