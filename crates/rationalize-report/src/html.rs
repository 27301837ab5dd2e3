//! HTML rendering of comparison results.
//!
//! Rendering is split in two: [`render_html`] is a pure function from a
//! [`ComparisonResult`] and timestamp to a document string, and
//! [`write_html_report`] handles the filesystem. Tests exercise the pure
//! half without touching disk.

use chrono::{DateTime, Local};
use rationalize_core::{ComparisonResult, RationalizeError, Result};
use std::path::{Path, PathBuf};

/// File name of the HTML report.
pub const HTML_REPORT_NAME: &str = "template_reusability_report.html";

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 24px; }
h1 { font-size: 1.4em; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: left; vertical-align: top; }
th { background-color: #f2f2f2; }
.highlight-green { background-color: #d4edda; }
.highlight-yellow { background-color: #fff3cd; }";

/// Escape text for embedding in HTML element content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a comparison result as a standalone HTML document.
///
/// Exact matches (score 100.00) are highlighted green, partial matches
/// yellow. Every text cell is escaped; segment content comes from arbitrary
/// documents and frequently contains angle brackets.
#[must_use]
pub fn render_html(result: &ComparisonResult, generated_at: &DateTime<Local>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Template Reusability Report</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n");
    html.push_str("<h1>Template Reusability Report</h1>\n");
    html.push_str(&format!(
        "<p>Generated on {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str("<table>\n<tr><th>Type</th><th>Content (Paragraph)</th>");
    html.push_str("<th>Found in Document</th><th>Similarity Percentage</th></tr>\n");

    for entry in result.entries() {
        for m in &entry.matches {
            let class = if m.score == 100.0 {
                "highlight-green"
            } else {
                "highlight-yellow"
            };
            html.push_str(&format!(
                "<tr><td>Paragraph</td><td class=\"{class}\">{}</td><td>{}</td><td class=\"{class}\">{:.2}</td></tr>\n",
                escape(&entry.content),
                escape(&m.matched_document),
                m.score
            ));
        }
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Write the HTML report into `output_dir` and return its path.
///
/// # Errors
/// Returns [`RationalizeError::Report`] when the file cannot be written.
pub fn write_html_report(result: &ComparisonResult, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(HTML_REPORT_NAME);
    let html = render_html(result, &Local::now());
    std::fs::write(&path, html)
        .map_err(|e| RationalizeError::Report(format!("writing {}: {e}", path.display())))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComparisonResult {
        let mut result = ComparisonResult::new();
        result.push("shared boilerplate paragraph", "other.pdf", 100.0);
        result.push("partially similar <section> text", "third.pdf", 37.52);
        result
    }

    #[test]
    fn test_exact_match_is_green_partial_is_yellow() {
        let html = render_html(&sample(), &Local::now());
        assert!(html.contains("class=\"highlight-green\">shared boilerplate paragraph<"));
        assert!(html.contains("class=\"highlight-yellow\">partially similar"));
    }

    #[test]
    fn test_scores_render_with_two_decimals() {
        let html = render_html(&sample(), &Local::now());
        assert!(html.contains(">100.00<"));
        assert!(html.contains(">37.52<"));
    }

    #[test]
    fn test_content_is_escaped() {
        let html = render_html(&sample(), &Local::now());
        assert!(html.contains("&lt;section&gt;"));
        assert!(!html.contains("<section>"));
    }

    #[test]
    fn test_one_row_per_match() {
        let mut result = sample();
        result.push("shared boilerplate paragraph", "fourth.pdf", 82.11);
        let html = render_html(&result, &Local::now());
        assert_eq!(html.matches("<td>Paragraph</td>").count(), 3);
    }

    #[test]
    fn test_render_is_pure_for_fixed_timestamp() {
        let at = Local::now();
        assert_eq!(render_html(&sample(), &at), render_html(&sample(), &at));
    }

    #[test]
    fn test_empty_result_renders_header_only() {
        let html = render_html(&ComparisonResult::new(), &Local::now());
        assert!(html.contains("<th>Similarity Percentage</th>"));
        assert!(!html.contains("<td>Paragraph</td>"));
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_html_report(&sample(), dir.path()).unwrap();
        assert!(path.ends_with(HTML_REPORT_NAME));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Template Reusability Report"));
    }
}
