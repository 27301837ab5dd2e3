//! Spreadsheet rendering via `rust_xlsxwriter`.
//!
//! Two workbooks are produced: the similarity report (one row per match,
//! color-coded by score) and the rule catalog report. Both use a bold header
//! row and wrapped, top-aligned cells so long paragraphs stay readable.

use chrono::Local;
use rationalize_core::{ComparisonResult, RationalizeError, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};
use std::path::{Path, PathBuf};

use crate::rules::RuleRow;

/// Fill for exact matches (score 100.00).
const GREEN_FILL: Color = Color::RGB(0x00D4_EDDA);
/// Fill for partial matches.
const YELLOW_FILL: Color = Color::RGB(0x00FF_F3CD);

/// Cap on auto-fit column widths in the rule catalog.
const MAX_COLUMN_WIDTH: f64 = 50.0;

fn report_err(e: XlsxError) -> RationalizeError {
    RationalizeError::Report(e.to_string())
}

fn header_format() -> Format {
    Format::new().set_bold().set_align(FormatAlign::Top)
}

fn body_format() -> Format {
    Format::new().set_text_wrap().set_align(FormatAlign::Top)
}

/// Timestamped file name for the similarity workbook.
#[must_use]
pub fn timestamped_report_name() -> String {
    format!(
        "template_reusability_report_{}.xlsx",
        Local::now().format("%Y_%m_%d_%H_%M_%S")
    )
}

/// Write the similarity workbook into `output_dir` and return its path.
///
/// One row per (segment, match) pair. Content and score cells are filled
/// green for exact matches and yellow for partial ones, matching the HTML
/// report's color coding.
///
/// # Errors
/// Returns [`RationalizeError::Report`] when the workbook cannot be written.
pub fn write_xlsx_report(result: &ComparisonResult, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(timestamped_report_name());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Template Reusability Report")
        .map_err(report_err)?;

    let header = header_format();
    worksheet
        .write_string_with_format(0, 0, "Type", &header)
        .and_then(|ws| ws.write_string_with_format(0, 1, "Content (Paragraph)", &header))
        .and_then(|ws| ws.write_string_with_format(0, 2, "Found in Document", &header))
        .and_then(|ws| ws.write_string_with_format(0, 3, "Similarity Percentage", &header))
        .map_err(report_err)?;

    let plain = body_format();
    let green = body_format().set_background_color(GREEN_FILL);
    let yellow = body_format().set_background_color(YELLOW_FILL);

    let mut row: u32 = 1;
    for entry in result.entries() {
        for m in &entry.matches {
            let fill = if m.score == 100.0 { &green } else { &yellow };
            worksheet
                .write_string_with_format(row, 0, "Paragraph", &plain)
                .and_then(|ws| ws.write_string_with_format(row, 1, &entry.content, fill))
                .and_then(|ws| {
                    ws.write_string_with_format(row, 2, &m.matched_document, &plain)
                })
                .and_then(|ws| ws.write_number_with_format(row, 3, m.score, fill))
                .map_err(report_err)?;
            row += 1;
        }
    }

    worksheet.set_column_width(0, 12.0).map_err(report_err)?;
    worksheet.set_column_width(1, 80.0).map_err(report_err)?;
    worksheet.set_column_width(2, 35.0).map_err(report_err)?;
    worksheet.set_column_width(3, 20.0).map_err(report_err)?;

    workbook.save(&path).map_err(report_err)?;
    log::info!("wrote {} ({} rows)", path.display(), row - 1);
    Ok(path)
}

/// Longest line of a cell value, in characters.
fn widest_line(text: &str) -> usize {
    text.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Write the rule catalog workbook as `rules_report.xlsx` in `output_dir`.
///
/// Columns are {Rule ID, Rule Name, Formula, Category}. Formulas keep their
/// internal line breaks and use a monospace font; every column is auto-fit to
/// its longest line plus padding, capped so the sheet stays navigable.
///
/// # Errors
/// Returns [`RationalizeError::Report`] when the workbook cannot be written.
pub fn write_rules_report(rules: &[RuleRow], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join("rules_report.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Rule Definitions").map_err(report_err)?;

    let headers = ["Rule ID", "Rule Name", "Formula", "Category"];
    let header = header_format();
    let mut widest: [usize; 4] = [0; 4];
    for (col, title) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header)
            .map_err(report_err)?;
        widest[col] = title.chars().count();
    }

    let plain = body_format();
    let formula_format = body_format().set_font_name("Courier New");

    for (i, rule) in rules.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string_with_format(row, 0, &rule.id, &plain)
            .and_then(|ws| ws.write_string_with_format(row, 1, &rule.name, &plain))
            .and_then(|ws| ws.write_string_with_format(row, 2, &rule.formula, &formula_format))
            .and_then(|ws| ws.write_string_with_format(row, 3, &rule.category, &plain))
            .map_err(report_err)?;
        for (col, value) in [&rule.id, &rule.name, &rule.formula, &rule.category]
            .iter()
            .enumerate()
        {
            widest[col] = widest[col].max(widest_line(value));
        }
    }

    for (col, &w) in widest.iter().enumerate() {
        let width = ((w + 2) as f64).min(MAX_COLUMN_WIDTH);
        worksheet
            .set_column_width(col as u16, width)
            .map_err(report_err)?;
    }

    workbook.save(&path).map_err(report_err)?;
    log::info!("wrote {} ({} rules)", path.display(), rules.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto, DataType, Reader};

    fn sample() -> ComparisonResult {
        let mut result = ComparisonResult::new();
        result.push("identical paragraph", "other.pdf", 100.0);
        result.push("similar paragraph", "third.pdf", 64.29);
        result
    }

    fn read_rows(path: &Path, sheet: &str) -> Vec<Vec<String>> {
        let mut workbook = open_workbook_auto(path).unwrap();
        let range = workbook.worksheet_range(sheet).unwrap();
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.get_string()
                            .map(str::to_string)
                            .or_else(|| cell.get_float().map(|f| f.to_string()))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_similarity_workbook_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_xlsx_report(&sample(), dir.path()).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook
            .worksheet_range("Template Reusability Report")
            .unwrap();

        assert_eq!(range.height(), 3);
        assert_eq!(
            range.get_value((0, 3)).unwrap().get_string(),
            Some("Similarity Percentage")
        );
        assert_eq!(
            range.get_value((1, 1)).unwrap().get_string(),
            Some("identical paragraph")
        );
        assert_eq!(range.get_value((1, 3)).unwrap().get_float(), Some(100.0));
        assert_eq!(range.get_value((2, 3)).unwrap().get_float(), Some(64.29));
    }

    #[test]
    fn test_report_name_is_timestamped() {
        let name = timestamped_report_name();
        assert!(name.starts_with("template_reusability_report_"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn test_rewriting_same_result_yields_identical_rows() {
        let dir = tempfile::tempdir().unwrap();
        let first_dir = dir.path().join("first");
        let second_dir = dir.path().join("second");
        std::fs::create_dir_all(&first_dir).unwrap();
        std::fs::create_dir_all(&second_dir).unwrap();

        let first = write_xlsx_report(&sample(), &first_dir).unwrap();
        let second = write_xlsx_report(&sample(), &second_dir).unwrap();

        assert_eq!(
            read_rows(&first, "Template Reusability Report"),
            read_rows(&second, "Template Reusability Report")
        );
    }

    #[test]
    fn test_rules_workbook_round_trip() {
        let rules = vec![
            RuleRow {
                id: "R101".to_string(),
                name: "Queue Assignment".to_string(),
                category: "Queue Rule".to_string(),
                formula: "IF queue = \"intake\"\nTHEN route(agent)".to_string(),
            },
            RuleRow {
                id: "R202".to_string(),
                name: "Margin Check".to_string(),
                category: "Uncategorized".to_string(),
                formula: "ASSERT margin > 0".to_string(),
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = write_rules_report(&rules, dir.path()).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range("Rule Definitions").unwrap();

        assert_eq!(range.height(), 3);
        assert_eq!(range.get_value((1, 0)).unwrap().get_string(), Some("R101"));
        // Formula is the third column, category the fourth.
        assert_eq!(
            range.get_value((0, 2)).unwrap().get_string(),
            Some("Formula")
        );
        assert_eq!(
            range.get_value((2, 3)).unwrap().get_string(),
            Some("Uncategorized")
        );
        let formula = range.get_value((1, 2)).unwrap().get_string().unwrap();
        assert!(formula.contains('\n'));
    }

    #[test]
    fn test_empty_result_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_xlsx_report(&ComparisonResult::new(), dir.path()).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook
            .worksheet_range("Template Reusability Report")
            .unwrap();
        assert_eq!(range.height(), 1);
    }

    #[test]
    fn test_widest_line_spans_breaks() {
        assert_eq!(widest_line("ab\nlonger line\ncd"), 11);
        assert_eq!(widest_line(""), 0);
    }
}
