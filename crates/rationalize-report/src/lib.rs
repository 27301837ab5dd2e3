//! # rationalize-report
//!
//! Report rendering for rationalize-rs: the HTML similarity report, the
//! color-coded XLSX workbook, the rule catalog workbook, and the plain-text
//! effort reduction summary. Rendering logic is kept pure where practical so
//! it can be tested without the filesystem.

pub mod html;
pub mod rules;
pub mod summary;
pub mod xlsx;

pub use html::{render_html, write_html_report, HTML_REPORT_NAME};
pub use rules::RuleRow;
pub use summary::{write_summary, EffortSummary, SUMMARY_NAME};
pub use xlsx::{timestamped_report_name, write_rules_report, write_xlsx_report};
