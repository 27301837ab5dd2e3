//! Row model for the rule catalog workbook.
//!
//! Kept local so the reporting crate stays decoupled from the extraction
//! backends; callers map their extracted rules into [`RuleRow`]s.

/// One row of the rule catalog report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRow {
    /// Rule identifier, e.g. `R120`.
    pub id: String,
    /// Rule name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Formula body, line breaks preserved.
    pub formula: String,
}
