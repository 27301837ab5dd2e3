//! Keyword-based rule categorization.
//!
//! Categories are assigned from an ordered list of (keyword, label) rules
//! evaluated in priority order: the first keyword contained in the rule name
//! wins. The table is data, not control flow, so precedence is explicit and
//! stable across revisions.

use serde::{Deserialize, Serialize};

/// Label used when no keyword matches.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One (keyword, label) classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Substring looked up in the rule name (case-sensitive).
    pub keyword: String,
    /// Category label assigned on match.
    pub label: String,
}

/// Ordered first-match-wins categorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    /// Build a categorizer from an explicit ordered rule list.
    #[must_use]
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The standard category table for report rule names.
    #[must_use]
    pub fn standard() -> Self {
        let table = [
            ("Queue", "Queue Rule"),
            ("Page", "Page Rule"),
            ("Component", "Component"),
            ("Document", "Document Rule"),
            ("Design", "Page Design"),
        ];
        Self::new(
            table
                .iter()
                .map(|&(keyword, label)| CategoryRule {
                    keyword: keyword.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        )
    }

    /// Categorize a rule name; the first matching keyword wins.
    #[must_use]
    pub fn categorize(&self, rule_name: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule_name.contains(rule.keyword.as_str()))
            .map_or(UNCATEGORIZED, |rule| rule.label.as_str())
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::standard()
    }
}
