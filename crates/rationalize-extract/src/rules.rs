//! Rule-definition extraction from exported HTML rule catalogs.
//!
//! A rule lives in a `<div class="rule">` whose `<h3>` heading reads
//! `R<digits> <name>` and whose `<div class="formula">` holds the formula
//! body. Headings beginning `F<digits>` are formula fragments, not rules, and
//! are skipped.

use crate::encoding::decode_to_utf8;
use once_cell::sync::Lazy;
use rationalize_core::rules::Categorizer;
use rationalize_core::{RationalizeError, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};

static RULE_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.rule").expect("selector is compile-time constant"));
static RULE_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3").expect("selector is compile-time constant"));
static RULE_FORMULA: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.formula").expect("selector is compile-time constant"));

/// `R<digits>` followed by the rule name.
static RULE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(R\d+)\s+(.*)").expect("pattern is compile-time constant"));
/// Formula fragment headings to skip.
static FRAGMENT_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^F\d+").expect("pattern is compile-time constant"));

/// One extracted rule definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRule {
    /// Rule identifier, e.g. `R120`.
    pub id: String,
    /// Rule name from the heading.
    pub name: String,
    /// Formula body with line breaks preserved.
    pub formula: String,
    /// Category label from the keyword table.
    pub category: String,
}

/// Parse rule definitions out of decoded HTML text.
#[must_use]
pub fn rules_from_html(html: &str, categorizer: &Categorizer) -> Vec<ExtractedRule> {
    let document = Html::parse_document(html);
    let mut rules = Vec::new();

    for block in document.select(&RULE_BLOCK) {
        let Some(heading) = block.select(&RULE_HEADING).next() else {
            continue;
        };
        let heading_text: String = heading.text().collect::<String>().trim().to_string();
        if FRAGMENT_HEADING.is_match(&heading_text) {
            continue;
        }
        let Some(captures) = RULE_NAME.captures(&heading_text) else {
            continue;
        };

        let formula = block
            .select(&RULE_FORMULA)
            .next()
            .map(|f| f.text().collect::<Vec<_>>().join("\n").trim().to_string())
            .unwrap_or_default();

        let name = captures[2].to_string();
        rules.push(ExtractedRule {
            id: captures[1].to_string(),
            category: categorizer.categorize(&name).to_string(),
            name,
            formula,
        });
    }

    rules
}

/// Extract rules from one HTML file, decoding its encoding first.
///
/// # Errors
/// Returns [`RationalizeError::DocumentUnreadable`] when the file cannot be
/// read.
pub fn rules_from_file(path: &Path, categorizer: &Categorizer) -> Result<Vec<ExtractedRule>> {
    let bytes = std::fs::read(path).map_err(|e| RationalizeError::unreadable(path, e))?;
    let (text, encoding) = decode_to_utf8(&bytes);
    log::info!("processing {} ({encoding})", path.display());
    Ok(rules_from_html(&text, categorizer))
}

/// Walk a directory tree and extract rules from every `.html`/`.htm` file.
///
/// Files are visited in sorted path order so output is deterministic.
///
/// # Errors
/// Returns an error when the directory cannot be traversed; unreadable files
/// inside it are logged and skipped.
pub fn collect_rules(dir: &Path, categorizer: &Categorizer) -> Result<Vec<ExtractedRule>> {
    let mut files = Vec::new();
    collect_html_files(dir, &mut files)?;
    files.sort();

    let mut rules = Vec::new();
    for file in &files {
        match rules_from_file(file, categorizer) {
            Ok(extracted) => rules.extend(extracted),
            Err(e) => log::warn!("skipping {}: {e}", file.display()),
        }
    }
    Ok(rules)
}

fn collect_html_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_html_files(&path, out)?;
        } else if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("html" | "htm")
        ) {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
        <html><body>
        <div class="rule">
            <h3>R101 Queue Assignment</h3>
            <div class="formula">IF queue = "intake"
THEN route(agent)</div>
        </div>
        <div class="rule">
            <h3>F12 Shared Fragment</h3>
            <div class="formula">helper()</div>
        </div>
        <div class="rule">
            <h3>R202 Margin Check</h3>
            <div class="formula">ASSERT margin &gt; 0</div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_extracts_rules_and_skips_fragments() {
        let rules = rules_from_html(CATALOG, &Categorizer::standard());
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "R101");
        assert_eq!(rules[0].name, "Queue Assignment");
        assert_eq!(rules[0].category, "Queue Rule");
        assert_eq!(rules[1].id, "R202");
        assert_eq!(rules[1].category, "Uncategorized");
    }

    #[test]
    fn test_formula_entities_are_decoded() {
        let rules = rules_from_html(CATALOG, &Categorizer::standard());
        assert_eq!(rules[1].formula, "ASSERT margin > 0");
    }

    #[test]
    fn test_formula_line_breaks_preserved() {
        let rules = rules_from_html(CATALOG, &Categorizer::standard());
        assert!(rules[0].formula.contains('\n'));
        assert!(rules[0].formula.starts_with("IF queue"));
    }

    #[test]
    fn test_rule_without_heading_is_skipped() {
        let html = r#"<div class="rule"><div class="formula">orphan()</div></div>"#;
        assert!(rules_from_html(html, &Categorizer::standard()).is_empty());
    }

    #[test]
    fn test_collect_rules_walks_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("catalog.htm"), CATALOG).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let rules = collect_rules(dir.path(), &Categorizer::standard()).unwrap();
        assert_eq!(rules.len(), 2);
    }
}
