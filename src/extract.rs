//! Structural content extraction from a fetched page.

use crate::config::SelectorRule;
use crate::error::PipelineError;
use crate::normalize::normalize;
use scraper::{ElementRef, Html, Selector};

/// Extracted values, one slot per selector rule in table order. Absence of a
/// match is `None`, never an error.
pub type Extraction = Vec<Option<String>>;

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Evaluates the selector table against a parsed page.
///
/// A rule with zero matches yields `None`. A single match on a non-multi
/// rule yields its normalized full text. Multi rules (and any rule matching
/// more than one element) normalize each match independently, drop the
/// empties, and join the survivors with ", "; a lone survivor stays bare.
///
/// The only error is an unparseable selector string, which fails the whole
/// extraction so no file is ever partially populated from a broken table.
pub fn extract(html: &Html, rules: &[SelectorRule]) -> Result<Extraction, PipelineError> {
    rules.iter().map(|rule| extract_one(html, rule)).collect()
}

fn extract_one(html: &Html, rule: &SelectorRule) -> Result<Option<String>, PipelineError> {
    let selector = Selector::parse(&rule.selector).map_err(|e| {
        PipelineError::Parse(format!("bad selector {:?}: {e}", rule.selector))
    })?;

    let matches: Vec<ElementRef<'_>> = html.select(&selector).collect();
    if matches.is_empty() {
        return Ok(None);
    }

    if rule.multi || matches.len() > 1 {
        let cleaned: Vec<String> = matches
            .into_iter()
            .filter_map(|el| normalize(&element_text(el)))
            .collect();
        return Ok(match cleaned.len() {
            0 => None,
            1 => cleaned.into_iter().next(),
            _ => Some(cleaned.join(", ")),
        });
    }

    Ok(normalize(&element_text(matches[0])))
}
