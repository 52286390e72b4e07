//! Small helpers over `scraper` shared by the page parsers.
//!
//! Parsing is kept synchronous and string-in/record-out so the session
//! futures never hold a parsed document across an await point.

use scraper::{ElementRef, Html, Selector};

use crate::error::{PortalError, Result};

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PortalError::UnexpectedMarkup {
        what: format!("bad selector '{selector}': {e}"),
    })
}

/// Trimmed text content of the first node matching `selector`.
pub(crate) fn select_first_text(doc: &Html, selector: &str) -> Result<Option<String>> {
    let sel = parse_selector(selector)?;
    Ok(doc.select(&sel).next().map(element_text))
}

/// Trimmed text content of every node matching `selector`.
pub(crate) fn select_texts(doc: &Html, selector: &str) -> Result<Vec<String>> {
    let sel = parse_selector(selector)?;
    Ok(doc.select(&sel).map(element_text).collect())
}

/// Attribute value of the first node matching `selector`.
pub(crate) fn select_attr(doc: &Html, selector: &str, attr: &str) -> Result<Option<String>> {
    let sel = parse_selector(selector)?;
    Ok(doc
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.to_string()))
}

/// Like [`select_first_text`], but a missing node is an error naming the
/// thing we were looking for.
pub(crate) fn require_text(doc: &Html, selector: &str, what: &str) -> Result<String> {
    select_first_text(doc, selector)?.ok_or_else(|| PortalError::UnexpectedMarkup {
        what: what.to_string(),
    })
}

pub(crate) fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// First matching descendant's text, scoped to one element (table row,
/// list item).
pub(crate) fn child_text(el: ElementRef, selector: &Selector) -> Option<String> {
    el.select(selector).next().map(element_text)
}
