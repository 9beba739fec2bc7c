// src/fetch/page.rs
//
// DOM lookups over a parsed page. These mirror what a WebDriver would do for
// `By.name(..)` and `//*[text()[contains(., ..)]]`.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html};

use super::Locator;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Every element of `doc` in document order.
pub fn elements(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.tree.root().descendants().filter_map(ElementRef::wrap)
}

/// First element matching `locator`.
pub fn find<'a>(doc: &'a Html, locator: Locator<'_>) -> Option<ElementRef<'a>> {
    match locator {
        Locator::Name(name) => elements(doc).find(|el| el.value().attr("name") == Some(name)),
        Locator::Text(needle) => elements(doc).find(|el| owns_text(el, needle)),
    }
}

/// True when one of the element's own text nodes (not its descendants')
/// contains `needle`.
pub fn owns_text(el: &ElementRef<'_>, needle: &str) -> bool {
    el.children().any(|child| match child.value() {
        Node::Text(text) => text.contains(needle),
        _ => false,
    })
}

/// Rendered text of an element: all descendant text, whitespace collapsed.
pub fn visible_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Nearest ancestor with the given tag name.
pub fn ancestor<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == tag)
}

pub fn by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    elements(doc).find(|el| el.value().id() == Some(id))
}
