// src/survey/extract.rs

use scraper::{ElementRef, Html};

use crate::error::MineError;
use crate::fetch::{page, Browser, Locator};

/// Reported for a category that is not on that year's form.
pub const NOT_APPLICABLE: &str = "-";

/// Class of the result-table cells.
const DATA_CELL_CLASS: &str = "tabelatexto";

/// Percentage printed next to `label` on the current page.
///
/// An empty label short-circuits to [`NOT_APPLICABLE`] without looking at the
/// page. A non-empty label that cannot be found is an error: it means the
/// label table is wrong for this year.
pub fn extract_percentage<B: Browser + ?Sized>(
    browser: &B,
    label: &str,
) -> Result<String, MineError> {
    if label.is_empty() {
        return Ok(NOT_APPLICABLE.to_string());
    }
    let doc = browser.page()?;
    percentage_in(doc, label)
        .ok_or_else(|| MineError::not_found(Locator::Text(label), browser.current_url()))
}

/// Row layout is `label | count | percentage`: the answer is the second
/// data cell after the one holding the label.
pub fn percentage_in(doc: &Html, label: &str) -> Option<String> {
    page::elements(doc)
        .filter(|el| page::owns_text(el, label))
        .find_map(|el| {
            el.next_siblings()
                .filter_map(ElementRef::wrap)
                .filter(is_data_cell)
                .nth(1)
        })
        .map(page::visible_text)
}

fn is_data_cell(el: &ElementRef<'_>) -> bool {
    el.value().name() == "td" && el.value().attr("class") == Some(DATA_CELL_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const RESULT: &str = r#"
        <html><body><table>
          <tr><td class="tabelatexto">em branco</td><td class="tabelatexto">3</td><td class="tabelatexto">0,9</td></tr>
          <tr><td class="tabelatexto">branca</td><td class="tabelatexto">250</td><td class="tabelatexto"> 71,4 </td></tr>
          <tr><td class="tabelatexto">preta</td><td class="tabelatexto">12</td></tr>
          <tr><td class="tabelatexto">parda</td><td class="outra">40</td><td class="tabelatexto">41</td><td class="tabelatexto">11,7</td></tr>
        </table></body></html>
    "#;

    /// Serves a fixed document and counts how often it was asked for it.
    struct Fixture {
        doc: Html,
        reads: Cell<usize>,
    }

    impl Fixture {
        fn new(html: &str) -> Self {
            Self {
                doc: Html::parse_document(html),
                reads: Cell::new(0),
            }
        }
    }

    impl Browser for Fixture {
        fn navigate(&mut self, _url: &url::Url) -> Result<(), MineError> {
            Ok(())
        }
        fn click(&mut self, _locator: Locator<'_>) -> Result<(), MineError> {
            Ok(())
        }
        fn page(&self) -> Result<&Html, MineError> {
            self.reads.set(self.reads.get() + 1);
            Ok(&self.doc)
        }
        fn current_url(&self) -> &str {
            "fixture://result"
        }
    }

    #[test]
    fn empty_label_never_touches_the_page() {
        let fixture = Fixture::new(RESULT);
        assert_eq!(extract_percentage(&fixture, "").unwrap(), "-");
        assert_eq!(fixture.reads.get(), 0);
    }

    #[test]
    fn reads_second_data_cell_right_of_label() {
        let fixture = Fixture::new(RESULT);
        assert_eq!(extract_percentage(&fixture, "em branco").unwrap(), "0,9");
        assert_eq!(extract_percentage(&fixture, "branca").unwrap(), "71,4");
    }

    #[test]
    fn skips_cells_of_other_classes() {
        let fixture = Fixture::new(RESULT);
        assert_eq!(extract_percentage(&fixture, "parda").unwrap(), "11,7");
    }

    #[test]
    fn missing_label_is_element_not_found() {
        let fixture = Fixture::new(RESULT);
        let err = extract_percentage(&fixture, "amarela").unwrap_err();
        match err {
            MineError::ElementNotFound { locator, page } => {
                assert!(locator.contains("amarela"));
                assert_eq!(page, "fixture://result");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_sibling_cells_is_element_not_found() {
        let fixture = Fixture::new(RESULT);
        assert!(matches!(
            extract_percentage(&fixture, "preta"),
            Err(MineError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn match_is_case_sensitive() {
        let fixture = Fixture::new(RESULT);
        assert!(extract_percentage(&fixture, "Branca").is_err());
    }
}
