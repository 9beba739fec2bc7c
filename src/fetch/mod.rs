// src/fetch/mod.rs

use scraper::Html;
use std::fmt;
use url::Url;

use crate::error::MineError;

pub mod page;
pub mod session;
pub mod urls;

pub use session::HttpSession;

/// How an element is looked up on the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locator<'a> {
    /// First element whose `name` attribute equals the value.
    Name(&'a str),
    /// First element (document order) owning a text node that contains the
    /// value. Case and accent sensitive.
    Text(&'a str),
}

impl fmt::Display for Locator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Name(name) => write!(f, "name={:?}", name),
            Locator::Text(text) => write!(f, "text~{:?}", text),
        }
    }
}

/// The browsing capability the miners drive. One instance lives for the
/// whole run and is used strictly sequentially.
pub trait Browser {
    /// Load `url`, replacing the current page and any pending form state.
    fn navigate(&mut self, url: &Url) -> Result<(), MineError>;

    /// Click the first element matching `locator`. Clicking an `<option>`
    /// selects it; clicking a submit control runs its form.
    fn click(&mut self, locator: Locator<'_>) -> Result<(), MineError>;

    /// The currently loaded document.
    fn page(&self) -> Result<&Html, MineError>;

    /// URL of the current page, for diagnostics.
    fn current_url(&self) -> &str;

    /// Fails with `ElementNotFound` unless `locator` matches on the current page.
    fn require(&self, locator: Locator<'_>) -> Result<(), MineError> {
        let doc = self.page()?;
        match page::find(doc, locator) {
            Some(_) => Ok(()),
            None => Err(MineError::not_found(locator, self.current_url())),
        }
    }
}
