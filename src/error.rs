// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a mining run. Nothing in the library catches
/// or retries these; they bubble up to `main`.
#[derive(Debug, Error)]
pub enum MineError {
    /// The page could not be fetched, or the server answered with a
    /// non-success status.
    #[error("navigation to {url} failed")]
    Navigation {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("building HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An expected question, answer or button is not on the page. For
    /// answers this usually means the label table is wrong for that year.
    #[error("no element matching {locator} on {page}")]
    ElementNotFound { locator: String, page: String },

    #[error("sheet `{sheet}` expects rows of {expected} values, got {found}")]
    RowWidth {
        sheet: String,
        expected: usize,
        found: usize,
    },

    #[error("writing {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rendering workbook")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl MineError {
    pub fn not_found(locator: impl ToString, page: impl ToString) -> Self {
        MineError::ElementNotFound {
            locator: locator.to_string(),
            page: page.to_string(),
        }
    }
}
