// src/fetch/urls.rs
use url::Url;

use crate::error::MineError;

/// Per-year questionnaire page; `{year}` is substituted.
static QUESTIONNAIRE_URL: &str = "https://www.comvest.unicamp.br/estatisticas/{year}/quest/quest1.php";

/// URL of the questionnaire statistics page for `year`.
pub fn questionnaire_url(year: u16) -> Result<Url, MineError> {
    let raw = QUESTIONNAIRE_URL.replace("{year}", &year.to_string());
    Ok(Url::parse(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_year_page_url() {
        let url = questionnaire_url(1999).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.comvest.unicamp.br/estatisticas/1999/quest/quest1.php"
        );
    }
}
