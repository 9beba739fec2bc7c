// src/fetch/session.rs
//
// `Browser` over plain HTTP: pages are fetched with a blocking reqwest client
// and forms are filled in and submitted the way a browser would, without
// running any script.

use encoding_rs::WINDOWS_1252;
use reqwest::{
    blocking::{Client, RequestBuilder},
    header::CONTENT_TYPE,
};
use scraper::{ElementRef, Html};
use std::{borrow::Cow, collections::HashMap};
use tracing::{debug, trace};
use url::{form_urlencoded, Url};

use super::{page, Browser, Locator};
use crate::error::MineError;

const USER_AGENT: &str = concat!("comvestscraper/", env!("CARGO_PKG_VERSION"));

/// Used when the server does not announce a charset; the Comvest pages are
/// Latin-1.
const DEFAULT_CHARSET: &str = "iso-8859-1";
/// Controls a `<label for>` may point at.
const LABELABLE: [&str; 4] = ["button", "input", "select", "textarea"];

struct LoadedPage {
    url: Url,
    doc: Html,
    /// Form values chosen by clicks since the page was loaded, by field name.
    chosen: HashMap<String, String>,
}

#[derive(Debug, PartialEq)]
enum ClickAction {
    Choose { field: String, value: String },
    Submit(FormSubmission),
    Follow(Url),
    Nothing,
}

#[derive(Debug, PartialEq)]
struct FormSubmission {
    post: bool,
    action: Url,
    fields: Vec<(String, String)>,
}

/// One browsing session: a cookie-keeping client plus the current page.
pub struct HttpSession {
    client: Client,
    current: Option<LoadedPage>,
}

impl HttpSession {
    pub fn new() -> Result<Self, MineError> {
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(MineError::Client)?;
        debug!("browser session opened");
        Ok(Self {
            client,
            current: None,
        })
    }

    fn load(&mut self, request: RequestBuilder, url: &Url) -> Result<(), MineError> {
        let nav = |source: reqwest::Error| MineError::Navigation {
            url: url.to_string(),
            source,
        };
        let resp = request
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(nav)?;
        let final_url = resp.url().clone();
        let body = resp.text_with_charset(DEFAULT_CHARSET).map_err(nav)?;
        debug!(url = %final_url, bytes = body.len(), "page loaded");

        self.current = Some(LoadedPage {
            url: final_url,
            doc: Html::parse_document(&body),
            chosen: HashMap::new(),
        });
        Ok(())
    }

    fn submit(&mut self, form: FormSubmission) -> Result<(), MineError> {
        debug!(
            action = %form.action,
            post = form.post,
            fields = form.fields.len(),
            "submitting form"
        );
        let encoded = encode_form(&form.fields);
        if form.post {
            let request = self
                .client
                .post(form.action.clone())
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encoded);
            self.load(request, &form.action)
        } else {
            let mut url = form.action.clone();
            url.set_query(Some(&encoded));
            let request = self.client.get(url.clone());
            self.load(request, &url)
        }
    }
}

impl Browser for HttpSession {
    fn navigate(&mut self, url: &Url) -> Result<(), MineError> {
        debug!(%url, "navigate");
        let request = self.client.get(url.clone());
        self.load(request, url)
    }

    fn click(&mut self, locator: Locator<'_>) -> Result<(), MineError> {
        let action = {
            let page = self
                .current
                .as_ref()
                .ok_or_else(|| MineError::not_found(locator, "about:blank"))?;
            let el = page::find(&page.doc, locator)
                .ok_or_else(|| MineError::not_found(locator, &page.url))?;
            resolve_click(page, el)?
        };
        trace!(%locator, ?action, "click");

        match action {
            ClickAction::Choose { field, value } => {
                if let Some(page) = self.current.as_mut() {
                    page.chosen.insert(field, value);
                }
                Ok(())
            }
            ClickAction::Submit(form) => self.submit(form),
            ClickAction::Follow(url) => self.navigate(&url),
            ClickAction::Nothing => Ok(()),
        }
    }

    fn page(&self) -> Result<&Html, MineError> {
        self.current
            .as_ref()
            .map(|p| &p.doc)
            .ok_or_else(|| MineError::not_found("any page", "about:blank"))
    }

    fn current_url(&self) -> &str {
        self.current
            .as_ref()
            .map(|p| p.url.as_str())
            .unwrap_or("about:blank")
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        debug!(last_url = %self.current_url(), "browser session closed");
    }
}

/// Decide what clicking `el` does on `page`.
fn resolve_click(page: &LoadedPage, el: ElementRef<'_>) -> Result<ClickAction, MineError> {
    let v = el.value();
    let action = match v.name() {
        "option" => match page::ancestor(el, "select").and_then(|s| s.value().attr("name")) {
            Some(field) => ClickAction::Choose {
                field: field.to_string(),
                value: option_value(el),
            },
            None => ClickAction::Nothing,
        },
        "input" => match input_kind(el).as_str() {
            "radio" | "checkbox" => choose_control(el),
            "submit" | "image" => ClickAction::Submit(build_submission(page, Some(el))?),
            _ => ClickAction::Nothing,
        },
        "button" => match v.attr("type").map(str::to_ascii_lowercase).as_deref() {
            None | Some("submit") => ClickAction::Submit(build_submission(page, Some(el))?),
            _ => ClickAction::Nothing,
        },
        "a" => match v.attr("href") {
            Some(href) => ClickAction::Follow(page.url.join(href)?),
            None => ClickAction::Nothing,
        },
        "label" => match v.attr("for").and_then(|id| page::by_id(&page.doc, id)) {
            Some(target) if LABELABLE.contains(&target.value().name()) => {
                resolve_click(page, target)?
            }
            _ => wrapped_control(el),
        },
        _ => wrapped_control(el),
    };
    Ok(action)
}

/// A text container holding a radio or checkbox: treat the click as landing
/// on that control.
fn wrapped_control(el: ElementRef<'_>) -> ClickAction {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .find(|c| {
            c.value().name() == "input" && matches!(input_kind(*c).as_str(), "radio" | "checkbox")
        })
        .map(choose_control)
        .unwrap_or(ClickAction::Nothing)
}

fn choose_control(el: ElementRef<'_>) -> ClickAction {
    match el.value().attr("name") {
        Some(field) => ClickAction::Choose {
            field: field.to_string(),
            value: el.value().attr("value").unwrap_or("on").to_string(),
        },
        None => ClickAction::Nothing,
    }
}

/// `application/x-www-form-urlencoded` body in the page charset, as a browser
/// sends it. WHATWG maps the `iso-8859-1` label to windows-1252.
fn encode_form(fields: &[(String, String)]) -> String {
    let encode: &dyn Fn(&str) -> Cow<'_, [u8]> = &to_form_charset;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.encoding_override(Some(encode));
    serializer.extend_pairs(fields);
    serializer.finish()
}

fn to_form_charset(s: &str) -> Cow<'_, [u8]> {
    let (bytes, _, _) = WINDOWS_1252.encode(s);
    bytes
}

fn input_kind(el: ElementRef<'_>) -> String {
    el.value().attr("type").unwrap_or("text").to_ascii_lowercase()
}

fn option_value(option: ElementRef<'_>) -> String {
    match option.value().attr("value") {
        Some(value) => value.to_string(),
        None => page::visible_text(option),
    }
}

fn default_option(select: ElementRef<'_>) -> Option<String> {
    let options: Vec<ElementRef<'_>> = select
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "option")
        .collect();
    options
        .iter()
        .find(|o| o.value().attr("selected").is_some())
        .or_else(|| options.first())
        .map(|o| option_value(*o))
}

/// Collect the successful controls of the submitter's form.
///
/// When the submitter is not nested in a `<form>` (tables often break the
/// nesting once parsed), the first form on the page supplies method and
/// action and every control on the page is collected.
fn build_submission(
    page: &LoadedPage,
    submitter: Option<ElementRef<'_>>,
) -> Result<FormSubmission, MineError> {
    let enclosing = submitter.and_then(|s| page::ancestor(s, "form"));
    let form = enclosing
        .or_else(|| page::elements(&page.doc).find(|el| el.value().name() == "form"));

    let controls: Vec<ElementRef<'_>> = match enclosing {
        Some(f) => f.descendants().filter_map(ElementRef::wrap).collect(),
        None => page::elements(&page.doc).collect(),
    };

    let mut fields = Vec::new();
    for el in controls {
        let v = el.value();
        if v.attr("disabled").is_some() {
            continue;
        }
        let Some(name) = v.attr("name") else {
            continue;
        };
        let chosen = page.chosen.get(name);

        match v.name() {
            "input" => match input_kind(el).as_str() {
                "submit" | "image" | "button" | "reset" | "file" => {}
                "radio" | "checkbox" => {
                    let value = v.attr("value").unwrap_or("on");
                    let checked = match chosen {
                        Some(c) => c == value,
                        None => v.attr("checked").is_some(),
                    };
                    if checked {
                        fields.push((name.to_string(), value.to_string()));
                    }
                }
                _ => {
                    let value = chosen.map(String::as_str).or(v.attr("value")).unwrap_or("");
                    fields.push((name.to_string(), value.to_string()));
                }
            },
            "select" => {
                if let Some(value) = chosen.cloned().or_else(|| default_option(el)) {
                    fields.push((name.to_string(), value));
                }
            }
            "textarea" => fields.push((name.to_string(), el.text().collect())),
            _ => {}
        }
    }

    if let Some(s) = submitter {
        if let Some(name) = s.value().attr("name") {
            fields.push((name.to_string(), s.value().attr("value").unwrap_or("").to_string()));
        }
    }

    let post = form
        .and_then(|f| f.value().attr("method"))
        .map_or(false, |m| m.eq_ignore_ascii_case("post"));
    let action = match form.and_then(|f| f.value().attr("action")).map(str::trim) {
        Some(a) if !a.is_empty() => page.url.join(a)?,
        _ => page.url.clone(),
    };

    for (k, v) in &fields {
        trace!(field = %k, value = %v, "form field");
    }
    Ok(FormSubmission {
        post,
        action,
        fields,
    })
}
