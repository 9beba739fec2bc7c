// src/survey/miner.rs

use std::path::Path;
use tracing::{debug, info, instrument};

use super::extract::extract_percentage;
use super::labels::{resolve_labels, YearLabelSet};
use super::topics::Topic;
use crate::error::MineError;
use crate::fetch::{urls, Browser, Locator};
use crate::report::{ReportAssembler, Sheet, SheetHandle};

/// `name` of the question selector on the questionnaire page.
pub const QUESTION_FIELD: &str = "questao";
/// Result view restricted to enrolled students.
pub const ENROLLED_VIEW: &str = "Matriculados";
/// `name` of the button that runs the report query.
pub const RUN_BUTTON: &str = "Executar";

/// Scrape every year of `topic` into a new sheet of `report`.
///
/// Any failure aborts the topic; rows are only appended once complete.
#[instrument(level = "info", skip_all, fields(topic = topic.key))]
pub fn mine<B: Browser + ?Sized>(
    browser: &mut B,
    report: &mut ReportAssembler,
    topic: &Topic,
) -> Result<SheetHandle, MineError> {
    info!(first = topic.first_year, last = topic.last_year, "mining topic");
    let sheet = report.new_sheet(topic.title, &topic.header());

    for year in topic.years() {
        let labels = resolve_labels(topic, year);
        let row = mine_year(browser, &labels)?;
        debug!(year, values = ?row, "row");
        report.append_row(sheet, row)?;
    }

    if let Some(note) = topic.note {
        report.append_note(sheet, note);
    }
    info!(rows = report.sheet(sheet).rows().len(), "topic done");
    Ok(sheet)
}

/// Load the year's questionnaire, run the topic question for enrolled
/// students and read one value per category.
fn mine_year<B: Browser + ?Sized>(
    browser: &mut B,
    labels: &YearLabelSet,
) -> Result<Vec<String>, MineError> {
    let url = urls::questionnaire_url(labels.year)?;
    browser.navigate(&url)?;

    browser.require(Locator::Name(QUESTION_FIELD))?;
    browser.click(Locator::Text(labels.question))?;
    browser.click(Locator::Text(ENROLLED_VIEW))?;
    browser.click(Locator::Name(RUN_BUTTON))?;

    let mut row = Vec::with_capacity(1 + labels.answers.len());
    row.push(labels.year.to_string());
    for label in labels.labels() {
        row.push(extract_percentage(&*browser, label)?);
    }
    Ok(row)
}

/// Mine `topics` in order, then write the workbook to `out` and return its
/// sheets.
///
/// Nothing is written unless every topic succeeds.
pub fn run_all<B: Browser + ?Sized>(
    browser: &mut B,
    topics: &[&Topic],
    out: &Path,
) -> Result<Vec<Sheet>, MineError> {
    let mut report = ReportAssembler::new();
    for topic in topics {
        mine(browser, &mut report, topic)?;
    }
    let sheets = report.finalize(out)?;
    info!(path = %out.display(), sheets = sheets.len(), "report written");
    Ok(sheets)
}
