// src/report/mod.rs
//
// In-memory workbook that the miners append to. Nothing touches the disk
// until `finalize`, so an aborted run leaves no partial report behind.

use rust_xlsxwriter::Workbook;
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::MineError;

pub mod style;

/// Worksheet names are limited to this many characters.
pub const MAX_SHEET_NAME: usize = 31;

/// Sheet row of the first data row; the header sits on row 0.
pub const FIRST_DATA_ROW: u32 = 1;

/// Index of a sheet inside its `ReportAssembler`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SheetHandle(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    title: String,
    name: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    notes: Vec<String>,
}

impl Sheet {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Worksheet name: the title cut to the worksheet-name limit.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Widest cell per column, in characters, over header and data rows.
    /// Notes are free text and do not count.
    pub fn column_widths(&self) -> Vec<usize> {
        (0..self.header.len())
            .map(|col| {
                std::iter::once(&self.header)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct ReportAssembler {
    sheets: Vec<Sheet>,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty sheet with the given header row.
    pub fn new_sheet(&mut self, title: &str, header: &[&str]) -> SheetHandle {
        let name: String = title.chars().take(MAX_SHEET_NAME).collect();
        self.sheets.push(Sheet {
            title: title.to_string(),
            name: name.trim_end().to_string(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            notes: Vec::new(),
        });
        debug!(title, columns = header.len(), "sheet created");
        SheetHandle(self.sheets.len() - 1)
    }

    /// Append a data row. It must have exactly one value per header column.
    pub fn append_row(&mut self, sheet: SheetHandle, values: Vec<String>) -> Result<(), MineError> {
        let target = &mut self.sheets[sheet.0];
        if values.len() != target.header.len() {
            return Err(MineError::RowWidth {
                sheet: target.title.clone(),
                expected: target.header.len(),
                found: values.len(),
            });
        }
        target.rows.push(values);
        Ok(())
    }

    /// Append a free-text line below the data rows.
    pub fn append_note(&mut self, sheet: SheetHandle, text: &str) {
        self.sheets[sheet.0].notes.push(text.to_string());
    }

    pub fn sheet(&self, sheet: SheetHandle) -> &Sheet {
        &self.sheets[sheet.0]
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Render every sheet and write the workbook to `path`, consuming the
    /// assembler. Returns the sheets that were written.
    ///
    /// The file is written next to its destination and renamed into place,
    /// so `path` either holds the complete workbook or is left untouched.
    pub fn finalize(self, path: &Path) -> Result<Vec<Sheet>, MineError> {
        let mut workbook = Workbook::new();
        let header_fmt = style::header();

        for sheet in &self.sheets {
            let ws = workbook.add_worksheet();
            ws.set_name(sheet.name.as_str())?;

            for (col, value) in sheet.header.iter().enumerate() {
                ws.write_string_with_format(0, col as u16, value.as_str(), &header_fmt)?;
            }

            for (row, values) in data_rows(sheet) {
                let fmt = style::data_row(row);
                for (col, value) in values.iter().enumerate() {
                    ws.write_string_with_format(row, col as u16, value.as_str(), &fmt)?;
                }
            }
            let mut row = FIRST_DATA_ROW + sheet.rows.len() as u32;
            for note in &sheet.notes {
                ws.write_string(row, 0, note.as_str())?;
                row += 1;
            }

            for (col, widest) in sheet.column_widths().into_iter().enumerate() {
                ws.set_column_width(col as u16, style::column_width(widest))?;
            }
        }

        let bytes = workbook.save_to_buffer()?;
        write_atomically(path, &bytes)?;
        info!(
            path = %path.display(),
            sheets = self.sheets.len(),
            bytes = bytes.len(),
            "workbook saved"
        );
        Ok(self.sheets)
    }
}

/// Data rows of `sheet` paired with the sheet row they are written to.
fn data_rows(sheet: &Sheet) -> impl Iterator<Item = (u32, &Vec<String>)> {
    (FIRST_DATA_ROW..).zip(sheet.rows.iter())
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), MineError> {
    let io_err = |source: std::io::Error| MineError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
