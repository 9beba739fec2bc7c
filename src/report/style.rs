// src/report/style.rs

use rust_xlsxwriter::{Format, FormatBorder, FormatPattern};

/// Lemon chiffon.
pub const HEADER_FILL: &str = "#FFFACD";
/// 25% grey, on even data rows.
pub const EVEN_ROW_FILL: &str = "#C0C0C0";

/// Extra width on top of the widest cell, in characters.
pub const WIDTH_PADDING: f64 = 2.0;
/// Excel's maximum column width.
pub const MAX_WIDTH: f64 = 255.0;

pub fn header() -> Format {
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(HEADER_FILL)
        .set_border(FormatBorder::Thin)
}

/// Fill of the data row at sheet row `row` (the header is row 0). Odd rows
/// are left unfilled.
pub fn row_fill(row: u32) -> Option<&'static str> {
    (row % 2 == 0).then_some(EVEN_ROW_FILL)
}

pub fn data_row(row: u32) -> Format {
    let format = Format::new().set_border(FormatBorder::Thin);
    match row_fill(row) {
        Some(color) => format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(color),
        None => format,
    }
}

pub fn column_width(widest: usize) -> f64 {
    (widest as f64 + WIDTH_PADDING).min(MAX_WIDTH)
}
