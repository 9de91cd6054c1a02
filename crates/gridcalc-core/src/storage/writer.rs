//! Writer for the sheet text format

use crate::document::Sheet;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write a Sheet to a file
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    let content = write_sheet_content(sheet);
    fs::write(path, content)?;
    Ok(())
}

/// Write a Sheet to the text format: the dimensions, then one line per
/// occupied cell in row-major order.
pub fn write_sheet_content(sheet: &Sheet) -> String {
    let mut out = format!("{} {}\n", sheet.rows(), sheet.columns());

    for (cell_ref, cell) in sheet.occupied() {
        out.push_str(&format!("{} {}\n", cell_ref, single_line(cell.formula())));
    }

    out
}

// Formulas are whitespace-insensitive, so line breaks can be folded into spaces.
fn single_line(formula: &str) -> String {
    if formula.contains(['\n', '\r']) {
        formula.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        formula.trim().to_string()
    }
}
