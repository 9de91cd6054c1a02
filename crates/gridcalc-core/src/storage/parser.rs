//! Parser for the sheet text format
//!
//! ```text
//! <rows> <columns>
//! <ADDRESS> <formula>
//! ...
//! ```

use crate::document::Sheet;
use crate::error::{Result, SheetError};
use gridcalc_engine::engine::decode;
use std::fs;
use std::path::Path;

/// Parse a sheet file and return an evaluated Sheet
pub fn parse_sheet(path: &Path) -> Result<Sheet> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content)
}

/// Parse sheet content from a string.
///
/// All formulas are assigned first, then the sheet is evaluated once.
pub fn parse_sheet_content(content: &str) -> Result<Sheet> {
    let mut lines = content.lines().enumerate();

    let (rows, cols) = match lines.next() {
        Some((_, header)) => parse_dimensions(header)?,
        None => {
            return Err(SheetError::Parse {
                line: 1,
                message: "Missing sheet dimensions".to_string(),
            });
        }
    };
    let mut sheet = Sheet::new(rows, cols)?;

    for (line_num, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let (cell_ref, end) = decode(line).map_err(|source| SheetError::Line {
            line: line_num + 1,
            source,
        })?;
        sheet
            .set_formula(&cell_ref, line[end..].trim())
            .map_err(|source| SheetError::Line {
                line: line_num + 1,
                source,
            })?;
    }

    sheet.evaluate_sheet()?;
    sheet.modified = false;
    Ok(sheet)
}

fn parse_dimensions(header: &str) -> Result<(usize, usize)> {
    let parts: Vec<&str> = header.split_whitespace().collect();
    let [rows, cols] = parts.as_slice() else {
        return Err(SheetError::Parse {
            line: 1,
            message: format!("Expected '<rows> <columns>', found '{}'", header.trim()),
        });
    };

    let parse = |text: &str| {
        text.parse::<usize>().map_err(|_| SheetError::Parse {
            line: 1,
            message: format!("Invalid dimension: {}", text),
        })
    };
    Ok((parse(*rows)?, parse(*cols)?))
}
