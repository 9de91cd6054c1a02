//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A0", "B2", "AB12") and zero-indexed row/column coordinates.
//!
//! Columns use a bijective base-26 numeral, so `Z` = 25, `AA` = 26,
//! `ZZ` = 701 and `AAA` = 702. Rows are written as plain decimal integers
//! starting at 0.
//!
//! # Examples
//!
//! ```ignore
//! let (cell, consumed) = decode("B3+1").unwrap();
//! assert_eq!(cell, CellRef::new(3, 1));
//! assert_eq!(consumed, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{FormulaError, Result};

/// A reference to a cell by row and column indices (0-indexed).
///
/// Ordering is row-major, which the scheduler relies on for deterministic ties.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = FormulaError;

    /// Strict parse: the whole string (modulo surrounding whitespace) must be one address.
    fn from_str(s: &str) -> Result<Self> {
        let (cell, consumed) = decode(s)?;
        if !s[consumed..].trim().is_empty() {
            return Err(FormulaError::Address(format!(
                "unexpected trailing text in cell reference: {}",
                s.trim()
            )));
        }
        Ok(cell)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row)
    }
}

/// Decode the cell reference at the start of `address`.
///
/// Returns the reference and the byte offset just past it.
pub fn decode(address: &str) -> Result<(CellRef, usize)> {
    decode_at(address, 0)
}

/// Decode the cell reference found at byte offset `start` of `input`,
/// skipping leading whitespace.
///
/// Returns the reference and the byte offset just past it so callers can
/// keep scanning a larger formula.
pub fn decode_at(input: &str, start: usize) -> Result<(CellRef, usize)> {
    let bytes = input.as_bytes();
    if start > bytes.len() {
        return Err(FormulaError::Address(format!(
            "start offset {} is past the end of the input",
            start
        )));
    }

    let mut index = start;
    while index < bytes.len() && bytes[index].is_ascii_whitespace() {
        index += 1;
    }
    if index == bytes.len() {
        return Err(FormulaError::Address(
            "incomplete cell reference".to_string(),
        ));
    }
    if !bytes[index].is_ascii_uppercase() {
        return Err(FormulaError::Address(format!(
            "invalid or missing column in '{}'",
            input.get(start..).unwrap_or_default().trim()
        )));
    }

    let mut col = (bytes[index] - b'A') as usize;
    index += 1;
    while index < bytes.len() && bytes[index].is_ascii_uppercase() {
        let digit = (bytes[index] - b'A') as usize;
        col = col
            .checked_add(1)
            .and_then(|c| c.checked_mul(26))
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(|| FormulaError::Address("column out of range".to_string()))?;
        index += 1;
    }

    if index == bytes.len() || !bytes[index].is_ascii_digit() {
        return Err(FormulaError::Address(format!(
            "missing row in '{}'",
            input.get(start..index).unwrap_or_default().trim()
        )));
    }

    let mut row = 0usize;
    while index < bytes.len() && bytes[index].is_ascii_digit() {
        let digit = (bytes[index] - b'0') as usize;
        row = row
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or_else(|| FormulaError::Address("row out of range".to_string()))?;
        index += 1;
    }

    Ok((CellRef::new(row, col), index))
}

/// Format a reference as its address string (e.g. `{row: 12, col: 27}` -> "AB12").
pub fn encode(cell: &CellRef) -> String {
    cell.to_string()
}

/// True if, after optional leading spaces, `s` starts with at least one
/// uppercase letter immediately followed by at least one digit.
///
/// Text after the digits is not checked.
pub fn is_valid_address(s: &str) -> bool {
    address_prefix_re().is_match(s)
}

fn address_prefix_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| {
        Regex::new(r"^ *[A-Z]+[0-9]").expect("address prefix regex must compile")
    })
}
