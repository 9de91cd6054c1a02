//! Error kinds raised by the formula engine.

use thiserror::Error;

use crate::engine::CellRef;

/// Errors produced while decoding addresses, parsing formulas or evaluating a sheet.
///
/// None of these are fatal to the engine; the caller decides how to recover.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// Malformed cell reference text.
    #[error("Address error: {0}")]
    Address(String),

    /// A grid size or cell reference outside the valid bounds.
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// Invalid characters, unbalanced parentheses or a malformed token sequence.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No safe evaluation order exists. `cells` lists the unscheduled cells, row-major.
    #[error("Circular dependency detected among {}", format_cells(.cells))]
    Cycle { cells: Vec<CellRef> },
}

fn format_cells(cells: &[CellRef]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, FormulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_cells() {
        let err = FormulaError::Cycle {
            cells: vec![CellRef::new(0, 0), CellRef::new(0, 1)],
        };
        assert_eq!(err.to_string(), "Circular dependency detected among A0, B0");
    }
}
