//! Error types for gridcalc core.

use gridcalc_engine::FormulaError;
use thiserror::Error;

/// Errors that can occur while loading, saving or editing a sheet document.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Line {line}: {source}")]
    Line { line: usize, source: FormulaError },

    #[error("No file path set")]
    NoFilePath,
}

impl SheetError {
    /// The engine error behind this failure, if there is one.
    pub fn formula_error(&self) -> Option<&FormulaError> {
        match self {
            SheetError::Formula(err) | SheetError::Line { source: err, .. } => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
