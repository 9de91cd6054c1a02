//! gridcalc-core - UI-agnostic sheet document + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{
    Cell, DEFAULT_COLUMNS, DEFAULT_PRECISION, DEFAULT_ROWS, MAX_CELLS, MAX_PRECISION,
    MIN_DIMENSION, Sheet,
};
pub use error::{Result, SheetError};

pub use gridcalc_engine::FormulaError;
pub use gridcalc_engine::engine::CellRef;
