//! gridcalc_engine - Formula parsing, dependency scheduling and evaluation.

pub mod engine;
pub mod error;

pub use error::{FormulaError, Result};
