//! Sheet document state and logic (UI-agnostic).

mod eval;
mod io;
mod ops;
mod state;

pub use state::{
    Cell, DEFAULT_COLUMNS, DEFAULT_PRECISION, DEFAULT_ROWS, MAX_CELLS, MAX_PRECISION,
    MIN_DIMENSION, Sheet,
};
