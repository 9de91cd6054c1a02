use gridcalc_engine::FormulaError;
use gridcalc_engine::engine::{CellRef, ExpressionTree, parse_formula};
use std::path::PathBuf;

/// Number of rows in a sheet created without explicit dimensions.
pub const DEFAULT_ROWS: usize = 10;
/// Number of columns in a sheet created without explicit dimensions.
pub const DEFAULT_COLUMNS: usize = 10;
/// Smallest allowed number of rows or columns.
pub const MIN_DIMENSION: usize = 2;
/// Largest number of cells (`rows * cols`) a sheet may hold.
pub const MAX_CELLS: usize = 1_000_000;
/// Decimal places used for display until changed.
pub const DEFAULT_PRECISION: usize = 1;
/// Largest accepted decimal precision.
pub const MAX_PRECISION: usize = 8;

/// One occupied grid position: the formula text, its tree and the last computed value.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    formula: String,
    tree: ExpressionTree,
    pub(crate) value: f64,
}

impl Cell {
    /// Parse `formula` into a new cell. The cached value starts at 0.
    pub fn new(formula: &str) -> Result<Cell, FormulaError> {
        Ok(Cell {
            tree: parse_formula(formula)?,
            formula: formula.to_string(),
            value: 0.0,
        })
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn tree(&self) -> &ExpressionTree {
        &self.tree
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// UI-agnostic spreadsheet document: a fixed `rows x cols` grid of optional cells.
///
/// Dimensions never change after construction; loading a file of another size
/// replaces the grid wholesale.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    /// Row-major storage, `rows * cols` slots.
    pub(crate) cells: Vec<Option<Cell>>,
    pub(crate) precision: usize,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified since the last load or save
    pub modified: bool,
}

impl Sheet {
    /// Create an empty sheet. Both dimensions must be at least [`MIN_DIMENSION`].
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new(rows: usize, cols: usize) -> Result<Self, FormulaError> {
        if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(FormulaError::Dimension(format!(
                "sheet must be at least {}x{}, got {}x{}",
                MIN_DIMENSION, MIN_DIMENSION, rows, cols
            )));
        }
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len <= MAX_CELLS)
            .ok_or_else(|| {
                FormulaError::Dimension(format!(
                    "sheet of {}x{} exceeds {} cells",
                    rows, cols, MAX_CELLS
                ))
            })?;

        Ok(Sheet {
            rows,
            cols,
            cells: vec![None; len],
            precision: DEFAULT_PRECISION,
            file_path: None,
            modified: false,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    /// Decimal places used by [`Sheet::display_value`].
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub(crate) fn index_of(&self, cell: &CellRef) -> Result<usize, FormulaError> {
        if !self.contains(cell) {
            return Err(FormulaError::Dimension(format!(
                "{} is outside the {}x{} grid",
                cell, self.rows, self.cols
            )));
        }
        Ok(cell.row * self.cols + cell.col)
    }

    /// The cell at `cell_ref`, if occupied.
    pub fn cell(&self, cell_ref: &CellRef) -> Result<Option<&Cell>, FormulaError> {
        let index = self.index_of(cell_ref)?;
        Ok(self.cells[index].as_ref())
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (CellRef, &Cell)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(index, slot)| {
            slot.as_ref()
                .map(|cell| (CellRef::new(index / cols, index % cols), cell))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Sheet {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLUMNS,
            cells: vec![None; DEFAULT_ROWS * DEFAULT_COLUMNS],
            precision: DEFAULT_PRECISION,
            file_path: None,
            modified: false,
        }
    }
}
