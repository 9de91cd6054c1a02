use super::state::{Cell, MAX_PRECISION, Sheet};
use gridcalc_engine::engine::{CellRef, format_value};
use gridcalc_engine::{FormulaError, Result};

impl Sheet {
    /// Assign a formula to a cell.
    ///
    /// Blank or whitespace-only text clears the cell. Otherwise the text is
    /// parsed and replaces the cell wholesale; its value is 0 until the next
    /// [`Sheet::evaluate_sheet`]. On a parse or address error the cell is left
    /// untouched.
    pub fn set_formula(&mut self, cell_ref: &CellRef, formula: &str) -> Result<()> {
        let index = self.index_of(cell_ref)?;
        if formula.trim().is_empty() {
            self.cells[index] = None;
        } else {
            self.cells[index] = Some(Cell::new(formula)?);
        }
        self.modified = true;
        Ok(())
    }

    /// [`Sheet::set_formula`] followed by a full recalculation.
    ///
    /// If the recalculation fails the new formula stays in place; restoring the
    /// previous formula is up to the caller.
    pub fn set_formula_and_recalculate(&mut self, cell_ref: &CellRef, formula: &str) -> Result<()> {
        self.set_formula(cell_ref, formula)?;
        self.evaluate_sheet()
    }

    /// The formula text of a cell, or `""` if unoccupied.
    pub fn get_formula(&self, cell_ref: &CellRef) -> Result<&str> {
        Ok(self.cell(cell_ref)?.map_or("", Cell::formula))
    }

    /// The cached value of a cell, or `0.0` if unoccupied.
    pub fn get_value(&self, cell_ref: &CellRef) -> Result<f64> {
        Ok(self.cell(cell_ref)?.map_or(0.0, Cell::value))
    }

    /// Remove one cell.
    pub fn clear_cell(&mut self, cell_ref: &CellRef) -> Result<()> {
        let index = self.index_of(cell_ref)?;
        if self.cells[index].take().is_some() {
            self.modified = true;
        }
        Ok(())
    }

    /// Empty the grid without changing its dimensions.
    pub fn clear_all(&mut self) {
        if self.cells.iter().any(Option::is_some) {
            self.modified = true;
        }
        self.cells.iter_mut().for_each(|slot| *slot = None);
    }

    /// The cached value with `precision` decimal digits, or `""` if unoccupied.
    pub fn format_value(&self, cell_ref: &CellRef, precision: usize) -> Result<String> {
        Ok(self
            .cell(cell_ref)?
            .map(|cell| format_value(cell.value(), precision))
            .unwrap_or_default())
    }

    /// [`Sheet::format_value`] with the sheet-wide precision.
    pub fn display_value(&self, cell_ref: &CellRef) -> Result<String> {
        self.format_value(cell_ref, self.precision)
    }

    /// Set the sheet-wide precision, `0..=MAX_PRECISION`.
    pub fn set_precision(&mut self, precision: usize) -> Result<()> {
        if precision > MAX_PRECISION {
            return Err(FormulaError::Dimension(format!(
                "precision {} is outside 0..={}",
                precision, MAX_PRECISION
            )));
        }
        self.precision = precision;
        Ok(())
    }

    /// Move the precision by `delta` places, clamped to `0..=MAX_PRECISION`.
    /// Returns the new precision.
    pub fn adjust_precision(&mut self, delta: i32) -> usize {
        let current = self.precision as i64;
        let next = (current + i64::from(delta)).clamp(0, MAX_PRECISION as i64);
        self.precision = next as usize;
        self.precision
    }
}
