use super::state::Sheet;
use gridcalc_engine::Result;
use gridcalc_engine::engine::{
    CellRef, DependencyMap, ValueSource, evaluate, parse_formula, topological_order,
};

/// Values staged during one evaluation pass, committed only once every cell succeeded.
struct StagedValues<'a> {
    sheet: &'a Sheet,
    values: &'a [f64],
}

impl ValueSource for StagedValues<'_> {
    fn value_of(&self, cell: &CellRef) -> Result<f64> {
        let index = self.sheet.index_of(cell)?;
        Ok(self.values[index])
    }
}

impl ValueSource for Sheet {
    fn value_of(&self, cell: &CellRef) -> Result<f64> {
        self.get_value(cell)
    }
}

impl Sheet {
    /// Recompute every occupied cell in dependency order.
    ///
    /// The pass is atomic: a cycle, or an out-of-bounds reference, fails the
    /// whole pass and no cached value changes.
    pub fn evaluate_sheet(&mut self) -> Result<()> {
        let map = DependencyMap::build(
            self.rows,
            self.cols,
            self.occupied().map(|(cell_ref, cell)| (cell_ref, cell.tree())),
        )?;

        let order = topological_order(&map).inspect_err(|err| {
            tracing::warn!(error = %err, "evaluation aborted");
        })?;

        let mut staged: Vec<f64> = self
            .cells
            .iter()
            .map(|slot| slot.as_ref().map_or(0.0, |cell| cell.value()))
            .collect();

        let mut evaluated = 0usize;
        for cell_ref in &order {
            let index = self.index_of(cell_ref)?;
            let Some(cell) = &self.cells[index] else {
                continue;
            };
            let value = evaluate(
                cell.tree(),
                &StagedValues {
                    sheet: self,
                    values: &staged,
                },
            )?;
            staged[index] = value;
            evaluated += 1;
        }

        for (slot, value) in self.cells.iter_mut().zip(staged) {
            if let Some(cell) = slot {
                cell.value = value;
            }
        }

        tracing::debug!(
            cells = evaluated,
            nodes = order.len(),
            "sheet evaluated"
        );
        Ok(())
    }

    /// Evaluate a free-standing formula against the current cached values
    /// without storing it anywhere.
    pub fn evaluate_formula(&self, formula: &str) -> Result<f64> {
        let tree = parse_formula(formula)?;
        evaluate(&tree, self)
    }
}
