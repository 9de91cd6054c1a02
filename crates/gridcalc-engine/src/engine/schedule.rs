//! Topological scheduling of cell evaluation (Kahn's algorithm).
//!
//! Among cells that are ready at the same time the smallest one in row-major
//! order always goes first, so the same sheet always yields the same order.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use super::cell_ref::CellRef;
use super::deps::DependencyMap;
use crate::error::{FormulaError, Result};

/// Compute an evaluation order in which every cell follows its prerequisites.
///
/// The order covers every node of the map, occupied or not. If any cells
/// remain unscheduled they sit on or behind a cycle, and the whole order is
/// rejected with [`FormulaError::Cycle`].
pub fn topological_order(map: &DependencyMap) -> Result<Vec<CellRef>> {
    let mut indegree: BTreeMap<CellRef, usize> =
        map.nodes().map(|n| (n, map.indegree(&n))).collect();

    let mut ready: BinaryHeap<Reverse<CellRef>> = indegree
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(cell, _)| Reverse(*cell))
        .collect();

    let mut order = Vec::with_capacity(indegree.len());
    while let Some(Reverse(cell)) = ready.pop() {
        order.push(cell);
        for dependent in map.dependents(&cell) {
            if let Some(deg) = indegree.get_mut(&dependent) {
                *deg = deg.saturating_sub(1);
                if *deg == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    if order.len() < indegree.len() {
        let cells: Vec<CellRef> = indegree
            .into_iter()
            .filter(|(_, deg)| *deg > 0)
            .map(|(cell, _)| cell)
            .collect();
        return Err(FormulaError::Cycle { cells });
    }

    Ok(order)
}
