//! Dependency extraction and the whole-sheet dependency map.
//!
//! Edge direction follows the recalculation order:
//!
//! ```text
//! A -> B  means  "B reads A"  (A is a prerequisite of B)
//! ```
//!
//! The map is rebuilt from scratch before every full-sheet evaluation.

use std::collections::{BTreeMap, BTreeSet};

use super::cell_ref::CellRef;
use super::tree::ExpressionTree;
use crate::error::{FormulaError, Result};

/// Prerequisite -> dependents adjacency over every position of a grid.
///
/// Every grid position has an entry, occupied or not, so isolated cells take
/// part in indegree counting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyMap {
    dependents: BTreeMap<CellRef, BTreeSet<CellRef>>,
    indegree: BTreeMap<CellRef, usize>,
}

impl DependencyMap {
    /// Build the map for a `rows x cols` grid from the occupied cells' trees.
    ///
    /// Fails with [`FormulaError::Dimension`] if a cell, or a reference inside
    /// its formula, lies outside the grid.
    pub fn build<'a, I>(rows: usize, cols: usize, cells: I) -> Result<DependencyMap>
    where
        I: IntoIterator<Item = (CellRef, &'a ExpressionTree)>,
    {
        let mut dependents: BTreeMap<CellRef, BTreeSet<CellRef>> = BTreeMap::new();
        let mut indegree: BTreeMap<CellRef, usize> = BTreeMap::new();
        for row in 0..rows {
            for col in 0..cols {
                let cell = CellRef::new(row, col);
                dependents.insert(cell, BTreeSet::new());
                indegree.insert(cell, 0);
            }
        }

        for (cell, tree) in cells {
            if cell.row >= rows || cell.col >= cols {
                return Err(out_of_bounds(&cell, rows, cols));
            }
            let reads = tree.references();
            for prerequisite in &reads {
                let Some(set) = dependents.get_mut(prerequisite) else {
                    return Err(FormulaError::Dimension(format!(
                        "{} reads {}, which is outside the {}x{} grid",
                        cell, prerequisite, rows, cols
                    )));
                };
                set.insert(cell);
            }
            indegree.insert(cell, reads.len());
        }

        Ok(DependencyMap {
            dependents,
            indegree,
        })
    }

    /// Cells that directly read `cell`, row-major.
    pub fn dependents(&self, cell: &CellRef) -> impl Iterator<Item = CellRef> + '_ {
        self.dependents.get(cell).into_iter().flatten().copied()
    }

    /// Number of distinct cells that `cell` reads.
    pub fn indegree(&self, cell: &CellRef) -> usize {
        self.indegree.get(cell).copied().unwrap_or(0)
    }

    /// Every node of the graph, row-major.
    pub fn nodes(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.dependents.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}

fn out_of_bounds(cell: &CellRef, rows: usize, cols: usize) -> FormulaError {
    FormulaError::Dimension(format!(
        "{} is outside the {}x{} grid",
        cell, rows, cols
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse_formula;

    fn cell(s: &str) -> CellRef {
        s.parse().unwrap()
    }

    #[test]
    fn test_every_position_has_an_entry() {
        let map = DependencyMap::build(3, 2, std::iter::empty()).unwrap();
        assert_eq!(map.len(), 6);
        assert!(map.nodes().all(|n| map.indegree(&n) == 0));
        assert_eq!(map.dependents(&cell("B2")).count(), 0);
    }

    #[test]
    fn test_edges_point_from_prerequisite_to_dependent() {
        let a1 = parse_formula("A0+B0+A0").unwrap();
        let b1 = parse_formula("A0*2").unwrap();
        let map = DependencyMap::build(
            2,
            2,
            vec![(cell("A1"), &a1), (cell("B1"), &b1)],
        )
        .unwrap();

        let of_a0: Vec<_> = map.dependents(&cell("A0")).collect();
        assert_eq!(of_a0, vec![cell("A1"), cell("B1")]);
        let of_b0: Vec<_> = map.dependents(&cell("B0")).collect();
        assert_eq!(of_b0, vec![cell("A1")]);

        assert_eq!(map.indegree(&cell("A1")), 2);
        assert_eq!(map.indegree(&cell("B1")), 1);
        assert_eq!(map.indegree(&cell("A0")), 0);
    }

    #[test]
    fn test_out_of_bounds_reference_is_dimension_error() {
        let tree = parse_formula("C5+1").unwrap();
        let err = DependencyMap::build(2, 2, vec![(cell("A0"), &tree)]).unwrap_err();
        assert!(matches!(err, FormulaError::Dimension(_)));
    }

    #[test]
    fn test_out_of_bounds_owner_is_dimension_error() {
        let tree = parse_formula("1").unwrap();
        let err = DependencyMap::build(2, 2, vec![(cell("A2"), &tree)]).unwrap_err();
        assert!(matches!(err, FormulaError::Dimension(_)));
    }
}
