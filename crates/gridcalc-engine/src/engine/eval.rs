//! Expression tree evaluation.
//!
//! Evaluation is plain `f64` arithmetic: division by zero produces infinity
//! or NaN instead of an error, and `^` follows `f64::powf`.

use super::cell_ref::CellRef;
use super::tree::{ExprNode, ExpressionTree};
use crate::error::{FormulaError, Result};

/// Supplies the current value of a referenced cell.
///
/// Implementors return `0.0` for unoccupied cells and a
/// [`FormulaError::Dimension`] for references outside their grid.
pub trait ValueSource {
    fn value_of(&self, cell: &CellRef) -> Result<f64>;
}

impl<F> ValueSource for F
where
    F: Fn(&CellRef) -> Result<f64>,
{
    fn value_of(&self, cell: &CellRef) -> Result<f64> {
        self(cell)
    }
}

/// Reduce a tree to a number, reading cell references from `source`.
pub fn evaluate<S: ValueSource + ?Sized>(tree: &ExpressionTree, source: &S) -> Result<f64> {
    evaluate_node(tree.root(), source)
}

/// Reduce a single node (and its subtrees) to a number.
pub fn evaluate_node<S: ValueSource + ?Sized>(node: &ExprNode, source: &S) -> Result<f64> {
    match node {
        ExprNode::Literal(value) => Ok(*value as f64),
        ExprNode::CellRef(cell) => source.value_of(cell),
        ExprNode::Binary { op, left, right } => {
            let lhs = evaluate_node(left, source)?;
            let rhs = evaluate_node(right, source)?;
            op.apply(lhs, rhs)
                .ok_or_else(|| FormulaError::Parse("malformed expression".to_string()))
        }
    }
}
