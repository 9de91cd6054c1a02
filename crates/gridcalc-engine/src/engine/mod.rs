//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`CellRef`], [`decode`], [`encode`] - Address codec (A0 notation <-> row/col indices)
//! - [`Token`], [`Operator`] - Formula tokens
//! - [`tokenize`], [`to_postfix`], [`parse_formula`] - Infix formula parsing
//! - [`ExpressionTree`] - Parsed formulas
//! - [`DependencyMap`] - Whole-sheet prerequisite -> dependents adjacency
//! - [`topological_order`] - Evaluation order and cycle detection
//! - [`evaluate`] - Tree evaluation against a [`ValueSource`]
//! - [`format_value`] - Fixed-point display formatting

mod cell_ref;
mod deps;
mod eval;
mod format;
mod parser;
mod schedule;
mod token;
mod tree;

pub use cell_ref::{CellRef, decode, decode_at, encode, is_valid_address};
pub use deps::DependencyMap;
pub use eval::{ValueSource, evaluate, evaluate_node};
pub use format::format_value;
pub use parser::{parse_formula, to_postfix, tokenize};
pub use schedule::topological_order;
pub use token::{Operator, Token};
pub use tree::{ExprNode, ExpressionTree};
