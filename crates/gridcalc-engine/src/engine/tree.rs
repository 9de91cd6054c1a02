//! Expression trees built from postfix token sequences.
//!
//! Each tree is exclusively owned by the cell that holds it. Nodes own their
//! children directly; there is no sharing between trees.

use std::collections::BTreeSet;

use super::cell_ref::CellRef;
use super::token::{Operator, Token};
use crate::error::{FormulaError, Result};

/// A node of a parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode {
    Literal(u64),
    CellRef(CellRef),
    Binary {
        op: Operator,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
}

impl ExprNode {
    /// The token this node was built from.
    pub fn token(&self) -> Token {
        match self {
            ExprNode::Literal(value) => Token::Literal(*value),
            ExprNode::CellRef(cell) => Token::CellRef(*cell),
            ExprNode::Binary { op, .. } => Token::Operator(*op),
        }
    }

    fn collect_references(&self, out: &mut BTreeSet<CellRef>) {
        match self {
            ExprNode::Literal(_) => {}
            ExprNode::CellRef(cell) => {
                out.insert(*cell);
            }
            ExprNode::Binary { left, right, .. } => {
                left.collect_references(out);
                right.collect_references(out);
            }
        }
    }
}

/// An immutable binary expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionTree {
    root: ExprNode,
}

impl ExpressionTree {
    /// Build a tree from a postfix sequence.
    ///
    /// Tokens are consumed from the end: an operator builds its right subtree
    /// first, then its left. Every token must be used exactly once.
    pub fn from_postfix(mut postfix: Vec<Token>) -> Result<ExpressionTree> {
        let root = build_node(&mut postfix)?;
        if !postfix.is_empty() {
            return Err(malformed());
        }
        Ok(ExpressionTree { root })
    }

    pub fn root(&self) -> &ExprNode {
        &self.root
    }

    /// The distinct cells this formula reads, row-major.
    pub fn references(&self) -> BTreeSet<CellRef> {
        let mut refs = BTreeSet::new();
        self.root.collect_references(&mut refs);
        refs
    }

    /// Flatten the tree back into postfix order.
    pub fn to_postfix(&self) -> Vec<Token> {
        fn walk(node: &ExprNode, out: &mut Vec<Token>) {
            if let ExprNode::Binary { left, right, .. } = node {
                walk(left, out);
                walk(right, out);
            }
            out.push(node.token());
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }
}

fn build_node(postfix: &mut Vec<Token>) -> Result<ExprNode> {
    match postfix.pop() {
        None => Err(malformed()),
        Some(Token::Literal(value)) => Ok(ExprNode::Literal(value)),
        Some(Token::CellRef(cell)) => Ok(ExprNode::CellRef(cell)),
        Some(Token::Operator(op)) if op.is_paren() => Err(malformed()),
        Some(Token::Operator(op)) => {
            let right = build_node(postfix)?;
            let left = build_node(postfix)?;
            Ok(ExprNode::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
    }
}

fn malformed() -> FormulaError {
    FormulaError::Parse("malformed expression".to_string())
}
