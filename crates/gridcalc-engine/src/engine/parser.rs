//! Infix formula lexing and parsing.
//!
//! A formula goes through three stages:
//!
//! 1. [`tokenize`] scans the text into literals, cell references and operators.
//! 2. [`to_postfix`] reorders the tokens with an operator-precedence
//!    (shunting-yard) pass. Equal priorities pop, so every operator is
//!    left-associative, `^` included.
//! 3. [`ExpressionTree::from_postfix`] builds the tree.
//!
//! Grammar (informal): operands are unsigned integer literals or cell
//! references like `B12`; operators are `+ - * / ^` and parentheses.
//! There is no unary minus, no decimals and no functions.

use super::cell_ref::decode_at;
use super::token::{Operator, Token};
use super::tree::ExpressionTree;
use crate::error::{FormulaError, Result};

/// Parse an infix formula into an expression tree.
pub fn parse_formula(formula: &str) -> Result<ExpressionTree> {
    let tokens = tokenize(formula)?;
    let postfix = to_postfix(&tokens)?;
    ExpressionTree::from_postfix(postfix)
}

/// Split a formula into tokens, left to right, skipping whitespace.
pub fn tokenize(formula: &str) -> Result<Vec<Token>> {
    let bytes = formula.as_bytes();
    let mut tokens = Vec::new();
    let mut index = 0usize;

    while let Some(ch) = formula[index..].chars().next() {
        if ch.is_whitespace() {
            index += ch.len_utf8();
        } else if ch.is_ascii_uppercase() {
            let (cell, end) = decode_at(formula, index)?;
            tokens.push(Token::CellRef(cell));
            index = end;
        } else if ch.is_ascii_digit() {
            let mut value = 0u64;
            while index < bytes.len() && bytes[index].is_ascii_digit() {
                let digit = u64::from(bytes[index] - b'0');
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| {
                        FormulaError::Parse("numeric literal out of range".to_string())
                    })?;
                index += 1;
            }
            tokens.push(Token::Literal(value));
        } else if let Some(op) = Operator::from_char(ch) {
            tokens.push(Token::Operator(op));
            index += 1;
        } else {
            return Err(FormulaError::Parse(format!(
                "invalid character '{}' at position {}",
                ch, index
            )));
        }
    }

    Ok(tokens)
}

/// Convert an infix token sequence to postfix order.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Operator> = Vec::new();

    for &token in tokens {
        match token {
            Token::Literal(_) | Token::CellRef(_) => output.push(token),
            Token::Operator(Operator::LeftParen) => stack.push(Operator::LeftParen),
            Token::Operator(Operator::RightParen) => loop {
                match stack.pop() {
                    Some(Operator::LeftParen) => break,
                    Some(op) => output.push(Token::Operator(op)),
                    None => return Err(FormulaError::Parse("unmatched ')'".to_string())),
                }
            },
            Token::Operator(op) => {
                while let Some(&top) = stack.last() {
                    if top.priority() < op.priority() {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(op);
            }
        }
    }

    while let Some(op) = stack.pop() {
        if op == Operator::LeftParen {
            return Err(FormulaError::Parse("unmatched '('".to_string()));
        }
        output.push(Token::Operator(op));
    }

    Ok(output)
}
