//! Formula tokens.

use std::fmt;

use super::cell_ref::CellRef;

/// Operators recognized in formulas, including the two parentheses.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    LeftParen,
    RightParen,
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Power),
            '(' => Some(Operator::LeftParen),
            ')' => Some(Operator::RightParen),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
            Operator::LeftParen => '(',
            Operator::RightParen => ')',
        }
    }

    /// Binding priority used by the postfix conversion.
    ///
    /// Parentheses get -1; they are only ever matched, never compared.
    pub fn priority(self) -> i8 {
        match self {
            Operator::Plus | Operator::Minus => 0,
            Operator::Multiply | Operator::Divide => 1,
            Operator::Power => 2,
            Operator::LeftParen | Operator::RightParen => -1,
        }
    }

    /// Apply a binary operator with plain IEEE semantics (`x / 0.0` is infinite or NaN).
    /// Returns `None` for parentheses.
    pub fn apply(self, left: f64, right: f64) -> Option<f64> {
        match self {
            Operator::Plus => Some(left + right),
            Operator::Minus => Some(left - right),
            Operator::Multiply => Some(left * right),
            Operator::Divide => Some(left / right),
            Operator::Power => Some(left.powf(right)),
            Operator::LeftParen | Operator::RightParen => None,
        }
    }

    pub fn is_paren(self) -> bool {
        matches!(self, Operator::LeftParen | Operator::RightParen)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single lexical unit of a formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    Literal(u64),
    CellRef(CellRef),
    Operator(Operator),
}

impl Token {
    /// Literals and cell references are operands; everything else is an operator.
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::CellRef(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => write!(f, "{}", value),
            Token::CellRef(cell) => write!(f, "{}", cell),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}
