//! Tokens of the expression language.
//!
//! An expression is made of non-negative integer literals and a fixed
//! alphabet of single-character operators. The close bracket `)` never
//! becomes a token: it only tells the converter to unwind its stack.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator symbols understood by the resolver.
///
/// `Open` is the `(` bracket. It is kept on the converter's stack as a
/// sentinel and only reaches postfix output when brackets are unbalanced.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `(`
    Open,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`, truncating integer division
    Divide,
    /// `%`
    Modulo,
    /// `^`
    Power,
    /// `!`, unary
    Factorial,
    /// `C` or `c`, n choose r
    Choose,
    /// `d`, dice roll
    Dice,
}

/// Number of operands an operator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Operator {
    /// Every operator, in symbol-table order.
    pub const ALL: [Operator; 10] = [
        Operator::Open,
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulo,
        Operator::Power,
        Operator::Factorial,
        Operator::Choose,
        Operator::Dice,
    ];

    /// Look up the operator for a character.
    ///
    /// Returns `None` for digits, `)` and anything outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zzroll::Operator;
    ///
    /// assert_eq!(Operator::from_symbol('d'), Some(Operator::Dice));
    /// assert_eq!(Operator::from_symbol('c'), Some(Operator::Choose));
    /// assert_eq!(Operator::from_symbol(')'), None);
    /// ```
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '(' => Some(Operator::Open),
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Modulo),
            '^' => Some(Operator::Power),
            '!' => Some(Operator::Factorial),
            'C' | 'c' => Some(Operator::Choose),
            'd' => Some(Operator::Dice),
            _ => None,
        }
    }

    /// Canonical character for this operator.
    pub fn symbol(self) -> char {
        match self {
            Operator::Open => '(',
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Modulo => '%',
            Operator::Power => '^',
            Operator::Factorial => '!',
            Operator::Choose => 'C',
            Operator::Dice => 'd',
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Factorial => Arity::Unary,
            _ => Arity::Binary,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single postfix token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Integer(i64),
    Operator(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(value) => write!(f, "{}", value),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Token::Integer(value)
    }
}
