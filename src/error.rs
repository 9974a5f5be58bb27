//! Error types for expression resolution.
//!
//! All errors that can occur while compiling or evaluating an expression
//! are represented by the `RollError` enum. The `DiceResolver` facade
//! never returns them from `resolve`, which reports 0 instead, but keeps
//! the last one around for callers that want to know what went wrong.

use crate::token::Operator;
use thiserror::Error;

/// Errors that can occur during expression resolution.
///
/// # Examples
///
/// ```rust
/// use zzroll::{Operator, RollError};
///
/// let err = RollError::InsufficientOperands { op: Operator::Multiply };
/// println!("{}", err); // "Operator '*' is missing an operand"
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RollError {
    /// An integer literal does not fit in 64 bits.
    #[error("Integer literal out of range: {0}")]
    LiteralOutOfRange(String),

    /// An operator found fewer values on the stack than it needs.
    ///
    /// This is how malformed input such as `"*oas"` shows up.
    #[error("Operator '{op}' is missing an operand")]
    InsufficientOperands { op: Operator },

    /// A `(` without a matching `)` reached the evaluator.
    #[error("Unbalanced bracket")]
    UnbalancedBracket,

    /// The expression produced no value at all.
    #[error("Expression is empty")]
    EmptyExpression,

    /// More than one value was left after evaluation (strict mode only).
    #[error("{count} values left on the stack after evaluation")]
    ResidualOperands { count: usize },

    /// `/` or `%` with a zero right operand.
    #[error("Division by zero in '{op}'")]
    DivisionByZero { op: Operator },

    /// `^` with a negative exponent.
    #[error("Negative exponent: {0}")]
    NegativeExponent(i64),

    /// An intermediate result exceeded the 64-bit range.
    #[error("Arithmetic overflow in '{op}'")]
    Overflow { op: Operator },

    /// A die must have at least one face.
    #[error("Invalid die with {faces} faces")]
    InvalidDie { faces: i64 },

    /// A single roll asked for more dice than the configured limit.
    #[error("Too many dice: {count} (limit {limit})")]
    TooManyDice { count: i64, limit: i64 },

    /// The engine configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RollError {
    fn from(err: serde_json::Error) -> Self {
        RollError::Config(err.to_string())
    }
}
