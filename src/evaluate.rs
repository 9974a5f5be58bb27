//! Postfix evaluation.
//!
//! A stack machine over a compiled `Postfix`. Each call works on its own
//! stack, so the same postfix can be evaluated repeatedly; expressions
//! containing `d` draw fresh rolls every time.

use crate::collections::Stack;
use crate::config::EngineConfig;
use crate::error::RollError;
use crate::ops;
use crate::postfix::Postfix;
use crate::roller::Roller;
use crate::token::{Arity, Operator, Token};
use tracing::warn;

/// Evaluate a postfix expression to a single integer.
///
/// # Returns
///
/// * `Ok(value)` - The value on top of the stack once every token is consumed
/// * `Err(RollError)` - If an operator lacks operands, an operator fails,
///   or nothing was produced
///
/// When more than one value remains at the end, the top one is returned
/// unless `config.strict` is set, in which case the residue is an error.
///
/// # Examples
///
/// ```rust
/// use zzroll::evaluate::evaluate;
/// use zzroll::roller::RngRoller;
/// use zzroll::{EngineConfig, Postfix};
///
/// let config = EngineConfig::default();
/// let postfix = Postfix::compile("1 + 2 * 3", &config.precedence).unwrap();
/// let mut roller = RngRoller::seeded(0);
/// assert_eq!(evaluate(&postfix, &mut roller, &config), Ok(7));
/// ```
pub fn evaluate<R: Roller>(
    postfix: &Postfix,
    roller: &mut R,
    config: &EngineConfig,
) -> Result<i64, RollError> {
    let mut stack: Stack<i64> = Stack::new();

    for token in postfix.tokens() {
        match *token {
            Token::Integer(value) => stack.push(value),
            Token::Operator(Operator::Open) => return Err(RollError::UnbalancedBracket),
            Token::Operator(op) => {
                let right = stack
                    .pop()
                    .ok_or(RollError::InsufficientOperands { op })?;
                let left = match op.arity() {
                    Arity::Unary => right,
                    Arity::Binary => stack
                        .pop()
                        .ok_or(RollError::InsufficientOperands { op })?,
                };
                stack.push(ops::apply(op, left, right, roller, config)?);
            }
        }
    }

    let result = stack.pop().ok_or(RollError::EmptyExpression)?;
    if !stack.is_empty() {
        let count = stack.size() + 1;
        if config.strict {
            return Err(RollError::ResidualOperands { count });
        }
        warn!(count, postfix = %postfix, "values left on the stack, reporting the top one");
    }
    Ok(result)
}
