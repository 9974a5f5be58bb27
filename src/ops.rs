//! Operator semantics.
//!
//! Every operator works on `i64` and uses checked arithmetic. Factorial
//! of a negative number and impossible choices (`r > n` and friends) are
//! defined to be 0; division by zero and overflow are errors.

use crate::config::EngineConfig;
use crate::error::RollError;
use crate::roller::Roller;
use crate::token::Operator;

/// Apply an operator to its operands.
///
/// For the unary `!` the evaluator passes the same value as `left` and
/// `right`; only `left` is read.
///
/// # Examples
///
/// ```rust
/// use zzroll::ops::apply;
/// use zzroll::roller::RngRoller;
/// use zzroll::{EngineConfig, Operator};
///
/// let mut roller = RngRoller::seeded(0);
/// let config = EngineConfig::default();
/// assert_eq!(apply(Operator::Divide, -7, 2, &mut roller, &config), Ok(-3));
/// assert_eq!(apply(Operator::Choose, 5, 2, &mut roller, &config), Ok(10));
/// ```
pub fn apply<R: Roller>(
    op: Operator,
    left: i64,
    right: i64,
    roller: &mut R,
    config: &EngineConfig,
) -> Result<i64, RollError> {
    let overflow = RollError::Overflow { op };
    match op {
        Operator::Add => left.checked_add(right).ok_or(overflow),
        Operator::Subtract => left.checked_sub(right).ok_or(overflow),
        Operator::Multiply => left.checked_mul(right).ok_or(overflow),
        Operator::Divide => {
            if right == 0 {
                return Err(RollError::DivisionByZero { op });
            }
            left.checked_div(right).ok_or(overflow)
        }
        Operator::Modulo => {
            if right == 0 {
                return Err(RollError::DivisionByZero { op });
            }
            left.checked_rem(right).ok_or(overflow)
        }
        Operator::Power => power(left, right),
        Operator::Factorial => factorial(left),
        Operator::Choose => choose(left, right),
        Operator::Dice => roll_dice(left, right, roller, config.max_dice),
        Operator::Open => Err(RollError::UnbalancedBracket),
    }
}

/// Integer exponentiation with a non-negative exponent.
pub fn power(base: i64, exponent: i64) -> Result<i64, RollError> {
    if exponent < 0 {
        return Err(RollError::NegativeExponent(exponent));
    }
    // Bases 0, 1 and -1 stay in range for any exponent.
    match base {
        0 if exponent > 0 => return Ok(0),
        1 => return Ok(1),
        -1 => return Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => {}
    }
    let overflow = RollError::Overflow {
        op: Operator::Power,
    };
    let exponent = u32::try_from(exponent).map_err(|_| overflow.clone())?;
    base.checked_pow(exponent).ok_or(overflow)
}

/// `n!`, with negative input mapped to 0.
///
/// # Examples
///
/// ```rust
/// use zzroll::ops::factorial;
///
/// assert_eq!(factorial(0), Ok(1));
/// assert_eq!(factorial(5), Ok(120));
/// assert_eq!(factorial(-3), Ok(0));
/// ```
pub fn factorial(n: i64) -> Result<i64, RollError> {
    if n < 0 {
        return Ok(0);
    }
    (2..=n).try_fold(1i64, |product, k| {
        product.checked_mul(k).ok_or(RollError::Overflow {
            op: Operator::Factorial,
        })
    })
}

/// `n! / (r! (n - r)!)`, or 0 when the denominator would be 0.
///
/// Computed multiplicatively so that results within range never overflow
/// on the way.
pub fn choose(n: i64, r: i64) -> Result<i64, RollError> {
    if n < 0 || r < 0 || r > n {
        return Ok(0);
    }
    let k = r.min(n - r) as i128;
    let n = n as i128;
    let mut result: i128 = 1;
    for i in 1..=k {
        // result is C(n - k + i - 1, i - 1) here, so the division is exact.
        result = result
            .checked_mul(n - k + i)
            .ok_or(RollError::Overflow {
                op: Operator::Choose,
            })?
            / i;
    }
    i64::try_from(result).map_err(|_| RollError::Overflow {
        op: Operator::Choose,
    })
}

/// Sum of `count` rolls of a `faces`-sided die.
///
/// A count of zero or less rolls nothing and yields 0.
pub fn roll_dice<R: Roller>(
    count: i64,
    faces: i64,
    roller: &mut R,
    max_dice: i64,
) -> Result<i64, RollError> {
    if count <= 0 {
        return Ok(0);
    }
    if faces < 1 {
        return Err(RollError::InvalidDie { faces });
    }
    if count > max_dice {
        return Err(RollError::TooManyDice {
            count,
            limit: max_dice,
        });
    }
    (0..count).try_fold(0i64, |sum, _| {
        sum.checked_add(roller.roll(faces))
            .ok_or(RollError::Overflow { op: Operator::Dice })
    })
}
