//! Operator precedence.
//!
//! Higher weights bind tighter. `(` always weighs 0 so that it is never
//! popped by an incoming operator; only `)` removes it.

use crate::error::RollError;
use crate::token::Operator;
use serde::{Deserialize, Serialize};

/// Immutable precedence weights for every binary and unary operator.
///
/// The default table follows BEDMAS with the dice and factorial operators
/// binding tightest:
///
/// | op | weight |
/// |----|--------|
/// | `(` | 0 |
/// | `+ -` | 3 |
/// | `* / % C` | 5 |
/// | `^` | 7 |
/// | `!` | 8 |
/// | `d` | 9 |
///
/// # Examples
///
/// ```rust
/// use zzroll::{Operator, PrecedenceTable};
///
/// let table = PrecedenceTable::default();
/// assert!(table.weight(Operator::Dice) > table.weight(Operator::Power));
/// assert_eq!(table.weight(Operator::Open), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecedenceTable {
    pub add: u8,
    pub subtract: u8,
    pub multiply: u8,
    pub divide: u8,
    pub modulo: u8,
    pub choose: u8,
    pub power: u8,
    pub factorial: u8,
    pub dice: u8,
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        Self {
            add: 3,
            subtract: 3,
            multiply: 5,
            divide: 5,
            modulo: 5,
            choose: 5,
            power: 7,
            factorial: 8,
            dice: 9,
        }
    }
}

impl PrecedenceTable {
    /// Weight of an operator.
    pub fn weight(&self, op: Operator) -> u8 {
        match op {
            Operator::Open => 0,
            Operator::Add => self.add,
            Operator::Subtract => self.subtract,
            Operator::Multiply => self.multiply,
            Operator::Divide => self.divide,
            Operator::Modulo => self.modulo,
            Operator::Choose => self.choose,
            Operator::Power => self.power,
            Operator::Factorial => self.factorial,
            Operator::Dice => self.dice,
        }
    }

    /// Reject tables where a real operator shares the bracket's weight.
    ///
    /// An operator weighing 0 would pop `(` off the converter stack.
    pub fn validate(&self) -> Result<(), RollError> {
        for op in Operator::ALL {
            if op != Operator::Open && self.weight(op) == 0 {
                return Err(RollError::Config(format!(
                    "operator '{}' must have a precedence above 0",
                    op
                )));
            }
        }
        Ok(())
    }
}
