//! # zzroll - Integer Expression Resolver with Dice Notation
//!
//! A small expression engine for tabletop-style rolls that provides:
//! - **Precedence-correct** integer arithmetic (`+ - * / % ^ ! C`)
//! - **Dice rolls** with the `d` operator (`3d6`, `2d4 + 3d6 - 1`)
//! - **Compile once, evaluate many** postfix expressions
//! - **Histograms** of an expression's outcome distribution
//!
//! ## Core Concepts
//!
//! ### Resolution Pipeline
//!
//! ```text
//! [infix &str] → [Tokenizer] → [shunting-yard] → [Postfix] → [evaluate] → i64
//! ```
//!
//! 1. **Postfix** is compiled once with the shunting-yard algorithm
//! 2. **evaluate** runs it on a fresh stack, drawing dice from a `Roller`
//! 3. **sample** repeats step 2 and collects a `HistogramReport`
//!
//! ### Failure Policy
//!
//! `DiceResolver::resolve` never fails: malformed input such as `"(9*7"`
//! or `"*oas"` resolves to 0 and the cause is kept in `last_error()`.
//! `try_resolve` returns the `RollError` directly.
//!
//! ## Example
//!
//! ```rust
//! use zzroll::*;
//!
//! let mut resolver = DiceResolver::seeded(42);
//!
//! assert_eq!(resolver.to_postfix("1 + 2 * 3"), "1 2 3 * +");
//! assert_eq!(resolver.resolve("1 + 2 * 3"), 7);
//! assert_eq!(resolver.resolve("5!"), 120);
//!
//! let roll = resolver.resolve("2d4 + 3d6 - 1");
//! assert!((4..=25).contains(&roll));
//!
//! let report = resolver.sample("3d6", 10_000).unwrap();
//! assert_eq!(report.counts.values().sum::<u64>(), 10_000);
//! ```
//!
//! ## Modules
//!
//! - [`token`] - Operators and postfix tokens
//! - [`precedence`] - Operator precedence table
//! - [`postfix`] - Tokenizer and infix to postfix conversion
//! - [`evaluate`] - Postfix stack machine
//! - [`ops`] - Operator semantics
//! - [`roller`] - Random sources for dice
//! - [`histogram`] - Repeated sampling and reports
//! - [`resolver`] - Main resolver facade
//! - [`config`] - Engine configuration
//! - [`collections`] - Stack and queue containers
//! - [`error`] - Error types

pub mod collections;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod histogram;
pub mod ops;
pub mod postfix;
pub mod precedence;
pub mod resolver;
pub mod roller;
pub mod token;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use error::RollError;
pub use histogram::HistogramReport;
pub use postfix::Postfix;
pub use precedence::PrecedenceTable;
pub use resolver::DiceResolver;
pub use roller::{RngRoller, Roller};
pub use token::{Operator, Token};
