//! Expression resolver module.
//!
//! Provides the `DiceResolver` type, which is the main entry point for
//! resolving expressions. It owns the configuration and the random
//! source, compiles expressions to postfix and evaluates them.

use crate::config::EngineConfig;
use crate::error::RollError;
use crate::evaluate::evaluate;
use crate::histogram::{self, HistogramReport};
use crate::postfix::Postfix;
use crate::roller::{RngRoller, Roller};
use tracing::warn;

/// Resolves infix integer expressions with dice notation.
///
/// `resolve` and `histogram` always produce a value: failures resolve to
/// 0 and the cause is kept in `last_error()`. Callers that prefer a
/// `Result` use `try_resolve` and `sample`.
///
/// # Examples
///
/// ```rust
/// use zzroll::DiceResolver;
///
/// let mut resolver = DiceResolver::new();
///
/// assert_eq!(resolver.resolve("(12+2^3)/10*8%5"), 1);
///
/// let roll = resolver.resolve("3d6");
/// assert!((3..=18).contains(&roll));
///
/// // Malformed input resolves to 0.
/// assert_eq!(resolver.resolve("(9*7"), 0);
/// assert!(resolver.has_error());
/// ```
pub struct DiceResolver<R: Roller = RngRoller> {
    config: EngineConfig,
    roller: R,
    last_error: Option<RollError>,
}

impl DiceResolver<RngRoller> {
    /// Create a resolver with the default configuration and an
    /// entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a resolver whose dice rolls are reproducible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zzroll::DiceResolver;
    ///
    /// let mut a = DiceResolver::seeded(3);
    /// let mut b = DiceResolver::seeded(3);
    /// assert_eq!(a.resolve("10d20"), b.resolve("10d20"));
    /// ```
    pub fn seeded(seed: u64) -> Self {
        Self::with_roller(EngineConfig::default(), RngRoller::seeded(seed))
    }

    /// Create a resolver with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_roller(config, RngRoller::from_entropy())
    }
}

impl Default for DiceResolver<RngRoller> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Roller> DiceResolver<R> {
    /// Create a resolver with a custom configuration and random source.
    pub fn with_roller(config: EngineConfig, roller: R) -> Self {
        Self {
            config,
            roller,
            last_error: None,
        }
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mutable access to the random source.
    pub fn roller_mut(&mut self) -> &mut R {
        &mut self.roller
    }

    /// The error from the last `resolve` or `histogram` call, if it failed.
    pub fn last_error(&self) -> Option<&RollError> {
        self.last_error.as_ref()
    }

    /// Whether the last `resolve` or `histogram` call failed.
    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    /// Compile an expression to postfix.
    pub fn compile(&self, expression: &str) -> Result<Postfix, RollError> {
        Postfix::compile(expression, &self.config.precedence)
    }

    /// Space-separated postfix rendering of an expression.
    ///
    /// Returns an empty string when the expression cannot be compiled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zzroll::DiceResolver;
    ///
    /// let resolver = DiceResolver::new();
    /// assert_eq!(resolver.to_postfix("1 + 2 * 3"), "1 2 3 * +");
    /// ```
    pub fn to_postfix(&self, expression: &str) -> String {
        match self.compile(expression) {
            Ok(postfix) => postfix.to_string(),
            Err(err) => {
                warn!(expression, error = %err, "could not compile expression");
                String::new()
            }
        }
    }

    /// Evaluate an already compiled expression.
    ///
    /// Each call draws new dice rolls.
    pub fn evaluate(&mut self, postfix: &Postfix) -> Result<i64, RollError> {
        evaluate(postfix, &mut self.roller, &self.config)
    }

    /// Compile and evaluate an expression once.
    ///
    /// # Errors
    ///
    /// Returns the first error met while compiling or evaluating.
    pub fn try_resolve(&mut self, expression: &str) -> Result<i64, RollError> {
        let postfix = self.compile(expression)?;
        self.evaluate(&postfix)
    }

    /// Compile and evaluate an expression once, reporting 0 on failure.
    ///
    /// The failure is available from `last_error()` until the next call.
    pub fn resolve(&mut self, expression: &str) -> i64 {
        self.last_error = None;
        match self.try_resolve(expression) {
            Ok(value) => value,
            Err(err) => {
                warn!(expression, error = %err, "resolution failed, reporting 0");
                self.last_error = Some(err);
                0
            }
        }
    }

    /// Compile once and evaluate `trials` times.
    ///
    /// `trials` is clamped to `[1, max_trials]`. Only a compile failure
    /// is an error; failed trials are counted in the report.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zzroll::DiceResolver;
    ///
    /// let mut resolver = DiceResolver::seeded(12);
    /// let report = resolver.sample("1d6", 600).unwrap();
    /// assert_eq!(report.trials, 600);
    /// assert!(report.counts.keys().all(|k| (1..=6).contains(k)));
    /// ```
    pub fn sample(&mut self, expression: &str, trials: i64) -> Result<HistogramReport, RollError> {
        let postfix = self.compile(expression)?;
        Ok(histogram::sample(
            &postfix,
            trials,
            &mut self.roller,
            &self.config,
        ))
    }

    /// Rendered distribution report for an expression.
    ///
    /// An expression that cannot be compiled reports every trial as 0.
    pub fn histogram(&mut self, expression: &str, trials: i64) -> String {
        self.last_error = None;
        let report = match self.sample(expression, trials) {
            Ok(report) => report,
            Err(err) => {
                warn!(expression, error = %err, "could not compile expression for histogram");
                self.last_error = Some(err);
                let mut report = HistogramReport::new();
                for _ in 0..self.config.clamp_trials(trials) {
                    report.record_failure();
                }
                report
            }
        };
        report.render(self.config.bar_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Operator;

    /// Rolls the same face every time.
    struct FixedRoller(i64);

    impl Roller for FixedRoller {
        fn roll(&mut self, faces: i64) -> i64 {
            self.0.min(faces)
        }
    }

    #[test]
    fn test_resolver_creation() {
        let resolver = DiceResolver::new();
        assert_eq!(resolver.config(), &EngineConfig::default());
        assert!(!resolver.has_error());
    }

    #[test]
    fn test_resolve_arithmetic() {
        let mut resolver = DiceResolver::new();
        assert_eq!(resolver.resolve("1 + 2 * 3"), 7);
        assert_eq!(resolver.resolve("(12+2^3)/10*8%5"), 1);
        assert_eq!(resolver.resolve("5C2"), 10);
        assert!(!resolver.has_error());
    }

    #[test]
    fn test_resolve_with_fixed_roller() {
        let mut resolver = DiceResolver::with_roller(EngineConfig::default(), FixedRoller(2));
        assert_eq!(resolver.resolve("3d6"), 6);
        assert_eq!(resolver.resolve("2d4 + 3d6 - 1"), 9);
        assert_eq!(resolver.resolve("4d1"), 4);
    }

    #[test]
    fn test_failure_reports_zero_and_error() {
        let mut resolver = DiceResolver::new();
        assert_eq!(resolver.resolve("*oas"), 0);
        assert_eq!(
            resolver.last_error(),
            Some(&RollError::InsufficientOperands {
                op: Operator::Multiply
            })
        );
    }

    #[test]
    fn test_error_cleared_by_next_resolve() {
        let mut resolver = DiceResolver::new();
        resolver.resolve("1/0");
        assert!(resolver.has_error());
        assert_eq!(resolver.resolve("1+1"), 2);
        assert!(!resolver.has_error());
    }

    #[test]
    fn test_try_resolve_returns_structured_error() {
        let mut resolver = DiceResolver::new();
        assert_eq!(
            resolver.try_resolve("7 % 0"),
            Err(RollError::DivisionByZero {
                op: Operator::Modulo
            })
        );
        // try_resolve leaves the status of resolve() alone.
        assert!(!resolver.has_error());
    }

    #[test]
    fn test_to_postfix_on_bad_literal() {
        let resolver = DiceResolver::new();
        assert_eq!(resolver.to_postfix("123456789012345678901234 + 1"), "");
    }

    #[test]
    fn test_histogram_on_bad_literal() {
        let mut resolver = DiceResolver::new();
        let text = resolver.histogram("99999999999999999999d6", 10);
        assert!(text.contains("[  0] ==> 10 (100.00%)"));
        assert!(matches!(
            resolver.last_error(),
            Some(RollError::LiteralOutOfRange(_))
        ));
    }

    #[test]
    fn test_evaluate_reuses_postfix() {
        let mut resolver = DiceResolver::seeded(21);
        let postfix = resolver.compile("1d20").unwrap();
        for _ in 0..100 {
            let value = resolver.evaluate(&postfix).unwrap();
            assert!((1..=20).contains(&value));
        }
    }
}
