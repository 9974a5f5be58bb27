//! Engine configuration.
//!
//! `EngineConfig` gathers the tunables of the resolver. Every field has a
//! default, so a JSON document only needs to name what it changes.

use crate::error::RollError;
use crate::precedence::PrecedenceTable;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of trials a histogram may run.
pub const DEFAULT_MAX_TRIALS: u64 = 1_000_000;

/// Width, in characters, of a bar representing 100% of the trials.
pub const DEFAULT_BAR_WIDTH: usize = 160;

/// Upper bound on the left operand of `d`.
pub const DEFAULT_MAX_DICE: i64 = 1_000_000;

/// Configuration for compiling, evaluating and sampling expressions.
///
/// # Examples
///
/// ```rust
/// use zzroll::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "strict": true, "bar_width": 80 }"#).unwrap();
/// assert!(config.strict);
/// assert_eq!(config.bar_width, 80);
/// assert_eq!(config.max_trials, 1_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operator precedence used by the converter.
    pub precedence: PrecedenceTable,
    /// Histogram trial counts are clamped to `[1, max_trials]`.
    pub max_trials: u64,
    /// Bar chart width for a 100% outcome.
    pub bar_width: usize,
    /// Largest dice count accepted by a single `d`.
    pub max_dice: i64,
    /// Treat values left over after evaluation as an error instead of
    /// reporting the top of the stack.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precedence: PrecedenceTable::default(),
            max_trials: DEFAULT_MAX_TRIALS,
            bar_width: DEFAULT_BAR_WIDTH,
            max_dice: DEFAULT_MAX_DICE,
            strict: false,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, RollError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), RollError> {
        self.precedence.validate()?;
        if self.max_trials == 0 || self.max_trials > DEFAULT_MAX_TRIALS {
            return Err(RollError::Config(format!(
                "max_trials must be between 1 and {}",
                DEFAULT_MAX_TRIALS
            )));
        }
        if self.max_dice < 0 {
            return Err(RollError::Config("max_dice must not be negative".into()));
        }
        Ok(())
    }

    /// Clamp a requested trial count into `[1, max_trials]`.
    pub fn clamp_trials(&self, trials: i64) -> u64 {
        if trials < 1 {
            1
        } else {
            (trials as u64)
                .min(self.max_trials)
                .min(DEFAULT_MAX_TRIALS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_trials, 1_000_000);
        assert_eq!(config.bar_width, 160);
        assert_eq!(config.max_dice, 1_000_000);
        assert!(!config.strict);
        assert_eq!(config.precedence, PrecedenceTable::default());
    }

    #[test]
    fn test_clamp_trials() {
        let config = EngineConfig::default();
        assert_eq!(config.clamp_trials(-5), 1);
        assert_eq!(config.clamp_trials(0), 1);
        assert_eq!(config.clamp_trials(500), 500);
        assert_eq!(config.clamp_trials(5_000_000), 1_000_000);
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_json_rejects_zero_trials() {
        let result = EngineConfig::from_json(r#"{ "max_trials": 0 }"#);
        assert!(matches!(result, Err(RollError::Config(_))));
    }

    #[test]
    fn test_from_json_rejects_trials_above_cap() {
        let result = EngineConfig::from_json(r#"{ "max_trials": 1000001 }"#);
        assert!(matches!(result, Err(RollError::Config(_))));
    }

    #[test]
    fn test_clamp_trials_never_exceeds_cap() {
        let config = EngineConfig {
            max_trials: 5_000_000,
            ..EngineConfig::default()
        };
        assert_eq!(config.clamp_trials(3_000_000), 1_000_000);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(EngineConfig::from_json("{ strict: yes").is_err());
    }
}
