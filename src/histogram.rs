//! Outcome distributions.
//!
//! A `HistogramReport` is built by evaluating one compiled `Postfix` many
//! times and counting how often each value comes up. It is read-only once
//! sampled, serializable, and renders to the plain-text report shown by
//! `DiceResolver::histogram`.

use crate::config::EngineConfig;
use crate::evaluate::evaluate;
use crate::postfix::Postfix;
use crate::roller::Roller;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use tracing::{debug, warn};

/// Frequency of each outcome over a number of trials.
///
/// Keys are kept in ascending order, which is the order every derived
/// value and the rendered report use.
///
/// # Examples
///
/// ```rust
/// use zzroll::HistogramReport;
///
/// let mut report = HistogramReport::new();
/// report.record(2);
/// report.record(3);
/// report.record(3);
/// report.record(4);
///
/// assert_eq!(report.trials, 4);
/// assert_eq!(report.mode(), Some(3));
/// assert_eq!(report.percentage(3), 50.0);
/// assert_eq!(report.rounded_mean(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramReport {
    /// Number of recorded trials.
    pub trials: u64,

    /// Trials whose evaluation failed; each was recorded as outcome 0.
    pub failures: u64,

    /// Occurrences per outcome.
    pub counts: BTreeMap<i64, u64>,
}

impl HistogramReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one trial outcome.
    pub fn record(&mut self, outcome: i64) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.trials += 1;
    }

    /// Record a failed trial as outcome 0.
    pub fn record_failure(&mut self) {
        self.record(0);
        self.failures += 1;
    }

    /// Occurrences of `outcome`.
    pub fn count(&self, outcome: i64) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Share of trials that produced `outcome`, from 0 to 100.
    pub fn percentage(&self, outcome: i64) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / self.trials as f64 * 100.0
    }

    /// Arithmetic mean of all outcomes.
    pub fn mean(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let sum: i128 = self
            .counts
            .iter()
            .map(|(&outcome, &count)| outcome as i128 * count as i128)
            .sum();
        sum as f64 / self.trials as f64
    }

    /// Mean rounded by adding one half and truncating.
    pub fn rounded_mean(&self) -> i64 {
        (self.mean() + 0.5) as i64
    }

    /// Most frequent outcome; the lowest one wins ties.
    pub fn mode(&self) -> Option<i64> {
        let mut best: Option<(i64, u64)> = None;
        for (&outcome, &count) in &self.counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((outcome, count)),
            }
        }
        best.map(|(outcome, _)| outcome)
    }

    /// Bar length for `outcome` when 100% spans `width` characters.
    pub fn bar_len(&self, outcome: i64, width: usize) -> usize {
        (self.percentage(outcome) / 100.0 * width as f64 + 0.5) as usize
    }

    /// Render the frequency table, mean, mode and bar chart.
    pub fn render(&self, bar_width: usize) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_report(&mut out, bar_width);
        out
    }

    fn write_report<W: Write>(&self, out: &mut W, bar_width: usize) -> fmt::Result {
        writeln!(
            out,
            "DISTRIBUTION HISTOGRAM ({} trials):",
            group_thousands(self.trials)
        )?;
        for (&outcome, &count) in &self.counts {
            writeln!(
                out,
                "[{:3}] ==> {} ({:.2}%)",
                outcome,
                group_thousands(count),
                self.percentage(outcome)
            )?;
        }
        writeln!(out, "Mean: {} ({:.2})", self.rounded_mean(), self.mean())?;
        match self.mode() {
            Some(mode) => writeln!(out, "Mode: {}", mode)?,
            None => writeln!(out, "Mode: -")?,
        }
        writeln!(out)?;

        writeln!(out, "PICTORIAL HISTOGRAM:")?;
        for &outcome in self.counts.keys() {
            writeln!(
                out,
                "[{:3}] {}",
                outcome,
                "*".repeat(self.bar_len(outcome, bar_width))
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for HistogramReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f, crate::config::DEFAULT_BAR_WIDTH)
    }
}

/// Evaluate `postfix` once per trial and collect the outcomes.
///
/// `trials` is clamped to `[1, config.max_trials]`. A trial that fails is
/// recorded as 0 and counted in `failures`.
///
/// # Examples
///
/// ```rust
/// use zzroll::histogram::sample;
/// use zzroll::roller::RngRoller;
/// use zzroll::{EngineConfig, Postfix};
///
/// let config = EngineConfig::default();
/// let postfix = Postfix::compile("2d6", &config.precedence).unwrap();
/// let report = sample(&postfix, 1_000, &mut RngRoller::seeded(1), &config);
///
/// assert_eq!(report.trials, 1_000);
/// assert!(report.counts.keys().all(|k| (2..=12).contains(k)));
/// ```
pub fn sample<R: Roller>(
    postfix: &Postfix,
    trials: i64,
    roller: &mut R,
    config: &EngineConfig,
) -> HistogramReport {
    let trials = config.clamp_trials(trials);
    let mut report = HistogramReport::new();

    for _ in 0..trials {
        match evaluate(postfix, roller, config) {
            Ok(outcome) => report.record(outcome),
            Err(_) => report.record_failure(),
        }
    }

    if report.failures > 0 {
        warn!(
            failures = report.failures,
            trials, "some trials failed and were recorded as 0"
        );
    }
    debug!(
        trials,
        outcomes = report.counts.len(),
        dice = postfix.has_dice(),
        "sampled expression"
    );
    report
}

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
