//! Outcome distribution summary.
//!
//! Percentiles use linear interpolation between closest ranks, the same
//! estimator as the default of most array libraries. `std` is the sample
//! standard deviation (`n - 1` denominator).

use super::error::RunStateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed statistical summary of an outcome vector.
///
/// Field names double as metric keys, see [`StatisticsSummary::get`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    /// Number of outcomes
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// 50th percentile
    pub median: f64,
    /// Sample standard deviation
    pub std: f64,
    /// Smallest outcome
    pub min: f64,
    /// Largest outcome
    pub max: f64,
    /// 10th percentile
    pub p10: f64,
    /// 25th percentile
    pub p25: f64,
    /// 50th percentile
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Fraction of outcomes strictly below zero
    pub prob_loss: f64,
    /// Value at Risk: the 5th percentile of outcomes
    pub var_95: f64,
    /// Conditional VaR: mean of outcomes at or below `var_95`
    pub cvar_95: f64,
}

impl StatisticsSummary {
    /// Metric keys accepted by [`get`](Self::get).
    pub const KEYS: [&'static str; 15] = [
        "mean", "median", "std", "min", "max", "p10", "p25", "p50", "p75", "p90", "p95", "p99",
        "prob_loss", "var_95", "cvar_95",
    ];

    /// Looks up a metric by key.
    pub fn get(&self, key: &str) -> Option<f64> {
        let value = match key {
            "mean" => self.mean,
            "median" => self.median,
            "std" => self.std,
            "min" => self.min,
            "max" => self.max,
            "p10" => self.p10,
            "p25" => self.p25,
            "p50" => self.p50,
            "p75" => self.p75,
            "p90" => self.p90,
            "p95" => self.p95,
            "p99" => self.p99,
            "prob_loss" => self.prob_loss,
            "var_95" => self.var_95,
            "cvar_95" => self.cvar_95,
            _ => return None,
        };
        Some(value)
    }

    /// Percentiles in rank order, paired with their rank.
    pub fn percentiles(&self) -> [(u8, f64); 7] {
        [
            (10, self.p10),
            (25, self.p25),
            (50, self.p50),
            (75, self.p75),
            (90, self.p90),
            (95, self.p95),
            (99, self.p99),
        ]
    }

    /// Every metric keyed by name.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (key.to_string(), v)))
            .collect()
    }
}

/// Reduces outcome vectors to a [`StatisticsSummary`].
pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// Computes the summary of `outcomes`.
    ///
    /// # Errors
    ///
    /// Returns `RunStateError::EmptyOutcomes` for an empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scenario_engine::statistics::StatisticsCalculator;
    ///
    /// let summary = StatisticsCalculator::compute(&[-10.0, 0.0, 10.0, 20.0, 30.0]).unwrap();
    /// assert_eq!(summary.mean, 10.0);
    /// assert_eq!(summary.median, 10.0);
    /// assert_eq!(summary.prob_loss, 0.2);
    /// assert!(summary.cvar_95 <= summary.var_95);
    /// ```
    pub fn compute(outcomes: &[f64]) -> Result<StatisticsSummary, RunStateError> {
        if outcomes.is_empty() {
            return Err(RunStateError::EmptyOutcomes);
        }

        let n = outcomes.len();
        let mut sorted = outcomes.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = sorted.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let p = |rank: f64| percentile_sorted(&sorted, rank);
        let var_95 = p(5.0);
        let tail: Vec<f64> = sorted.iter().copied().take_while(|&v| v <= var_95).collect();
        let cvar_95 = if tail.is_empty() {
            var_95
        } else {
            (tail.iter().sum::<f64>() / tail.len() as f64).min(var_95)
        };
        let losses = sorted.iter().take_while(|&&v| v < 0.0).count();

        Ok(StatisticsSummary {
            count: n,
            mean,
            median: p(50.0),
            std,
            min: sorted[0],
            max: sorted[n - 1],
            p10: p(10.0),
            p25: p(25.0),
            p50: p(50.0),
            p75: p(75.0),
            p90: p(90.0),
            p95: p(95.0),
            p99: p(99.0),
            prob_loss: losses as f64 / n as f64,
            var_95,
            cvar_95,
        })
    }
}

/// Linear-interpolation percentile of an ascending slice.
///
/// `rank` is in percent and clamped to `[0, 100]`. Returns NaN for an empty
/// slice.
pub fn percentile_sorted(sorted: &[f64], rank: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = rank.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let (lo, hi) = (sorted[lower], sorted[upper]);
    (lo + (hi - lo) * (position - lower as f64)).max(lo).min(hi)
}
