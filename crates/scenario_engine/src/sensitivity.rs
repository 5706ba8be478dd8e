//! Variance attribution by linear association.
//!
//! Each variable is scored by the Pearson correlation of its samples with
//! the outcomes; `importance = correlation²`. This is a univariate
//! approximation: importances are not a partial decomposition and need not
//! sum to one.

use super::engine::SimulationRun;
use super::error::RunStateError;
use serde::{Deserialize, Serialize};

/// Association of one variable with the outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    /// Variable name
    pub variable: String,
    /// Pearson correlation in [-1, 1]; 0 when either side has no variance
    pub correlation: f64,
    /// `correlation²`, in [0, 1]
    pub importance: f64,
}

/// Entries sorted by importance, descending.
///
/// Equal importances keep variable declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    entries: Vec<SensitivityEntry>,
}

impl SensitivityReport {
    /// Entries, most important first.
    pub fn entries(&self) -> &[SensitivityEntry] {
        &self.entries
    }

    /// Entry for a variable.
    pub fn get(&self, variable: &str) -> Option<&SensitivityEntry> {
        self.entries.iter().find(|e| e.variable == variable)
    }

    /// The `n` most important entries.
    pub fn top(&self, n: usize) -> &[SensitivityEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries, most important first.
    pub fn iter(&self) -> std::slice::Iter<'_, SensitivityEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for SensitivityReport {
    type Item = SensitivityEntry;
    type IntoIter = std::vec::IntoIter<SensitivityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Ranks variables of a run by importance.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// Builds the report for a completed run.
    ///
    /// # Errors
    ///
    /// Returns `RunStateError::EmptyOutcomes` for a run without simulations.
    pub fn analyze(run: &SimulationRun) -> Result<SensitivityReport, RunStateError> {
        if run.is_empty() {
            return Err(RunStateError::EmptyOutcomes);
        }

        let outcomes = run.outcomes();
        let mut entries: Vec<SensitivityEntry> = run
            .columns()
            .map(|(variable, samples)| {
                let correlation = pearson(samples, outcomes);
                SensitivityEntry {
                    variable: variable.to_string(),
                    correlation,
                    importance: correlation * correlation,
                }
            })
            .collect();

        // stable: ties stay in declaration order
        entries.sort_by(|a, b| b.importance.total_cmp(&a.importance));

        if let Some(top) = entries.first() {
            tracing::debug!(
                variable = %top.variable,
                importance = top.importance,
                "Most influential variable"
            );
        }
        Ok(SensitivityReport { entries })
    }
}

/// Pearson correlation of two equally long series.
///
/// Returns 0 when fewer than two points are given or either series has
/// zero variance. The result is clamped to [-1, 1].
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return 0.0;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
