//! Serialisable snapshot of a completed run.

use crate::triggers::{highest_severity, Severity, Trigger};
use scenario_engine::{SensitivityReport, StatisticsSummary};
use scenario_models::distribution::VariableSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything presentation layers need from one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Client name, if configured
    pub client: Option<String>,
    /// Industry name, if configured
    pub industry: Option<String>,
    /// Business model identifier
    pub model: String,
    /// Number of simulations
    pub n_simulations: usize,
    /// Seed the run used
    pub seed: u64,
    /// Resolved variables with their provenance
    pub variables: Vec<VariableSpec>,
    /// Outcome summary
    pub statistics: StatisticsSummary,
    /// Variables ranked by influence
    pub sensitivity: SensitivityReport,
    /// Fired triggers
    pub triggers: Vec<Trigger>,
}

impl RiskReport {
    /// Highest severity among the fired triggers.
    pub fn highest_severity(&self) -> Option<Severity> {
        highest_severity(&self.triggers)
    }

    /// Whether no trigger fired.
    pub fn is_clear(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}): {} x {} (seed {})",
            self.client.as_deref().unwrap_or("unnamed client"),
            self.industry.as_deref().unwrap_or("no industry"),
            self.model,
            self.n_simulations,
            self.seed
        )?;
        writeln!(
            f,
            "  mean {:.2}  std {:.2}  p10 {:.2}  p90 {:.2}  P(loss) {:.1}%",
            self.statistics.mean,
            self.statistics.std,
            self.statistics.p10,
            self.statistics.p90,
            self.statistics.prob_loss * 100.0
        )?;
        if let Some(top) = self.sensitivity.top(1).first() {
            writeln!(f, "  main driver: {} ({:.2})", top.variable, top.importance)?;
        }
        for trigger in &self.triggers {
            writeln!(f, "  {}", trigger)?;
        }
        Ok(())
    }
}
