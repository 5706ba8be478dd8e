//! Alert types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Alert severity, ordered `Medium < High < Critical`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// MEDIO
    #[serde(rename = "MEDIO")]
    Medium,
    /// ALTO
    #[serde(rename = "ALTO")]
    High,
    /// CRÍTICO
    #[serde(rename = "CRÍTICO")]
    Critical,
}

impl Severity {
    /// Report label of this severity.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Medium => "MEDIO",
            Severity::High => "ALTO",
            Severity::Critical => "CRÍTICO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fired rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Metric the rule checked (`prob_loss`, `coefficient_of_variation`, `p10`, ...)
    pub metric: String,
    /// Severity
    pub severity: Severity,
    /// Observed value of the metric
    pub actual: f64,
    /// Limit the value breached
    pub threshold: f64,
    /// Human-readable description
    pub message: String,
    /// Suggested response
    pub recommendation: String,
    /// Supporting statistics
    pub context: BTreeMap<String, f64>,
    /// Evaluation time
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.metric, self.message)
    }
}

/// Highest severity among `triggers`, `None` when empty.
pub fn highest_severity(triggers: &[Trigger]) -> Option<Severity> {
    triggers.iter().map(|t| t.severity).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        let mut levels = vec![Severity::High, Severity::Critical, Severity::Medium];
        levels.sort_by(|a, b| b.cmp(a));
        assert_eq!(levels, vec![Severity::Critical, Severity::High, Severity::Medium]);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Critical.to_string(), "CRÍTICO");
        assert_eq!(Severity::High.to_string(), "ALTO");
        assert_eq!(Severity::Medium.to_string(), "MEDIO");
    }

    #[test]
    fn test_highest_severity_empty() {
        assert_eq!(highest_severity(&[]), None);
    }
}
