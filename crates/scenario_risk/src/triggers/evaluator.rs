//! Threshold rules over a statistics summary.

use super::error::TriggerError;
use super::thresholds::RiskThresholds;
use super::trigger::{Severity, Trigger};
use chrono::{DateTime, Utc};
use scenario_engine::StatisticsSummary;
use std::collections::{BTreeMap, HashMap};

/// Statistics every evaluation needs.
pub const REQUIRED_METRICS: [&str; 4] = ["prob_loss", "mean", "std", "p10"];

/// Keyed access to summary statistics.
///
/// Implemented for [`StatisticsSummary`] and for plain string-keyed maps,
/// so hand-built or externally computed summaries can be evaluated too.
pub trait MetricSource {
    /// Value of a metric, `None` when absent.
    fn metric(&self, key: &str) -> Option<f64>;
}

impl MetricSource for StatisticsSummary {
    fn metric(&self, key: &str) -> Option<f64> {
        self.get(key)
    }
}

impl MetricSource for BTreeMap<String, f64> {
    fn metric(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl MetricSource for HashMap<String, f64> {
    fn metric(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl MetricSource for [(&str, f64)] {
    fn metric(&self, key: &str) -> Option<f64> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Required statistics, read once and checked.
struct Inputs {
    prob_loss: f64,
    mean: f64,
    std: f64,
    p10: f64,
}

impl Inputs {
    fn read<S: MetricSource + ?Sized>(stats: &S) -> Result<Self, TriggerError> {
        let values: Vec<Option<f64>> = REQUIRED_METRICS
            .iter()
            .map(|key| stats.metric(key).filter(|v| v.is_finite()))
            .collect();

        let missing: Vec<String> = REQUIRED_METRICS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TriggerError::IncompleteStatistics { missing });
        }

        let get = |i: usize| values[i].unwrap_or_default();
        Ok(Self {
            prob_loss: get(0),
            mean: get(1),
            std: get(2),
            p10: get(3),
        })
    }
}

/// Applies the loss, volatility and margin rules.
///
/// Rules are independent: each evaluation runs all three and returns zero to
/// three triggers in rule order.
///
/// # Examples
///
/// ```rust
/// use scenario_risk::triggers::{RiskThresholds, Severity, TriggerEvaluator};
///
/// let evaluator = TriggerEvaluator::new(RiskThresholds::default());
/// let stats = [("prob_loss", 0.40), ("mean", 30_000.0), ("std", 3_000.0), ("p10", 26_000.0)];
///
/// let triggers = evaluator.evaluate(&stats[..]).unwrap();
/// assert_eq!(triggers.len(), 1);
/// assert_eq!(triggers[0].severity, Severity::Critical);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggerEvaluator {
    thresholds: RiskThresholds,
}

impl TriggerEvaluator {
    /// Create an evaluator.
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Evaluates every rule, stamping triggers with the current time.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::IncompleteStatistics` naming every required
    /// metric that is absent or not finite. No rule is skipped silently.
    pub fn evaluate<S: MetricSource + ?Sized>(&self, stats: &S) -> Result<Vec<Trigger>, TriggerError> {
        self.evaluate_at(stats, Utc::now())
    }

    /// Evaluates every rule with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn evaluate_at<S: MetricSource + ?Sized>(
        &self,
        stats: &S,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<Trigger>, TriggerError> {
        let inputs = Inputs::read(stats)?;

        let triggers: Vec<Trigger> = [
            self.loss_rule(&inputs, timestamp),
            self.volatility_rule(&inputs, timestamp),
            self.margin_rule(&inputs, timestamp),
        ]
        .into_iter()
        .flatten()
        .collect();

        for trigger in &triggers {
            tracing::info!(
                metric = %trigger.metric,
                severity = %trigger.severity,
                actual = trigger.actual,
                threshold = trigger.threshold,
                "Risk trigger fired"
            );
        }
        tracing::debug!(fired = triggers.len(), "Trigger evaluation complete");

        Ok(triggers)
    }

    fn loss_rule(&self, s: &Inputs, timestamp: DateTime<Utc>) -> Option<Trigger> {
        let limit = self.thresholds.critical_loss_prob;
        if s.prob_loss <= limit {
            return None;
        }

        let severity = if s.prob_loss > 1.5 * limit {
            Severity::Critical
        } else {
            Severity::High
        };
        let excess_pct = (limit > 0.0).then(|| (s.prob_loss - limit) / limit * 100.0);
        let message = match excess_pct {
            Some(excess) => format!(
                "Loss probability of {:.1}% exceeds the {:.1}% limit by {:.0}%",
                s.prob_loss * 100.0,
                limit * 100.0,
                excess
            ),
            None => format!(
                "Loss probability of {:.1}% breaches a zero-loss tolerance",
                s.prob_loss * 100.0
            ),
        };
        let mut supporting = context(&[("mean", s.mean), ("p10", s.p10)]);
        if let Some(excess) = excess_pct {
            supporting.insert("excess_pct".to_string(), excess);
        }

        Some(Trigger {
            metric: "prob_loss".to_string(),
            severity,
            actual: s.prob_loss,
            threshold: limit,
            message,
            recommendation: "Review pricing and cost structure; consider hedging the most \
                             influential input or building a cash reserve"
                .to_string(),
            context: supporting,
            timestamp,
        })
    }

    fn volatility_rule(&self, s: &Inputs, timestamp: DateTime<Utc>) -> Option<Trigger> {
        if s.mean == 0.0 {
            return None;
        }
        let cv = (s.std / s.mean).abs();
        let limit = self.thresholds.high_volatility;
        if cv <= limit {
            return None;
        }

        Some(Trigger {
            metric: "coefficient_of_variation".to_string(),
            severity: Severity::High,
            actual: cv,
            threshold: limit,
            message: format!(
                "Outcome volatility is high: coefficient of variation {:.1}% above the {:.1}% limit",
                cv * 100.0,
                limit * 100.0
            ),
            recommendation: "Reduce exposure to volatile inputs with fixed-price contracts \
                             or supplier diversification"
                .to_string(),
            context: context(&[("mean", s.mean), ("std", s.std)]),
            timestamp,
        })
    }

    fn margin_rule(&self, s: &Inputs, timestamp: DateTime<Utc>) -> Option<Trigger> {
        if s.p10 < 0.0 {
            return Some(Trigger {
                metric: "p10".to_string(),
                severity: Severity::Critical,
                actual: s.p10,
                threshold: 0.0,
                message: format!(
                    "The 10th percentile outcome is a loss of {:.2}: one scenario in ten loses money",
                    s.p10.abs()
                ),
                recommendation: "Protect the margin floor: renegotiate costs, raise prices or \
                                 cut fixed costs before the downside materialises"
                    .to_string(),
                context: context(&[("mean", s.mean), ("p10", s.p10)]),
                timestamp,
            });
        }

        let limit = self.thresholds.margin_protection;
        if s.mean > 0.0 && s.p10 / s.mean < limit {
            let ratio = s.p10 / s.mean;
            return Some(Trigger {
                metric: "p10_to_mean".to_string(),
                severity: Severity::Medium,
                actual: ratio,
                threshold: limit,
                message: format!(
                    "Downside margin is thin: the 10th percentile is {:.1}% of the mean, below the {:.1}% cushion",
                    ratio * 100.0,
                    limit * 100.0
                ),
                recommendation: "Monitor the margin cushion and prepare cost contingencies".to_string(),
                context: context(&[("mean", s.mean), ("p10", s.p10)]),
                timestamp,
            });
        }

        None
    }
}

fn context(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}
