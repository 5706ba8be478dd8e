//! Rule-based risk alerts.
//!
//! | Rule | Fires when | Severity |
//! |------|------------|----------|
//! | loss | `prob_loss > critical_loss_prob` | CRÍTICO above 1.5 × limit, else ALTO |
//! | volatility | `mean != 0` and `|std / mean| > high_volatility` | ALTO |
//! | margin | `p10 < 0` | CRÍTICO |
//! | margin | `mean > 0` and `p10 / mean < margin_protection` | MEDIO |
//!
//! Default limits are 0.25, 0.35 and 0.05; `thresholds.*` overrides them.

mod error;
mod evaluator;
mod thresholds;
mod trigger;

pub use error::TriggerError;
pub use evaluator::{MetricSource, TriggerEvaluator, REQUIRED_METRICS};
pub use thresholds::{
    RiskThresholds, DEFAULT_CRITICAL_LOSS_PROB, DEFAULT_HIGH_VOLATILITY, DEFAULT_MARGIN_PROTECTION,
};
pub use trigger::{highest_severity, Severity, Trigger};
