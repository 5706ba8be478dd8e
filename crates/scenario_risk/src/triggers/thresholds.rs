//! Trigger thresholds.

use super::error::TriggerError;
use scenario_core::config::{ConfigResolver, ConfigValue};
use serde::{Deserialize, Serialize};

/// Default `critical_loss_prob`.
pub const DEFAULT_CRITICAL_LOSS_PROB: f64 = 0.25;

/// Default `high_volatility`.
pub const DEFAULT_HIGH_VOLATILITY: f64 = 0.35;

/// Default `margin_protection`.
pub const DEFAULT_MARGIN_PROTECTION: f64 = 0.05;

/// Limits applied by the trigger rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Loss probability above which the loss rule fires
    pub critical_loss_prob: f64,
    /// Coefficient of variation above which the volatility rule fires
    pub high_volatility: f64,
    /// Minimum `p10 / mean` ratio before the margin rule fires
    pub margin_protection: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_loss_prob: DEFAULT_CRITICAL_LOSS_PROB,
            high_volatility: DEFAULT_HIGH_VOLATILITY,
            margin_protection: DEFAULT_MARGIN_PROTECTION,
        }
    }
}

impl RiskThresholds {
    /// Reads `thresholds.*`, keeping defaults for absent keys.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::InvalidThreshold` for a present but
    /// non-numeric or non-finite value.
    pub fn from_resolver(resolver: &ConfigResolver) -> Result<Self, TriggerError> {
        let read = |name: &'static str, default: f64| -> Result<f64, TriggerError> {
            match resolver.get(&format!("thresholds.{}", name)) {
                None | Some(ConfigValue::Null) => Ok(default),
                Some(value) => value
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or(TriggerError::InvalidThreshold { name }),
            }
        };

        Ok(Self {
            critical_loss_prob: read("critical_loss_prob", DEFAULT_CRITICAL_LOSS_PROB)?,
            high_volatility: read("high_volatility", DEFAULT_HIGH_VOLATILITY)?,
            margin_protection: read("margin_protection", DEFAULT_MARGIN_PROTECTION)?,
        })
    }
}
