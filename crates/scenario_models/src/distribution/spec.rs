//! Resolved variable specifications.

use super::error::DistributionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported distribution families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Gaussian with mean and standard deviation
    Normal,
    /// Triangular with minimum, mode and maximum
    Triangular,
    /// Uniform over a closed interval
    Uniform,
}

impl DistributionKind {
    /// Parse a configured `type` value; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "triangular" => Some(Self::Triangular),
            "uniform" => Some(Self::Uniform),
            _ => None,
        }
    }

    /// Get the configuration name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Triangular => "triangular",
            Self::Uniform => "uniform",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete numeric parameters of a distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DistributionParams {
    /// Normal(mean, std)
    Normal {
        /// Mean
        mean: f64,
        /// Standard deviation, non-negative
        std: f64,
    },
    /// Triangular(min, mode, max)
    Triangular {
        /// Lower bound
        min: f64,
        /// Most likely value
        mode: f64,
        /// Upper bound
        max: f64,
    },
    /// Uniform(min, max)
    Uniform {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

impl DistributionParams {
    /// Distribution family of these parameters.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Normal { .. } => DistributionKind::Normal,
            Self::Triangular { .. } => DistributionKind::Triangular,
            Self::Uniform { .. } => DistributionKind::Uniform,
        }
    }

    /// Theoretical mean of the distribution.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Normal { mean, .. } => mean,
            Self::Triangular { min, mode, max } => (min + mode + max) / 3.0,
            Self::Uniform { min, max } => 0.5 * (min + max),
        }
    }

    fn check(&self) -> Result<(), String> {
        let values: &[f64] = match self {
            Self::Normal { mean, std } => &[*mean, *std],
            Self::Triangular { min, mode, max } => &[*min, *mode, *max],
            Self::Uniform { min, max } => &[*min, *max],
        };
        if values.iter().any(|v| !v.is_finite()) {
            return Err(format!("parameters must be finite, got {:?}", self));
        }

        match *self {
            Self::Normal { std, .. } if std < 0.0 => {
                Err(format!("std must be non-negative, got {}", std))
            }
            Self::Triangular { min, mode, max } if !(min <= mode && mode <= max) => Err(format!(
                "triangular requires min <= mode <= max, got ({}, {}, {})",
                min, mode, max
            )),
            Self::Uniform { min, max } if min > max => Err(format!(
                "uniform requires min <= max, got ({}, {})",
                min, max
            )),
            _ => Ok(()),
        }
    }
}

/// How a variable's parameters were obtained.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ParamSource {
    /// Estimated from historical observations
    Historical {
        /// Number of usable observations
        observations: usize,
    },
    /// Heuristic anchored on a current value
    Fallback {
        /// Current value the heuristic was anchored on
        anchor: f64,
    },
}

/// A variable with validated distribution parameters.
///
/// # Examples
///
/// ```rust
/// use scenario_models::distribution::{DistributionParams, ParamSource, VariableSpec};
///
/// let spec = VariableSpec::new(
///     "sugar_price",
///     DistributionParams::Triangular { min: 22.0, mode: 24.0, max: 27.0 },
///     ParamSource::Fallback { anchor: 24.0 },
/// ).unwrap();
/// assert_eq!(spec.name(), "sugar_price");
///
/// let invalid = VariableSpec::new(
///     "sugar_price",
///     DistributionParams::Triangular { min: 22.0, mode: 30.0, max: 27.0 },
///     ParamSource::Fallback { anchor: 24.0 },
/// );
/// assert!(invalid.is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    name: String,
    params: DistributionParams,
    source: ParamSource,
}

impl VariableSpec {
    /// Create a spec, checking that the parameters match their kind.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidParameters` for non-finite values,
    /// a negative std, `min > max`, or a triangular mode outside `[min, max]`.
    pub fn new(
        name: impl Into<String>,
        params: DistributionParams,
        source: ParamSource,
    ) -> Result<Self, DistributionError> {
        let name = name.into();
        params
            .check()
            .map_err(|reason| DistributionError::invalid(&name, reason))?;
        Ok(Self {
            name,
            params,
            source,
        })
    }

    /// Variable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distribution parameters.
    #[inline]
    pub fn params(&self) -> &DistributionParams {
        &self.params
    }

    /// Distribution family.
    #[inline]
    pub fn kind(&self) -> DistributionKind {
        self.params.kind()
    }

    /// Where the parameters came from.
    #[inline]
    pub fn source(&self) -> &ParamSource {
        &self.source
    }

    /// Check if the parameters were estimated from history.
    pub fn is_historical(&self) -> bool {
        matches!(self.source, ParamSource::Historical { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: ParamSource = ParamSource::Fallback { anchor: 100.0 };

    #[test]
    fn test_kind_parse() {
        assert_eq!(DistributionKind::parse("normal"), Some(DistributionKind::Normal));
        assert_eq!(DistributionKind::parse(" Triangular "), Some(DistributionKind::Triangular));
        assert_eq!(DistributionKind::parse("uniform"), Some(DistributionKind::Uniform));
        assert_eq!(DistributionKind::parse("lognormal"), None);
    }

    #[test]
    fn test_degenerate_parameters_are_valid() {
        assert!(VariableSpec::new("x", DistributionParams::Normal { mean: 5.0, std: 0.0 }, FALLBACK).is_ok());
        assert!(VariableSpec::new(
            "x",
            DistributionParams::Triangular { min: 1.0, mode: 1.0, max: 1.0 },
            FALLBACK
        )
        .is_ok());
        assert!(VariableSpec::new("x", DistributionParams::Uniform { min: 2.0, max: 2.0 }, FALLBACK).is_ok());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let cases = [
            DistributionParams::Normal { mean: 1.0, std: -1.0 },
            DistributionParams::Normal { mean: f64::NAN, std: 1.0 },
            DistributionParams::Triangular { min: 0.0, mode: -1.0, max: 1.0 },
            DistributionParams::Triangular { min: 2.0, mode: 1.5, max: 1.0 },
            DistributionParams::Uniform { min: 3.0, max: 1.0 },
            DistributionParams::Uniform { min: 0.0, max: f64::INFINITY },
        ];
        for params in cases {
            let result = VariableSpec::new("x", params, FALLBACK);
            assert!(
                matches!(result, Err(DistributionError::InvalidParameters { .. })),
                "expected rejection for {:?}",
                params
            );
        }
    }

    #[test]
    fn test_theoretical_mean() {
        let tri = DistributionParams::Triangular { min: 0.0, mode: 3.0, max: 6.0 };
        assert_eq!(tri.mean(), 3.0);
        let uni = DistributionParams::Uniform { min: 2.0, max: 4.0 };
        assert_eq!(uni.mean(), 3.0);
    }
}
