//! Empirical and heuristic parameter estimation.

use super::error::DistributionError;
use super::spec::{DistributionKind, DistributionParams, ParamSource, VariableSpec};
use scenario_core::config::{ConfigError, ConfigResolver, ConfigValue, Mapping};
use scenario_core::history::HistoricalData;

/// Anchor used when `current_prices.<variable>` is not configured.
pub const DEFAULT_CURRENT_VALUE: f64 = 100.0;

/// Fallback normal std as a fraction of the anchor.
pub const DEFAULT_STD_FRACTION: f64 = 0.1;

/// Fallback triangular lower offset.
pub const DEFAULT_MIN_PCT: f64 = -0.10;

/// Fallback triangular mode offset.
pub const DEFAULT_MODE_PCT: f64 = 0.0;

/// Fallback triangular upper offset.
pub const DEFAULT_MAX_PCT: f64 = 0.15;

/// Estimates parameters from observed values.
///
/// `values` must already be free of gaps. Normal uses the sample mean and
/// the `n - 1` standard deviation, triangular uses the median as the mode.
///
/// # Errors
///
/// - `UnsupportedDistribution` for kinds other than normal, triangular and uniform
/// - `InvalidParameters` when `values` is empty
pub fn historical_params(
    variable: &str,
    kind: &str,
    values: &[f64],
) -> Result<DistributionParams, DistributionError> {
    let parsed = DistributionKind::parse(kind).ok_or_else(|| {
        DistributionError::UnsupportedDistribution {
            variable: variable.to_string(),
            kind: kind.to_string(),
        }
    })?;
    if values.is_empty() {
        return Err(DistributionError::invalid(variable, "no observations"));
    }

    let params = match parsed {
        DistributionKind::Normal => DistributionParams::Normal {
            mean: mean(values),
            std: sample_std(values),
        },
        DistributionKind::Triangular => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            DistributionParams::Triangular {
                min: sorted[0],
                mode: median_of_sorted(&sorted),
                max: sorted[sorted.len() - 1],
            }
        }
        DistributionKind::Uniform => {
            let (min, max) = values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            DistributionParams::Uniform { min, max }
        }
    };
    Ok(params)
}

/// Builds heuristic parameters anchored on `current`.
///
/// Recognised `fallback` keys: `mean` and `std` for normal, `min_pct`,
/// `mode_pct` and `max_pct` for triangular. Missing keys take the
/// `DEFAULT_*` constants of this module.
///
/// # Errors
///
/// Returns `NoFallbackAvailable` for uniform and unknown kinds.
pub fn fallback_params(
    variable: &str,
    kind: &str,
    fallback: Option<&Mapping>,
    current: f64,
) -> Result<DistributionParams, DistributionError> {
    let setting = |key: &str| {
        fallback
            .and_then(|m| m.get(key))
            .and_then(ConfigValue::as_f64)
    };

    match DistributionKind::parse(kind) {
        Some(DistributionKind::Normal) => Ok(DistributionParams::Normal {
            mean: setting("mean").unwrap_or(current),
            std: setting("std").unwrap_or((current * DEFAULT_STD_FRACTION).abs()),
        }),
        Some(DistributionKind::Triangular) => Ok(DistributionParams::Triangular {
            min: current * (1.0 + setting("min_pct").unwrap_or(DEFAULT_MIN_PCT)),
            mode: current * (1.0 + setting("mode_pct").unwrap_or(DEFAULT_MODE_PCT)),
            max: current * (1.0 + setting("max_pct").unwrap_or(DEFAULT_MAX_PCT)),
        }),
        _ => Err(DistributionError::NoFallbackAvailable {
            variable: variable.to_string(),
            kind: kind.to_string(),
        }),
    }
}

/// Resolves declared variables into [`VariableSpec`]s.
///
/// A variable with at least one usable historical value is estimated
/// empirically; anything else degrades to the fallback heuristic. Missing
/// history is never an error.
pub struct DistributionResolver<'a> {
    config: &'a ConfigResolver,
    history: &'a HistoricalData,
}

impl<'a> DistributionResolver<'a> {
    /// Create a resolver over a merged configuration and loaded history.
    pub fn new(config: &'a ConfigResolver, history: &'a HistoricalData) -> Self {
        Self { config, history }
    }

    /// Resolve one variable.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::Config` when no spec is configured or its
    /// `type` is missing, plus the errors of [`historical_params`],
    /// [`fallback_params`] and [`VariableSpec::new`].
    pub fn resolve(&self, variable: &str) -> Result<VariableSpec, DistributionError> {
        let entry = self.config.resolve_distribution(variable)?;
        let kind = entry
            .spec
            .get("type")
            .and_then(ConfigValue::as_str)
            .ok_or_else(|| {
                ConfigError::invalid_value(
                    format!("{}.type", variable),
                    "a distribution name",
                )
            })?;

        match self.history.values_for(variable) {
            Some(values) => {
                let params = historical_params(variable, kind, &values)?;
                tracing::debug!(
                    variable,
                    kind,
                    origin = entry.origin.name(),
                    observations = values.len(),
                    "Distribution estimated from history"
                );
                VariableSpec::new(
                    variable,
                    params,
                    ParamSource::Historical {
                        observations: values.len(),
                    },
                )
            }
            None => {
                let anchor = self
                    .config
                    .current_value(variable)
                    .unwrap_or(DEFAULT_CURRENT_VALUE);
                let fallback = entry.spec.get("fallback").and_then(ConfigValue::as_mapping);
                let params = fallback_params(variable, kind, fallback, anchor)?;
                tracing::debug!(
                    variable,
                    kind,
                    origin = entry.origin.name(),
                    anchor,
                    "Distribution taken from fallback"
                );
                VariableSpec::new(variable, params, ParamSource::Fallback { anchor })
            }
        }
    }

    /// Resolve every declared variable, in declaration order.
    ///
    /// # Errors
    ///
    /// Stops at the first variable that cannot be resolved.
    pub fn resolve_all(&self) -> Result<Vec<VariableSpec>, DistributionError> {
        let specs = self
            .config
            .variables()
            .iter()
            .map(|decl| self.resolve(&decl.name))
            .collect::<Result<Vec<_>, _>>()?;

        let historical = specs.iter().filter(|s| s.is_historical()).count();
        tracing::info!(
            variables = specs.len(),
            historical,
            fallback = specs.len() - historical,
            "Distributions resolved"
        );
        Ok(specs)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}
