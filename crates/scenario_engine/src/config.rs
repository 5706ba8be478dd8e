//! Simulation run settings.

use super::error::SimulationConfigError;
use scenario_core::config::{ConfigResolver, ConfigValue};

/// Maximum number of simulations per run.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Simulation count used when none is configured.
pub const DEFAULT_N_SIMULATIONS: usize = 10_000;

/// Environment variable overriding `simulation.n_simulations`.
pub const ENV_N_SIMULATIONS: &str = "SCENARIO_N_SIMULATIONS";

/// Environment variable overriding `simulation.seed`.
pub const ENV_SEED: &str = "SCENARIO_SEED";

/// Validated run settings.
///
/// # Examples
///
/// ```rust
/// use scenario_engine::config::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_simulations(5_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_simulations(), 5_000);
/// assert_eq!(config.seed(), Some(42));
/// assert!(SimulationConfig::builder().n_simulations(0).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    n_simulations: usize,
    seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_simulations: DEFAULT_N_SIMULATIONS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulations.
    #[inline]
    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// Returns the seed, `None` for an entropy-seeded run.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Reads `simulation.n_simulations` and `simulation.seed`.
    ///
    /// Missing settings take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SimulationConfigError` when a setting is not a non-negative
    /// integer or the count is out of range.
    pub fn from_resolver(resolver: &ConfigResolver) -> Result<Self, SimulationConfigError> {
        let mut builder = Self::builder();

        if let Some(value) = present(resolver.get("simulation.n_simulations")) {
            let n = value
                .as_u64()
                .ok_or_else(|| SimulationConfigError::InvalidParameter {
                    name: "n_simulations",
                    value: "must be a positive integer".to_string(),
                })?;
            builder = builder.n_simulations(usize::try_from(n).unwrap_or(usize::MAX));
        }

        if let Some(value) = present(resolver.get("simulation.seed")) {
            let seed = value
                .as_u64()
                .ok_or_else(|| SimulationConfigError::InvalidParameter {
                    name: "seed",
                    value: "must be a non-negative integer".to_string(),
                })?;
            builder = builder.seed(seed);
        }

        builder.build()
    }

    /// Applies `SCENARIO_N_SIMULATIONS` and `SCENARIO_SEED` overrides.
    ///
    /// Unparseable values are ignored with a warning. Call [`validate`](Self::validate)
    /// afterwards.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_N_SIMULATIONS).ok().as_deref(),
            std::env::var(ENV_SEED).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, n_simulations: Option<&str>, seed: Option<&str>) -> Self {
        if let Some(raw) = n_simulations {
            match raw.trim().parse() {
                Ok(n) => self.n_simulations = n,
                Err(_) => tracing::warn!(var = ENV_N_SIMULATIONS, value = raw, "Ignoring override"),
            }
        }

        if let Some(raw) = seed {
            match raw.trim().parse() {
                Ok(s) => self.seed = Some(s),
                Err(_) => tracing::warn!(var = ENV_SEED, value = raw, "Ignoring override"),
            }
        }

        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationConfigError::InvalidSimulationCount` if
    /// `n_simulations` is 0 or greater than 10,000,000.
    pub fn validate(&self) -> Result<(), SimulationConfigError> {
        if self.n_simulations == 0 || self.n_simulations > MAX_SIMULATIONS {
            return Err(SimulationConfigError::InvalidSimulationCount(
                self.n_simulations,
            ));
        }
        Ok(())
    }
}

fn present(value: Option<&ConfigValue>) -> Option<&ConfigValue> {
    value.filter(|v| !matches!(v, ConfigValue::Null))
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_simulations: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulations, in [1, 10_000_000].
    #[inline]
    pub fn n_simulations(mut self, n_simulations: usize) -> Self {
        self.n_simulations = Some(n_simulations);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationConfigError` if `n_simulations` is out of range.
    pub fn build(self) -> Result<SimulationConfig, SimulationConfigError> {
        let config = SimulationConfig {
            n_simulations: self.n_simulations.unwrap_or(DEFAULT_N_SIMULATIONS),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
