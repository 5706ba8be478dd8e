//! Error types for distribution resolution.

use scenario_core::config::ConfigError;
use thiserror::Error;

/// Distribution resolution error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// Declared kind cannot be estimated from history
    #[error("Unsupported distribution '{kind}' for variable '{variable}'")]
    UnsupportedDistribution {
        /// Variable name
        variable: String,
        /// Declared kind
        kind: String,
    },

    /// No usable history and the kind has no fallback heuristic
    #[error("No fallback available for distribution '{kind}' of variable '{variable}'")]
    NoFallbackAvailable {
        /// Variable name
        variable: String,
        /// Declared kind
        kind: String,
    },

    /// Resolved parameters violate the kind's constraints
    #[error("Invalid parameters for variable '{variable}': {reason}")]
    InvalidParameters {
        /// Variable name
        variable: String,
        /// Violated constraint
        reason: String,
    },

    /// The spec could not be located or is malformed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DistributionError {
    /// Create an invalid-parameters error
    pub fn invalid(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            variable: variable.into(),
            reason: reason.into(),
        }
    }
}
