//! Error types for trigger evaluation.

use thiserror::Error;

/// Trigger evaluation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriggerError {
    /// Required statistics are absent or not finite
    #[error("Incomplete statistics, missing: {}", .missing.join(", "))]
    IncompleteStatistics {
        /// Keys that could not be read
        missing: Vec<String>,
    },

    /// A configured threshold is not a finite number
    #[error("Invalid threshold 'thresholds.{name}': expected a finite number")]
    InvalidThreshold {
        /// Threshold name
        name: &'static str,
    },
}
