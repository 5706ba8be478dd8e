//! Error types for business model lookup and evaluation.

use thiserror::Error;

/// Business model error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// No model is registered under the requested identifier
    #[error("Business model not found: {0}")]
    ModelNotFound(String),

    /// A sampled variable the model needs is absent from the row
    #[error("Missing sampled variable: {0}")]
    MissingVariable(String),

    /// A business parameter the model needs is not configured
    #[error("Missing business parameter: {0}")]
    MissingParameter(String),

    /// A business parameter has the wrong shape
    #[error("Invalid business parameter '{path}': {reason}")]
    InvalidParameter {
        /// Dotted parameter path
        path: String,
        /// What was wrong
        reason: String,
    },

    /// The model produced NaN or an infinity
    #[error("Model '{model}' produced a non-finite outcome ({value})")]
    NonFiniteOutcome {
        /// Model identifier
        model: String,
        /// Offending value
        value: f64,
    },
}

impl ModelError {
    /// Create an invalid-parameter error
    pub fn invalid_parameter(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
