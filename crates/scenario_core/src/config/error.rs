//! Error types for configuration loading and resolution.

use thiserror::Error;

/// Configuration error type.
///
/// Setup problems surface through this type before any sampling happens.
/// [`ConfigError::Validation`] carries every problem found, not only the first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading a configuration document
    #[error("IO error reading {path}: {message}")]
    Io {
        /// Path of the document
        path: String,
        /// Underlying error description
        message: String,
    },

    /// Syntax or shape error in a configuration document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Document extension is neither TOML nor JSON
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Completeness validation failed
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Neither a client override nor a template default exists for a variable
    #[error("No distribution configured for variable '{0}'")]
    DistributionNotFound(String),

    /// A value exists at a path but has the wrong shape
    #[error("Invalid value at '{path}': expected {expected}")]
    InvalidValue {
        /// Dotted path of the offending value
        path: String,
        /// Description of the expected shape
        expected: &'static str,
    },
}

impl ConfigError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid-value error
    pub fn invalid_value(path: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            path: path.into(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = err.to_string();
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }

    #[test]
    fn test_distribution_not_found_display() {
        let err = ConfigError::DistributionNotFound("flour_price".to_string());
        assert!(err.to_string().contains("flour_price"));
    }
}
