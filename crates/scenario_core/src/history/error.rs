//! Error types for historical data providers.

use thiserror::Error;

/// Failure reported by a historical data provider.
///
/// These never abort a setup; [`HistoryLoader`](super::HistoryLoader) logs
/// them and continues without the affected source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Source entry is missing a required key or has the wrong shape
    #[error("Invalid data source: {0}")]
    InvalidSource(String),

    /// The provider could not reach or read its medium
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    /// A referenced series does not exist in the source
    #[error("Series '{0}' not found")]
    SeriesNotFound(String),
}
