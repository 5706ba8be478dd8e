//! Historical observation series and the provider seam.
//!
//! Concrete readers (spreadsheets, relational stores, feeds) live outside
//! this crate. They only need to implement [`HistoricalDataProvider`] and
//! hand back ordered `(date, value)` series per variable.
//!
//! ## Degradation Policy
//!
//! [`HistoryLoader`] never fails a setup: an unknown source type, a provider
//! error or a series that is empty after gap removal is logged with
//! `tracing::warn!` and the affected variables fall back to heuristic
//! distributions downstream.

mod error;
mod loader;
mod provider;
mod series;

pub use error::HistoryError;
pub use loader::HistoryLoader;
pub use provider::{HistoricalDataProvider, InMemoryProvider};
pub use series::{HistoricalData, HistoricalSeries, Observation};
