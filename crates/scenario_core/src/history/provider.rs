//! Historical data provider trait and the in-memory provider.

use super::error::HistoryError;
use super::series::{HistoricalSeries, Observation};
use crate::config::{ConfigValue, Mapping};
use std::collections::HashMap;

/// Source of historical observation series.
///
/// Implementations read one `data_sources` entry and return a series per
/// variable named in that entry's mapping. Whether the medium is a
/// spreadsheet, a relational store or anything else is opaque to the core.
pub trait HistoricalDataProvider: Send + Sync {
    /// The `type` value of the `data_sources` entries this provider handles.
    fn source_type(&self) -> &str;

    /// Loads the series described by one source entry.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` when the entry is malformed or the medium
    /// cannot be read.
    fn load(&self, source: &Mapping) -> Result<Vec<HistoricalSeries>, HistoryError>;
}

/// Provider backed by series held in memory.
///
/// Handles entries of type `"memory"` of the form:
///
/// ```toml
/// [[data_sources]]
/// type = "memory"
/// series = [{ key = "flour_monthly", maps_to_variable = "flour_price" }]
/// ```
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use scenario_core::config::parse_toml_str;
/// use scenario_core::history::{HistoricalDataProvider, InMemoryProvider, Observation};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let provider = InMemoryProvider::new()
///     .with_series("flour_monthly", vec![Observation::new(date, 18.5)]);
///
/// let source = parse_toml_str(r#"
///     type = "memory"
///     series = [{ key = "flour_monthly", maps_to_variable = "flour_price" }]
/// "#).unwrap();
///
/// let series = provider.load(&source).unwrap();
/// assert_eq!(series[0].variable(), "flour_price");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryProvider {
    datasets: HashMap<String, Vec<Observation>>,
}

impl InMemoryProvider {
    /// Source type handled by this provider.
    pub const SOURCE_TYPE: &'static str = "memory";

    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyed dataset.
    pub fn with_series(mut self, key: impl Into<String>, observations: Vec<Observation>) -> Self {
        self.insert(key, observations);
        self
    }

    /// Add or replace a keyed dataset.
    pub fn insert(&mut self, key: impl Into<String>, observations: Vec<Observation>) {
        self.datasets.insert(key.into(), observations);
    }
}

impl HistoricalDataProvider for InMemoryProvider {
    fn source_type(&self) -> &str {
        Self::SOURCE_TYPE
    }

    fn load(&self, source: &Mapping) -> Result<Vec<HistoricalSeries>, HistoryError> {
        let mappings = source
            .get("series")
            .and_then(ConfigValue::as_sequence)
            .ok_or_else(|| HistoryError::InvalidSource("missing 'series' list".to_string()))?;

        let mut loaded = Vec::with_capacity(mappings.len());
        for entry in mappings {
            let key = entry.lookup("key").and_then(ConfigValue::as_str);
            let variable = entry.lookup("maps_to_variable").and_then(ConfigValue::as_str);
            let (Some(key), Some(variable)) = (key, variable) else {
                return Err(HistoryError::InvalidSource(
                    "series entries need 'key' and 'maps_to_variable'".to_string(),
                ));
            };

            match self.datasets.get(key) {
                Some(observations) => {
                    loaded.push(HistoricalSeries::new(variable, observations.clone()));
                }
                None => {
                    tracing::warn!(key, variable, "Series not found in memory source, skipping");
                }
            }
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml_str;
    use chrono::NaiveDate;

    fn provider() -> InMemoryProvider {
        let d = |m| NaiveDate::from_ymd_opt(2024, m, 15).unwrap();
        InMemoryProvider::new().with_series(
            "flour",
            vec![Observation::new(d(2), 19.2), Observation::new(d(1), 18.5)],
        )
    }

    #[test]
    fn test_load_maps_key_to_variable() {
        let source = parse_toml_str(
            r#"
            type = "memory"
            series = [
                { key = "flour", maps_to_variable = "flour_price" },
                { key = "unknown", maps_to_variable = "sugar_price" },
            ]
            "#,
        )
        .unwrap();

        let series = provider().load(&source).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].variable(), "flour_price");
        assert_eq!(series[0].values(), vec![18.5, 19.2]);
    }

    #[test]
    fn test_missing_series_list_is_invalid() {
        let source = parse_toml_str("type = \"memory\"\n").unwrap();
        assert!(matches!(
            provider().load(&source),
            Err(HistoryError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_incomplete_entry_is_invalid() {
        let source = parse_toml_str(
            r#"
            type = "memory"
            series = [{ key = "flour" }]
            "#,
        )
        .unwrap();
        assert!(matches!(
            provider().load(&source),
            Err(HistoryError::InvalidSource(_))
        ));
    }
}
