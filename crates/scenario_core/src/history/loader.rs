//! Dispatch of `data_sources` entries to registered providers.

use super::provider::HistoricalDataProvider;
use super::series::HistoricalData;
use crate::config::{ConfigResolver, ConfigValue};

/// Walks the configured `data_sources` and collects their series.
///
/// Loading never fails: an entry with an unknown `type`, a provider error,
/// or a series with no usable values is logged and skipped so the affected
/// variables fall back to heuristic distributions.
///
/// # Examples
///
/// ```rust
/// use scenario_core::config::{parse_toml_str, ConfigResolver};
/// use scenario_core::history::{HistoryLoader, InMemoryProvider};
///
/// let client = parse_toml_str(r#"
///     [[data_sources]]
///     type = "warehouse"
/// "#).unwrap();
/// let resolver = ConfigResolver::new(Default::default(), client);
///
/// let loader = HistoryLoader::new().with_provider(InMemoryProvider::new());
/// let data = loader.load(&resolver);
/// assert!(data.is_empty());
/// ```
#[derive(Default)]
pub struct HistoryLoader {
    providers: Vec<Box<dyn HistoricalDataProvider>>,
}

impl HistoryLoader {
    /// Create a loader with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    pub fn with_provider(mut self, provider: impl HistoricalDataProvider + 'static) -> Self {
        self.register(Box::new(provider));
        self
    }

    /// Register a boxed provider. Later registrations win for the same type.
    pub fn register(&mut self, provider: Box<dyn HistoricalDataProvider>) {
        self.providers.push(provider);
    }

    fn provider_for(&self, source_type: &str) -> Option<&dyn HistoricalDataProvider> {
        self.providers
            .iter()
            .rev()
            .find(|p| p.source_type() == source_type)
            .map(|p| &**p)
    }

    /// Loads every configured source.
    pub fn load(&self, resolver: &ConfigResolver) -> HistoricalData {
        let mut data = HistoricalData::new();
        let sources = resolver.data_sources();

        if sources.is_empty() {
            tracing::warn!("No data_sources configured, distributions will use current values");
            return data;
        }

        for (position, source) in sources.iter().enumerate() {
            let Some(entry) = source.as_mapping() else {
                tracing::warn!(position, "data_sources entry is not a mapping, skipping");
                continue;
            };
            let source_type = entry
                .get("type")
                .and_then(ConfigValue::as_str)
                .unwrap_or_default();

            let Some(provider) = self.provider_for(source_type) else {
                tracing::warn!(position, source_type, "Unsupported data source type, skipping");
                continue;
            };

            match provider.load(entry) {
                Ok(series_list) => {
                    for series in series_list {
                        if series.usable_len() == 0 {
                            tracing::warn!(
                                variable = series.variable(),
                                "Series has no usable observations, skipping"
                            );
                            continue;
                        }
                        tracing::info!(
                            variable = series.variable(),
                            observations = series.usable_len(),
                            "Historical series loaded"
                        );
                        data.insert(series);
                    }
                }
                Err(e) => {
                    tracing::warn!(position, source_type, error = %e, "Data source failed, continuing without it");
                }
            }
        }

        data
    }
}
