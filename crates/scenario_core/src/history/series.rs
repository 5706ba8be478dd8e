//! Observation series types.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A single dated observation. `None` marks a gap in the feed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    /// Observation date
    pub date: NaiveDate,
    /// Observed value, `None` when missing
    pub value: Option<f64>,
}

impl Observation {
    /// Create an observation with a value.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value: Some(value),
        }
    }

    /// Create a gap observation.
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, value: None }
    }
}

/// Ordered observations for one variable, ascending by date.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use scenario_core::history::{HistoricalSeries, Observation};
///
/// let d = |m| NaiveDate::from_ymd_opt(2024, m, 15).unwrap();
/// let series = HistoricalSeries::new(
///     "flour_price",
///     vec![
///         Observation::new(d(2), 19.2),
///         Observation::missing(d(3)),
///         Observation::new(d(1), 18.5),
///     ],
/// );
///
/// assert_eq!(series.observations()[0].date, d(1));
/// assert_eq!(series.values(), vec![18.5, 19.2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalSeries {
    variable: String,
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    /// Create a series; observations are sorted ascending by date.
    pub fn new(variable: impl Into<String>, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|obs| obs.date);
        Self {
            variable: variable.into(),
            observations,
        }
    }

    /// Variable this series maps to.
    #[inline]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// All observations including gaps.
    #[inline]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Observed values with gaps and non-finite entries dropped.
    pub fn values(&self) -> Vec<f64> {
        self.observations
            .iter()
            .filter_map(|obs| obs.value)
            .filter(|v| v.is_finite())
            .collect()
    }

    /// Number of usable values after gap removal.
    pub fn usable_len(&self) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.value.is_some_and(f64::is_finite))
            .count()
    }

    /// First and last observation dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some((first.date, last.date))
    }
}

/// Historical series keyed by variable name.
///
/// Built once during setup and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoricalData {
    series: BTreeMap<String, HistoricalSeries>,
}

impl HistoricalData {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series, replacing any earlier series for the same variable.
    pub fn insert(&mut self, series: HistoricalSeries) -> Option<HistoricalSeries> {
        self.series.insert(series.variable().to_string(), series)
    }

    /// Get the series for a variable.
    pub fn get(&self, variable: &str) -> Option<&HistoricalSeries> {
        self.series.get(variable)
    }

    /// Usable values for a variable, `None` when there is no series or no
    /// value survives gap removal.
    pub fn values_for(&self, variable: &str) -> Option<Vec<f64>> {
        let values = self.get(variable)?.values();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// Number of variables with a series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if no series are loaded.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Iterate over all series.
    pub fn iter(&self) -> impl Iterator<Item = &HistoricalSeries> {
        self.series.values()
    }
}

impl FromIterator<HistoricalSeries> for HistoricalData {
    fn from_iter<I: IntoIterator<Item = HistoricalSeries>>(iter: I) -> Self {
        let mut data = Self::new();
        for series in iter {
            data.insert(series);
        }
        data
    }
}
