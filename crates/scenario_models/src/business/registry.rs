//! Identifier-to-function model registry.

use super::builtin::{unit_margin, volume_margin};
use super::error::ModelError;
use super::inputs::{BusinessParameters, SampleRow};
use std::collections::HashMap;

/// Signature every business model implements.
///
/// Implementations must be pure: same row and parameters, same outcome.
pub type ModelFn = fn(&SampleRow<'_>, &BusinessParameters) -> Result<f64, ModelError>;

/// A model selected from the registry.
#[derive(Clone, Debug)]
pub struct BusinessModel {
    id: String,
    func: ModelFn,
}

impl BusinessModel {
    /// Wrap a function under an identifier.
    pub fn new(id: impl Into<String>, func: ModelFn) -> Self {
        Self {
            id: id.into(),
            func,
        }
    }

    /// Model identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Evaluate one row.
    ///
    /// # Errors
    ///
    /// Propagates the model's own error, and rejects NaN or infinite
    /// outcomes with `ModelError::NonFiniteOutcome`.
    #[inline]
    pub fn evaluate(
        &self,
        row: &SampleRow<'_>,
        params: &BusinessParameters,
    ) -> Result<f64, ModelError> {
        let value = (self.func)(row, params)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ModelError::NonFiniteOutcome {
                model: self.id.clone(),
                value,
            })
        }
    }
}

/// Registry of named business models.
///
/// `ModelRegistry::default()` contains the built-in models; `new()` is empty.
///
/// # Examples
///
/// ```rust
/// use scenario_models::business::{BusinessParameters, ModelError, ModelRegistry, SampleRow};
///
/// fn revenue(row: &SampleRow<'_>, params: &BusinessParameters) -> Result<f64, ModelError> {
///     Ok(row.require("volume")? * params.require("price")?)
/// }
///
/// let mut registry = ModelRegistry::default();
/// registry.register("revenue", revenue);
///
/// assert!(registry.contains("revenue"));
/// assert!(registry.contains("unit_margin"));
/// assert!(matches!(registry.get("missing"), Err(ModelError::ModelNotFound(_))));
/// ```
#[derive(Clone, Debug)]
pub struct ModelRegistry {
    models: HashMap<String, ModelFn>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Register a model, returning the function it replaced.
    pub fn register(&mut self, id: impl Into<String>, func: ModelFn) -> Option<ModelFn> {
        self.models.insert(id.into(), func)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_model(mut self, id: impl Into<String>, func: ModelFn) -> Self {
        self.register(id, func);
        self
    }

    /// Check if a model is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    /// Select a model by identifier.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ModelNotFound` for unknown identifiers.
    pub fn get(&self, id: &str) -> Result<BusinessModel, ModelError> {
        self.models
            .get(id)
            .map(|func| BusinessModel::new(id, *func))
            .ok_or_else(|| ModelError::ModelNotFound(id.to_string()))
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.models.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
            .with_model("unit_margin", unit_margin)
            .with_model("volume_margin", volume_margin)
    }
}
