//! Business outcome models.
//!
//! A model is a pure function of one sampled row and the static
//! `business_parameters` subtree. Models are registered under an identifier
//! and selected by `business_model.template`; all randomness comes from the
//! sampler, never from the model.
//!
//! ## Built-in Models
//!
//! | Id | Outcome |
//! |----|---------|
//! | `unit_margin` | `volume × (price − Σ recipeᵢ × ingredientᵢ) − fixed_monthly_cost` |
//! | `volume_margin` | `volume × (price − unit_cost) − fixed_monthly_cost` |

mod builtin;
mod error;
mod inputs;
mod registry;

pub use builtin::{unit_margin, volume_margin};
pub use error::ModelError;
pub use inputs::{BusinessParameters, SampleRow};
pub use registry::{BusinessModel, ModelFn, ModelRegistry};
