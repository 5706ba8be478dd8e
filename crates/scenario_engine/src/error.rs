//! Error types for the scenario engine.

use scenario_models::business::ModelError;
use thiserror::Error;

/// Simulation settings error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationConfigError {
    /// Simulation count outside `[1, MAX_SIMULATIONS]`
    #[error("Invalid simulation count {0}: must be in range [1, 10_000_000]")]
    InvalidSimulationCount(usize),

    /// A configured setting has the wrong type or value
    #[error("Invalid simulation parameter '{name}': {value}")]
    InvalidParameter {
        /// Setting name
        name: &'static str,
        /// What was wrong
        value: String,
    },
}

/// Error raised while setting up or executing a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Invalid simulation settings
    #[error(transparent)]
    Config(#[from] SimulationConfigError),

    /// Two specs share a variable name
    #[error("Duplicate variable: {0}")]
    DuplicateVariable(String),

    /// Parameters rejected by the sampler
    #[error("Cannot sample variable '{variable}': {reason}")]
    Sampler {
        /// Variable name
        variable: String,
        /// Sampler error message
        reason: String,
    },

    /// A model evaluation failed; the whole run is discarded
    #[error("Model evaluation failed at simulation {index}: {source}")]
    Model {
        /// Simulation index of the first failing row
        index: usize,
        /// Underlying model error
        #[source]
        source: ModelError,
    },
}

/// A derived view was requested without a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunStateError {
    /// No run has completed yet
    #[error("No completed simulation run")]
    NoCompletedRun,

    /// The outcome vector is empty
    #[error("Outcome vector is empty")]
    EmptyOutcomes,
}
