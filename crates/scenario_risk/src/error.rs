//! Top-level error type of the risk pipeline.

use crate::triggers::TriggerError;
use scenario_core::config::ConfigError;
use scenario_engine::{EngineError, RunStateError, SimulationConfigError};
use scenario_models::business::ModelError;
use scenario_models::distribution::DistributionError;
use thiserror::Error;

/// Any failure of setup, run or evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Configuration missing, malformed or incomplete
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A variable could not be given a distribution
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// Model selection or evaluation failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Invalid simulation settings
    #[error("Simulation settings error: {0}")]
    SimulationConfig(#[from] SimulationConfigError),

    /// The run failed
    #[error("Simulation error: {0}")]
    Engine(#[from] EngineError),

    /// A derived view was requested before a run completed
    #[error("Run state error: {0}")]
    RunState(#[from] RunStateError),

    /// Trigger evaluation failed
    #[error("Trigger error: {0}")]
    Trigger(#[from] TriggerError),
}
