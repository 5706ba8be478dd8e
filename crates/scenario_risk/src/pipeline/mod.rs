//! End-to-end risk pipeline.
//!
//! Setup validates the merged configuration, loads history, resolves every
//! variable and selects the model before any sampling happens. Runs replace
//! the latest [`SimulationRun`]; statistics, sensitivity and triggers are
//! read-only views over it.
//!
//! ## Workflow
//!
//! ```text
//! setup ──▶ run / run_with ──▶ statistics ──▶ evaluate_triggers
//!                         └──▶ sensitivity
//! ```

mod report;

pub use report::RiskReport;

use crate::error::RiskError;
use crate::triggers::{RiskThresholds, Trigger, TriggerEvaluator};
use scenario_core::config::{ConfigError, ConfigResolver};
use scenario_core::history::{HistoricalData, HistoryLoader};
use scenario_engine::{
    RunStateError, SensitivityAnalyzer, SensitivityReport, SimulationConfig, SimulationEngine,
    SimulationRun, StatisticsCalculator, StatisticsSummary,
};
use scenario_models::business::{BusinessParameters, ModelRegistry};
use scenario_models::distribution::{DistributionResolver, VariableSpec};
use std::path::Path;

/// Configured pipeline holding the latest run.
///
/// # Examples
///
/// ```rust
/// use scenario_core::config::{parse_toml_str, ConfigResolver};
/// use scenario_core::history::HistoryLoader;
/// use scenario_models::business::ModelRegistry;
/// use scenario_risk::pipeline::RiskPipeline;
///
/// let template = parse_toml_str(r#"
///     [industry]
///     name = "retail"
///
///     [[common_variables]]
///     name = "monthly_volume"
///
///     [default_distributions.monthly_volume]
///     type = "normal"
///
///     [business_model]
///     template = "volume_margin"
///     parameters_required = ["unit_price", "unit_cost"]
///
///     [business_parameters]
///     unit_price = 12.0
///     unit_cost = 7.0
///     fixed_monthly_cost = 3000.0
///
///     [current_prices]
///     monthly_volume = 1000.0
/// "#).unwrap();
/// let client = parse_toml_str(r#"
///     [client]
///     name = "Corner Shop"
///     industry = "retail"
///
///     [simulation]
///     n_simulations = 2000
///     seed = 42
/// "#).unwrap();
///
/// let mut pipeline = RiskPipeline::setup(
///     ConfigResolver::new(template, client),
///     &HistoryLoader::new(),
///     &ModelRegistry::default(),
/// ).unwrap();
/// assert!(pipeline.statistics().is_err());
///
/// pipeline.run().unwrap();
/// let stats = pipeline.statistics().unwrap();
/// assert!(stats.mean > 1500.0 && stats.mean < 2500.0);
/// ```
pub struct RiskPipeline {
    config: ConfigResolver,
    history: HistoricalData,
    engine: SimulationEngine,
    simulation: SimulationConfig,
    evaluator: TriggerEvaluator,
    latest: Option<SimulationRun>,
}

impl RiskPipeline {
    /// Validates and prepares everything a run needs.
    ///
    /// Simulation settings come from `simulation.*` and may be overridden by
    /// `SCENARIO_N_SIMULATIONS` / `SCENARIO_SEED`.
    ///
    /// # Errors
    ///
    /// - `RiskError::Config` when validation fails or no model is selected
    /// - `RiskError::Distribution` when a variable cannot be resolved
    /// - `RiskError::Model` when the selected model is not registered
    /// - `RiskError::SimulationConfig` / `RiskError::Trigger` for invalid
    ///   simulation settings or thresholds
    pub fn setup(
        config: ConfigResolver,
        loader: &HistoryLoader,
        registry: &ModelRegistry,
    ) -> Result<Self, RiskError> {
        config.validate()?;

        let history = loader.load(&config);
        let specs = DistributionResolver::new(&config, &history).resolve_all()?;

        let model_id = config.business_model_id().ok_or_else(|| {
            ConfigError::invalid_value("business_model.template", "a model identifier")
        })?;
        let model = registry.get(model_id)?;
        let params =
            BusinessParameters::new(config.business_parameters().cloned().unwrap_or_default());
        let engine = SimulationEngine::new(specs, model, params)?;

        let simulation = SimulationConfig::from_resolver(&config)?.with_env_override();
        simulation.validate()?;
        let evaluator = TriggerEvaluator::new(RiskThresholds::from_resolver(&config)?);

        tracing::info!(
            scenario = %config,
            model = model_id,
            variables = engine.specs().len(),
            historical_series = history.len(),
            n_simulations = simulation.n_simulations(),
            "Risk pipeline ready"
        );

        Ok(Self {
            config,
            history,
            engine,
            simulation,
            evaluator,
            latest: None,
        })
    }

    /// Loads both documents and calls [`setup`](Self::setup).
    ///
    /// # Errors
    ///
    /// As [`setup`](Self::setup), plus `RiskError::Config` when a file cannot
    /// be loaded.
    pub fn from_paths(
        template: &Path,
        client: &Path,
        loader: &HistoryLoader,
        registry: &ModelRegistry,
    ) -> Result<Self, RiskError> {
        Self::setup(ConfigResolver::from_paths(template, client)?, loader, registry)
    }

    /// Merged configuration.
    pub fn config(&self) -> &ConfigResolver {
        &self.config
    }

    /// Historical series loaded at setup.
    pub fn history(&self) -> &HistoricalData {
        &self.history
    }

    /// Resolved variables, in declaration order.
    pub fn specs(&self) -> &[VariableSpec] {
        self.engine.specs()
    }

    /// Settings used by [`run`](Self::run).
    pub fn simulation_config(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Trigger thresholds.
    pub fn thresholds(&self) -> &RiskThresholds {
        self.evaluator.thresholds()
    }

    /// Latest completed run.
    pub fn latest_run(&self) -> Option<&SimulationRun> {
        self.latest.as_ref()
    }

    /// Runs with the configured settings, replacing the latest run.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::Engine` when the run fails; the previous run is
    /// kept in that case.
    pub fn run(&mut self) -> Result<&SimulationRun, RiskError> {
        let run = self.engine.run(&self.simulation)?;
        Ok(self.latest.insert(run))
    }

    /// Runs with explicit settings, replacing the latest run.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with(
        &mut self,
        n_simulations: usize,
        seed: Option<u64>,
    ) -> Result<&SimulationRun, RiskError> {
        let run = self.engine.run_with(n_simulations, seed)?;
        Ok(self.latest.insert(run))
    }

    fn completed(&self) -> Result<&SimulationRun, RunStateError> {
        self.latest.as_ref().ok_or(RunStateError::NoCompletedRun)
    }

    /// Summary of the latest run.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::RunState` before a run completes.
    pub fn statistics(&self) -> Result<StatisticsSummary, RiskError> {
        Ok(StatisticsCalculator::compute(self.completed()?.outcomes())?)
    }

    /// Sensitivity ranking of the latest run.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::RunState` before a run completes.
    pub fn sensitivity(&self) -> Result<SensitivityReport, RiskError> {
        Ok(SensitivityAnalyzer::analyze(self.completed()?)?)
    }

    /// Triggers fired by the latest run's summary.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::RunState` before a run completes.
    pub fn evaluate_triggers(&self) -> Result<Vec<Trigger>, RiskError> {
        let summary = self.statistics()?;
        Ok(self.evaluator.evaluate(&summary)?)
    }

    /// Every derived view of the latest run in one value.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::RunState` before a run completes.
    pub fn report(&self) -> Result<RiskReport, RiskError> {
        let run = self.completed()?;
        let statistics = self.statistics()?;
        let triggers = self.evaluator.evaluate(&statistics)?;
        Ok(RiskReport {
            client: self.config.client_name().map(str::to_string),
            industry: self.config.industry().map(str::to_string),
            model: run.model_id().to_string(),
            n_simulations: run.len(),
            seed: run.seed(),
            variables: self.specs().to_vec(),
            statistics,
            sensitivity: self.sensitivity()?,
            triggers,
        })
    }
}
