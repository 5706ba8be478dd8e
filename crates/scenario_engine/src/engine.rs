//! Sampling and model evaluation.

use super::config::SimulationConfig;
use super::error::EngineError;
use super::rng::SimulationRng;
use rand::distributions::Uniform;
use rand_distr::{Normal, Triangular};
use scenario_models::business::{BusinessModel, BusinessParameters, ModelError, SampleRow};
use scenario_models::distribution::{DistributionParams, VariableSpec};
use std::collections::HashSet;
use std::ops::Range;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Prepared sampler for one variable.
#[derive(Clone, Debug)]
enum Sampler {
    /// Degenerate distribution (zero std or zero-width range)
    Constant(f64),
    Normal(Normal<f64>),
    Triangular(Triangular<f64>),
    Uniform(Uniform<f64>),
}

impl Sampler {
    fn new(spec: &VariableSpec) -> Result<Self, EngineError> {
        let rejected = |reason: String| EngineError::Sampler {
            variable: spec.name().to_string(),
            reason,
        };

        if let DistributionParams::Triangular { min, max, .. }
        | DistributionParams::Uniform { min, max } = *spec.params()
        {
            if !(max - min).is_finite() {
                return Err(rejected(format!("range {} to {} is too wide to sample", min, max)));
            }
        }

        let sampler = match *spec.params() {
            DistributionParams::Normal { mean, std } if std == 0.0 => Self::Constant(mean),
            DistributionParams::Normal { mean, std } => {
                Self::Normal(Normal::new(mean, std).map_err(|e| rejected(e.to_string()))?)
            }
            DistributionParams::Triangular { min, max, .. } if min == max => Self::Constant(min),
            DistributionParams::Triangular { min, mode, max } => Self::Triangular(
                Triangular::new(min, max, mode).map_err(|e| rejected(e.to_string()))?,
            ),
            DistributionParams::Uniform { min, max } if min == max => Self::Constant(min),
            DistributionParams::Uniform { min, max } if min < max => {
                Self::Uniform(Uniform::new_inclusive(min, max))
            }
            DistributionParams::Uniform { min, max } => {
                return Err(rejected(format!("min {} exceeds max {}", min, max)))
            }
        };
        Ok(sampler)
    }

    fn fill(&self, rng: &mut SimulationRng, buffer: &mut [f64]) {
        match self {
            Self::Constant(value) => buffer.fill(*value),
            Self::Normal(dist) => rng.fill(dist, buffer),
            Self::Triangular(dist) => rng.fill(dist, buffer),
            Self::Uniform(dist) => rng.fill(dist, buffer),
        }
    }
}

/// Monte Carlo engine over a fixed set of variables and one business model.
///
/// Variables are sampled independently of one another; no correlation
/// structure is modelled. Each call to [`run`](Self::run) owns a fresh
/// [`SimulationRng`].
///
/// # Examples
///
/// ```rust
/// use scenario_engine::config::SimulationConfig;
/// use scenario_engine::engine::SimulationEngine;
/// use scenario_models::business::{BusinessParameters, ModelRegistry};
/// use scenario_models::distribution::{DistributionParams, ParamSource, VariableSpec};
///
/// let spec = VariableSpec::new(
///     "monthly_volume",
///     DistributionParams::Triangular { min: 800.0, mode: 1000.0, max: 1100.0 },
///     ParamSource::Fallback { anchor: 1000.0 },
/// ).unwrap();
/// let params = BusinessParameters::new(scenario_core::config::parse_toml_str(
///     "unit_price = 12.0\nunit_cost = 7.0\nfixed_monthly_cost = 4000.0\n",
/// ).unwrap());
/// let model = ModelRegistry::default().get("volume_margin").unwrap();
///
/// let engine = SimulationEngine::new(vec![spec], model, params).unwrap();
/// let config = SimulationConfig::builder().n_simulations(1_000).seed(42).build().unwrap();
/// let run = engine.run(&config).unwrap();
///
/// assert_eq!(run.len(), 1_000);
/// assert_eq!(run.seed(), 42);
/// assert!(run.outcomes().iter().all(|&o| (0.0..=1_500.0).contains(&o)));
/// ```
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    specs: Vec<VariableSpec>,
    samplers: Vec<Sampler>,
    names: Vec<String>,
    model: BusinessModel,
    params: BusinessParameters,
}

impl SimulationEngine {
    /// Prepares an engine.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::DuplicateVariable` when two specs share a name,
    /// or `EngineError::Sampler` when a spec cannot be sampled.
    pub fn new(
        specs: Vec<VariableSpec>,
        model: BusinessModel,
        params: BusinessParameters,
    ) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name()) {
                return Err(EngineError::DuplicateVariable(spec.name().to_string()));
            }
        }

        let samplers = specs.iter().map(Sampler::new).collect::<Result<Vec<_>, _>>()?;
        let names = specs.iter().map(|s| s.name().to_string()).collect();

        Ok(Self {
            specs,
            samplers,
            names,
            model,
            params,
        })
    }

    /// Variable specs, in declaration order.
    pub fn specs(&self) -> &[VariableSpec] {
        &self.specs
    }

    /// The business model evaluated per row.
    pub fn model(&self) -> &BusinessModel {
        &self.model
    }

    /// Runs with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` for invalid settings and
    /// `EngineError::Model` for the lowest simulation index whose evaluation
    /// failed; no partial run is returned.
    pub fn run(&self, config: &SimulationConfig) -> Result<SimulationRun, EngineError> {
        config.validate()?;
        let n = config.n_simulations();
        let mut rng = SimulationRng::from_optional_seed(config.seed());
        let started = Instant::now();

        tracing::info!(
            n_simulations = n,
            variables = self.specs.len(),
            model = self.model.id(),
            seed = rng.seed(),
            seeded = config.seed().is_some(),
            "Starting simulation run"
        );

        let mut samples = Vec::with_capacity(self.samplers.len());
        for sampler in &self.samplers {
            let mut column = vec![0.0; n];
            sampler.fill(&mut rng, &mut column);
            samples.push(column);
        }

        let outcomes = self.evaluate(&samples, n)?;

        tracing::info!(
            n_simulations = n,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Simulation run complete"
        );

        Ok(SimulationRun {
            variables: self.names.clone(),
            samples,
            outcomes,
            seed: rng.seed(),
            model_id: self.model.id().to_string(),
        })
    }

    /// Runs `n_simulations` rows, seeded when `seed` is given.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with(
        &self,
        n_simulations: usize,
        seed: Option<u64>,
    ) -> Result<SimulationRun, EngineError> {
        let config = SimulationConfig::builder()
            .n_simulations(n_simulations)
            .optional_seed(seed)
            .build()?;
        self.run(&config)
    }

    fn evaluate_row(
        &self,
        samples: &[Vec<f64>],
        index: usize,
        row: &mut [f64],
    ) -> Result<f64, ModelError> {
        for (slot, column) in row.iter_mut().zip(samples) {
            *slot = column[index];
        }
        self.model
            .evaluate(&SampleRow::new(&self.names, row), &self.params)
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, samples: &[Vec<f64>], n: usize) -> Result<Vec<f64>, EngineError> {
        let width = samples.len();
        let results: Vec<Result<f64, ModelError>> = (0..n)
            .into_par_iter()
            .map_init(
                || vec![0.0; width],
                |row, index| self.evaluate_row(samples, index, row),
            )
            .collect();

        results
            .into_iter()
            .enumerate()
            .map(|(index, result)| result.map_err(|source| EngineError::Model { index, source }))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, samples: &[Vec<f64>], n: usize) -> Result<Vec<f64>, EngineError> {
        let mut row = vec![0.0; samples.len()];
        (0..n)
            .map(|index| {
                self.evaluate_row(samples, index, &mut row)
                    .map_err(|source| EngineError::Model { index, source })
            })
            .collect()
    }
}

/// Immutable result of one run.
///
/// Holds one sample vector per variable and the outcome vector, all of
/// length N and addressed by simulation index `0..N`.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationRun {
    variables: Vec<String>,
    samples: Vec<Vec<f64>>,
    outcomes: Vec<f64>,
    seed: u64,
    model_id: String,
}

/// One simulation index of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRow<'a> {
    /// Simulation index
    pub index: usize,
    /// Variable names, in declaration order
    pub variables: &'a [String],
    /// Sampled values, aligned with `variables`
    pub values: Vec<f64>,
    /// Model outcome
    pub outcome: f64,
}

impl RunRow<'_> {
    /// Sampled value of a variable in this row.
    pub fn get(&self, variable: &str) -> Option<f64> {
        SampleRow::new(self.variables, &self.values).get(variable)
    }
}

impl SimulationRun {
    /// Number of simulations.
    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if the run holds no simulations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Seed that produced this run; replaying with it gives identical output.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Identifier of the model that produced the outcomes.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Simulation indices, `0..N`.
    #[inline]
    pub fn index(&self) -> Range<usize> {
        0..self.len()
    }

    /// Variable names, in declaration order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Sample vector of a variable.
    pub fn samples(&self, variable: &str) -> Option<&[f64]> {
        self.variables
            .iter()
            .position(|v| v == variable)
            .map(|i| self.samples[i].as_slice())
    }

    /// Iterate over `(variable, samples)` in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.variables
            .iter()
            .map(String::as_str)
            .zip(self.samples.iter().map(Vec::as_slice))
    }

    /// Outcome vector.
    #[inline]
    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    /// Samples and outcome at one simulation index.
    pub fn row(&self, index: usize) -> Option<RunRow<'_>> {
        let outcome = *self.outcomes.get(index)?;
        Some(RunRow {
            index,
            variables: &self.variables,
            values: self.samples.iter().map(|column| column[index]).collect(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_core::config::parse_toml_str;
    use scenario_models::business::{ModelRegistry, ModelFn};
    use scenario_models::distribution::ParamSource;

    const FALLBACK: ParamSource = ParamSource::Fallback { anchor: 100.0 };

    fn spec(name: &str, params: DistributionParams) -> VariableSpec {
        VariableSpec::new(name, params, FALLBACK).unwrap()
    }

    fn bakery() -> SimulationEngine {
        let specs = vec![
            spec("flour_price", DistributionParams::Normal { mean: 20.0, std: 2.0 }),
            spec("sugar_price", DistributionParams::Triangular { min: 22.0, mode: 24.0, max: 28.0 }),
        ];
        let params = BusinessParameters::new(
            parse_toml_str(
                r#"
                unit_price = 45
                monthly_volume = 1000
                fixed_monthly_cost = 15000
                [recipe]
                flour_price = 0.5
                sugar_price = 0.2
                "#,
            )
            .unwrap(),
        );
        let model = ModelRegistry::default().get("unit_margin").unwrap();
        SimulationEngine::new(specs, model, params).unwrap()
    }

    #[test]
    fn test_run_shapes() {
        let run = bakery().run_with(500, Some(1)).unwrap();
        assert_eq!(run.len(), 500);
        assert_eq!(run.index(), 0..500);
        assert_eq!(run.samples("flour_price").unwrap().len(), 500);
        assert_eq!(run.samples("sugar_price").unwrap().len(), 500);
        assert!(run.samples("butter_price").is_none());
        assert_eq!(run.model_id(), "unit_margin");
        assert_eq!(run.variables(), &["flour_price".to_string(), "sugar_price".to_string()]);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let engine = bakery();
        let a = engine.run_with(2_000, Some(42)).unwrap();
        let b = engine.run_with(2_000, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseeded_runs_differ_but_replay() {
        let engine = bakery();
        let a = engine.run_with(1_000, None).unwrap();
        let b = engine.run_with(1_000, None).unwrap();
        assert_ne!(a.outcomes(), b.outcomes());

        let replay = engine.run_with(1_000, Some(a.seed())).unwrap();
        assert_eq!(replay.outcomes(), a.outcomes());
    }

    #[test]
    fn test_row_matches_model() {
        let run = bakery().run_with(10, Some(3)).unwrap();
        let row = run.row(4).unwrap();
        let flour = row.get("flour_price").unwrap();
        let sugar = row.get("sugar_price").unwrap();
        let expected = 1000.0 * (45.0 - 0.5 * flour - 0.2 * sugar) - 15000.0;
        approx::assert_relative_eq!(row.outcome, expected, epsilon = 1e-6);
        assert!(run.row(10).is_none());
    }

    #[test]
    fn test_samples_respect_bounds() {
        let engine = SimulationEngine::new(
            vec![
                spec("a", DistributionParams::Triangular { min: 1.0, mode: 2.0, max: 3.0 }),
                spec("b", DistributionParams::Uniform { min: -1.0, max: 1.0 }),
                spec("c", DistributionParams::Normal { mean: 5.0, std: 0.0 }),
            ],
            BusinessModel::new("zero", |_, _| Ok(0.0)),
            BusinessParameters::default(),
        )
        .unwrap();
        let run = engine.run_with(5_000, Some(9)).unwrap();
        assert!(run.samples("a").unwrap().iter().all(|v| (1.0..=3.0).contains(v)));
        assert!(run.samples("b").unwrap().iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(run.samples("c").unwrap().iter().all(|&v| v == 5.0));
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let result = SimulationEngine::new(
            vec![
                spec("a", DistributionParams::Uniform { min: 0.0, max: 1.0 }),
                spec("a", DistributionParams::Uniform { min: 0.0, max: 2.0 }),
            ],
            BusinessModel::new("zero", |_, _| Ok(0.0)),
            BusinessParameters::default(),
        );
        assert_eq!(result.unwrap_err(), EngineError::DuplicateVariable("a".to_string()));
    }

    #[test]
    fn test_overflowing_range_rejected() {
        for params in [
            DistributionParams::Uniform { min: -1e308, max: 1e308 },
            DistributionParams::Triangular { min: -1e308, mode: 0.0, max: 1e308 },
        ] {
            let result = SimulationEngine::new(
                vec![spec("wide", params)],
                BusinessModel::new("zero", |_, _| Ok(0.0)),
                BusinessParameters::default(),
            );
            match result {
                Err(EngineError::Sampler { variable, .. }) => assert_eq!(variable, "wide"),
                other => panic!("Expected sampler error, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_model_failure_aborts_run() {
        let fails_above_half: ModelFn = |row, _| {
            let u = row.require("u")?;
            if u > 0.5 {
                Err(ModelError::MissingParameter("threshold".to_string()))
            } else {
                Ok(u)
            }
        };
        let engine = SimulationEngine::new(
            vec![spec("u", DistributionParams::Uniform { min: 0.0, max: 1.0 })],
            BusinessModel::new("fragile", fails_above_half),
            BusinessParameters::default(),
        )
        .unwrap();

        let seeded = engine.run_with(1_000, Some(5));
        let expected_index = {
            // Recompute the first failing row from an identical sample stream
            let replay = SimulationEngine::new(
                vec![spec("u", DistributionParams::Uniform { min: 0.0, max: 1.0 })],
                BusinessModel::new("identity", |row, _| row.require("u")),
                BusinessParameters::default(),
            )
            .unwrap()
            .run_with(1_000, Some(5))
            .unwrap();
            replay.outcomes().iter().position(|&u| u > 0.5).unwrap()
        };
        match seeded {
            Err(EngineError::Model { index, .. }) => assert_eq!(index, expected_index),
            other => panic!("Expected model failure, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_count_rejected_before_sampling() {
        assert!(matches!(
            bakery().run_with(0, Some(1)),
            Err(EngineError::Config(_))
        ));
    }
}
