//! # scenario_engine: Monte Carlo Scenario Engine
//!
//! ## Layer 3 (Engine) Role
//!
//! scenario_engine turns resolved variable specs and a business model into
//! outcome distributions:
//! - `config`: validated run settings (`SimulationConfig`)
//! - `rng`: per-run seeded generator (`SimulationRng`)
//! - `engine`: sampling and row evaluation (`SimulationEngine`, `SimulationRun`)
//! - `statistics`: moments, percentiles and tail risk (`StatisticsCalculator`)
//! - `sensitivity`: correlation-based variable ranking (`SensitivityAnalyzer`)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────────┐
//! │ VariableSpec │──▶│ SimulationEngine │──▶│   SimulationRun    │
//! │ BusinessModel│   │  (one RNG / run) │   │ samples + outcomes │
//! └──────────────┘   └──────────────────┘   └─────────┬──────────┘
//!                                                     │
//!                          ┌──────────────────────────┼─────────────┐
//!                          ▼                                        ▼
//!                 ┌──────────────────────┐            ┌──────────────────────┐
//!                 │ StatisticsCalculator │            │ SensitivityAnalyzer  │
//!                 └──────────────────────┘            └──────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! All variables are drawn from one generator, one variable at a time in
//! declaration order. A seeded run is therefore bit-identical across calls
//! and independent of the `parallel` feature, which only spreads model
//! evaluation over rayon's thread pool.
//!
//! ## Usage Examples
//!
//! ```rust
//! use scenario_engine::engine::SimulationEngine;
//! use scenario_engine::sensitivity::SensitivityAnalyzer;
//! use scenario_engine::statistics::StatisticsCalculator;
//! use scenario_models::business::{BusinessParameters, ModelRegistry};
//! use scenario_models::distribution::{DistributionParams, ParamSource, VariableSpec};
//!
//! let specs = vec![
//!     VariableSpec::new(
//!         "monthly_volume",
//!         DistributionParams::Normal { mean: 1000.0, std: 150.0 },
//!         ParamSource::Fallback { anchor: 1000.0 },
//!     ).unwrap(),
//!     VariableSpec::new(
//!         "unit_cost",
//!         DistributionParams::Uniform { min: 6.0, max: 8.0 },
//!         ParamSource::Historical { observations: 24 },
//!     ).unwrap(),
//! ];
//! let params = BusinessParameters::new(scenario_core::config::parse_toml_str(
//!     "unit_price = 12.0\nfixed_monthly_cost = 4000.0\n",
//! ).unwrap());
//! let model = ModelRegistry::default().get("volume_margin").unwrap();
//!
//! let run = SimulationEngine::new(specs, model, params)
//!     .unwrap()
//!     .run_with(10_000, Some(7))
//!     .unwrap();
//!
//! let summary = StatisticsCalculator::compute(run.outcomes()).unwrap();
//! assert!(summary.p10 <= summary.p90);
//!
//! let report = SensitivityAnalyzer::analyze(&run).unwrap();
//! assert_eq!(report.entries()[0].variable, "monthly_volume");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod sensitivity;
pub mod statistics;

pub use config::SimulationConfig;
pub use engine::{SimulationEngine, SimulationRun};
pub use error::{EngineError, RunStateError, SimulationConfigError};
pub use sensitivity::{SensitivityAnalyzer, SensitivityEntry, SensitivityReport};
pub use statistics::{StatisticsCalculator, StatisticsSummary};
