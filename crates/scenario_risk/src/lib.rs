//! # scenario_risk: Risk Triggers and Scenario Pipeline
//!
//! ## Layer 4 (Risk) Role
//!
//! scenario_risk sits on top of the workspace and turns a configured
//! scenario into actionable output:
//! - `triggers`: threshold rules over summary statistics (`TriggerEvaluator`)
//! - `pipeline`: setup, runs and derived views in one place (`RiskPipeline`)
//! - `error`: one error type covering every stage (`RiskError`)
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐  ┌───────────────┐  ┌──────────────────────┐
//! │ ConfigResolver │─▶│ HistoryLoader │─▶│ DistributionResolver │
//! └────────────────┘  └───────────────┘  └──────────┬───────────┘
//!                                                    ▼
//! ┌───────────────┐   ┌──────────────────┐   ┌───────────────┐
//! │ ModelRegistry │──▶│ SimulationEngine │──▶│ SimulationRun │
//! └───────────────┘   └──────────────────┘   └───────┬───────┘
//!                                                    │
//!              ┌─────────────────────┬───────────────┘
//!              ▼                     ▼
//!   ┌──────────────────────┐  ┌─────────────────────┐
//!   │ StatisticsCalculator │  │ SensitivityAnalyzer │
//!   └──────────┬───────────┘  └─────────────────────┘
//!              ▼
//!   ┌──────────────────────┐
//!   │   TriggerEvaluator   │
//!   └──────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! Triggers can be evaluated on any keyed statistics, not only on a run:
//!
//! ```rust
//! use scenario_risk::triggers::{RiskThresholds, Severity, TriggerEvaluator};
//!
//! let evaluator = TriggerEvaluator::new(RiskThresholds::default());
//! let stats: &[(&str, f64)] = &[
//!     ("prob_loss", 0.40),
//!     ("mean", 20_000.0),
//!     ("std", 4_000.0),
//!     ("p10", 3_000.0),
//! ];
//!
//! let triggers = evaluator.evaluate(stats).unwrap();
//! assert_eq!(triggers.len(), 1);
//! assert_eq!(triggers[0].severity, Severity::Critical);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod pipeline;
pub mod triggers;

pub use error::RiskError;
pub use pipeline::{RiskPipeline, RiskReport};
pub use triggers::{RiskThresholds, Severity, Trigger, TriggerEvaluator};
