//! # scenario_models: Distributions and Business Models
//!
//! ## Layer 2 (Models) Role
//!
//! - `distribution`: turns configured specs plus optional history into
//!   concrete [`VariableSpec`](distribution::VariableSpec) parameters
//! - `business`: the registry of pure outcome functions selected by
//!   configuration
//!
//! ## Example
//!
//! ```rust
//! use scenario_models::business::{BusinessParameters, ModelRegistry, SampleRow};
//! use scenario_core::config::parse_toml_str;
//!
//! let params = BusinessParameters::new(parse_toml_str(r#"
//!     unit_price = 45.0
//!     monthly_volume = 1000.0
//!     fixed_monthly_cost = 5000.0
//!     [recipe]
//!     flour_price = 0.5
//! "#).unwrap());
//!
//! let model = ModelRegistry::default().get("unit_margin").unwrap();
//! let names = vec!["flour_price".to_string()];
//! let values = [20.0];
//! let outcome = model.evaluate(&SampleRow::new(&names, &values), &params).unwrap();
//!
//! // 1000 * (45 - 0.5 * 20) - 5000
//! assert_eq!(outcome, 30_000.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod business;
pub mod distribution;
