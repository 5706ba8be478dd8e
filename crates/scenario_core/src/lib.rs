//! # scenario_core: Configuration Foundation for Scenario Risk Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! scenario_core is the bottom layer of the scenario risk workspace, providing:
//! - Format-neutral configuration trees (`config::ConfigValue`)
//! - Template/client merge and dotted-path lookup (`config::ConfigResolver`)
//! - Completeness validation that reports every problem at once
//! - Historical observation series and the provider seam (`history`)
//!
//! ## Dependency Principle
//!
//! Layer 1 has no dependencies on other scenario_* crates:
//! - serde, toml, serde_json: Configuration documents
//! - chrono: Observation dates
//! - thiserror: Error types
//! - tracing: Structured log events
//!
//! ## Usage Examples
//!
//! ```rust
//! use scenario_core::config::{parse_toml_str, ConfigResolver};
//!
//! let template = parse_toml_str(r#"
//!     [industry]
//!     name = "food"
//!
//!     [business_parameters]
//!     unit_price = 45.0
//! "#).unwrap();
//! let client = parse_toml_str(r#"
//!     [client]
//!     name = "Bakery"
//!     industry = "food"
//!
//!     [business_parameters]
//!     unit_price = 50.0
//! "#).unwrap();
//!
//! let resolver = ConfigResolver::new(template, client);
//! assert_eq!(resolver.get_f64("business_parameters.unit_price"), Some(50.0));
//! assert_eq!(resolver.get_str("industry.name"), Some("food"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod history;
