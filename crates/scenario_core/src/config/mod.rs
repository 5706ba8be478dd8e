//! Layered scenario configuration.
//!
//! An industry template supplies defaults; a client document overrides them.
//! Both are parsed into [`ConfigValue`] trees, merged once, and read through
//! dotted paths afterwards.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               ConfigResolver                │
//! ├─────────────────────────────────────────────┤
//! │  document  - TOML / JSON loading            │
//! │  value     - ConfigValue tree, merge, paths │
//! │  resolver  - lookup, distributions, checks  │
//! │  error     - ConfigError                    │
//! └─────────────────────────────────────────────┘
//! ```

mod document;
mod error;
mod resolver;
mod value;

pub use document::{load_document, parse_json_str, parse_toml_str};
pub use error::ConfigError;
pub use resolver::{ConfigResolver, DistributionEntry, SpecOrigin, VariableDecl};
pub use value::{merge, ConfigValue, Mapping};
