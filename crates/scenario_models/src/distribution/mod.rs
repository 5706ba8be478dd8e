//! Variable distributions.
//!
//! Each declared variable resolves to a [`VariableSpec`]: empirical
//! parameters when a usable historical series exists, heuristic fallback
//! parameters anchored on the configured current value otherwise.
//!
//! | Kind | Historical | Fallback |
//! |------|------------|----------|
//! | normal | sample mean / std | `fallback.mean` or current, `fallback.std` or 10% |
//! | triangular | min / median / max | current × (1 + `min_pct`, `mode_pct`, `max_pct`) |
//! | uniform | min / max | none |

mod error;
mod resolver;
mod spec;

pub use error::DistributionError;
pub use resolver::{
    fallback_params, historical_params, DistributionResolver, DEFAULT_CURRENT_VALUE,
    DEFAULT_MAX_PCT, DEFAULT_MIN_PCT, DEFAULT_MODE_PCT, DEFAULT_STD_FRACTION,
};
pub use spec::{DistributionKind, DistributionParams, ParamSource, VariableSpec};
