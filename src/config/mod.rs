//! Component configuration.
//!
//! [`ProtocolConfig`] is the deployment-wide document (TOML); it hands out
//! the per-component configs that pools, exchanges and the router are
//! built from via [`FromConfig`](crate::traits::FromConfig).

mod constant_product;
mod legacy;
mod protocol;
mod router;

pub use constant_product::{ConstantProductConfig, MINIMUM_LIQUIDITY};
pub use legacy::{LegacyExchangeConfig, DEFAULT_MIN_INITIAL_NATIVE};
pub use protocol::{LegacySettings, ProtocolConfig};
pub use router::{RouterConfig, DEFAULT_WRAPPED_NATIVE};
