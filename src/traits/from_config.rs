//! Construction from validated configuration.
//!
//! Pools, legacy exchanges and the router are all built from a config
//! struct through [`FromConfig`], so the registry and the factories can
//! create instances without knowing their internals.
//!
//! # Validation Contract
//!
//! Implementations **must** call the config's `validate()` before building
//! anything.  A successfully constructed value is in a valid initial state:
//!
//! - the token pair (or token) is well formed
//! - the fee leaves a non-zero share of every input
//! - lock and deposit minimums are positive
//!
//! ```text
//! ConstantProductConfig  => ConstantProductPool::from_config(&cfg)
//! LegacyExchangeConfig   => LegacyExchange::from_config(&cfg)
//! ```
//!
//! There is no blanket implementation; every pairing is explicit.

use crate::error::AmmError;

/// Builds `Self` from a configuration of type `C`.
///
/// # Implementors
///
/// - `impl FromConfig<ConstantProductConfig> for ConstantProductPool`
/// - `impl FromConfig<LegacyExchangeConfig> for LegacyExchange`
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if a parameter is out of range.
    /// - [`AmmError::InvalidFee`] if the fee tier is unsupported.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
