//! Keyed stores of pools.
//!
//! The registry owns every pool; the router borrows it for a call, works
//! on copies and writes them back with [`PoolRegistry::store_pool`] once
//! the whole operation has succeeded.

use crate::config::ConstantProductConfig;
use crate::domain::{TokenAddress, TokenPair};
use crate::error::AmmError;
use crate::pools::ConstantProductPool;

#[cfg(feature = "migrator")]
use crate::pools::LegacyExchange;

/// One [`ConstantProductPool`] per unordered token pair.
pub trait PoolRegistry {
    /// The pool for `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotFound`] if no pool was created for the pair.
    fn get_pool(&self, pair: &TokenPair) -> Result<&ConstantProductPool, AmmError>;

    /// Creates the pool for `pair`, or returns the existing one.
    ///
    /// # Errors
    ///
    /// Any configuration error from building the pool.
    fn create_pool(&mut self, pair: TokenPair) -> Result<&ConstantProductPool, AmmError>;

    /// Configuration a new pool for `pair` would be built with.
    ///
    /// # Errors
    ///
    /// Any configuration error for the pair.
    fn pool_config(&self, pair: TokenPair) -> Result<ConstantProductConfig, AmmError>;

    /// Replaces the stored pool with an updated copy.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotFound`] if the pool was never created.
    fn store_pool(&mut self, pool: ConstantProductPool) -> Result<(), AmmError>;

    /// Convenience lookup by two tokens in either order.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidToken`] if the tokens are equal, otherwise as
    /// [`get_pool`](Self::get_pool).
    fn pool_for(
        &self,
        a: TokenAddress,
        b: TokenAddress,
    ) -> Result<&ConstantProductPool, AmmError> {
        self.get_pool(&TokenPair::new(a, b)?)
    }

    /// Number of pools.
    fn pool_count(&self) -> usize;
}

/// One [`LegacyExchange`] per token.
#[cfg(feature = "migrator")]
pub trait LegacyRegistry {
    /// The exchange for `token`.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotFound`] if no exchange exists for the token.
    fn exchange(&self, token: &TokenAddress) -> Result<&LegacyExchange, AmmError>;

    /// Creates the exchange for `token`, or returns the existing one.
    ///
    /// # Errors
    ///
    /// Any configuration error from building the exchange.
    fn create_exchange(&mut self, token: TokenAddress) -> Result<&LegacyExchange, AmmError>;

    /// Replaces the stored exchange with an updated copy.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotFound`] if the exchange was never created.
    fn store_exchange(&mut self, exchange: LegacyExchange) -> Result<(), AmmError>;
}
