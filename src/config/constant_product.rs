//! Configuration for paired constant-product pools.

use crate::domain::{FeeTier, Liquidity, TokenPair};
use crate::error::AmmError;

/// Shares locked to the burn address by the first deposit of every pool.
pub const MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);

/// Configuration for a paired constant-product pool (`x · y = k`).
///
/// Pools are created empty; the first [`mint`] sets the price.
///
/// # Validation
///
/// - The fee must leave a non-zero share of every input (`< 100%`).
/// - `minimum_liquidity` must be positive.
///
/// [`mint`]: crate::pools::ConstantProductPool::mint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantProductConfig {
    token_pair: TokenPair,
    fee_tier: FeeTier,
    minimum_liquidity: Liquidity,
}

impl ConstantProductConfig {
    /// Creates a validated configuration with the standard
    /// [`MINIMUM_LIQUIDITY`] lock.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub fn new(token_pair: TokenPair, fee_tier: FeeTier) -> Result<Self, AmmError> {
        Self::with_minimum_liquidity(token_pair, fee_tier, MINIMUM_LIQUIDITY)
    }

    /// Creates a validated configuration with a custom lock size.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if the fee is 100% or more.
    /// - [`AmmError::InvalidConfiguration`] if `minimum_liquidity` is zero.
    pub fn with_minimum_liquidity(
        token_pair: TokenPair,
        fee_tier: FeeTier,
        minimum_liquidity: Liquidity,
    ) -> Result<Self, AmmError> {
        let config = Self {
            token_pair,
            fee_tier,
            minimum_liquidity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`with_minimum_liquidity`](Self::with_minimum_liquidity).
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee_tier.validate()?;
        if self.minimum_liquidity.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum liquidity must be positive",
            ));
        }
        Ok(())
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the number of shares locked by the first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Liquidity {
        self.minimum_liquidity
    }
}
