//! Configuration for legacy single-token exchanges.

use crate::domain::{Amount, FeeTier, TokenAddress};
use crate::error::AmmError;

/// Native amount the first deposit into a legacy exchange must reach.
pub const DEFAULT_MIN_INITIAL_NATIVE: Amount = Amount::new(1_000_000_000);

/// Parameters of one legacy exchange (token ⇄ native).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyExchangeConfig {
    token: TokenAddress,
    fee_tier: FeeTier,
    min_initial_native: Amount,
}

impl LegacyExchangeConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if the fee is 100% or more.
    /// - [`AmmError::InvalidConfiguration`] if `min_initial_native` is zero.
    pub fn new(
        token: TokenAddress,
        fee_tier: FeeTier,
        min_initial_native: Amount,
    ) -> Result<Self, AmmError> {
        let config = Self {
            token,
            fee_tier,
            min_initial_native,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee_tier.validate()?;
        if self.min_initial_native.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum initial native deposit must be positive",
            ));
        }
        Ok(())
    }

    /// The token traded against native.
    #[must_use]
    pub const fn token(&self) -> TokenAddress {
        self.token
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Minimum native amount of the first deposit.
    #[must_use]
    pub const fn min_initial_native(&self) -> Amount {
        self.min_initial_native
    }
}
