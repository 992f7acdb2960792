//! Deployment-wide settings loadable from TOML.
//!
//! ```toml
//! wrapped_native = "eeee…ee"   # 64 hex digits
//! fee_bps = 30
//! minimum_liquidity = 1000
//!
//! [legacy]
//! fee_bps = 30
//! min_initial_native = 1000000000
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    ConstantProductConfig, LegacyExchangeConfig, RouterConfig, DEFAULT_MIN_INITIAL_NATIVE,
    DEFAULT_WRAPPED_NATIVE, MINIMUM_LIQUIDITY,
};
use crate::domain::{Amount, BasisPoints, FeeTier, Liquidity, TokenAddress, TokenPair};
use crate::error::AmmError;

/// Top-level protocol configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Wrapped native token used by router native variants.
    pub wrapped_native: TokenAddress,
    /// Paired pool swap fee in basis points.
    pub fee_bps: u32,
    /// Shares locked by the first deposit of each paired pool.
    pub minimum_liquidity: u64,
    /// Legacy exchange settings.
    pub legacy: LegacySettings,
}

/// Legacy exchange section of [`ProtocolConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegacySettings {
    /// Legacy swap fee in basis points.
    pub fee_bps: u32,
    /// Minimum native amount of a legacy exchange's first deposit.
    pub min_initial_native: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            wrapped_native: DEFAULT_WRAPPED_NATIVE,
            fee_bps: FeeTier::TIER_0_30_PERCENT.basis_points().get(),
            minimum_liquidity: default_minimum_liquidity(),
            legacy: LegacySettings::default(),
        }
    }
}

impl Default for LegacySettings {
    fn default() -> Self {
        Self {
            fee_bps: FeeTier::TIER_0_30_PERCENT.basis_points().get(),
            min_initial_native: default_min_initial_native(),
        }
    }
}

fn default_minimum_liquidity() -> u64 {
    u64::try_from(MINIMUM_LIQUIDITY.get()).unwrap_or(u64::MAX)
}

fn default_min_initial_native() -> u64 {
    u64::try_from(DEFAULT_MIN_INITIAL_NATIVE.get()).unwrap_or(u64::MAX)
}

impl ProtocolConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the document does not
    /// parse, or any error from [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, AmmError> {
        let config: Self = toml::from_str(text).map_err(|e| {
            warn!(error = %e, "rejected protocol configuration");
            AmmError::InvalidConfiguration("malformed TOML protocol configuration")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the file cannot be
    /// read, plus everything [`from_toml_str`](Self::from_toml_str) returns.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AmmError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "cannot read protocol configuration");
            AmmError::InvalidConfiguration("protocol configuration file unreadable")
        })?;
        Self::from_toml_str(&text)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, AmmError> {
        toml::to_string(self)
            .map_err(|_| AmmError::InvalidConfiguration("protocol configuration not serializable"))
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if either fee is 100% or more.
    /// - [`AmmError::InvalidConfiguration`] if a minimum is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee_tier().validate()?;
        self.legacy_fee_tier().validate()?;
        if self.minimum_liquidity == 0 {
            return Err(AmmError::InvalidConfiguration(
                "minimum liquidity must be positive",
            ));
        }
        if self.legacy.min_initial_native == 0 {
            return Err(AmmError::InvalidConfiguration(
                "minimum initial native deposit must be positive",
            ));
        }
        Ok(())
    }

    /// Paired pool fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        FeeTier::new(BasisPoints::new(self.fee_bps))
    }

    /// Legacy exchange fee.
    #[must_use]
    pub const fn legacy_fee_tier(&self) -> FeeTier {
        FeeTier::new(BasisPoints::new(self.legacy.fee_bps))
    }

    /// Builds the configuration of the pool for `pair`.
    ///
    /// # Errors
    ///
    /// Same as [`ConstantProductConfig::with_minimum_liquidity`].
    pub fn pool_config(&self, pair: TokenPair) -> Result<ConstantProductConfig, AmmError> {
        ConstantProductConfig::with_minimum_liquidity(
            pair,
            self.fee_tier(),
            Liquidity::new(u128::from(self.minimum_liquidity)),
        )
    }

    /// Builds the configuration of the legacy exchange for `token`.
    ///
    /// # Errors
    ///
    /// Same as [`LegacyExchangeConfig::new`].
    pub fn legacy_config(&self, token: TokenAddress) -> Result<LegacyExchangeConfig, AmmError> {
        LegacyExchangeConfig::new(
            token,
            self.legacy_fee_tier(),
            Amount::from(self.legacy.min_initial_native),
        )
    }

    /// Builds the router configuration.
    #[must_use]
    pub const fn router_config(&self) -> RouterConfig {
        RouterConfig::new(self.wrapped_native)
    }
}
