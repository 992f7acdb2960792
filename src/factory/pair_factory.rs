//! The paired-pool registry.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::{ConstantProductConfig, ProtocolConfig};
use crate::domain::TokenPair;
use crate::error::AmmError;
use crate::pools::ConstantProductPool;
use crate::traits::{FromConfig, PoolRegistry};

/// Owns one [`ConstantProductPool`] per [`TokenPair`].
///
/// New pools take the fee and minimum-liquidity lock of the
/// [`ProtocolConfig`] the factory was built from.
///
/// # Example
///
/// ```rust
/// use kwikswap_amm::config::ProtocolConfig;
/// use kwikswap_amm::domain::{TokenAddress, TokenPair};
/// use kwikswap_amm::factory::PairFactory;
/// use kwikswap_amm::traits::{FromConfig, PoolRegistry};
///
/// let mut factory = PairFactory::from_config(&ProtocolConfig::default()).expect("valid");
/// let a = TokenAddress::from_bytes([1u8; 32]);
/// let b = TokenAddress::from_bytes([2u8; 32]);
///
/// factory.create_pool(TokenPair::new(b, a).expect("distinct")).expect("created");
/// assert!(factory.pool_for(a, b).is_ok());
/// assert_eq!(factory.pool_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFactory {
    config: ProtocolConfig,
    pools: BTreeMap<TokenPair, ConstantProductPool>,
}

impl PairFactory {
    /// The configuration new pools are built from.
    #[must_use]
    pub const fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Every pool, in pair order.
    pub fn pools(&self) -> impl Iterator<Item = &ConstantProductPool> + '_ {
        self.pools.values()
    }
}

impl FromConfig<ProtocolConfig> for PairFactory {
    /// An empty registry.
    ///
    /// # Errors
    ///
    /// Propagates [`ProtocolConfig::validate`].
    fn from_config(config: &ProtocolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            pools: BTreeMap::new(),
        })
    }
}

impl PoolRegistry for PairFactory {
    fn get_pool(&self, pair: &TokenPair) -> Result<&ConstantProductPool, AmmError> {
        self.pools.get(pair).ok_or(AmmError::NotFound)
    }

    fn create_pool(&mut self, pair: TokenPair) -> Result<&ConstantProductPool, AmmError> {
        if !self.pools.contains_key(&pair) {
            let pool = ConstantProductPool::from_config(&self.pool_config(pair)?)?;
            info!(%pair, fee = %pool.fee_tier(), "pool created");
            self.pools.insert(pair, pool);
        }
        self.get_pool(&pair)
    }

    fn pool_config(&self, pair: TokenPair) -> Result<ConstantProductConfig, AmmError> {
        self.config.pool_config(pair)
    }

    fn store_pool(&mut self, pool: ConstantProductPool) -> Result<(), AmmError> {
        let slot = self
            .pools
            .get_mut(pool.token_pair())
            .ok_or(AmmError::NotFound)?;
        *slot = pool;
        Ok(())
    }

    fn pool_count(&self) -> usize {
        self.pools.len()
    }
}
