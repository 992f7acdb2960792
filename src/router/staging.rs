//! Buffered state of one router call.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ConstantProductConfig;
use crate::domain::{Timestamp, TokenPair};
use crate::error::AmmError;
use crate::ledger::LedgerBatch;
use crate::pools::ConstantProductPool;
use crate::traits::{FromConfig, PoolRegistry};

#[derive(Debug, Clone)]
struct StagedPool {
    pool: ConstantProductPool,
    created: bool,
}

/// Copies of every pool a call touches plus the custody movements it
/// needs.
///
/// Nothing here is visible outside the call until the router commits it.
/// Dropping an `Execution` discards the call.
#[derive(Debug, Clone)]
pub struct Execution {
    now: Timestamp,
    pools: BTreeMap<TokenPair, StagedPool>,
    batch: LedgerBatch,
}

impl Execution {
    pub(crate) fn new(now: Timestamp) -> Self {
        Self {
            now,
            pools: BTreeMap::new(),
            batch: LedgerBatch::new(),
        }
    }

    pub(crate) fn batch_mut(&mut self) -> &mut LedgerBatch {
        &mut self.batch
    }

    /// The staged copy of the pool for `pair`, loaded on first use.
    ///
    /// # Errors
    ///
    /// [`AmmError::NotFound`] if the registry has no such pool.
    pub(crate) fn pool<R: PoolRegistry>(
        &mut self,
        registry: &R,
        pair: TokenPair,
    ) -> Result<&mut ConstantProductPool, AmmError> {
        if !self.pools.contains_key(&pair) {
            let pool = registry.get_pool(&pair)?.clone();
            self.stage(pair, pool, false);
        }
        self.staged(&pair)
    }

    /// Like [`pool`](Self::pool), but stages a fresh empty pool when the
    /// registry has none.  The registry only learns of it on commit.
    ///
    /// # Errors
    ///
    /// Any configuration error for the new pool.
    pub(crate) fn pool_or_create<R: PoolRegistry>(
        &mut self,
        registry: &R,
        pair: TokenPair,
    ) -> Result<&mut ConstantProductPool, AmmError> {
        if !self.pools.contains_key(&pair) {
            match registry.get_pool(&pair) {
                Ok(pool) => {
                    let pool = pool.clone();
                    self.stage(pair, pool, false);
                }
                Err(AmmError::NotFound) => {
                    let config: ConstantProductConfig = registry.pool_config(pair)?;
                    let pool = ConstantProductPool::from_config(&config)?;
                    debug!(%pair, "staging new pool");
                    self.stage(pair, pool, true);
                }
                Err(err) => return Err(err),
            }
        }
        self.staged(&pair)
    }

    /// Splits into the staged pools (with their "created" flag) and the
    /// ledger batch.
    pub(crate) fn into_parts(self) -> (Vec<(ConstantProductPool, bool)>, LedgerBatch) {
        let pools = self
            .pools
            .into_values()
            .map(|staged| (staged.pool, staged.created))
            .collect();
        (pools, self.batch)
    }

    fn stage(&mut self, pair: TokenPair, mut pool: ConstantProductPool, created: bool) {
        pool.accrue(self.now);
        self.pools.insert(pair, StagedPool { pool, created });
    }

    fn staged(&mut self, pair: &TokenPair) -> Result<&mut ConstantProductPool, AmmError> {
        self.pools
            .get_mut(pair)
            .map(|staged| &mut staged.pool)
            .ok_or(AmmError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ProtocolConfig;
    use crate::domain::{AccountId, Amount, TokenAddress};
    use crate::factory::PairFactory;

    fn pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(
            TokenAddress::from_bytes([1u8; 32]),
            TokenAddress::from_bytes([2u8; 32]),
        ) else {
            panic!("expected pair");
        };
        pair
    }

    fn registry() -> PairFactory {
        let Ok(f) = PairFactory::from_config(&ProtocolConfig::default()) else {
            panic!("expected factory");
        };
        f
    }

    #[test]
    fn missing_pool_is_not_found() {
        let mut exec = Execution::new(Timestamp::from_secs(5));
        assert!(matches!(exec.pool(&registry(), pair()), Err(AmmError::NotFound)));
    }

    #[test]
    fn created_pools_stay_local() {
        let reg = registry();
        let mut exec = Execution::new(Timestamp::from_secs(5));
        let Ok(pool) = exec.pool_or_create(&reg, pair()) else {
            panic!("expected staged pool");
        };
        let provider = AccountId::from_bytes([3u8; 32]);
        let Ok(_) = pool.mint(&provider, Amount::new(5_000), Amount::new(5_000)) else {
            panic!("expected mint");
        };
        assert_eq!(reg.pool_count(), 0);

        let Ok(again) = exec.pool(&reg, pair()) else {
            panic!("expected staged pool");
        };
        assert_eq!(again.reserves(), (Amount::new(5_000), Amount::new(5_000)));

        let (pools, batch) = exec.into_parts();
        assert_eq!(pools.len(), 1);
        assert!(pools[0].1);
        assert!(batch.is_empty());
    }

    #[test]
    fn staging_accrues_to_call_time() {
        let mut reg = registry();
        let Ok(_) = reg.create_pool(pair()) else {
            panic!("expected pool");
        };
        let mut exec = Execution::new(Timestamp::from_secs(42));
        let Ok(pool) = exec.pool(&reg, pair()) else {
            panic!("expected staged pool");
        };
        assert_eq!(pool.block_timestamp_last(), Timestamp::from_secs(42));
    }
}
