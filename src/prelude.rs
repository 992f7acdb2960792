//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use kwikswap_amm::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, AddLiquidity, Amount, Asset, BasisPoints, Deadline, FeeTier, Liquidity,
    MigrationRequest, RemoveLiquidity, RouteAmounts, SwapExactIn, SwapExactOut, SwapPath,
    Timestamp, TokenAddress, TokenPair,
};

pub use crate::traits::{
    Clock, FromConfig, Ledger, LiquiditySource, ManualClock, NativeWrapper, PoolRegistry,
    SystemClock,
};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{ProtocolConfig, RouterConfig};

pub use crate::error::{AmmError, Result};

pub use crate::factory::PairFactory;
pub use crate::ledger::InMemoryLedger;
pub use crate::pools::ConstantProductPool;
pub use crate::router::Router;

#[cfg(feature = "migrator")]
pub use crate::{
    factory::LegacyFactory,
    migrator::{MigrationOutcome, Migrator},
    pools::LegacyExchange,
    traits::LegacyRegistry,
};
