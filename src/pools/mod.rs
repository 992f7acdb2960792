//! Pool bookkeeping.
//!
//! | Pool | Style | Feature |
//! |------|-------|---------|
//! | [`ConstantProductPool`] | paired `x · y = k` | always |
//! | [`LegacyExchange`] | token ⇄ native, shares in native units | `migrator` |
//!
//! Pools only track reserves and shares; custody is the ledger's job.

pub mod constant_product;
#[cfg(feature = "migrator")]
pub mod legacy_exchange;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use constant_product::ConstantProductPool;
#[cfg(feature = "migrator")]
pub use legacy_exchange::LegacyExchange;
