//! Seams between the core and its collaborators.
//!
//! - [`FromConfig`]: validated construction
//! - [`LiquiditySource`]: withdraw/deposit over either pool shape
//! - [`PoolRegistry`] (and `LegacyRegistry`): keyed pool stores
//! - [`Ledger`] / [`NativeWrapper`]: asset custody
//! - [`Clock`]: time for deadlines and the price oracle

mod clock;
mod from_config;
mod ledger;
mod liquidity_source;
mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use from_config::FromConfig;
pub use ledger::{Ledger, NativeWrapper};
pub use liquidity_source::LiquiditySource;
#[cfg(feature = "migrator")]
pub use registry::LegacyRegistry;
pub use registry::PoolRegistry;
