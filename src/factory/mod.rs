//! Keyed stores of pools.
//!
//! [`PairFactory`] implements [`PoolRegistry`] and is what the router
//! resolves paths against.  With the `migrator` feature, [`LegacyFactory`]
//! does the same for the legacy single-token exchanges.
//!
//! # Usage
//!
//! ```rust
//! use kwikswap_amm::config::ProtocolConfig;
//! use kwikswap_amm::domain::{AccountId, Amount, TokenAddress, TokenPair};
//! use kwikswap_amm::factory::PairFactory;
//! use kwikswap_amm::traits::{FromConfig, PoolRegistry};
//!
//! let mut factory = PairFactory::from_config(&ProtocolConfig::default()).expect("valid");
//! let a = TokenAddress::from_bytes([1u8; 32]);
//! let b = TokenAddress::from_bytes([2u8; 32]);
//! let pair = TokenPair::new(a, b).expect("distinct");
//!
//! let mut pool = factory.create_pool(pair).expect("created").clone();
//! pool.mint(&AccountId::from_bytes([7u8; 32]), Amount::new(10_000), Amount::new(10_000))
//!     .expect("minted");
//! factory.store_pool(pool).expect("stored");
//! assert_eq!(factory.get_pool(&pair).expect("found").reserves().0, Amount::new(10_000));
//! ```
//!
//! [`PoolRegistry`]: crate::traits::PoolRegistry

#[cfg(feature = "migrator")]
mod legacy_factory;
mod pair_factory;

#[cfg(feature = "migrator")]
pub use legacy_factory::LegacyFactory;
pub use pair_factory::PairFactory;
