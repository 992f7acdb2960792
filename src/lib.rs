//! # Kwikswap AMM
//!
//! Constant-product liquidity pools, a multi-hop router over them and a
//! migrator that moves positions out of the legacy single-token
//! exchanges.
//!
//! Every pool holds two tokens and enforces `x · y = k` after fees.  Users
//! never touch pools directly: the [`Router`](router::Router) validates
//! deadlines and slippage bounds, moves assets through the
//! [`Ledger`](traits::Ledger) and wraps native currency on the way in and
//! out.  A router call either completes in full or leaves pools and
//! balances as they were.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `migrator` | yes | Legacy exchanges, their factory and the [`migrator`] |
//!
//! # Quick Start
//!
//! ```rust
//! use kwikswap_amm::config::ProtocolConfig;
//! use kwikswap_amm::domain::{
//!     AccountId, AddLiquidity, Amount, Asset, Deadline, SwapExactIn, SwapPath, TokenAddress,
//! };
//! use kwikswap_amm::factory::PairFactory;
//! use kwikswap_amm::ledger::InMemoryLedger;
//! use kwikswap_amm::router::Router;
//! use kwikswap_amm::traits::{FromConfig, ManualClock};
//!
//! let config = ProtocolConfig::default();
//! let usdc = TokenAddress::from_bytes([1u8; 32]);
//! let dai = TokenAddress::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([0xa1; 32]);
//!
//! // 1. Fund an account
//! let mut ledger = InMemoryLedger::new(config.wrapped_native);
//! ledger.credit(&alice, &Asset::Token(usdc), Amount::new(2_000_000)).expect("credit");
//! ledger.credit(&alice, &Asset::Token(dai), Amount::new(2_000_000)).expect("credit");
//!
//! // 2. Wire the router
//! let factory = PairFactory::from_config(&config).expect("valid config");
//! let clock = ManualClock::default();
//! let mut router = Router::new(factory, ledger, clock, config.router_config()).expect("router");
//!
//! // 3. Seed a pool; the first deposit creates it
//! let (a, b) = (Amount::new(1_000_000), Amount::new(1_000_000));
//! let add = AddLiquidity::new(usdc, dai, a, b, Deadline::NEVER);
//! router.add_liquidity(alice, &add).expect("deposit");
//!
//! // 4. Swap exact input, 0.30% fee
//! let path = SwapPath::new(vec![usdc, dai]).expect("path");
//! let swap = SwapExactIn::new(path, Amount::new(1_000), Amount::new(990), Deadline::NEVER);
//! let amounts = router.swap_exact_in(alice, &swap).expect("swap");
//! assert_eq!(amounts.amount_out(), Amount::new(996));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Migrator    │  legacy position -> paired pool
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │   Router     │  deadlines, slippage, native wrap, multi-hop
//! └──────┬──────┘
//!        │ staged pools + LedgerBatch, committed together
//!        ▼
//! ┌─────────────┐     ┌─────────────┐
//! │  Registry    │     │   Ledger     │  custody and native wrapper
//! │ (factories)  │     └─────────────┘
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │    Pools     │  ConstantProductPool, LegacyExchange
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │ Domain/Math  │  Amount, TokenPair, SwapPath, curve formulas
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`TokenPair`](domain::TokenPair), requests |
//! | [`math`]   | Checked and 256-bit arithmetic, the pricing formulas |
//! | [`config`] | [`ProtocolConfig`](config::ProtocolConfig) loaded from TOML and per-pool configs |
//! | [`traits`] | Seams: registries, ledger, clock, [`LiquiditySource`](traits::LiquiditySource) |
//! | [`pools`]  | [`ConstantProductPool`](pools::ConstantProductPool) and the legacy exchange |
//! | [`factory`] | Pool registries |
//! | [`ledger`] | In-memory custody and reversible transfer batches |
//! | [`router`] | The user-facing [`Router`](router::Router) |
//! | [`migrator`] | Legacy position migration (`migrator` feature) |
//! | [`error`]  | [`AmmError`](error::AmmError) |
//! | [`prelude`] | Common re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
#[cfg(feature = "migrator")]
pub mod migrator;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod traits;
