//! Legacy exchanges and migration of their positions into paired pools.

#![cfg(feature = "migrator")]
#![allow(clippy::panic)]

use kwikswap_amm::config::{LegacySettings, ProtocolConfig};
use kwikswap_amm::domain::{
    AccountId, AddLiquidity, Amount, Asset, Deadline, Liquidity, MigrationRequest, RemoveLiquidity,
    Timestamp, TokenAddress,
};
use kwikswap_amm::error::AmmError;
use kwikswap_amm::factory::{LegacyFactory, PairFactory};
use kwikswap_amm::ledger::InMemoryLedger;
use kwikswap_amm::migrator::Migrator;
use kwikswap_amm::router::Router;
use kwikswap_amm::traits::{
    FromConfig, Ledger, LegacyRegistry, LiquiditySource, ManualClock, PoolRegistry,
};
use tracing_subscriber::EnvFilter;

type TestRouter = Router<PairFactory, InMemoryLedger, ManualClock>;

const NOW: Timestamp = Timestamp::from_secs(5_000);
const FUNDS: u128 = 10_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn token() -> TokenAddress {
    TokenAddress::from_bytes([0x70; 32])
}

fn alice() -> AccountId {
    AccountId::from_bytes([0xa1; 32])
}

fn bob() -> AccountId {
    AccountId::from_bytes([0xb0; 32])
}

fn carol() -> AccountId {
    AccountId::from_bytes([0xc4; 32])
}

fn config() -> ProtocolConfig {
    ProtocolConfig {
        minimum_liquidity: 1,
        legacy: LegacySettings {
            min_initial_native: 1_000,
            ..LegacySettings::default()
        },
        ..ProtocolConfig::default()
    }
}

/// Alice (1_000 native) and Bob (400 native) provide to the legacy
/// exchange, Carol trades against it, and Bob seeds the paired pool at
/// 4_000 tokens to 10_000 wrapped native.
fn world() -> (Migrator<LegacyFactory>, TestRouter) {
    init_tracing();
    let cfg = config();
    let mut ledger = InMemoryLedger::new(cfg.wrapped_native);
    for who in [alice(), bob(), carol()] {
        for asset in [
            Asset::Native,
            Asset::Token(token()),
            Asset::Token(cfg.wrapped_native),
        ] {
            let Ok(()) = ledger.credit(&who, &asset, Amount::new(FUNDS)) else {
                panic!("credit should succeed");
            };
        }
    }

    let Ok(mut legacy) = LegacyFactory::from_config(&cfg) else {
        panic!("valid config");
    };
    let Ok(_) = legacy.create_exchange(token()) else {
        panic!("exchange should be created");
    };
    for (who, native) in [(alice(), 1_000), (bob(), 400)] {
        let Ok(_) = legacy.add_liquidity(
            &mut ledger,
            who,
            token(),
            Amount::new(native),
            Liquidity::ZERO,
            Amount::new(1_000),
            NOW,
            Deadline::NEVER,
        ) else {
            panic!("legacy deposit should succeed");
        };
    }
    let Ok(_) = legacy.native_to_token_swap_input(
        &mut ledger,
        carol(),
        token(),
        Amount::new(100),
        Amount::new(1),
        NOW,
        Deadline::NEVER,
    ) else {
        panic!("legacy swap should succeed");
    };

    let Ok(pairs) = PairFactory::from_config(&cfg) else {
        panic!("valid config");
    };
    let Ok(mut router) = Router::new(pairs, ledger, ManualClock::at(NOW), cfg.router_config())
    else {
        panic!("router should build");
    };
    let seed = AddLiquidity::new(
        token(),
        cfg.wrapped_native,
        Amount::new(4_000),
        Amount::new(10_000),
        Deadline::NEVER,
    );
    let Ok(_) = router.add_liquidity(bob(), &seed) else {
        panic!("pool seed should succeed");
    };
    (Migrator::new(legacy), router)
}

/// Custody equals the legacy reserves plus the pool reserves, per asset.
fn assert_custody_balanced(migrator: &Migrator<LegacyFactory>, router: &TestRouter) {
    let Ok(exchange) = migrator.legacy().exchange(&token()) else {
        panic!("exchange should exist");
    };
    let (legacy_native, legacy_tokens) = exchange.reserves();
    let weth = router.config().wrapped_native();
    let Ok(pool) = router.pool(token(), weth) else {
        panic!("pool should exist");
    };
    let Ok((pool_tokens, pool_weth)) = pool.reserves_for(&token()) else {
        panic!("token in pair");
    };
    let ledger = router.ledger();
    assert_eq!(ledger.custody_of(&Asset::Native), legacy_native);
    assert_eq!(
        ledger.custody_of(&Asset::Token(token())),
        Amount::new(legacy_tokens.get() + pool_tokens.get())
    );
    assert_eq!(ledger.custody_of(&Asset::Token(weth)), pool_weth);
}

#[test]
fn legacy_setup_is_balanced() {
    let (migrator, router) = world();
    assert_custody_balanced(&migrator, &router);
}

#[test]
fn every_provider_can_migrate_out() {
    let (mut migrator, mut router) = world();

    for who in [alice(), bob()] {
        let Ok(exchange) = migrator.legacy().exchange(&token()) else {
            panic!("exchange should exist");
        };
        let Ok((native, tokens)) = exchange.preview_withdraw(exchange.shares_of(&who)) else {
            panic!("position should be redeemable");
        };
        let native_before = router.ledger().balance_of(&who, &Asset::Native);
        let tokens_before = router.ledger().balance_of(&who, &Asset::Token(token()));

        let req = MigrationRequest::new(token(), Amount::ZERO, Deadline::NEVER);
        let Ok(outcome) = migrator.migrate(&mut router, who, &req) else {
            panic!("migration should succeed");
        };

        assert_eq!(
            Amount::new(outcome.paired_amount().get() + outcome.token_refund().get()),
            tokens
        );
        assert_eq!(
            Amount::new(outcome.native_deposited().get() + outcome.native_refund().get()),
            native
        );
        assert_eq!(
            router.ledger().balance_of(&who, &Asset::Native),
            Amount::new(native_before.get() + outcome.native_refund().get())
        );
        assert_eq!(
            router.ledger().balance_of(&who, &Asset::Token(token())),
            Amount::new(tokens_before.get() + outcome.token_refund().get())
        );
        assert_custody_balanced(&migrator, &router);
    }

    let Ok(exchange) = migrator.legacy().exchange(&token()) else {
        panic!("exchange should exist");
    };
    assert_eq!(exchange.total_supply(), Liquidity::ZERO);
    assert_eq!(exchange.reserves(), (Amount::ZERO, Amount::ZERO));
}

#[test]
fn migrated_shares_are_redeemable_through_the_router() {
    let (mut migrator, mut router) = world();
    let req = MigrationRequest::new(token(), Amount::ZERO, Deadline::NEVER);
    let Ok(outcome) = migrator.migrate(&mut router, alice(), &req) else {
        panic!("migration should succeed");
    };

    let weth = router.config().wrapped_native();
    let remove = RemoveLiquidity::new(
        token(),
        weth,
        outcome.shares(),
        Deadline::NEVER,
    );
    let Ok((tokens, native)) = router.remove_liquidity_native(alice(), &remove) else {
        panic!("withdrawal should succeed");
    };
    assert!(tokens <= outcome.paired_amount());
    assert!(native <= outcome.native_deposited());
    assert!(native > Amount::ZERO);
}

#[test]
fn failed_migration_leaves_both_sides_untouched() {
    let (mut migrator, mut router) = world();
    let legacy_before = migrator.legacy().clone();
    let ledger_before = router.ledger().clone();
    let Ok(pool_before) = router.pool(token(), router.config().wrapped_native()).cloned() else {
        panic!("pool should exist");
    };

    let greedy = MigrationRequest::new(token(), Amount::new(FUNDS), Deadline::NEVER)
        .with_min_native(Amount::new(1));
    assert_eq!(
        migrator.migrate(&mut router, alice(), &greedy),
        Err(AmmError::InsufficientAAmount)
    );

    assert_eq!(migrator.legacy(), &legacy_before);
    assert_eq!(router.ledger(), &ledger_before);
    let Ok(pool_after) = router.pool(token(), router.config().wrapped_native()) else {
        panic!("pool should exist");
    };
    assert_eq!(pool_after, &pool_before);
}

#[test]
fn unknown_legacy_token_is_not_found() {
    let (mut migrator, mut router) = world();
    let other = TokenAddress::from_bytes([0x71; 32]);
    let req = MigrationRequest::new(other, Amount::ZERO, Deadline::NEVER);
    assert_eq!(migrator.migrate(&mut router, alice(), &req), Err(AmmError::NotFound));
    assert_eq!(router.registry().pool_count(), 1);
}
