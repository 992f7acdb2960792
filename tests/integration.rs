//! End-to-end flows through the public API: configuration, router,
//! ledger custody and the pools behind them.

#![allow(clippy::panic)]

use std::collections::BTreeMap;

use kwikswap_amm::config::ProtocolConfig;
use kwikswap_amm::domain::{
    AccountId, AddLiquidity, Amount, Asset, Deadline, Liquidity, RemoveLiquidity, SwapExactIn,
    SwapExactOut, SwapPath, Timestamp, TokenAddress,
};
use kwikswap_amm::error::AmmError;
use kwikswap_amm::factory::PairFactory;
use kwikswap_amm::ledger::InMemoryLedger;
use kwikswap_amm::router::Router;
use kwikswap_amm::traits::{FromConfig, Ledger, ManualClock, PoolRegistry};
use tracing_subscriber::EnvFilter;

type TestRouter = Router<PairFactory, InMemoryLedger, ManualClock>;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tok(b: u8) -> TokenAddress {
    TokenAddress::from_bytes([b; 32])
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

const FUNDS: u128 = 10_000_000;

/// A router over `config` with Alice and Bob funded in native, the
/// wrapped token and tokens 1 to 4.  Carol starts empty.
fn router_with(config: &ProtocolConfig) -> TestRouter {
    init_tracing();
    let mut ledger = InMemoryLedger::new(config.wrapped_native);
    let mut assets = vec![Asset::Native, Asset::Token(config.wrapped_native)];
    assets.extend((1..=4).map(|b| Asset::Token(tok(b))));
    for who in [alice(), bob()] {
        for asset in &assets {
            let Ok(()) = ledger.credit(&who, asset, Amount::new(FUNDS)) else {
                panic!("credit should succeed");
            };
        }
    }
    let Ok(factory) = PairFactory::from_config(config) else {
        panic!("valid config");
    };
    let clock = ManualClock::at(Timestamp::from_secs(1_000));
    let Ok(router) = Router::new(factory, ledger, clock, config.router_config()) else {
        panic!("router should build");
    };
    router
}

fn router() -> TestRouter {
    router_with(&ProtocolConfig {
        minimum_liquidity: 1,
        ..ProtocolConfig::default()
    })
}

fn seed(router: &mut TestRouter, a: TokenAddress, b: TokenAddress, ra: u128, rb: u128) {
    let Ok(_) = router.add_liquidity(bob(), &deposit(a, b, ra, rb)) else {
        panic!("seed deposit should succeed");
    };
}

fn path(tokens: &[TokenAddress]) -> SwapPath {
    let Ok(p) = SwapPath::new(tokens.to_vec()) else {
        panic!("valid path");
    };
    p
}

fn deposit(a: TokenAddress, b: TokenAddress, amount_a: u128, amount_b: u128) -> AddLiquidity {
    AddLiquidity::new(a, b, Amount::new(amount_a), Amount::new(amount_b), Deadline::NEVER)
}

fn sell(tokens: &[TokenAddress], amount_in: u128, min_out: u128) -> SwapExactIn {
    let (amount_in, min_out) = (Amount::new(amount_in), Amount::new(min_out));
    SwapExactIn::new(path(tokens), amount_in, min_out, Deadline::NEVER)
}

fn buy(tokens: &[TokenAddress], amount_out: u128, max_in: u128) -> SwapExactOut {
    let (amount_out, max_in) = (Amount::new(amount_out), Amount::new(max_in));
    SwapExactOut::new(path(tokens), amount_out, max_in, Deadline::NEVER)
}

fn reserves(router: &TestRouter, a: TokenAddress, b: TokenAddress) -> (Amount, Amount) {
    let Ok(pool) = router.pool(a, b) else {
        panic!("pool should exist");
    };
    let Ok(r) = pool.reserves_for(&a) else {
        panic!("token in pair");
    };
    r
}

/// Every token held in custody is accounted for by some pool reserve.
fn assert_custody_matches_reserves(router: &TestRouter) {
    let mut expected: BTreeMap<TokenAddress, u128> = BTreeMap::new();
    for pool in router.registry().pools() {
        let (r0, r1) = pool.reserves();
        *expected.entry(pool.token_pair().token0()).or_default() += r0.get();
        *expected.entry(pool.token_pair().token1()).or_default() += r1.get();
    }
    for (token, total) in expected {
        assert_eq!(
            router.ledger().custody_of(&Asset::Token(token)),
            Amount::new(total),
            "custody of {token} diverged from pool reserves"
        );
    }
    assert_eq!(router.ledger().custody_of(&Asset::Native), Amount::ZERO);
}

// ===========================================================================
// Suite 1: Liquidity
// ===========================================================================

#[test]
fn deposit_is_scaled_to_the_pool_ratio() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 1_000, 2_000);

    let req = deposit(tok(1), tok(2), 100, 100);
    let Ok((a, b, _)) = r.add_liquidity(alice(), &req) else {
        panic!("deposit should succeed");
    };
    assert_eq!((a, b), (Amount::new(50), Amount::new(100)));
    assert_eq!(reserves(&r, tok(1), tok(2)), (Amount::new(1_050), Amount::new(2_100)));
    assert_eq!(
        r.ledger().balance_of(&alice(), &Asset::Token(tok(1))),
        Amount::new(FUNDS - 50)
    );
    assert_custody_matches_reserves(&r);
}

#[test]
fn deposit_then_withdraw_returns_at_most_what_went_in() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 7_000, 3_000);

    let add = deposit(tok(1), tok(2), 700, 300);
    let Ok((a, b, shares)) = r.add_liquidity(alice(), &add) else {
        panic!("deposit should succeed");
    };
    let remove = RemoveLiquidity::new(tok(1), tok(2), shares, Deadline::NEVER);
    let Ok((out_a, out_b)) = r.remove_liquidity(alice(), &remove) else {
        panic!("withdraw should succeed");
    };
    assert!(out_a <= a);
    assert!(out_b <= b);
    let Ok(pool) = r.pool(tok(1), tok(2)) else {
        panic!("pool should exist");
    };
    assert_eq!(pool.shares_of(&alice()), Liquidity::ZERO);
    assert_custody_matches_reserves(&r);
}

#[test]
fn withdrawal_can_pay_a_third_party() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 4_000, 4_000);
    let Ok(pool) = r.pool(tok(1), tok(2)) else {
        panic!("pool should exist");
    };
    let half = Liquidity::new(pool.shares_of(&bob()).get() / 2);

    let remove = RemoveLiquidity::new(tok(1), tok(2), half, Deadline::NEVER).to(carol());
    let Ok((a, b)) = r.remove_liquidity(bob(), &remove) else {
        panic!("withdraw should succeed");
    };
    assert_eq!(r.ledger().balance_of(&carol(), &Asset::Token(tok(1))), a);
    assert_eq!(r.ledger().balance_of(&carol(), &Asset::Token(tok(2))), b);
}

#[test]
fn first_deposit_below_the_lock_creates_nothing() {
    let mut r = router_with(&ProtocolConfig::default());
    let req = deposit(tok(1), tok(2), 1_000, 1_000);
    assert_eq!(
        r.add_liquidity(alice(), &req),
        Err(AmmError::InsufficientLiquidityMinted)
    );
    assert_eq!(r.registry().pool_count(), 0);
    assert_eq!(r.ledger().custody_of(&Asset::Token(tok(1))), Amount::ZERO);
}

// ===========================================================================
// Suite 2: Multi-hop swaps
// ===========================================================================

#[test]
fn exact_in_across_three_hops_matches_the_quote() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 100_000, 200_000);
    seed(&mut r, tok(2), tok(3), 300_000, 100_000);
    seed(&mut r, tok(3), tok(4), 50_000, 80_000);

    let route = path(&[tok(1), tok(2), tok(3), tok(4)]);
    let Ok(quoted) = r.get_amounts_out(Amount::new(5_000), &route) else {
        panic!("quote should succeed");
    };
    let req = SwapExactIn::new(route, Amount::new(5_000), quoted.amount_out(), Deadline::NEVER);
    let Ok(executed) = r.swap_exact_in(alice(), &req) else {
        panic!("swap should succeed");
    };
    assert_eq!(executed, quoted);
    assert_eq!(executed.len(), 4);
    assert_eq!(
        r.ledger().balance_of(&alice(), &Asset::Token(tok(4))),
        Amount::new(FUNDS + quoted.amount_out().get())
    );
    assert_custody_matches_reserves(&r);
}

#[test]
fn exact_out_across_two_hops_charges_the_quote() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 100_000, 100_000);
    seed(&mut r, tok(2), tok(3), 100_000, 100_000);

    let route = path(&[tok(1), tok(2), tok(3)]);
    let Ok(quoted) = r.get_amounts_in(Amount::new(1_000), &route) else {
        panic!("quote should succeed");
    };
    let req = SwapExactOut::new(route, Amount::new(1_000), quoted.amount_in(), Deadline::NEVER);
    let Ok(executed) = r.swap_exact_out(alice(), &req) else {
        panic!("swap should succeed");
    };
    assert_eq!(executed.amount_out(), Amount::new(1_000));
    assert_eq!(executed.amount_in(), quoted.amount_in());
    assert_custody_matches_reserves(&r);
}

#[test]
fn failed_three_hop_swap_changes_no_reserve() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 100_000, 200_000);
    seed(&mut r, tok(2), tok(3), 300_000, 100_000);
    seed(&mut r, tok(3), tok(4), 50_000, 80_000);
    let before = [
        reserves(&r, tok(1), tok(2)),
        reserves(&r, tok(2), tok(3)),
        reserves(&r, tok(3), tok(4)),
    ];
    let ledger_before = r.ledger().clone();

    // Carol has no tokens: every pool is staged before the payment fails.
    let route = path(&[tok(1), tok(2), tok(3), tok(4)]);
    let req = SwapExactIn::new(route.clone(), Amount::new(5_000), Amount::ZERO, Deadline::NEVER);
    assert_eq!(r.swap_exact_in(carol(), &req), Err(AmmError::InsufficientBalance));

    // Alice asks for more than the route can give.
    let greedy = SwapExactIn::new(route, Amount::new(5_000), Amount::new(80_000), Deadline::NEVER);
    assert_eq!(r.swap_exact_in(alice(), &greedy), Err(AmmError::ExcessiveSlippage));

    let after = [
        reserves(&r, tok(1), tok(2)),
        reserves(&r, tok(2), tok(3)),
        reserves(&r, tok(3), tok(4)),
    ];
    assert_eq!(before, after);
    assert_eq!(r.ledger(), &ledger_before);
}

#[test]
fn missing_middle_pool_is_not_found() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 10_000, 10_000);
    seed(&mut r, tok(3), tok(4), 10_000, 10_000);
    let req = SwapExactIn::new(
        path(&[tok(1), tok(2), tok(3), tok(4)]),
        Amount::new(100),
        Amount::ZERO,
        Deadline::NEVER,
    );
    assert_eq!(r.swap_exact_in(alice(), &req), Err(AmmError::NotFound));
}

#[test]
fn expired_calls_are_rejected_after_the_clock_moves() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 10_000, 10_000);
    let req = SwapExactIn::new(
        path(&[tok(1), tok(2)]),
        Amount::new(100),
        Amount::ZERO,
        Deadline::from(1_060),
    );
    let Ok(_) = r.swap_exact_in(alice(), &req) else {
        panic!("swap within deadline should succeed");
    };
    r.clock().advance(61);
    assert_eq!(r.swap_exact_in(alice(), &req), Err(AmmError::Expired));
}

// ===========================================================================
// Suite 3: Native currency
// ===========================================================================

#[test]
fn native_round_trip_keeps_custody_balanced() {
    let mut r = router();
    let weth = r.config().wrapped_native();

    let add = deposit(tok(1), weth, 50_000, 20_000);
    let Ok((_, _, shares)) = r.add_liquidity_native(alice(), &add) else {
        panic!("native deposit should succeed");
    };
    assert_eq!(
        r.ledger().balance_of(&alice(), &Asset::Native),
        Amount::new(FUNDS - 20_000)
    );
    assert_eq!(
        r.ledger().balance_of(&alice(), &Asset::Token(weth)),
        Amount::new(FUNDS)
    );
    assert_custody_matches_reserves(&r);

    let purchase = sell(&[weth, tok(1)], 1_000, 0);
    let Ok(bought) = r.swap_exact_native_for_tokens(bob(), &purchase) else {
        panic!("native buy should succeed");
    };
    assert!(bought.amount_out() > Amount::ZERO);

    let exit = sell(&[tok(1), weth], 500, 0);
    let Ok(sold) = r.swap_exact_tokens_for_native(bob(), &exit) else {
        panic!("native sell should succeed");
    };
    assert_eq!(
        r.ledger().balance_of(&bob(), &Asset::Native),
        Amount::new(FUNDS - 1_000 + sold.amount_out().get())
    );
    assert_custody_matches_reserves(&r);

    let remove = RemoveLiquidity::new(tok(1), weth, shares, Deadline::NEVER);
    let Ok((_, native_out)) = r.remove_liquidity_native(alice(), &remove) else {
        panic!("native withdrawal should succeed");
    };
    assert!(native_out > Amount::ZERO);
    assert_eq!(
        r.ledger().balance_of(&alice(), &Asset::Token(weth)),
        Amount::new(FUNDS)
    );
    assert_custody_matches_reserves(&r);
}

#[test]
fn exact_output_native_swaps() {
    let mut r = router();
    let weth = r.config().wrapped_native();
    seed(&mut r, weth, tok(1), 100_000, 100_000);

    let purchase = buy(&[weth, tok(1)], 500, 600);
    let Ok(paid) = r.swap_native_for_exact_tokens(alice(), &purchase) else {
        panic!("native exact-out buy should succeed");
    };
    assert_eq!(
        r.ledger().balance_of(&alice(), &Asset::Native),
        Amount::new(FUNDS - paid.amount_in().get())
    );

    let exit = buy(&[tok(1), weth], 500, 600);
    let Ok(_) = r.swap_tokens_for_exact_native(alice(), &exit) else {
        panic!("native exact-out sell should succeed");
    };
    assert_eq!(
        r.ledger().balance_of(&alice(), &Asset::Native),
        Amount::new(FUNDS - paid.amount_in().get() + 500)
    );
    assert_custody_matches_reserves(&r);
}

#[test]
fn native_paths_must_touch_the_wrapped_token() {
    let mut r = router();
    seed(&mut r, tok(1), tok(2), 10_000, 10_000);
    let req = sell(&[tok(1), tok(2)], 100, 0);
    let Err(AmmError::InvalidPath(_)) = r.swap_exact_native_for_tokens(alice(), &req) else {
        panic!("expected InvalidPath");
    };
    let Err(AmmError::InvalidPath(_)) = r.swap_exact_tokens_for_native(alice(), &req) else {
        panic!("expected InvalidPath");
    };
    let add = deposit(tok(1), tok(2), 100, 100);
    let Err(AmmError::InvalidToken(_)) = r.add_liquidity_native(alice(), &add) else {
        panic!("expected InvalidToken");
    };
}

// ===========================================================================
// Suite 4: Configuration
// ===========================================================================

#[test]
fn configuration_file_drives_the_fee() {
    let file = std::env::temp_dir().join(format!("kwikswap-{}.toml", std::process::id()));
    let Ok(()) = std::fs::write(&file, "fee_bps = 25\nminimum_liquidity = 1\n") else {
        panic!("temp file should be writable");
    };
    let loaded = ProtocolConfig::load(&file);
    let _ = std::fs::remove_file(&file);
    let Ok(config) = loaded else {
        panic!("config should load");
    };

    let mut r = router_with(&config);
    seed(&mut r, tok(1), tok(2), 1_000_000, 1_000_000);
    let req = sell(&[tok(1), tok(2)], 10_000, 0);
    let Ok(amounts) = r.swap_exact_in(alice(), &req) else {
        panic!("swap should succeed");
    };
    // 0.25% fee; the default 0.30% would give 9_871.
    assert_eq!(amounts.amount_out(), Amount::new(9_876));
}

#[test]
fn mismatched_wrapper_is_rejected() {
    let config = ProtocolConfig::default();
    let ledger = InMemoryLedger::new(tok(9));
    let Ok(factory) = PairFactory::from_config(&config) else {
        panic!("valid config");
    };
    let Err(AmmError::InvalidConfiguration(_)) =
        Router::new(factory, ledger, ManualClock::default(), config.router_config())
    else {
        panic!("expected InvalidConfiguration");
    };
}
