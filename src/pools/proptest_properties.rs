//! Property-based checks of the pool invariants.
//!
//! 1. **Round trip loses value**: A→B→A never returns more than was sold.
//! 2. **k never decreases** across a swap.
//! 3. **Quotes** grow with the input and stay below the fee-free spot rate.
//! 4. **Exact-out pricing** buys at least the requested amount.
//! 5. **Share conservation**: mint then burn never returns more than deposited.
//! 6. **Extreme reserves**: near `u128::MAX` pricing and swaps either
//!    succeed or report a typed error.

use proptest::prelude::*;

use crate::config::ConstantProductConfig;
use crate::error::AmmError;
use crate::domain::{AccountId, Amount, BasisPoints, FeeTier, TokenAddress, TokenPair};
use crate::math::{get_amount_in, get_amount_out, product};
use crate::pools::ConstantProductPool;
use crate::traits::FromConfig;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tok_a() -> TokenAddress {
    TokenAddress::from_bytes([1u8; 32])
}

fn tok_b() -> TokenAddress {
    TokenAddress::from_bytes([2u8; 32])
}

fn provider() -> AccountId {
    AccountId::from_bytes([9u8; 32])
}

fn make_pool(ra: u128, rb: u128, fee_bps: u32) -> ConstantProductPool {
    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("valid pair");
    };
    let Ok(cfg) = ConstantProductConfig::new(pair, FeeTier::new(BasisPoints::new(fee_bps))) else {
        panic!("valid config");
    };
    let Ok(mut pool) = ConstantProductPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok((a0, a1)) = pair.orient(&tok_a(), (Amount::new(ra), Amount::new(rb))) else {
        panic!("token in pair");
    };
    let Ok(_) = pool.mint(&provider(), a0, a1) else {
        panic!("seed mint");
    };
    pool
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000u128
}

/// Mostly huge reserves, reaching `u128::MAX`.
fn extreme_reserve_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![
        1 => reserve_strategy(),
        3 => (u128::MAX >> 16)..=u128::MAX,
    ]
}

fn fee_strategy() -> impl Strategy<Value = u32> {
    1u32..=1_000u32
}

// ---------------------------------------------------------------------------
// Swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let mut pool = make_pool(ra, rb, fee);

        let Ok(forward) = pool.swap(&tok_a(), Amount::new(swap_in), Amount::ZERO) else {
            return Ok(());
        };
        let Ok(back) = pool.swap(&tok_b(), forward.amount_out(), Amount::ZERO) else {
            return Ok(());
        };

        prop_assert!(
            back.amount_out().get() < swap_in,
            "round trip should lose value: final={} original={}",
            back.amount_out(), swap_in
        );
    }

    #[test]
    fn prop_k_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
        divisor in 2u128..=10_000u128,
        a_to_b in any::<bool>(),
    ) {
        let mut pool = make_pool(ra, rb, fee);
        let (r0, r1) = pool.reserves();
        let k_before = product(r0.get(), r1.get());

        let (token_in, reserve) = if a_to_b { (tok_a(), ra) } else { (tok_b(), rb) };
        let amount_in = (reserve / divisor).max(1);
        if pool.swap(&token_in, Amount::new(amount_in), Amount::ZERO).is_err() {
            return Ok(());
        }

        let (n0, n1) = pool.reserves();
        prop_assert!(product(n0.get(), n1.get()) >= k_before, "k decreased");
    }
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_monotonic_and_below_spot(
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee in fee_strategy(),
        small in 1u128..=1_000_000u128,
        extra in 1u128..=1_000_000u128,
    ) {
        let fee = FeeTier::new(BasisPoints::new(fee));
        let (r_in, r_out) = (Amount::new(r_in), Amount::new(r_out));
        let Ok(lo) = get_amount_out(Amount::new(small), r_in, r_out, fee) else {
            return Ok(());
        };
        let Ok(hi) = get_amount_out(Amount::new(small + extra), r_in, r_out, fee) else {
            return Ok(());
        };
        prop_assert!(hi >= lo, "quote not monotonic: {} then {}", lo, hi);

        // out / in < r_out / r_in
        prop_assert!(
            product(lo.get(), r_in.get()) < product(small, r_out.get()),
            "quote {} for {} at or above spot", lo, small
        );
    }

    #[test]
    fn prop_exact_out_buys_enough(
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee in fee_strategy(),
        divisor in 2u128..=10_000u128,
    ) {
        let fee = FeeTier::new(BasisPoints::new(fee));
        let want = (r_out / divisor).max(1);
        let (r_in, r_out) = (Amount::new(r_in), Amount::new(r_out));
        let Ok(needed) = get_amount_in(Amount::new(want), r_in, r_out, fee) else {
            return Ok(());
        };
        let Ok(got) = get_amount_out(needed, r_in, r_out, fee) else {
            return Ok(());
        };
        prop_assert!(got.get() >= want, "paid {} for {} < {}", needed, got, want);
    }
}

// ---------------------------------------------------------------------------
// Shares
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_mint_then_burn_conserves(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in 1u128..=1_000_000_000u128,
        db in 1u128..=1_000_000_000u128,
    ) {
        let mut pool = make_pool(ra, rb, 30);
        let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
            return Ok(());
        };
        let Ok((d0, d1)) = pair.orient(&tok_a(), (Amount::new(da), Amount::new(db))) else {
            return Ok(());
        };
        let depositor = AccountId::from_bytes([0xd0; 32]);

        let Ok(minted) = pool.mint(&depositor, d0, d1) else {
            return Ok(());
        };
        let Ok((w0, w1)) = pool.burn(&depositor, minted) else {
            return Ok(());
        };

        prop_assert!(w0 <= d0, "token0 grew: {} > {}", w0, d0);
        prop_assert!(w1 <= d1, "token1 grew: {} > {}", w1, d1);
    }
}

// ---------------------------------------------------------------------------
// Extreme reserves
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_k_never_decreases_at_extremes(
        ra in extreme_reserve_strategy(),
        rb in extreme_reserve_strategy(),
        fee in fee_strategy(),
        divisor in 1u128..=10_000u128,
        a_to_b in any::<bool>(),
    ) {
        let mut pool = make_pool(ra, rb, fee);
        let (r0, r1) = pool.reserves();
        let k_before = product(r0.get(), r1.get());

        let (token_in, reserve) = if a_to_b { (tok_a(), ra) } else { (tok_b(), rb) };
        let amount_in = (reserve / divisor).max(1);
        match pool.swap(&token_in, Amount::new(amount_in), Amount::ZERO) {
            Ok(_) => {
                let (n0, n1) = pool.reserves();
                prop_assert!(product(n0.get(), n1.get()) >= k_before, "k decreased");
            }
            Err(AmmError::Overflow(_) | AmmError::InsufficientLiquidity) => {
                prop_assert_eq!(pool.reserves(), (r0, r1));
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn prop_exact_out_at_extremes(
        r_in in extreme_reserve_strategy(),
        r_out in extreme_reserve_strategy(),
        fee in fee_strategy(),
        divisor in 2u128..=10_000u128,
    ) {
        let fee = FeeTier::new(BasisPoints::new(fee));
        let want = (r_out / divisor).max(1);
        let (r_in, r_out) = (Amount::new(r_in), Amount::new(r_out));
        match get_amount_in(Amount::new(want), r_in, r_out, fee) {
            Ok(needed) => {
                let Ok(got) = get_amount_out(needed, r_in, r_out, fee) else {
                    return Err(TestCaseError::fail("amount_out failed for a priced input"));
                };
                prop_assert!(got.get() >= want, "paid {} for {} < {}", needed, got, want);
            }
            Err(AmmError::Overflow(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }
}
