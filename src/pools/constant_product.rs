//! Paired constant-product pool (`x · y = k`).
//!
//! # Swap (token0 → token1)
//!
//! 1. `out = ⌊ in·m·r1 / (r0·10 000 + in·m) ⌋` with `m = 10 000 − fee_bps`
//! 2. `r0 += in` (the fee stays in the pool)
//! 3. `r1 -= out`
//! 4. check `(r0'·10 000 − in·fee_bps) · r1'·10 000 ≥ r0·r1·10 000²`
//!
//! Step 4 can only fail if the pricing math is wrong; it surfaces as the
//! fatal [`AmmError::InvariantBroken`].
//!
//! # Shares
//!
//! | Case | Shares issued |
//! |------|---------------|
//! | first deposit | `⌊√(a0·a1)⌋ − MINIMUM_LIQUIDITY` (the lock goes to [`AccountId::BURN`]) |
//! | later deposits | `min(⌊a0·S/r0⌋, ⌊a1·S/r1⌋)` |
//!
//! Burning `s` shares pays `⌊s·r/S⌋` of each reserve.
//!
//! # Price oracle
//!
//! [`accrue`](ConstantProductPool::accrue) adds `reserve ratio × elapsed`
//! (Q112 fixed point) to two wrapping 256-bit accumulators.  The router
//! calls it once per call before touching the pool.

use std::collections::BTreeMap;

use primitive_types::{U256, U512};
use tracing::error;

use crate::config::ConstantProductConfig;
use crate::domain::{
    AccountId, Amount, Asset, FeeTier, Liquidity, LiquidityPosition, Rounding, SwapResult,
    Timestamp, TokenAddress, TokenPair, BPS_DENOMINATOR,
};
use crate::error::AmmError;
use crate::math::{
    get_amount_in, get_amount_out, mul_div, product, sqrt_product, CheckedArithmetic, Q112,
};
use crate::traits::{FromConfig, LiquiditySource};

/// A paired constant-product pool.
///
/// Created empty from a [`ConstantProductConfig`] via [`FromConfig`]; the
/// first [`mint`](Self::mint) sets the price.  All amounts are reported in
/// `(token0, token1)` order of the pool's [`TokenPair`].
///
/// # Example
///
/// ```rust
/// use kwikswap_amm::config::ConstantProductConfig;
/// use kwikswap_amm::domain::{AccountId, Amount, FeeTier, TokenAddress, TokenPair};
/// use kwikswap_amm::pools::ConstantProductPool;
/// use kwikswap_amm::traits::FromConfig;
///
/// let t0 = TokenAddress::from_bytes([1u8; 32]);
/// let t1 = TokenAddress::from_bytes([2u8; 32]);
/// let pair = TokenPair::new(t0, t1).expect("distinct");
/// let cfg = ConstantProductConfig::new(pair, FeeTier::default()).expect("valid config");
/// let mut pool = ConstantProductPool::from_config(&cfg).expect("pool created");
///
/// let lp = AccountId::from_bytes([7u8; 32]);
/// pool.mint(&lp, Amount::new(1_000_000), Amount::new(1_000_000)).expect("minted");
///
/// let result = pool.swap(&t0, Amount::new(1_000), Amount::ZERO).expect("swap ok");
/// assert_eq!(result.amount_out(), Amount::new(996));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    token_pair: TokenPair,
    fee_tier: FeeTier,
    minimum_liquidity: Liquidity,
    reserve0: Amount,
    reserve1: Amount,
    total_supply: Liquidity,
    balances: BTreeMap<AccountId, Liquidity>,
    accumulated_fees0: Amount,
    accumulated_fees1: Amount,
    price0_cumulative: U256,
    price1_cumulative: U256,
    block_timestamp_last: Timestamp,
}

impl ConstantProductPool {
    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns `(reserve0, reserve1)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve0, self.reserve1)
    }

    /// Returns `(reserve_in, reserve_out)` for a swap selling `token_in`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    pub fn reserves_for(&self, token_in: &TokenAddress) -> Result<(Amount, Amount), AmmError> {
        self.token_pair.orient(token_in, self.reserves())
    }

    /// Outstanding shares, including the burn-address lock.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    /// `true` until the first deposit.
    #[must_use]
    pub const fn is_uninitialized(&self) -> bool {
        self.total_supply.is_zero()
    }

    /// Lifetime swap fees retained, per token.
    #[must_use]
    pub const fn accumulated_fees(&self) -> (Amount, Amount) {
        (self.accumulated_fees0, self.accumulated_fees1)
    }

    /// Q112 cumulative prices `(token1 per token0, token0 per token1)`.
    #[must_use]
    pub const fn price_cumulatives(&self) -> (U256, U256) {
        (self.price0_cumulative, self.price1_cumulative)
    }

    /// Time of the last [`accrue`](Self::accrue).
    #[must_use]
    pub const fn block_timestamp_last(&self) -> Timestamp {
        self.block_timestamp_last
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn shares_of(&self, owner: &AccountId) -> Liquidity {
        self.balances.get(owner).copied().unwrap_or(Liquidity::ZERO)
    }

    /// Snapshot of `owner`'s position.
    #[must_use]
    pub fn position(&self, owner: &AccountId) -> LiquidityPosition {
        let shares = self.shares_of(owner);
        let redeemable = if shares.is_zero() {
            (Amount::ZERO, Amount::ZERO)
        } else {
            self.pro_rata(shares).unwrap_or((Amount::ZERO, Amount::ZERO))
        };
        LiquidityPosition::new(*owner, shares, redeemable)
    }

    /// Every non-empty position, ordered by account.
    pub fn positions(&self) -> impl Iterator<Item = LiquidityPosition> + '_ {
        self.balances
            .keys()
            .map(|owner| self.position(owner))
            .filter(|p| !p.is_empty())
    }

    /// Output for selling `amount_in` of `token_in`, without changing state.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - Everything [`get_amount_out`] returns.
    pub fn quote(&self, token_in: &TokenAddress, amount_in: Amount) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        get_amount_out(amount_in, reserve_in, reserve_out, self.fee_tier)
    }

    /// Input of `token_in` needed to buy `amount_out` of the other token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - Everything [`get_amount_in`] returns.
    pub fn quote_in(
        &self,
        token_in: &TokenAddress,
        amount_out: Amount,
    ) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        get_amount_in(amount_out, reserve_in, reserve_out, self.fee_tier)
    }

    /// Sells `amount_in` of `token_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ExcessiveSlippage`] if the output is below `min_amount_out`.
    /// - [`AmmError::InsufficientLiquidity`] if a reserve is zero or the
    ///   output rounds to zero.
    /// - [`AmmError::Overflow`] if a reserve would exceed `u128`.
    /// - [`AmmError::InvariantBroken`] if the fee-adjusted product decreased.
    pub fn swap(
        &mut self,
        token_in: &TokenAddress,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        let amount_out = self.quote(token_in, amount_in)?;
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if amount_out < min_amount_out {
            return Err(AmmError::ExcessiveSlippage);
        }
        self.apply_swap(token_in, amount_in, amount_out)
    }

    /// Buys exactly `amount_out` of the token opposite `token_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ExcessiveInputRequired`] if the input exceeds
    ///   `max_amount_in`.
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out` would drain
    ///   the reserve.
    /// - As [`swap`](Self::swap) otherwise.
    pub fn swap_exact_out(
        &mut self,
        token_in: &TokenAddress,
        max_amount_in: Amount,
        amount_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        let amount_in = self.quote_in(token_in, amount_out)?;
        if amount_in > max_amount_in {
            return Err(AmmError::ExcessiveInputRequired);
        }
        self.apply_swap(token_in, amount_in, amount_out)
    }

    fn apply_swap(
        &mut self,
        token_in: &TokenAddress,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        let zero_for_one = self.token_pair.is_token0(token_in)?;
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        let new_in = reserve_in
            .checked_add(&amount_in)
            .ok_or(AmmError::Overflow("reserve_in overflow after swap"))?;
        let new_out = reserve_out.safe_sub(&amount_out)?;

        self.check_fee_adjusted_k(reserve_in, reserve_out, new_in, new_out, amount_in)?;

        let fee = Amount::new(mul_div(
            amount_in.get(),
            u128::from(self.fee_tier.basis_points().get()),
            u128::from(BPS_DENOMINATOR),
            Rounding::Down,
        )?);
        if zero_for_one {
            self.reserve0 = new_in;
            self.reserve1 = new_out;
            self.accumulated_fees0 = self.accumulated_fees0.safe_add(&fee)?;
        } else {
            self.reserve1 = new_in;
            self.reserve0 = new_out;
            self.accumulated_fees1 = self.accumulated_fees1.safe_add(&fee)?;
        }
        SwapResult::new(amount_in, amount_out, fee)
    }

    fn check_fee_adjusted_k(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        new_in: Amount,
        new_out: Amount,
        amount_in: Amount,
    ) -> Result<(), AmmError> {
        let scale = U256::from(BPS_DENOMINATOR);
        let fee_bps = U256::from(self.fee_tier.basis_points().get());
        let adjusted_in = U256::from(new_in.get()) * scale - U256::from(amount_in.get()) * fee_bps;
        let adjusted_out = U256::from(new_out.get()) * scale;
        let lhs = U512::from(adjusted_in) * U512::from(adjusted_out);
        let rhs =
            U512::from(product(reserve_in.get(), reserve_out.get())) * U512::from(scale * scale);
        if lhs < rhs {
            error!(
                pair = %self.token_pair,
                %reserve_in,
                %reserve_out,
                %amount_in,
                "constant product decreased across swap"
            );
            return Err(AmmError::InvariantBroken("fee-adjusted k decreased"));
        }
        Ok(())
    }

    /// Deposits `(amount0, amount1)` and credits `to` with new shares.
    ///
    /// The whole of both amounts is absorbed; an off-ratio deposit gives
    /// the excess to existing holders.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityMinted`] if no share would be
    ///   issued (including a first deposit of `√(a0·a1) ≤ MINIMUM_LIQUIDITY`).
    /// - [`AmmError::Overflow`] if a reserve would exceed `u128`.
    pub fn mint(
        &mut self,
        to: &AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Liquidity, AmmError> {
        let new0 = self
            .reserve0
            .checked_add(&amount0)
            .ok_or(AmmError::Overflow("reserve0 overflow on mint"))?;
        let new1 = self
            .reserve1
            .checked_add(&amount1)
            .ok_or(AmmError::Overflow("reserve1 overflow on mint"))?;

        let minted = if self.total_supply.is_zero() {
            let root = Liquidity::new(sqrt_product(amount0.get(), amount1.get()));
            let minted = root
                .checked_sub(&self.minimum_liquidity)
                .ok_or(AmmError::InsufficientLiquidityMinted)?;
            if minted.is_zero() {
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            self.credit(&AccountId::BURN, self.minimum_liquidity)?;
            self.total_supply = self.minimum_liquidity;
            minted
        } else {
            let supply = self.total_supply.get();
            let by0 = mul_div(amount0.get(), supply, self.reserve0.get(), Rounding::Down)?;
            let by1 = mul_div(amount1.get(), supply, self.reserve1.get(), Rounding::Down)?;
            Liquidity::new(by0.min(by1))
        };
        if minted.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }

        self.credit(to, minted)?;
        self.total_supply = self.total_supply.safe_add(&minted)?;
        self.reserve0 = new0;
        self.reserve1 = new1;
        Ok(minted)
    }

    /// Burns `shares` held by `owner` and releases the pro-rata reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `owner` holds fewer shares.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is zero.
    pub fn burn(
        &mut self,
        owner: &AccountId,
        shares: Liquidity,
    ) -> Result<(Amount, Amount), AmmError> {
        if self.shares_of(owner) < shares {
            return Err(AmmError::InsufficientBalance);
        }
        let (amount0, amount1) = self.pro_rata(shares)?;
        self.debit(owner, shares)?;
        self.total_supply = self.total_supply.safe_sub(&shares)?;
        self.reserve0 = self.reserve0.safe_sub(&amount0)?;
        self.reserve1 = self.reserve1.safe_sub(&amount1)?;
        Ok((amount0, amount1))
    }

    /// Moves `shares` between two accounts.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if `from` holds fewer shares.
    pub fn transfer_shares(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        shares: Liquidity,
    ) -> Result<(), AmmError> {
        if self.shares_of(from) < shares {
            return Err(AmmError::InsufficientBalance);
        }
        self.debit(from, shares)?;
        self.credit(to, shares)
    }

    /// Advances the price accumulators to `now`.
    ///
    /// A no-op when no time has passed or a reserve is empty, apart from
    /// moving the timestamp forward.
    pub fn accrue(&mut self, now: Timestamp) {
        let elapsed = now.saturating_elapsed_since(self.block_timestamp_last);
        if elapsed == 0 {
            return;
        }
        if !self.reserve0.is_zero() && !self.reserve1.is_zero() {
            let elapsed = U256::from(elapsed);
            let q = U256::from(Q112);
            let price0 = U256::from(self.reserve1.get()) * q / U256::from(self.reserve0.get());
            let price1 = U256::from(self.reserve0.get()) * q / U256::from(self.reserve1.get());
            self.price0_cumulative = self
                .price0_cumulative
                .overflowing_add(price0.overflowing_mul(elapsed).0)
                .0;
            self.price1_cumulative = self
                .price1_cumulative
                .overflowing_add(price1.overflowing_mul(elapsed).0)
                .0;
        }
        self.block_timestamp_last = now;
    }

    fn pro_rata(&self, shares: Liquidity) -> Result<(Amount, Amount), AmmError> {
        if shares > self.total_supply {
            return Err(AmmError::InsufficientLiquidity);
        }
        let supply = self.total_supply.get();
        let amount0 = mul_div(shares.get(), self.reserve0.get(), supply, Rounding::Down)?;
        let amount1 = mul_div(shares.get(), self.reserve1.get(), supply, Rounding::Down)?;
        if amount0 == 0 || amount1 == 0 {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        Ok((Amount::new(amount0), Amount::new(amount1)))
    }

    fn credit(&mut self, owner: &AccountId, shares: Liquidity) -> Result<(), AmmError> {
        let balance = self.balances.entry(*owner).or_insert(Liquidity::ZERO);
        *balance = balance.safe_add(&shares)?;
        Ok(())
    }

    fn debit(&mut self, owner: &AccountId, shares: Liquidity) -> Result<(), AmmError> {
        let remaining = self.shares_of(owner).safe_sub(&shares)?;
        if remaining.is_zero() {
            self.balances.remove(owner);
        } else {
            self.balances.insert(*owner, remaining);
        }
        Ok(())
    }
}

impl FromConfig<ConstantProductConfig> for ConstantProductPool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ConstantProductConfig::validate`].
    fn from_config(config: &ConstantProductConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            token_pair: *config.token_pair(),
            fee_tier: config.fee_tier(),
            minimum_liquidity: config.minimum_liquidity(),
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            total_supply: Liquidity::ZERO,
            balances: BTreeMap::new(),
            accumulated_fees0: Amount::ZERO,
            accumulated_fees1: Amount::ZERO,
            price0_cumulative: U256::zero(),
            price1_cumulative: U256::zero(),
            block_timestamp_last: Timestamp::default(),
        })
    }
}

impl LiquiditySource for ConstantProductPool {
    fn assets(&self) -> (Asset, Asset) {
        (
            Asset::Token(self.token_pair.token0()),
            Asset::Token(self.token_pair.token1()),
        )
    }

    fn reserves(&self) -> (Amount, Amount) {
        (self.reserve0, self.reserve1)
    }

    fn total_shares(&self) -> Liquidity {
        self.total_supply
    }

    fn shares_of(&self, owner: &AccountId) -> Liquidity {
        Self::shares_of(self, owner)
    }

    fn preview_withdraw(&self, shares: Liquidity) -> Result<(Amount, Amount), AmmError> {
        self.pro_rata(shares)
    }

    fn withdraw(
        &mut self,
        owner: &AccountId,
        shares: Liquidity,
    ) -> Result<(Amount, Amount), AmmError> {
        self.burn(owner, shares)
    }

    fn deposit(
        &mut self,
        owner: &AccountId,
        amounts: (Amount, Amount),
    ) -> Result<(Liquidity, (Amount, Amount)), AmmError> {
        let minted = self.mint(owner, amounts.0, amounts.1)?;
        Ok((minted, amounts))
    }
}
