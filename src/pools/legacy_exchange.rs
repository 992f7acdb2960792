//! Legacy single-token exchange (token ⇄ native).
//!
//! The first-generation design: one exchange per token, always priced
//! against the native asset, with shares denominated in native units.
//!
//! | Operation | Rule |
//! |-----------|------|
//! | first deposit | `native ≥ min_initial_native`; shares = `native`; tokens = `max_tokens` |
//! | later deposit | tokens = `⌊native·T/N⌋ + 1`; shares = `⌊native·S/N⌋` |
//! | withdrawal | `⌊s·N/S⌋` native, `⌊s·T/S⌋` tokens |
//! | swap | same fee-adjusted input price as the paired pool |
//!
//! Only bookkeeping lives here; the exchange factory moves the assets.

use std::collections::BTreeMap;

use crate::config::LegacyExchangeConfig;
use crate::domain::{AccountId, Amount, Asset, FeeTier, Liquidity, Rounding, TokenAddress};
use crate::error::AmmError;
use crate::math::{get_amount_in, get_amount_out, mul_div, CheckedArithmetic};
use crate::traits::{FromConfig, LiquiditySource};

/// A legacy exchange between one token and the native asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyExchange {
    token: TokenAddress,
    fee_tier: FeeTier,
    min_initial_native: Amount,
    native_reserve: Amount,
    token_reserve: Amount,
    total_supply: Liquidity,
    balances: BTreeMap<AccountId, Liquidity>,
}

impl LegacyExchange {
    /// The token side.
    #[must_use]
    pub const fn token(&self) -> TokenAddress {
        self.token
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// `(native_reserve, token_reserve)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.native_reserve, self.token_reserve)
    }

    /// Outstanding shares.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn shares_of(&self, owner: &AccountId) -> Liquidity {
        self.balances.get(owner).copied().unwrap_or(Liquidity::ZERO)
    }

    /// Deposits `native_amount` plus the matching tokens.
    ///
    /// Returns the shares minted and the tokens taken.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if an amount is zero or the first
    ///   deposit is below `min_initial_native`.
    /// - [`AmmError::ExcessiveInputRequired`] if the matching tokens exceed
    ///   `max_tokens`.
    /// - [`AmmError::InsufficientLiquidityMinted`] if fewer than
    ///   `min_liquidity` (or zero) shares would be minted.
    pub fn add_liquidity(
        &mut self,
        provider: &AccountId,
        native_amount: Amount,
        min_liquidity: Liquidity,
        max_tokens: Amount,
    ) -> Result<(Liquidity, Amount), AmmError> {
        if native_amount.is_zero() || max_tokens.is_zero() {
            return Err(AmmError::InvalidQuantity("legacy deposit needs both assets"));
        }
        let (minted, token_amount) = if self.total_supply.is_zero() {
            if native_amount < self.min_initial_native {
                return Err(AmmError::InvalidQuantity(
                    "first legacy deposit below the native minimum",
                ));
            }
            (Liquidity::new(native_amount.get()), max_tokens)
        } else {
            let n = self.native_reserve.get();
            let tokens = mul_div(native_amount.get(), self.token_reserve.get(), n, Rounding::Down)?
                .checked_add(1)
                .ok_or(AmmError::Overflow("legacy token deposit overflow"))?;
            let minted = mul_div(native_amount.get(), self.total_supply.get(), n, Rounding::Down)?;
            if tokens > max_tokens.get() {
                return Err(AmmError::ExcessiveInputRequired);
            }
            (Liquidity::new(minted), Amount::new(tokens))
        };
        if minted.is_zero() || minted < min_liquidity {
            return Err(AmmError::InsufficientLiquidityMinted);
        }

        let native_reserve = self.native_reserve.safe_add(&native_amount)?;
        let token_reserve = self.token_reserve.safe_add(&token_amount)?;
        let total_supply = self.total_supply.safe_add(&minted)?;
        let balance = self.shares_of(provider).safe_add(&minted)?;

        self.native_reserve = native_reserve;
        self.token_reserve = token_reserve;
        self.total_supply = total_supply;
        self.balances.insert(*provider, balance);
        Ok((minted, token_amount))
    }

    /// Burns `shares` of `owner`.
    ///
    /// Returns `(native, tokens)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `owner` holds fewer shares.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is zero.
    /// - [`AmmError::ExcessiveSlippage`] if a payout is below its minimum.
    pub fn remove_liquidity(
        &mut self,
        owner: &AccountId,
        shares: Liquidity,
        min_native: Amount,
        min_tokens: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        let held = self.shares_of(owner);
        if held < shares {
            return Err(AmmError::InsufficientBalance);
        }
        let (native, tokens) = self.pro_rata(shares)?;
        if native < min_native || tokens < min_tokens {
            return Err(AmmError::ExcessiveSlippage);
        }

        self.native_reserve = self.native_reserve.safe_sub(&native)?;
        self.token_reserve = self.token_reserve.safe_sub(&tokens)?;
        self.total_supply = self.total_supply.safe_sub(&shares)?;
        let remaining = held.safe_sub(&shares)?;
        if remaining.is_zero() {
            self.balances.remove(owner);
        } else {
            self.balances.insert(*owner, remaining);
        }
        Ok((native, tokens))
    }

    /// Tokens received for selling `native_in`.
    ///
    /// # Errors
    ///
    /// As [`get_amount_out`].
    pub fn native_to_token_input_price(&self, native_in: Amount) -> Result<Amount, AmmError> {
        get_amount_out(native_in, self.native_reserve, self.token_reserve, self.fee_tier)
    }

    /// Native needed to buy `tokens_out`.
    ///
    /// # Errors
    ///
    /// As [`get_amount_in`].
    pub fn native_to_token_output_price(&self, tokens_out: Amount) -> Result<Amount, AmmError> {
        get_amount_in(tokens_out, self.native_reserve, self.token_reserve, self.fee_tier)
    }

    /// Native received for selling `tokens_in`.
    ///
    /// # Errors
    ///
    /// As [`get_amount_out`].
    pub fn token_to_native_input_price(&self, tokens_in: Amount) -> Result<Amount, AmmError> {
        get_amount_out(tokens_in, self.token_reserve, self.native_reserve, self.fee_tier)
    }

    /// Tokens needed to buy `native_out`.
    ///
    /// # Errors
    ///
    /// As [`get_amount_in`].
    pub fn token_to_native_output_price(&self, native_out: Amount) -> Result<Amount, AmmError> {
        get_amount_in(native_out, self.token_reserve, self.native_reserve, self.fee_tier)
    }

    /// Sells exactly `native_in` for tokens.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ExcessiveSlippage`] if fewer than `min_tokens` result.
    /// - [`AmmError::InsufficientLiquidity`] if the output rounds to zero.
    pub fn native_to_token_swap_input(
        &mut self,
        native_in: Amount,
        min_tokens: Amount,
    ) -> Result<Amount, AmmError> {
        let tokens = self.native_to_token_input_price(native_in)?;
        if tokens.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if tokens < min_tokens {
            return Err(AmmError::ExcessiveSlippage);
        }
        let native_reserve = self.native_reserve.safe_add(&native_in)?;
        self.token_reserve = self.token_reserve.safe_sub(&tokens)?;
        self.native_reserve = native_reserve;
        Ok(tokens)
    }

    /// Sells exactly `tokens_in` for native.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ExcessiveSlippage`] if less than `min_native` results.
    /// - [`AmmError::InsufficientLiquidity`] if the output rounds to zero.
    pub fn token_to_native_swap_input(
        &mut self,
        tokens_in: Amount,
        min_native: Amount,
    ) -> Result<Amount, AmmError> {
        let native = self.token_to_native_input_price(tokens_in)?;
        if native.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if native < min_native {
            return Err(AmmError::ExcessiveSlippage);
        }
        let token_reserve = self.token_reserve.safe_add(&tokens_in)?;
        self.native_reserve = self.native_reserve.safe_sub(&native)?;
        self.token_reserve = token_reserve;
        Ok(native)
    }

    fn pro_rata(&self, shares: Liquidity) -> Result<(Amount, Amount), AmmError> {
        if shares.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        if shares > self.total_supply {
            return Err(AmmError::InsufficientLiquidity);
        }
        let s = self.total_supply.get();
        let native = mul_div(shares.get(), self.native_reserve.get(), s, Rounding::Down)?;
        let tokens = mul_div(shares.get(), self.token_reserve.get(), s, Rounding::Down)?;
        if native == 0 || tokens == 0 {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        Ok((Amount::new(native), Amount::new(tokens)))
    }
}

impl FromConfig<LegacyExchangeConfig> for LegacyExchange {
    fn from_config(config: &LegacyExchangeConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            token: config.token(),
            fee_tier: config.fee_tier(),
            min_initial_native: config.min_initial_native(),
            native_reserve: Amount::ZERO,
            token_reserve: Amount::ZERO,
            total_supply: Liquidity::ZERO,
            balances: BTreeMap::new(),
        })
    }
}

impl LiquiditySource for LegacyExchange {
    fn assets(&self) -> (Asset, Asset) {
        (Asset::Native, Asset::Token(self.token))
    }

    fn reserves(&self) -> (Amount, Amount) {
        (self.native_reserve, self.token_reserve)
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
        self.remove_liquidity(owner, shares, Amount::ZERO, Amount::ZERO)
    }

    fn deposit(
        &mut self,
        owner: &AccountId,
        amounts: (Amount, Amount),
    ) -> Result<(Liquidity, (Amount, Amount)), AmmError> {
        let (minted, tokens) = self.add_liquidity(owner, amounts.0, Liquidity::ZERO, amounts.1)?;
        Ok((minted, (amounts.0, tokens)))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn token() -> TokenAddress {
        TokenAddress::from_bytes([4u8; 32])
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([0xa1; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([0xb0; 32])
    }

    fn exchange(min_initial: u128) -> LegacyExchange {
        let Ok(cfg) =
            LegacyExchangeConfig::new(token(), FeeTier::default(), Amount::new(min_initial))
        else {
            panic!("expected valid config");
        };
        let Ok(ex) = LegacyExchange::from_config(&cfg) else {
            panic!("expected exchange");
        };
        ex
    }

    fn seeded(native: u128, tokens: u128) -> LegacyExchange {
        let mut ex = exchange(1);
        let (native, tokens) = (Amount::new(native), Amount::new(tokens));
        let Ok(_) = ex.add_liquidity(&alice(), native, Liquidity::ZERO, tokens) else {
            panic!("expected deposit");
        };
        ex
    }

    #[test]
    fn first_deposit_mints_native_amount() {
        let ex = seeded(100, 50);
        assert_eq!(ex.shares_of(&alice()), Liquidity::new(100));
        assert_eq!(ex.reserves(), (Amount::new(100), Amount::new(50)));
    }

    #[test]
    fn first_deposit_below_minimum_rejected() {
        let mut ex = exchange(1_000_000_000);
        let Err(AmmError::InvalidQuantity(_)) =
            ex.add_liquidity(&alice(), Amount::new(999_999_999), Liquidity::ZERO, Amount::new(1))
        else {
            panic!("expected InvalidQuantity");
        };
    }

    #[test]
    fn later_deposit_rounds_tokens_up() {
        let mut ex = seeded(1_000, 3_000);
        let Ok((minted, tokens)) =
            ex.add_liquidity(&bob(), Amount::new(10), Liquidity::ZERO, Amount::new(100))
        else {
            panic!("expected Ok");
        };
        assert_eq!(tokens, Amount::new(31));
        assert_eq!(minted, Liquidity::new(10));
    }

    #[test]
    fn later_deposit_respects_token_cap() {
        let mut ex = seeded(1_000, 3_000);
        assert_eq!(
            ex.add_liquidity(&bob(), Amount::new(10), Liquidity::ZERO, Amount::new(30)),
            Err(AmmError::ExcessiveInputRequired)
        );
        assert_eq!(
            ex.add_liquidity(&bob(), Amount::new(10), Liquidity::new(11), Amount::new(100)),
            Err(AmmError::InsufficientLiquidityMinted)
        );
    }

    #[test]
    fn remove_is_pro_rata() {
        let mut ex = seeded(100, 50);
        let Ok((native, tokens)) =
            ex.remove_liquidity(&alice(), Liquidity::new(100), Amount::ZERO, Amount::ZERO)
        else {
            panic!("expected Ok");
        };
        assert_eq!((native, tokens), (Amount::new(100), Amount::new(50)));
        assert_eq!(ex.total_supply(), Liquidity::ZERO);
        assert_eq!(ex.shares_of(&alice()), Liquidity::ZERO);
    }

    #[test]
    fn remove_checks_balance_and_minimums() {
        let mut ex = seeded(100, 50);
        assert_eq!(
            ex.remove_liquidity(&bob(), Liquidity::new(1), Amount::ZERO, Amount::ZERO),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(
            ex.remove_liquidity(&alice(), Liquidity::new(50), Amount::ZERO, Amount::new(26)),
            Err(AmmError::ExcessiveSlippage)
        );
        assert_eq!(
            ex.remove_liquidity(&alice(), Liquidity::new(1), Amount::ZERO, Amount::ZERO),
            Err(AmmError::InsufficientLiquidityBurned)
        );
    }

    #[test]
    fn swaps_use_the_paired_pool_formula() {
        let mut ex = seeded(1_000, 1_000);
        assert_eq!(ex.native_to_token_input_price(Amount::new(100)), Ok(Amount::new(90)));
        let Ok(out) = ex.native_to_token_swap_input(Amount::new(100), Amount::new(90)) else {
            panic!("expected Ok");
        };
        assert_eq!(out, Amount::new(90));
        assert_eq!(ex.reserves(), (Amount::new(1_100), Amount::new(910)));

        let Ok(back) = ex.token_to_native_swap_input(Amount::new(90), Amount::ZERO) else {
            panic!("expected Ok");
        };
        assert!(back < Amount::new(100));
        assert_eq!(
            ex.token_to_native_swap_input(Amount::new(90), Amount::new(1_000)),
            Err(AmmError::ExcessiveSlippage)
        );
    }

    #[test]
    fn output_prices_invert_input_prices() {
        let ex = seeded(10_000, 20_000);
        let Ok(native_needed) = ex.native_to_token_output_price(Amount::new(500)) else {
            panic!("expected Ok");
        };
        let Ok(got) = ex.native_to_token_input_price(native_needed) else {
            panic!("expected Ok");
        };
        assert!(got >= Amount::new(500));
        let Ok(tokens_needed) = ex.token_to_native_output_price(Amount::new(500)) else {
            panic!("expected Ok");
        };
        assert!(tokens_needed > Amount::new(1_000));
    }

    #[test]
    fn liquidity_source_orders_native_first() {
        let mut ex = seeded(100, 50);
        assert_eq!(
            LiquiditySource::assets(&ex),
            (Asset::Native, Asset::Token(token()))
        );
        let Ok((native, tokens)) = LiquiditySource::withdraw(&mut ex, &alice(), Liquidity::new(40))
        else {
            panic!("expected Ok");
        };
        assert_eq!((native, tokens), (Amount::new(40), Amount::new(20)));
    }
}
