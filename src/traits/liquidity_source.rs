//! The withdraw/deposit capability shared by every pool shape.
//!
//! Both the paired [`ConstantProductPool`] and the legacy single-token
//! exchange hold two reserves and issue proportional shares against them.
//! [`LiquiditySource`] captures exactly that, so code that moves positions
//! between the two (the migrator) depends on the capability rather than on
//! either concrete pool.
//!
//! # Custody
//!
//! Implementations only update their own bookkeeping.  Moving the assets
//! in or out of custody is the caller's job; a `withdraw` that is not
//! followed by the matching ledger transfers leaves the system unbalanced.
//!
//! [`ConstantProductPool`]: crate::pools::ConstantProductPool

use crate::domain::{AccountId, Amount, Asset, Liquidity};
use crate::error::AmmError;

/// Shares-for-reserves bookkeeping over two assets.
pub trait LiquiditySource {
    /// The two assets, in the order every other method reports amounts.
    fn assets(&self) -> (Asset, Asset);

    /// Current reserves in [`assets`](Self::assets) order.
    fn reserves(&self) -> (Amount, Amount);

    /// Outstanding shares.
    fn total_shares(&self) -> Liquidity;

    /// Shares held by `owner`; zero when absent.
    fn shares_of(&self, owner: &AccountId) -> Liquidity;

    /// Amounts `shares` would redeem for, without changing state.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityBurned`] if either amount is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `shares` exceeds the supply.
    fn preview_withdraw(&self, shares: Liquidity) -> Result<(Amount, Amount), AmmError>;

    /// Burns `shares` of `owner` and releases the pro-rata reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `owner` holds fewer shares.
    /// - Everything [`preview_withdraw`](Self::preview_withdraw) returns.
    fn withdraw(
        &mut self,
        owner: &AccountId,
        shares: Liquidity,
    ) -> Result<(Amount, Amount), AmmError>;

    /// Adds up to `amounts` to the reserves and credits `owner` with the
    /// resulting shares.
    ///
    /// Returns the shares issued and the amounts actually absorbed, which
    /// may be below `amounts` for shapes that pick their own ratio.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidityMinted`] if no share would be
    /// issued, plus any shape-specific deposit rule.
    fn deposit(
        &mut self,
        owner: &AccountId,
        amounts: (Amount, Amount),
    ) -> Result<(Liquidity, (Amount, Amount)), AmmError>;

    /// Position of `owner` priced at current reserves; zero amounts when
    /// the owner has no shares.
    fn redeemable_by(&self, owner: &AccountId) -> (Amount, Amount) {
        let shares = self.shares_of(owner);
        if shares.is_zero() {
            return (Amount::ZERO, Amount::ZERO);
        }
        self.preview_withdraw(shares)
            .unwrap_or((Amount::ZERO, Amount::ZERO))
    }
}
