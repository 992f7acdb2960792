//! Liquidity provider positions.

use core::fmt;

use super::{AccountId, Amount, Liquidity};

/// Shares held by one account in one pool.
///
/// Share balances live in the pool itself; a `LiquidityPosition` is a
/// read-only snapshot handed out by [`ConstantProductPool::position`]
/// together with the reserves it currently redeems for.
///
/// [`ConstantProductPool::position`]: crate::pools::ConstantProductPool::position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiquidityPosition {
    owner: AccountId,
    shares: Liquidity,
    redeemable: (Amount, Amount),
}

impl LiquidityPosition {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(owner: AccountId, shares: Liquidity, redeemable: (Amount, Amount)) -> Self {
        Self {
            owner,
            shares,
            redeemable,
        }
    }

    /// The account holding the shares.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Share balance.
    #[must_use]
    pub const fn shares(&self) -> Liquidity {
        self.shares
    }

    /// `(token0, token1)` the shares would redeem for right now.
    #[must_use]
    pub const fn redeemable(&self) -> (Amount, Amount) {
        self.redeemable
    }

    /// Returns `true` if the owner holds no shares.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shares.is_zero()
    }
}

impl fmt::Display for LiquidityPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position({}, shares={}, redeemable=({}, {}))",
            self.owner, self.shares, self.redeemable.0, self.redeemable.1
        )
    }
}
