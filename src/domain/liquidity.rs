//! Liquidity-share units.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;

/// A quantity of liquidity shares issued by a pool or legacy exchange.
///
/// Kept distinct from [`Amount`] because it measures proportional
/// ownership of reserves, not a quantity of any one token.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::Liquidity;
///
/// let minted = Liquidity::new(9_000);
/// assert_eq!(minted.checked_add(&Liquidity::new(1_000)), Some(Liquidity::new(10_000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Liquidity(u128);

impl Liquidity {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw `u128` share count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw share count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the share count as an [`Amount`] for ratio math.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_default() {
        assert!(Liquidity::ZERO.is_zero());
        assert_eq!(Liquidity::default(), Liquidity::ZERO);
    }

    #[test]
    fn checked_ops() {
        let a = Liquidity::new(10);
        assert_eq!(a.checked_sub(&Liquidity::new(11)), None);
        assert_eq!(Liquidity::new(u128::MAX).checked_add(&a), None);
        assert_eq!(a.checked_sub(&Liquidity::new(4)), Some(Liquidity::new(6)));
    }

    #[test]
    fn as_amount_keeps_value() {
        assert_eq!(Liquidity::new(77).as_amount(), Amount::new(77));
    }
}
