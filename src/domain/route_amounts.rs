//! Per-hop amounts along a route.

use core::ops::Index;

use super::Amount;
use crate::error::AmmError;

/// Amounts at every token of a [`SwapPath`](super::SwapPath).
///
/// `amounts[0]` is paid in, `amounts[len - 1]` is received, and
/// `amounts[i + 1]` is the output of hop `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteAmounts(Vec<Amount>);

impl RouteAmounts {
    /// Wraps a computed amount vector.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if fewer than two amounts are given.
    pub fn new(amounts: Vec<Amount>) -> crate::error::Result<Self> {
        if amounts.len() < 2 {
            return Err(AmmError::InvalidPath("route needs at least two amounts"));
        }
        Ok(Self(amounts))
    }

    /// The amount paid into the first hop.
    #[must_use]
    pub fn amount_in(&self) -> Amount {
        self.0[0]
    }

    /// The amount received from the last hop.
    #[must_use]
    pub fn amount_out(&self) -> Amount {
        self.0[self.0.len() - 1]
    }

    /// All amounts in path order.
    #[must_use]
    pub fn as_slice(&self) -> &[Amount] {
        &self.0
    }

    /// Number of amounts (hops + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for RouteAmounts {
    type Output = Amount;

    fn index(&self, i: usize) -> &Amount {
        &self.0[i]
    }
}

impl From<RouteAmounts> for Vec<Amount> {
    fn from(r: RouteAmounts) -> Self {
        r.0
    }
}
