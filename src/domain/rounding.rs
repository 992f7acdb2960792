//! Explicit rounding direction for division.

/// Rounding direction for every division in the crate.
///
/// Pool payouts always round [`Down`](Rounding::Down) so that a trader or
/// liquidity provider is never over-paid; required inputs round
/// [`Up`](Rounding::Up) so that the pool is never under-paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
