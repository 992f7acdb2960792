//! Directed integer division.
//!
//! Outputs paid to a user round [`Rounding::Down`]; inputs charged to a
//! user round [`Rounding::Up`].  The pool never loses to rounding.

use crate::domain::Rounding;

/// `u128` division rounding in the given direction.  `None` if
/// `denominator` is zero.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::Rounding;
/// use kwikswap_amm::math::div_round;
///
/// assert_eq!(div_round(7, 2, Rounding::Down), Some(3));
/// assert_eq!(div_round(7, 2, Rounding::Up), Some(4));
/// assert_eq!(div_round(7, 0, Rounding::Up), None);
/// ```
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q < u128::MAX whenever a remainder exists
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_division_agrees() {
        assert_eq!(div_round(12, 4, Rounding::Down), Some(3));
        assert_eq!(div_round(12, 4, Rounding::Up), Some(3));
    }

    #[test]
    fn ceiling_at_the_top_of_the_range() {
        assert_eq!(div_round(u128::MAX, 2, Rounding::Up), Some(u128::MAX / 2 + 1));
        assert_eq!(div_round(u128::MAX, 1, Rounding::Up), Some(u128::MAX));
    }

    #[test]
    fn zero_cases() {
        assert_eq!(div_round(0, 9, Rounding::Up), Some(0));
        assert_eq!(div_round(9, 0, Rounding::Down), None);
    }
}
