//! `Result`-returning arithmetic for quantity newtypes.
//!
//! The newtypes expose `Option`-returning `checked_*` methods; this trait
//! lifts them into [`AmmError`] so pool code can chain them with `?`.
//!
//! ```
//! use kwikswap_amm::domain::Amount;
//! use kwikswap_amm::math::CheckedArithmetic;
//!
//! assert!(Amount::MAX.safe_add(&Amount::new(1)).is_err());
//! assert_eq!(Amount::new(3).safe_sub(&Amount::new(1)), Ok(Amount::new(2)));
//! ```

use crate::domain::{Amount, Liquidity, Rounding};
use crate::error::AmmError;

use super::rounding::div_round;

/// Fallible arithmetic for quantity newtypes.
///
/// No method panics or saturates; each failure maps to the matching
/// [`AmmError`] kind.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.checked_div(other, rounding)
            .ok_or(AmmError::DivisionByZero)
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("liquidity subtraction underflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        div_round(self.get(), other.get(), rounding)
            .map(Liquidity::new)
            .ok_or(AmmError::DivisionByZero)
    }
}
