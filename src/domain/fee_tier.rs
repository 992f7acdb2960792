//! Swap fee tier built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The fee charged on the input leg of every swap.
///
/// Both exchange generations charge 0.30% by default, which is what
/// [`FeeTier::default`] returns.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::FeeTier;
///
/// let tier = FeeTier::default();
/// assert_eq!(tier.basis_points().get(), 30);
/// assert_eq!(tier.input_multiplier(), Ok(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.30% — the protocol fee for both exchange generations.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00%.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Wraps arbitrary [`BasisPoints`].  Range is checked by
    /// [`validate`](Self::validate).
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Checks that the fee leaves a non-zero share of the input.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub const fn validate(&self) -> crate::error::Result<()> {
        if self.0.get() >= super::basis_points::BPS_DENOMINATOR {
            return Err(AmmError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }

    /// Returns `10_000 − fee_bps`, the multiplier applied to swap inputs.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee exceeds 100%.
    pub const fn input_multiplier(&self) -> crate::error::Result<u32> {
        match self.0.complement() {
            Some(v) => Ok(v),
            None => Err(AmmError::InvalidFee("fee exceeds 100%")),
        }
    }

    /// Computes the fee portion of `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the intermediate product overflows.
    pub const fn apply_to_amount(
        &self,
        amount: Amount,
        rounding: Rounding,
    ) -> crate::error::Result<Amount> {
        self.0.apply(amount, rounding)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_bp() {
        assert_eq!(FeeTier::default(), FeeTier::TIER_0_30_PERCENT);
    }

    #[test]
    fn validate_rejects_full_fee() {
        assert!(FeeTier::TIER_1_00_PERCENT.validate().is_ok());
        assert!(FeeTier::new(BasisPoints::MAX_PERCENT).validate().is_err());
    }

    #[test]
    fn input_multiplier() {
        assert_eq!(FeeTier::ZERO.input_multiplier(), Ok(10_000));
        assert_eq!(FeeTier::default().input_multiplier(), Ok(9_970));
        assert!(FeeTier::new(BasisPoints::new(20_000))
            .input_multiplier()
            .is_err());
    }

    #[test]
    fn apply_to_amount_floors() {
        let fee = FeeTier::default().apply_to_amount(Amount::new(100), Rounding::Down);
        assert_eq!(fee, Ok(Amount::ZERO));
        let fee = FeeTier::default().apply_to_amount(Amount::new(10_000), Rounding::Down);
        assert_eq!(fee, Ok(Amount::new(30)));
    }

    #[test]
    fn display() {
        assert_eq!(FeeTier::default().to_string(), "FeeTier(30bp)");
    }
}
