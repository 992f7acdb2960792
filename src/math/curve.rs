//! Constant-product pricing (`x · y = k`).
//!
//! # Formulas
//!
//! With `m = 10_000 − fee_bps`:
//!
//! ```text
//! get_amount_out:  out = ⌊ in·m·R_out / (R_in·10_000 + in·m) ⌋
//! get_amount_in:   in  = ⌊ R_in·out·10_000 / ((R_out − out)·m) ⌋ + 1
//! quote:           b   = ⌊ a·R_b / R_a ⌋
//! ```
//!
//! The fee is folded into the numerator and denominator rather than
//! subtracted first, so the result never rounds in the trader's favour.
//! Numerators reach about `2^270` for `u128` inputs and are formed in
//! 512 bits.

use primitive_types::U512;

use super::wide::{mul_div, narrow_wide};
use crate::domain::{Amount, FeeTier, Rounding, BPS_DENOMINATOR};
use crate::error::AmmError;

/// Output of selling `amount_in` into a pool with the given reserves.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::InvalidFee`] if the fee is 100% or more.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::{Amount, FeeTier};
/// use kwikswap_amm::math::get_amount_out;
///
/// let (reserve_in, reserve_out) = (Amount::new(1000), Amount::new(1000));
/// let out = get_amount_out(Amount::new(100), reserve_in, reserve_out, FeeTier::default());
/// assert_eq!(out, Ok(Amount::new(90)));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> crate::error::Result<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InvalidQuantity("amount_in must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    fee.validate()?;
    let m = U512::from(fee.input_multiplier()?);
    let in_with_fee = U512::from(amount_in.get()) * m;
    let numerator = in_with_fee * U512::from(reserve_out.get());
    let denominator = U512::from(reserve_in.get()) * U512::from(BPS_DENOMINATOR) + in_with_fee;
    let out = narrow_wide(numerator / denominator, "amount_out exceeds u128")?;
    Ok(Amount::new(out))
}

/// Input required to buy exactly `amount_out` from a pool.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out >= reserve_out`.
/// - [`AmmError::Overflow`] if the required input exceeds `u128`.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> crate::error::Result<Amount> {
    if amount_out.is_zero() {
        return Err(AmmError::InvalidQuantity("amount_out must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    fee.validate()?;
    let m = U512::from(fee.input_multiplier()?);
    let numerator = U512::from(reserve_in.get())
        * U512::from(amount_out.get())
        * U512::from(BPS_DENOMINATOR);
    let denominator = U512::from(reserve_out.get() - amount_out.get()) * m;
    let raw = narrow_wide(numerator / denominator, "amount_in exceeds u128")?;
    raw.checked_add(1)
        .map(Amount::new)
        .ok_or(AmmError::Overflow("amount_in exceeds u128"))
}

/// Amount of B equal in value to `amount_a` at the reserve ratio.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
pub fn quote(
    amount_a: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
) -> crate::error::Result<Amount> {
    if amount_a.is_zero() {
        return Err(AmmError::InvalidQuantity("amount must be positive"));
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    mul_div(amount_a.get(), reserve_b.get(), reserve_a.get(), Rounding::Down).map(Amount::new)
}
