//! 256-bit intermediates.

use primitive_types::{U256, U512};

use crate::domain::Rounding;
use crate::error::AmmError;

/// `2^112`, the fixed-point scale of the pool price accumulators.
pub const Q112: u128 = 1 << 112;

/// Full-width product of two `u128` values.  Never overflows.
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Narrows a 256-bit value to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if `value > u128::MAX`.
pub fn narrow(value: U256, context: &'static str) -> crate::error::Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Narrows a 512-bit value to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if `value > u128::MAX`.
pub(crate) fn narrow_wide(value: U512, context: &'static str) -> crate::error::Result<u128> {
    if value > U512::from(u128::MAX) {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Computes `a × b / d` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `d == 0`.
/// - [`AmmError::Overflow`] if the quotient exceeds `u128`.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::Rounding;
/// use kwikswap_amm::math::mul_div;
///
/// assert_eq!(mul_div(u128::MAX, 2, 4, Rounding::Down), Ok(u128::MAX / 2));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
/// ```
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> crate::error::Result<u128> {
    if d == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let n = product(a, b);
    let d = U256::from(d);
    let (mut q, r) = n.div_mod(d);
    if rounding.is_up() && !r.is_zero() {
        q += U256::one();
    }
    narrow(q, "mul_div result exceeds u128")
}

/// `floor(sqrt(a × b))`.  Always fits in `u128`.
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    product(a, b).integer_sqrt().low_u128()
}
