//! Integer arithmetic for the constant-product curve.
//!
//! Everything here is exact integer math on `u128` quantities.  Products
//! of two reserves are formed in 256 bits ([`primitive_types::U256`]), the
//! three-factor pricing numerators in 512 bits, and both are narrowed back
//! with an explicit overflow check, so no intermediate can wrap silently.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`CheckedArithmetic`] | `Result`-returning ops on [`Amount`](crate::domain::Amount) / [`Liquidity`](crate::domain::Liquidity) |
//! | [`div_round`] | `u128` division with explicit [`Rounding`](crate::domain::Rounding) |
//! | [`mul_div`], [`product`], [`sqrt_product`] | 256-bit intermediates |
//! | [`get_amount_out`], [`get_amount_in`], [`quote`] | curve pricing |

mod checked;
mod curve;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use curve::{get_amount_in, get_amount_out, quote};
pub use rounding::div_round;
pub use wide::{mul_div, narrow, product, sqrt_product, Q112};
