//! Unified error types for the Kwikswap AMM library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, so callers can tell slippage apart from expiry, liquidity
//! shortage or a missing pair without inspecting strings.
//!
//! # Fatality
//!
//! Every variant except [`AmmError::InvariantBroken`] describes an expected
//! market or input condition and is safe to surface to an end user.
//! `InvariantBroken` signals a correctness defect; see
//! [`AmmError::is_fatal`].

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every error the pools, router, migrator and in-memory collaborators
/// can produce.
///
/// Variants carrying a `&'static str` give a short description of the
/// failing step; the variant itself is the stable, matchable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    /// A reserve involved in the calculation is zero, or the pool cannot
    /// pay out the requested amount.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A deposit would mint zero liquidity shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A withdrawal would pay out zero of one of the assets.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// The output of a swap is below the caller's minimum.
    #[error("excessive slippage: output below the requested minimum")]
    ExcessiveSlippage,

    /// The input an exact-output swap requires exceeds the caller's maximum.
    #[error("excessive input required: input above the requested maximum")]
    ExcessiveInputRequired,

    /// The optimal amount of asset A is below the caller's minimum.
    #[error("insufficient A amount")]
    InsufficientAAmount,

    /// The optimal amount of asset B is below the caller's minimum.
    #[error("insufficient B amount")]
    InsufficientBAmount,

    /// The operation was submitted after its deadline.
    #[error("deadline expired")]
    Expired,

    /// A pool leg produced an amount different from the precomputed route.
    #[error("path execution mismatch")]
    PathExecutionMismatch,

    /// A post-condition of the constant-product curve does not hold.
    #[error("invariant broken: {0}")]
    InvariantBroken(&'static str),

    /// The account (or the protocol custody) lacks the funds to transfer.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// No pool or exchange is registered for the requested assets.
    #[error("not found")]
    NotFound,

    /// Arithmetic overflow or a value exceeding the integer width.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A swap path is malformed.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// A token is not part of the pool or pair it was used with.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A quantity is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A fee tier is out of range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration value is out of range or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

impl AmmError {
    /// Returns `true` if the error signals a correctness defect rather than
    /// a market condition.
    ///
    /// Only [`AmmError::InvariantBroken`] is fatal.  Hosts are expected to
    /// abort when a fatal error reaches the surface.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantBroken(_))
    }

    /// Returns `true` for the caller-supplied bound violations: slippage,
    /// excessive input and the per-asset minimums.
    #[must_use]
    pub const fn is_slippage(&self) -> bool {
        matches!(
            self,
            Self::ExcessiveSlippage
                | Self::ExcessiveInputRequired
                | Self::InsufficientAAmount
                | Self::InsufficientBAmount
        )
    }
}
