//! Wall-clock time and call deadlines.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Seconds since the UNIX epoch, as reported by a [`Clock`].
///
/// [`Clock`]: crate::traits::Clock
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Wraps a raw second count.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the raw second count.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, zero if `earlier` is in the future.
    #[must_use]
    pub const fn saturating_elapsed_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// The latest [`Timestamp`] at which an operation may still execute.
///
/// Expiry is the only cancellation mechanism: once `now > deadline` the
/// call fails, however favourable the market.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::{Deadline, Timestamp};
/// use kwikswap_amm::error::AmmError;
///
/// let deadline = Deadline::at(Timestamp::from_secs(100));
/// assert!(deadline.check(Timestamp::from_secs(100)).is_ok());
/// assert_eq!(deadline.check(Timestamp::from_secs(101)), Err(AmmError::Expired));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(Timestamp);

impl Deadline {
    /// A deadline that never passes.
    pub const NEVER: Self = Self(Timestamp(u64::MAX));

    /// Creates a deadline at `ts`.
    #[must_use]
    pub const fn at(ts: Timestamp) -> Self {
        Self(ts)
    }

    /// Returns the deadline's timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.0
    }

    /// Fails once `now` is strictly past the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Expired`] if `now > deadline`.
    pub const fn check(&self, now: Timestamp) -> Result<(), AmmError> {
        if now.0 > self.0 .0 {
            return Err(AmmError::Expired);
        }
        Ok(())
    }
}

impl From<u64> for Deadline {
    fn from(secs: u64) -> Self {
        Self(Timestamp(secs))
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deadline@{}", self.0)
    }
}
