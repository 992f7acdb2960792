//! Migration intent.

use serde::{Deserialize, Serialize};

use super::{Amount, Deadline, TokenAddress};

/// Move the caller's whole legacy position for `legacy_token` into the
/// paired pool of `(legacy_token, wrapped native)`.
///
/// `min_token` bounds the legacy token actually deposited and `min_native`
/// the native side; whichever side the pool ratio binds must clear its
/// minimum or the migration fails with a slippage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRequest {
    /// Token of the legacy exchange to migrate from.
    pub legacy_token: TokenAddress,
    /// Minimum legacy token amount deposited into the paired pool.
    pub min_token: Amount,
    /// Minimum native amount deposited into the paired pool.
    #[serde(default)]
    pub min_native: Amount,
    /// Latest execution time.
    pub deadline: Deadline,
}

impl MigrationRequest {
    /// Creates a request with no native minimum.
    #[must_use]
    pub const fn new(legacy_token: TokenAddress, min_token: Amount, deadline: Deadline) -> Self {
        Self {
            legacy_token,
            min_token,
            min_native: Amount::ZERO,
            deadline,
        }
    }

    /// Sets the native minimum.
    #[must_use]
    pub const fn with_min_native(mut self, min_native: Amount) -> Self {
        self.min_native = min_native;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_min_defaults_to_zero() {
        let req = MigrationRequest::new(
            TokenAddress::from_bytes([4u8; 32]),
            Amount::new(40),
            Deadline::NEVER,
        );
        assert_eq!(req.min_native, Amount::ZERO);
        assert_eq!(req.with_min_native(Amount::new(1)).min_native, Amount::new(1));
    }
}
