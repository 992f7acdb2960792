//! Account identifiers.

/// A 32-byte identifier of a ledger account (wallet).
///
/// The all-zero account is the burn address: the minimum-liquidity lock
/// of every paired pool is credited to it and can never be withdrawn.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// The burn address.
    pub const BURN: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the burn address.
    #[must_use]
    pub fn is_burn(&self) -> bool {
        *self == Self::BURN
    }
}

super::hex_identifier!(AccountId, "account id");
