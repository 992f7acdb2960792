//! Asset identifiers.

/// A 32-byte identifier of a fungible token held in the ledger.
///
/// Addresses order lexicographically; that order is what makes a
/// [`TokenPair`](super::TokenPair) canonical.  `Display` and `FromStr`
/// use lowercase hex, optionally prefixed with `0x`.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::TokenAddress;
///
/// let addr = TokenAddress::from_bytes([0xab; 32]);
/// let parsed: TokenAddress = addr.to_string().parse().expect("hex round trip");
/// assert_eq!(parsed, addr);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAddress([u8; 32]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

super::hex_identifier!(TokenAddress, "token address");
