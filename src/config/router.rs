//! Router configuration.

use crate::domain::TokenAddress;

/// Address of the wrapped native token when none is configured.
pub const DEFAULT_WRAPPED_NATIVE: TokenAddress = TokenAddress::from_bytes([0xee; 32]);

/// Immutable router parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    wrapped_native: TokenAddress,
}

impl RouterConfig {
    /// Creates a router configuration.
    #[must_use]
    pub const fn new(wrapped_native: TokenAddress) -> Self {
        Self { wrapped_native }
    }

    /// The fungible token standing in for the native asset inside pools.
    #[must_use]
    pub const fn wrapped_native(&self) -> TokenAddress {
        self.wrapped_native
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WRAPPED_NATIVE)
    }
}
