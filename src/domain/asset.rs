//! Ledger asset kinds.

use core::fmt;

use super::TokenAddress;

/// Anything the ledger can hold a balance of.
///
/// Pools only ever trade [`Asset::Token`]; the native asset enters them
/// through the wrapper as its fungible token representation.  The legacy
/// exchange pairs every token directly with [`Asset::Native`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    /// The chain's native asset.
    Native,
    /// A fungible token.
    Token(TokenAddress),
}

impl Asset {
    /// Returns the token address, or `None` for the native asset.
    #[must_use]
    pub const fn token(&self) -> Option<TokenAddress> {
        match self {
            Self::Native => None,
            Self::Token(t) => Some(*t),
        }
    }

    /// Returns `true` for [`Asset::Native`].
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

impl From<TokenAddress> for Asset {
    fn from(token: TokenAddress) -> Self {
        Self::Token(token)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Token(t) => write!(f, "token:{t}"),
        }
    }
}
