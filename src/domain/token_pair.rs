//! Canonically ordered pair of distinct tokens.

use core::fmt;

use super::TokenAddress;
use crate::error::AmmError;

/// An unordered pair of distinct tokens stored in canonical order.
///
/// `(A, B)` and `(B, A)` build the same `TokenPair`, which is why the
/// registry can key pools by it and guarantee one pool per pair.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::{TokenAddress, TokenPair};
///
/// let a = TokenAddress::from_bytes([1u8; 32]);
/// let b = TokenAddress::from_bytes([2u8; 32]);
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair, TokenPair::new(a, b).expect("distinct tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token0: TokenAddress,
    token1: TokenAddress,
}

impl TokenPair {
    /// Creates a canonically-ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both addresses are equal.
    pub fn new(a: TokenAddress, b: TokenAddress) -> Result<Self, AmmError> {
        match a.cmp(&b) {
            core::cmp::Ordering::Less => Ok(Self {
                token0: a,
                token1: b,
            }),
            core::cmp::Ordering::Greater => Ok(Self {
                token0: b,
                token1: a,
            }),
            core::cmp::Ordering::Equal => Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            )),
        }
    }

    /// Returns the lower-addressed token.
    #[must_use]
    pub const fn token0(&self) -> TokenAddress {
        self.token0
    }

    /// Returns the higher-addressed token.
    #[must_use]
    pub const fn token1(&self) -> TokenAddress {
        self.token1
    }

    /// Returns `true` if `token` is one side of the pair.
    #[must_use]
    pub fn contains(&self, token: &TokenAddress) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Returns `true` if `token` is `token0`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn is_token0(&self, token: &TokenAddress) -> Result<bool, AmmError> {
        if *token == self.token0 {
            Ok(true)
        } else if *token == self.token1 {
            Ok(false)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Returns the counterpart of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn other(&self, token: &TokenAddress) -> Result<TokenAddress, AmmError> {
        if self.is_token0(token)? {
            Ok(self.token1)
        } else {
            Ok(self.token0)
        }
    }

    /// Reorders a `(token0, token1)` tuple into `(a, b)` order, where `a`
    /// is the token the caller names first.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `a` is not in the pair.
    pub fn orient<T>(&self, a: &TokenAddress, values: (T, T)) -> Result<(T, T), AmmError> {
        if self.is_token0(a)? {
            Ok(values)
        } else {
            Ok((values.1, values.0))
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0, self.token1)
    }
}
