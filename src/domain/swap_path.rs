//! Multi-hop swap routes.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{TokenAddress, TokenPair};
use crate::error::AmmError;

/// An ordered route of tokens `[t0, t1, ..., tn]`.
///
/// Each consecutive pair `(t[i], t[i+1])` names one pool hop.
///
/// # Invariants
///
/// - At least two tokens.
/// - No two consecutive tokens are equal.
///
/// # Examples
///
/// ```
/// use kwikswap_amm::domain::{SwapPath, TokenAddress};
///
/// let a = TokenAddress::from_bytes([1u8; 32]);
/// let b = TokenAddress::from_bytes([2u8; 32]);
/// assert!(SwapPath::new(vec![a, b]).is_ok());
/// assert!(SwapPath::new(vec![a]).is_err());
/// assert!(SwapPath::new(vec![a, a]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TokenAddress>", into = "Vec<TokenAddress>")]
pub struct SwapPath(Vec<TokenAddress>);

impl SwapPath {
    /// Validates and wraps a route.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if the route has fewer than two
    /// tokens or repeats a token in consecutive positions.
    pub fn new(tokens: Vec<TokenAddress>) -> crate::error::Result<Self> {
        if tokens.len() < 2 {
            return Err(AmmError::InvalidPath("path needs at least two tokens"));
        }
        if tokens.windows(2).any(|w| w[0] == w[1]) {
            return Err(AmmError::InvalidPath("consecutive tokens must differ"));
        }
        Ok(Self(tokens))
    }

    /// The tokens along the route.
    #[must_use]
    pub fn tokens(&self) -> &[TokenAddress] {
        &self.0
    }

    /// Number of tokens (always at least two).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pool hops (`len - 1`).
    #[must_use]
    pub fn hops(&self) -> usize {
        self.0.len() - 1
    }

    /// The token paid in.
    #[must_use]
    pub fn first(&self) -> TokenAddress {
        self.0[0]
    }

    /// The token received.
    #[must_use]
    pub fn last(&self) -> TokenAddress {
        self.0[self.0.len() - 1]
    }

    /// Iterates `(token_in, token_out)` for each hop.
    pub fn legs(
        &self,
    ) -> impl DoubleEndedIterator<Item = (TokenAddress, TokenAddress)> + ExactSizeIterator + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Canonical pair of hop `i`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `i` is out of range.
    pub fn pair_at(&self, i: usize) -> crate::error::Result<TokenPair> {
        match (self.0.get(i), self.0.get(i + 1)) {
            (Some(a), Some(b)) => TokenPair::new(*a, *b),
            _ => Err(AmmError::InvalidPath("hop index out of range")),
        }
    }
}

impl TryFrom<Vec<TokenAddress>> for SwapPath {
    type Error = AmmError;

    fn try_from(tokens: Vec<TokenAddress>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

impl From<SwapPath> for Vec<TokenAddress> {
    fn from(path: SwapPath) -> Self {
        path.0
    }
}

impl fmt::Display for SwapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{t:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tok(b: u8) -> TokenAddress {
        TokenAddress::from_bytes([b; 32])
    }

    #[test]
    fn rejects_short_paths() {
        assert_eq!(
            SwapPath::new(vec![]),
            Err(AmmError::InvalidPath("path needs at least two tokens"))
        );
        assert!(SwapPath::new(vec![tok(1)]).is_err());
    }

    #[test]
    fn rejects_consecutive_duplicates_only() {
        assert!(SwapPath::new(vec![tok(1), tok(2), tok(2)]).is_err());
        // A cycle is fine as long as neighbours differ.
        assert!(SwapPath::new(vec![tok(1), tok(2), tok(1)]).is_ok());
    }

    #[test]
    fn legs_and_ends() {
        let Ok(path) = SwapPath::new(vec![tok(1), tok(2), tok(3)]) else {
            panic!("expected Ok");
        };
        assert_eq!(path.hops(), 2);
        assert_eq!(path.first(), tok(1));
        assert_eq!(path.last(), tok(3));
        let legs: Vec<_> = path.legs().collect();
        assert_eq!(legs, vec![(tok(1), tok(2)), (tok(2), tok(3))]);
        assert!(path.pair_at(1).is_ok());
        assert!(path.pair_at(2).is_err());
    }

    #[test]
    fn legs_walk_backwards_with_hop_index() {
        let Ok(path) = SwapPath::new(vec![tok(1), tok(2), tok(3), tok(4)]) else {
            panic!("expected Ok");
        };
        assert_eq!(path.legs().len(), 3);
        let back: Vec<_> = path.legs().enumerate().rev().map(|(i, (a, _))| (i, a)).collect();
        assert_eq!(back, vec![(2, tok(3)), (1, tok(2)), (0, tok(1))]);
    }
}
