//! Result of a migration.

use core::fmt;

use crate::domain::{Amount, Asset, Liquidity, TokenAddress};

/// What a migration moved and what it handed back.
///
/// At most one refund is non-zero: the side of the legacy position that
/// the paired pool's ratio could not absorb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MigrationOutcome {
    token: TokenAddress,
    token_deposited: Amount,
    native_deposited: Amount,
    shares: Liquidity,
    token_refund: Amount,
    native_refund: Amount,
}

impl MigrationOutcome {
    pub(crate) const fn new(
        token: TokenAddress,
        deposited: (Amount, Amount),
        shares: Liquidity,
        refunds: (Amount, Amount),
    ) -> Self {
        Self {
            token,
            token_deposited: deposited.0,
            native_deposited: deposited.1,
            shares,
            token_refund: refunds.0,
            native_refund: refunds.1,
        }
    }

    /// The migrated token.
    #[must_use]
    pub const fn token(&self) -> TokenAddress {
        self.token
    }

    /// Tokens now in the paired pool.
    #[must_use]
    pub const fn paired_amount(&self) -> Amount {
        self.token_deposited
    }

    /// Native (as wrapped native) now in the paired pool.
    #[must_use]
    pub const fn native_deposited(&self) -> Amount {
        self.native_deposited
    }

    /// Pool shares credited to the caller.
    #[must_use]
    pub const fn shares(&self) -> Liquidity {
        self.shares
    }

    /// Tokens returned to the caller.
    #[must_use]
    pub const fn token_refund(&self) -> Amount {
        self.token_refund
    }

    /// Native returned to the caller.
    #[must_use]
    pub const fn native_refund(&self) -> Amount {
        self.native_refund
    }

    /// The non-zero refund, if any.
    #[must_use]
    pub fn refund(&self) -> Option<(Asset, Amount)> {
        if !self.token_refund.is_zero() {
            Some((Asset::Token(self.token), self.token_refund))
        } else if !self.native_refund.is_zero() {
            Some((Asset::Native, self.native_refund))
        } else {
            None
        }
    }

    /// Size of the refund, zero when the position matched exactly.
    #[must_use]
    pub fn refund_amount(&self) -> Amount {
        self.refund().map_or(Amount::ZERO, |(_, amount)| amount)
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Migration(token={}, native={}, shares={}, refund={})",
            self.token_deposited,
            self.native_deposited,
            self.shares,
            self.refund_amount()
        )
    }
}
