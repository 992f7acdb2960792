//! Router call intents.
//!
//! Each request bundles the parameters of one router entry point.  The
//! `recipient` of every request defaults to the calling account; set it
//! with the `to` builder to route proceeds elsewhere.
//!
//! ```
//! use kwikswap_amm::domain::{Amount, Deadline, SwapExactIn, SwapPath, TokenAddress};
//!
//! let a = TokenAddress::from_bytes([1u8; 32]);
//! let b = TokenAddress::from_bytes([2u8; 32]);
//! let path = SwapPath::new(vec![a, b]).expect("valid path");
//! let req = SwapExactIn::new(path, Amount::new(100), Amount::new(90), Deadline::NEVER);
//! assert!(req.recipient.is_none());
//! ```

use super::{AccountId, Amount, Deadline, Liquidity, SwapPath, TokenAddress};

/// Deposit into the pool of `(token_a, token_b)` at the current ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidity {
    /// First token.
    pub token_a: TokenAddress,
    /// Second token.
    pub token_b: TokenAddress,
    /// Upper bound on the `token_a` deposit.
    pub amount_a_desired: Amount,
    /// Upper bound on the `token_b` deposit.
    pub amount_b_desired: Amount,
    /// Lower bound on the `token_a` deposit.
    pub amount_a_min: Amount,
    /// Lower bound on the `token_b` deposit.
    pub amount_b_min: Amount,
    /// Receiver of the minted shares.
    pub recipient: Option<AccountId>,
    /// Latest execution time.
    pub deadline: Deadline,
}

impl AddLiquidity {
    /// Creates a request with zero minimums and the caller as recipient.
    #[must_use]
    pub const fn new(
        token_a: TokenAddress,
        token_b: TokenAddress,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        deadline: Deadline,
    ) -> Self {
        Self {
            token_a,
            token_b,
            amount_a_desired,
            amount_b_desired,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            recipient: None,
            deadline,
        }
    }

    /// Sets both minimums.
    #[must_use]
    pub const fn with_min(mut self, amount_a_min: Amount, amount_b_min: Amount) -> Self {
        self.amount_a_min = amount_a_min;
        self.amount_b_min = amount_b_min;
        self
    }

    /// Sends the shares to `recipient`.
    #[must_use]
    pub const fn to(mut self, recipient: AccountId) -> Self {
        self.recipient = Some(recipient);
        self
    }
}

/// Burn shares of the pool of `(token_a, token_b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidity {
    /// First token.
    pub token_a: TokenAddress,
    /// Second token.
    pub token_b: TokenAddress,
    /// Shares to burn from the caller's balance.
    pub shares: Liquidity,
    /// Lower bound on the `token_a` payout.
    pub amount_a_min: Amount,
    /// Lower bound on the `token_b` payout.
    pub amount_b_min: Amount,
    /// Receiver of the payout.
    pub recipient: Option<AccountId>,
    /// Latest execution time.
    pub deadline: Deadline,
}

impl RemoveLiquidity {
    /// Creates a request with zero minimums and the caller as recipient.
    #[must_use]
    pub const fn new(
        token_a: TokenAddress,
        token_b: TokenAddress,
        shares: Liquidity,
        deadline: Deadline,
    ) -> Self {
        Self {
            token_a,
            token_b,
            shares,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            recipient: None,
            deadline,
        }
    }

    /// Sets both minimums.
    #[must_use]
    pub const fn with_min(mut self, amount_a_min: Amount, amount_b_min: Amount) -> Self {
        self.amount_a_min = amount_a_min;
        self.amount_b_min = amount_b_min;
        self
    }

    /// Sends the payout to `recipient`.
    #[must_use]
    pub const fn to(mut self, recipient: AccountId) -> Self {
        self.recipient = Some(recipient);
        self
    }
}

/// Sell exactly `amount_in` along `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactIn {
    /// Route; the first token is paid in.
    pub path: SwapPath,
    /// Exact input.
    pub amount_in: Amount,
    /// Lower bound on the final output.
    pub amount_out_min: Amount,
    /// Receiver of the output.
    pub recipient: Option<AccountId>,
    /// Latest execution time.
    pub deadline: Deadline,
}

impl SwapExactIn {
    /// Creates a request with the caller as recipient.
    #[must_use]
    pub const fn new(
        path: SwapPath,
        amount_in: Amount,
        amount_out_min: Amount,
        deadline: Deadline,
    ) -> Self {
        Self {
            path,
            amount_in,
            amount_out_min,
            recipient: None,
            deadline,
        }
    }

    /// Sends the output to `recipient`.
    #[must_use]
    pub fn to(mut self, recipient: AccountId) -> Self {
        self.recipient = Some(recipient);
        self
    }
}

/// Buy exactly `amount_out` along `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactOut {
    /// Route; the last token is received.
    pub path: SwapPath,
    /// Exact output.
    pub amount_out: Amount,
    /// Upper bound on the input.
    pub amount_in_max: Amount,
    /// Receiver of the output.
    pub recipient: Option<AccountId>,
    /// Latest execution time.
    pub deadline: Deadline,
}

impl SwapExactOut {
    /// Creates a request with the caller as recipient.
    #[must_use]
    pub const fn new(
        path: SwapPath,
        amount_out: Amount,
        amount_in_max: Amount,
        deadline: Deadline,
    ) -> Self {
        Self {
            path,
            amount_out,
            amount_in_max,
            recipient: None,
            deadline,
        }
    }

    /// Sends the output to `recipient`.
    #[must_use]
    pub fn to(mut self, recipient: AccountId) -> Self {
        self.recipient = Some(recipient);
        self
    }
}
