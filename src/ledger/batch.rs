//! All-or-nothing sequences of custody movements.

use tracing::{error, trace, warn};

use crate::domain::{AccountId, Amount, Asset};
use crate::error::AmmError;
use crate::traits::{Ledger, NativeWrapper};

/// One custody movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEntry {
    /// `account` pays `amount` of `asset` into custody.
    In {
        /// Payer.
        account: AccountId,
        /// What is paid.
        asset: Asset,
        /// How much.
        amount: Amount,
    },
    /// Custody pays `amount` of `asset` to `account`.
    Out {
        /// Payee.
        account: AccountId,
        /// What is paid.
        asset: Asset,
        /// How much.
        amount: Amount,
    },
    /// Custody native becomes wrapped tokens.
    Wrap(Amount),
    /// Custody wrapped tokens become native.
    Unwrap(Amount),
}

impl LedgerEntry {
    fn apply<L: Ledger + NativeWrapper>(&self, ledger: &mut L) -> Result<(), AmmError> {
        match *self {
            Self::In {
                account,
                asset,
                amount,
            } => ledger.transfer_in(&account, &asset, amount),
            Self::Out {
                account,
                asset,
                amount,
            } => ledger.transfer_out(&account, &asset, amount),
            Self::Wrap(amount) => ledger.wrap(amount).map(|_| ()),
            Self::Unwrap(amount) => ledger.unwrap(amount).map(|_| ()),
        }
    }

    const fn inverse(&self) -> Self {
        match *self {
            Self::In {
                account,
                asset,
                amount,
            } => Self::Out {
                account,
                asset,
                amount,
            },
            Self::Out {
                account,
                asset,
                amount,
            } => Self::In {
                account,
                asset,
                amount,
            },
            Self::Wrap(amount) => Self::Unwrap(amount),
            Self::Unwrap(amount) => Self::Wrap(amount),
        }
    }
}

/// An ordered list of [`LedgerEntry`] values applied as a unit.
///
/// [`apply`](Self::apply) runs the entries in order.  If one fails, the
/// entries already applied are undone in reverse order and the original
/// error is returned, so the ledger ends where it started.
///
/// Zero-amount entries are dropped when pushed.
///
/// ```
/// use kwikswap_amm::domain::{AccountId, Amount, Asset, TokenAddress};
/// use kwikswap_amm::ledger::{InMemoryLedger, LedgerBatch};
/// use kwikswap_amm::traits::Ledger;
///
/// let token = Asset::Token(TokenAddress::from_bytes([1u8; 32]));
/// let alice = AccountId::from_bytes([0xa1; 32]);
/// let mut ledger = InMemoryLedger::new(TokenAddress::from_bytes([0xee; 32]));
/// ledger.credit(&alice, &token, Amount::new(10)).expect("credited");
///
/// let mut batch = LedgerBatch::new();
/// batch.transfer_in(alice, token, Amount::new(10));
/// batch.transfer_in(alice, token, Amount::new(1));
///
/// assert!(batch.apply(&mut ledger).is_err());
/// assert_eq!(ledger.balance_of(&alice, &token), Amount::new(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerBatch {
    entries: Vec<LedgerEntry>,
}

impl LedgerBatch {
    /// An empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Queues a payment from `account` into custody.
    pub fn transfer_in(&mut self, account: AccountId, asset: Asset, amount: Amount) {
        self.push(LedgerEntry::In {
            account,
            asset,
            amount,
        });
    }

    /// Queues a payment from custody to `account`.
    pub fn transfer_out(&mut self, account: AccountId, asset: Asset, amount: Amount) {
        self.push(LedgerEntry::Out {
            account,
            asset,
            amount,
        });
    }

    /// Queues a wrap of custody native.
    pub fn wrap(&mut self, amount: Amount) {
        self.push(LedgerEntry::Wrap(amount));
    }

    /// Queues an unwrap of custody wrapped tokens.
    pub fn unwrap(&mut self, amount: Amount) {
        self.push(LedgerEntry::Unwrap(amount));
    }

    /// The queued entries.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies every entry in order.
    ///
    /// # Errors
    ///
    /// The first entry's error, after undoing the entries before it.
    pub fn apply<L: Ledger + NativeWrapper>(&self, ledger: &mut L) -> Result<(), AmmError> {
        for (i, entry) in self.entries.iter().enumerate() {
            trace!(?entry, "applying ledger entry");
            if let Err(err) = entry.apply(ledger) {
                warn!(?entry, %err, applied = i, "ledger batch failed, reverting");
                Self::undo(&self.entries[..i], ledger);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Undoes a batch that [`apply`](Self::apply) already committed.
    pub fn revert<L: Ledger + NativeWrapper>(&self, ledger: &mut L) {
        warn!(entries = self.entries.len(), "reverting committed ledger batch");
        Self::undo(&self.entries, ledger);
    }

    fn push(&mut self, entry: LedgerEntry) {
        let amount = match entry {
            LedgerEntry::In { amount, .. }
            | LedgerEntry::Out { amount, .. }
            | LedgerEntry::Wrap(amount)
            | LedgerEntry::Unwrap(amount) => amount,
        };
        if !amount.is_zero() {
            self.entries.push(entry);
        }
    }

    fn undo<L: Ledger + NativeWrapper>(applied: &[LedgerEntry], ledger: &mut L) {
        for entry in applied.iter().rev() {
            if let Err(err) = entry.inverse().apply(ledger) {
                error!(?entry, %err, "could not undo ledger entry");
            }
        }
    }
}
