//! A map-backed ledger.

use std::collections::BTreeMap;

use tracing::trace;

use crate::domain::{AccountId, Amount, Asset, TokenAddress};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::{Ledger, NativeWrapper};

/// Account balances and protocol custody held in memory.
///
/// The wrapped-native token is an ordinary [`Asset::Token`]; wrapping
/// moves custody between [`Asset::Native`] and that token at 1:1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryLedger {
    wrapped_native: TokenAddress,
    balances: BTreeMap<(AccountId, Asset), Amount>,
    custody: BTreeMap<Asset, Amount>,
}

impl InMemoryLedger {
    /// An empty ledger whose wrapper issues `wrapped_native`.
    #[must_use]
    pub const fn new(wrapped_native: TokenAddress) -> Self {
        Self {
            wrapped_native,
            balances: BTreeMap::new(),
            custody: BTreeMap::new(),
        }
    }

    /// Mints `amount` of `asset` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn credit(
        &mut self,
        account: &AccountId,
        asset: &Asset,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let balance = self.balance_of(account, asset).safe_add(&amount)?;
        self.set_balance(account, asset, balance);
        Ok(())
    }

    /// Every non-zero account balance.
    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, &Asset, Amount)> + '_ {
        self.balances
            .iter()
            .map(|((account, asset), amount)| (account, asset, *amount))
    }

    fn set_balance(&mut self, account: &AccountId, asset: &Asset, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(*account, *asset));
        } else {
            self.balances.insert((*account, *asset), amount);
        }
    }

    fn set_custody(&mut self, asset: &Asset, amount: Amount) {
        if amount.is_zero() {
            self.custody.remove(asset);
        } else {
            self.custody.insert(*asset, amount);
        }
    }

    fn move_custody(&mut self, from: Asset, to: Asset, amount: Amount) -> Result<Amount, AmmError> {
        let source = self
            .custody_of(&from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let target = self.custody_of(&to).safe_add(&amount)?;
        self.set_custody(&from, source);
        self.set_custody(&to, target);
        Ok(amount)
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, account: &AccountId, asset: &Asset) -> Amount {
        self.balances
            .get(&(*account, *asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn custody_of(&self, asset: &Asset) -> Amount {
        self.custody.get(asset).copied().unwrap_or(Amount::ZERO)
    }

    fn transfer_in(
        &mut self,
        account: &AccountId,
        asset: &Asset,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self
            .balance_of(account, asset)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let custody = self.custody_of(asset).safe_add(&amount)?;
        self.set_balance(account, asset, balance);
        self.set_custody(asset, custody);
        trace!(%account, %asset, %amount, "transfer in");
        Ok(())
    }

    fn transfer_out(
        &mut self,
        account: &AccountId,
        asset: &Asset,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let custody = self
            .custody_of(asset)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let balance = self.balance_of(account, asset).safe_add(&amount)?;
        self.set_custody(asset, custody);
        self.set_balance(account, asset, balance);
        trace!(%account, %asset, %amount, "transfer out");
        Ok(())
    }
}

impl NativeWrapper for InMemoryLedger {
    fn wrapped_token(&self) -> TokenAddress {
        self.wrapped_native
    }

    fn wrap(&mut self, amount: Amount) -> Result<Amount, AmmError> {
        self.move_custody(Asset::Native, Asset::Token(self.wrapped_native), amount)
    }

    fn unwrap(&mut self, amount: Amount) -> Result<Amount, AmmError> {
        self.move_custody(Asset::Token(self.wrapped_native), Asset::Native, amount)
    }
}
