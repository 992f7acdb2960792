//! Asset custody interfaces.
//!
//! The protocol holds every deposited asset in a single custody balance
//! per [`Asset`].  [`Ledger::transfer_in`] moves funds from an account into
//! custody and [`Ledger::transfer_out`] pays them back out.  Both fail with
//! [`AmmError::InsufficientBalance`] and the router treats that failure as
//! fatal to the surrounding operation.

use crate::domain::{AccountId, Amount, Asset, TokenAddress};
use crate::error::AmmError;

/// Account balances plus protocol custody.
pub trait Ledger {
    /// Balance of `asset` held by `account`.
    fn balance_of(&self, account: &AccountId, asset: &Asset) -> Amount;

    /// Balance of `asset` held in protocol custody.
    fn custody_of(&self, asset: &Asset) -> Amount;

    /// Moves `amount` of `asset` from `account` into custody.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if the account lacks funds.
    fn transfer_in(
        &mut self,
        account: &AccountId,
        asset: &Asset,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Moves `amount` of `asset` from custody to `account`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if custody lacks funds.
    fn transfer_out(
        &mut self,
        account: &AccountId,
        asset: &Asset,
        amount: Amount,
    ) -> Result<(), AmmError>;
}

/// 1:1 conversion between the native asset and its token form, inside
/// custody.
pub trait NativeWrapper {
    /// The token that represents the native asset.
    fn wrapped_token(&self) -> TokenAddress;

    /// Converts custody native into wrapped tokens.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if custody lacks native.
    fn wrap(&mut self, amount: Amount) -> Result<Amount, AmmError>;

    /// Converts custody wrapped tokens back into native.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if custody lacks wrapped tokens.
    fn unwrap(&mut self, amount: Amount) -> Result<Amount, AmmError>;
}
