//! Registry and ledger-facing entry points of the legacy exchanges.

use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::config::ProtocolConfig;
use crate::domain::{AccountId, Amount, Asset, Deadline, Liquidity, Timestamp, TokenAddress};
use crate::error::AmmError;
use crate::ledger::LedgerBatch;
use crate::pools::LegacyExchange;
use crate::traits::{FromConfig, LegacyRegistry, Ledger, NativeWrapper};

/// Owns one [`LegacyExchange`] per token.
///
/// Besides the registry role used by the migrator, the factory exposes the
/// legacy exchanges' own deposit, withdrawal and swap calls with the
/// matching custody movements.  Each call works on a copy of the exchange
/// and stores it back only once the ledger batch has gone through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFactory {
    config: ProtocolConfig,
    exchanges: BTreeMap<TokenAddress, LegacyExchange>,
}

impl LegacyFactory {
    /// Number of exchanges.
    #[must_use]
    pub fn exchange_count(&self) -> usize {
        self.exchanges.len()
    }

    /// Deposits `native_amount` plus matching tokens into the exchange for
    /// `token`; returns the shares minted and the tokens taken.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past `deadline`.
    /// - [`AmmError::NotFound`] if the exchange does not exist.
    /// - Any [`LegacyExchange::add_liquidity`] or ledger error.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, ledger), fields(%provider, %token), err)]
    pub fn add_liquidity<L: Ledger + NativeWrapper>(
        &mut self,
        ledger: &mut L,
        provider: AccountId,
        token: TokenAddress,
        native_amount: Amount,
        min_liquidity: Liquidity,
        max_tokens: Amount,
        now: Timestamp,
        deadline: Deadline,
    ) -> Result<(Liquidity, Amount), AmmError> {
        deadline.check(now)?;
        let mut exchange = self.exchange(&token)?.clone();
        let (minted, tokens) =
            exchange.add_liquidity(&provider, native_amount, min_liquidity, max_tokens)?;

        let mut batch = LedgerBatch::new();
        batch.transfer_in(provider, Asset::Native, native_amount);
        batch.transfer_in(provider, Asset::Token(token), tokens);
        batch.apply(ledger)?;
        self.store_exchange(exchange)?;

        info!(%minted, %native_amount, %tokens, "legacy liquidity added");
        Ok((minted, tokens))
    }

    /// Burns `shares` of `owner`; returns `(native, tokens)` paid out.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past `deadline`.
    /// - [`AmmError::NotFound`] if the exchange does not exist.
    /// - Any [`LegacyExchange::remove_liquidity`] or ledger error.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, ledger), fields(%owner, %token), err)]
    pub fn remove_liquidity<L: Ledger + NativeWrapper>(
        &mut self,
        ledger: &mut L,
        owner: AccountId,
        token: TokenAddress,
        shares: Liquidity,
        min_native: Amount,
        min_tokens: Amount,
        now: Timestamp,
        deadline: Deadline,
    ) -> Result<(Amount, Amount), AmmError> {
        deadline.check(now)?;
        let mut exchange = self.exchange(&token)?.clone();
        let (native, tokens) = exchange.remove_liquidity(&owner, shares, min_native, min_tokens)?;

        let mut batch = LedgerBatch::new();
        batch.transfer_out(owner, Asset::Native, native);
        batch.transfer_out(owner, Asset::Token(token), tokens);
        batch.apply(ledger)?;
        self.store_exchange(exchange)?;

        info!(%shares, %native, %tokens, "legacy liquidity removed");
        Ok((native, tokens))
    }

    /// Sells exactly `native_in` for at least `min_tokens`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past `deadline`.
    /// - [`AmmError::NotFound`] if the exchange does not exist.
    /// - Any swap or ledger error.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, ledger), fields(%buyer, %token), err)]
    pub fn native_to_token_swap_input<L: Ledger + NativeWrapper>(
        &mut self,
        ledger: &mut L,
        buyer: AccountId,
        token: TokenAddress,
        native_in: Amount,
        min_tokens: Amount,
        now: Timestamp,
        deadline: Deadline,
    ) -> Result<Amount, AmmError> {
        deadline.check(now)?;
        let mut exchange = self.exchange(&token)?.clone();
        let tokens = exchange.native_to_token_swap_input(native_in, min_tokens)?;

        let mut batch = LedgerBatch::new();
        batch.transfer_in(buyer, Asset::Native, native_in);
        batch.transfer_out(buyer, Asset::Token(token), tokens);
        batch.apply(ledger)?;
        self.store_exchange(exchange)?;

        info!(%native_in, %tokens, "legacy swap native to token");
        Ok(tokens)
    }

    /// Sells exactly `tokens_in` for at least `min_native`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past `deadline`.
    /// - [`AmmError::NotFound`] if the exchange does not exist.
    /// - Any swap or ledger error.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, ledger), fields(%seller, %token), err)]
    pub fn token_to_native_swap_input<L: Ledger + NativeWrapper>(
        &mut self,
        ledger: &mut L,
        seller: AccountId,
        token: TokenAddress,
        tokens_in: Amount,
        min_native: Amount,
        now: Timestamp,
        deadline: Deadline,
    ) -> Result<Amount, AmmError> {
        deadline.check(now)?;
        let mut exchange = self.exchange(&token)?.clone();
        let native = exchange.token_to_native_swap_input(tokens_in, min_native)?;

        let mut batch = LedgerBatch::new();
        batch.transfer_in(seller, Asset::Token(token), tokens_in);
        batch.transfer_out(seller, Asset::Native, native);
        batch.apply(ledger)?;
        self.store_exchange(exchange)?;

        info!(%tokens_in, %native, "legacy swap token to native");
        Ok(native)
    }
}

impl FromConfig<ProtocolConfig> for LegacyFactory {
    fn from_config(config: &ProtocolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            exchanges: BTreeMap::new(),
        })
    }
}

impl LegacyRegistry for LegacyFactory {
    fn exchange(&self, token: &TokenAddress) -> Result<&LegacyExchange, AmmError> {
        self.exchanges.get(token).ok_or(AmmError::NotFound)
    }

    fn create_exchange(&mut self, token: TokenAddress) -> Result<&LegacyExchange, AmmError> {
        if !self.exchanges.contains_key(&token) {
            let exchange = LegacyExchange::from_config(&self.config.legacy_config(token)?)?;
            info!(%token, "legacy exchange created");
            self.exchanges.insert(token, exchange);
        }
        self.exchange(&token)
    }

    fn store_exchange(&mut self, exchange: LegacyExchange) -> Result<(), AmmError> {
        let slot = self
            .exchanges
            .get_mut(&exchange.token())
            .ok_or(AmmError::NotFound)?;
        *slot = exchange;
        Ok(())
    }
}
