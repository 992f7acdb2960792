//! Moves liquidity from a legacy single-token exchange into the paired
//! pool of the same token and the wrapped native token.
//!
//! # Flow
//!
//! 1. Withdraw the caller's whole legacy position, `(native, tokens)`.
//! 2. Deposit into the `(token, wrapped native)` pool through the router,
//!    scaled to the pool's ratio.  The minimums of the request apply to
//!    the scaled amounts.
//! 3. Refund whatever the ratio left over.
//!
//! The withdrawn assets never leave custody: the deposited native is
//! wrapped in place and only the refund is paid out.  The migration is
//! staged like any router call, so a failure leaves the legacy exchange,
//! the pool and the ledger untouched.  The emptied legacy position is
//! written before custody moves and put back if the commit fails.

mod outcome;

pub use outcome::MigrationOutcome;

use tracing::{debug, error, info, instrument};

use crate::domain::{AccountId, AddLiquidity, Amount, Asset, MigrationRequest, TokenAddress};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::router::Router;
use crate::traits::{Clock, Ledger, LegacyRegistry, LiquiditySource, NativeWrapper, PoolRegistry};

/// Migrates positions out of the legacy exchanges held by `F`.
#[derive(Debug, Clone)]
pub struct Migrator<F> {
    legacy: F,
}

impl<F: LegacyRegistry> Migrator<F> {
    /// Wraps the legacy registry.
    #[must_use]
    pub const fn new(legacy: F) -> Self {
        Self { legacy }
    }

    /// The legacy registry.
    #[must_use]
    pub const fn legacy(&self) -> &F {
        &self.legacy
    }

    /// Mutable access to the legacy registry.
    pub fn legacy_mut(&mut self) -> &mut F {
        &mut self.legacy
    }

    /// Gives back the legacy registry.
    pub fn into_inner(self) -> F {
        self.legacy
    }

    /// Moves the caller's position in the legacy exchange for
    /// `req.legacy_token` into the paired pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::NotFound`] if no legacy exchange exists for the token.
    /// - [`AmmError::InsufficientLiquidityBurned`] if the caller holds no
    ///   legacy shares.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if the token or native deposit falls below its minimum.
    /// - [`AmmError::InsufficientLiquidity`] if the pool would issue no
    ///   shares for the deposit.
    /// - Any ledger or registry error.
    #[instrument(skip(self, router, req), fields(%caller, token = %req.legacy_token), err)]
    pub fn migrate<R, L, C>(
        &mut self,
        router: &mut Router<R, L, C>,
        caller: AccountId,
        req: &MigrationRequest,
    ) -> Result<MigrationOutcome, AmmError>
    where
        R: PoolRegistry,
        L: Ledger + NativeWrapper,
        C: Clock,
    {
        req.deadline.check(router.now())?;
        let token = req.legacy_token;
        let original = self.legacy.exchange(&token)?.clone();
        let mut exchange = original.clone();
        let (native, tokens) = withdraw_position(&mut exchange, &caller, token)?;

        let wrapped = router.config().wrapped_native();
        let deposit = AddLiquidity::new(token, wrapped, tokens, native, req.deadline)
            .with_min(req.min_token, req.min_native)
            .to(caller);

        let mut exec = router.begin();
        let (token_used, native_used, shares) = router
            .stage_add_liquidity(&mut exec, caller, &deposit)
            .map_err(|err| match err {
                AmmError::InsufficientLiquidityMinted => AmmError::InsufficientLiquidity,
                other => {
                    if other.is_slippage() {
                        debug!(%other, "paired deposit below requested minimum");
                    }
                    other
                }
            })?;
        let token_refund = tokens.safe_sub(&token_used)?;
        let native_refund = native.safe_sub(&native_used)?;

        let batch = exec.batch_mut();
        batch.wrap(native_used);
        batch.transfer_out(caller, Asset::Token(token), token_refund);
        batch.transfer_out(caller, Asset::Native, native_refund);

        self.legacy.store_exchange(exchange)?;
        if let Err(err) = router.commit(exec) {
            if let Err(restore) = self.legacy.store_exchange(original) {
                error!(%token, %restore, "could not restore legacy exchange");
            }
            return Err(err);
        }

        let outcome = MigrationOutcome::new(
            token,
            (token_used, native_used),
            shares,
            (token_refund, native_refund),
        );
        info!(%outcome, "position migrated");
        Ok(outcome)
    }
}

/// Burns all of `owner`'s shares in `source` and returns
/// `(native, tokens)`, whichever order the source reports them in.
fn withdraw_position<S: LiquiditySource>(
    source: &mut S,
    owner: &AccountId,
    token: TokenAddress,
) -> Result<(Amount, Amount), AmmError> {
    let shares = source.shares_of(owner);
    if shares.is_zero() {
        return Err(AmmError::InsufficientLiquidityBurned);
    }
    let assets = source.assets();
    let (first, second) = source.withdraw(owner, shares)?;
    match assets {
        (Asset::Native, Asset::Token(t)) if t == token => Ok((first, second)),
        (Asset::Token(t), Asset::Native) if t == token => Ok((second, first)),
        _ => Err(AmmError::InvalidToken("legacy source does not pair the token with native")),
    }
}
