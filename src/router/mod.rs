//! Multi-hop swaps and liquidity management over the pool registry.
//!
//! # Atomicity
//!
//! Every entry point runs in two phases:
//!
//! 1. **Stage**: quote the route against current reserves, check the
//!    deadline and slippage bounds, then replay each pool operation on a
//!    private copy of the pool while queueing the custody
//!    movements in a [`LedgerBatch`](crate::ledger::LedgerBatch).
//! 2. **Commit**: apply the batch (undone in reverse on failure), then
//!    write the staged pools back to the registry.  A rejected write
//!    reverts the batch and restores the pools already written.
//!
//! An error in either phase leaves registry and ledger exactly as they
//! were.
//!
//! # Native asset
//!
//! The `*_native*` variants settle one side in [`Asset::Native`]; the
//! router wraps or unwraps inside custody so the pools only ever see the
//! wrapped-native token.
//!
//! Amounts are exact: tokens that take a fee on transfer are not
//! supported, and there are no swap variants for them.

mod staging;

pub(crate) use staging::Execution;

use tracing::{debug, error, info, instrument, warn};

use crate::config::RouterConfig;
use crate::domain::{
    AccountId, AddLiquidity, Amount, Asset, Deadline, FeeTier, Liquidity, RemoveLiquidity,
    RouteAmounts, SwapExactIn, SwapExactOut, SwapPath, Timestamp, TokenAddress, TokenPair,
};
use crate::error::AmmError;
use crate::math;
use crate::pools::ConstantProductPool;
use crate::traits::{Clock, Ledger, NativeWrapper, PoolRegistry};

/// Orchestrates swaps and liquidity calls.
///
/// The router owns its collaborators for the duration of its life; use
/// [`registry`](Self::registry) and [`ledger`](Self::ledger) to inspect
/// them and [`into_parts`](Self::into_parts) to take them back.  Calls
/// take `&mut self`, which linearizes every state change.
///
/// # Example
///
/// ```rust
/// use kwikswap_amm::config::ProtocolConfig;
/// use kwikswap_amm::domain::{
///     AccountId, AddLiquidity, Amount, Asset, Deadline, SwapExactIn, SwapPath, TokenAddress,
/// };
/// use kwikswap_amm::factory::PairFactory;
/// use kwikswap_amm::ledger::InMemoryLedger;
/// use kwikswap_amm::router::Router;
/// use kwikswap_amm::traits::{FromConfig, Ledger, SystemClock};
///
/// let config = ProtocolConfig::default();
/// let a = TokenAddress::from_bytes([1u8; 32]);
/// let b = TokenAddress::from_bytes([2u8; 32]);
/// let alice = AccountId::from_bytes([0xa1; 32]);
///
/// let mut ledger = InMemoryLedger::new(config.wrapped_native);
/// ledger.credit(&alice, &Asset::Token(a), Amount::new(2_000_000)).expect("funded");
/// ledger.credit(&alice, &Asset::Token(b), Amount::new(1_000_000)).expect("funded");
///
/// let factory = PairFactory::from_config(&config).expect("valid");
/// let mut router = Router::new(factory, ledger, SystemClock, config.router_config())
///     .expect("router");
///
/// let deposit =
///     AddLiquidity::new(a, b, Amount::new(1_000_000), Amount::new(1_000_000), Deadline::NEVER);
/// router.add_liquidity(alice, &deposit).expect("liquidity added");
///
/// let path = SwapPath::new(vec![a, b]).expect("valid path");
/// let swap = SwapExactIn::new(path, Amount::new(1_000), Amount::new(990), Deadline::NEVER);
/// let amounts = router.swap_exact_in(alice, &swap).expect("swapped");
/// assert_eq!(amounts.amount_out(), Amount::new(996));
/// assert_eq!(router.ledger().balance_of(&alice, &Asset::Token(b)), Amount::new(996));
/// ```
#[derive(Debug)]
pub struct Router<R, L, C> {
    registry: R,
    ledger: L,
    clock: C,
    config: RouterConfig,
}

impl<R, L, C> Router<R, L, C>
where
    R: PoolRegistry,
    L: Ledger + NativeWrapper,
    C: Clock,
{
    /// Assembles a router.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if the ledger wraps native into a
    /// different token than `config` names.
    pub fn new(registry: R, ledger: L, clock: C, config: RouterConfig) -> Result<Self, AmmError> {
        if ledger.wrapped_token() != config.wrapped_native() {
            return Err(AmmError::InvalidConfiguration(
                "ledger wrapper and router disagree on the wrapped native token",
            ));
        }
        Ok(Self {
            registry,
            ledger,
            clock,
            config,
        })
    }

    /// The pool registry.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// The custody ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger, e.g. to fund accounts.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The time source.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Router settings.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Current time according to the clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Gives back the collaborators.
    pub fn into_parts(self) -> (R, L, C) {
        (self.registry, self.ledger, self.clock)
    }

    /// The pool for two tokens in either order.
    ///
    /// # Errors
    ///
    /// As [`PoolRegistry::pool_for`].
    pub fn pool(
        &self,
        a: TokenAddress,
        b: TokenAddress,
    ) -> Result<&ConstantProductPool, AmmError> {
        self.registry.pool_for(a, b)
    }

    // -- quotes ---------------------------------------------------------------

    /// `amount_a · reserve_b / reserve_a`, floored.
    ///
    /// # Errors
    ///
    /// As [`math::quote`].
    pub fn quote(
        &self,
        amount_a: Amount,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Amount, AmmError> {
        math::quote(amount_a, reserve_a, reserve_b)
    }

    /// Output of one hop.
    ///
    /// # Errors
    ///
    /// As [`math::get_amount_out`].
    pub fn get_amount_out(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        fee: FeeTier,
    ) -> Result<Amount, AmmError> {
        math::get_amount_out(amount_in, reserve_in, reserve_out, fee)
    }

    /// Input of one hop.
    ///
    /// # Errors
    ///
    /// As [`math::get_amount_in`].
    pub fn get_amount_in(
        &self,
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        fee: FeeTier,
    ) -> Result<Amount, AmmError> {
        math::get_amount_in(amount_out, reserve_in, reserve_out, fee)
    }

    /// Chains [`get_amount_out`](Self::get_amount_out) along `path` using
    /// current reserves.  Changes nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotFound`] if a hop has no pool.
    /// - Any pricing error of a hop.
    pub fn get_amounts_out(
        &self,
        amount_in: Amount,
        path: &SwapPath,
    ) -> Result<RouteAmounts, AmmError> {
        let mut amounts = Vec::with_capacity(path.len());
        amounts.push(amount_in);
        let mut current = amount_in;
        for (token_in, token_out) in path.legs() {
            let pool = self.registry.pool_for(token_in, token_out)?;
            let (reserve_in, reserve_out) = pool.reserves_for(&token_in)?;
            current = math::get_amount_out(current, reserve_in, reserve_out, pool.fee_tier())?;
            amounts.push(current);
        }
        let amounts = RouteAmounts::new(amounts)?;
        debug!(%path, ?amounts, "quoted exact-in route");
        Ok(amounts)
    }

    /// Chains [`get_amount_in`](Self::get_amount_in) backward along `path`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotFound`] if a hop has no pool.
    /// - Any pricing error of a hop.
    pub fn get_amounts_in(
        &self,
        amount_out: Amount,
        path: &SwapPath,
    ) -> Result<RouteAmounts, AmmError> {
        let mut amounts = vec![Amount::ZERO; path.len()];
        let last = amounts.len() - 1;
        amounts[last] = amount_out;
        for (i, (token_in, token_out)) in path.legs().enumerate().rev() {
            let pool = self.registry.pool_for(token_in, token_out)?;
            let (reserve_in, reserve_out) = pool.reserves_for(&token_in)?;
            amounts[i] =
                math::get_amount_in(amounts[i + 1], reserve_in, reserve_out, pool.fee_tier())?;
        }
        let amounts = RouteAmounts::new(amounts)?;
        debug!(%path, ?amounts, "quoted exact-out route");
        Ok(amounts)
    }

    // -- liquidity ------------------------------------------------------------

    /// Deposits into the pool of `req.token_a`/`req.token_b`, creating it
    /// if needed.  Returns `(amount_a, amount_b, shares)`.
    ///
    /// Against a funded pool the deposit is scaled to the current ratio
    /// without exceeding either desired amount.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if the scaled side falls below its minimum.
    /// - [`AmmError::InsufficientLiquidityMinted`], ledger and pool errors.
    #[instrument(
        skip(self, req),
        fields(%caller, token_a = %req.token_a, token_b = %req.token_b),
        err
    )]
    pub fn add_liquidity(
        &mut self,
        caller: AccountId,
        req: &AddLiquidity,
    ) -> Result<(Amount, Amount, Liquidity), AmmError> {
        self.add_liquidity_inner(caller, req, false)
    }

    /// [`add_liquidity`](Self::add_liquidity) where the wrapped-native side
    /// is paid in native.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidToken`] if neither token is the wrapped native;
    /// otherwise as [`add_liquidity`](Self::add_liquidity).
    #[instrument(
        skip(self, req),
        fields(%caller, token_a = %req.token_a, token_b = %req.token_b),
        err
    )]
    pub fn add_liquidity_native(
        &mut self,
        caller: AccountId,
        req: &AddLiquidity,
    ) -> Result<(Amount, Amount, Liquidity), AmmError> {
        self.require_native_side(req.token_a, req.token_b)?;
        self.add_liquidity_inner(caller, req, true)
    }

    /// Burns `req.shares` of the caller and pays out both reserves
    /// pro rata.  Returns `(amount_a, amount_b)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if a payout is below its minimum.
    /// - [`AmmError::InsufficientBalance`] if the caller holds fewer shares.
    /// - [`AmmError::InsufficientLiquidityBurned`] and ledger errors.
    #[instrument(
        skip(self, req),
        fields(%caller, token_a = %req.token_a, token_b = %req.token_b, shares = %req.shares),
        err
    )]
    pub fn remove_liquidity(
        &mut self,
        caller: AccountId,
        req: &RemoveLiquidity,
    ) -> Result<(Amount, Amount), AmmError> {
        self.remove_liquidity_inner(caller, req, false)
    }

    /// [`remove_liquidity`](Self::remove_liquidity) paying the
    /// wrapped-native side out as native.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidToken`] if neither token is the wrapped native;
    /// otherwise as [`remove_liquidity`](Self::remove_liquidity).
    #[instrument(
        skip(self, req),
        fields(%caller, token_a = %req.token_a, token_b = %req.token_b, shares = %req.shares),
        err
    )]
    pub fn remove_liquidity_native(
        &mut self,
        caller: AccountId,
        req: &RemoveLiquidity,
    ) -> Result<(Amount, Amount), AmmError> {
        self.require_native_side(req.token_a, req.token_b)?;
        self.remove_liquidity_inner(caller, req, true)
    }

    // -- swaps ----------------------------------------------------------------

    /// Sells exactly `req.amount_in` of the first path token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::ExcessiveSlippage`] if the route yields less than
    ///   `req.amount_out_min`.
    /// - [`AmmError::PathExecutionMismatch`] if a leg deviates from the
    ///   quote (e.g. the path crosses the same pool twice).
    /// - [`AmmError::NotFound`], pool and ledger errors.
    #[instrument(
        skip(self, req),
        fields(%caller, path = %req.path, amount_in = %req.amount_in),
        err
    )]
    pub fn swap_exact_in(
        &mut self,
        caller: AccountId,
        req: &SwapExactIn,
    ) -> Result<RouteAmounts, AmmError> {
        self.swap_exact_in_inner(caller, req, false, false)
    }

    /// Buys exactly `req.amount_out` of the last path token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ExcessiveInputRequired`] if the route needs more than
    ///   `req.amount_in_max`.
    /// - Otherwise as [`swap_exact_in`](Self::swap_exact_in).
    #[instrument(
        skip(self, req),
        fields(%caller, path = %req.path, amount_out = %req.amount_out),
        err
    )]
    pub fn swap_exact_out(
        &mut self,
        caller: AccountId,
        req: &SwapExactOut,
    ) -> Result<RouteAmounts, AmmError> {
        self.swap_exact_out_inner(caller, req, false, false)
    }

    /// Sells exactly `req.amount_in` native; the path must start at the
    /// wrapped-native token.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidPath`] for a path not starting at the wrapped
    /// native; otherwise as [`swap_exact_in`](Self::swap_exact_in).
    #[instrument(
        skip(self, req),
        fields(%caller, path = %req.path, amount_in = %req.amount_in),
        err
    )]
    pub fn swap_exact_native_for_tokens(
        &mut self,
        caller: AccountId,
        req: &SwapExactIn,
    ) -> Result<RouteAmounts, AmmError> {
        self.swap_exact_in_inner(caller, req, true, false)
    }

    /// Sells exactly `req.amount_in` tokens for native; the path must end
    /// at the wrapped-native token.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidPath`] for a path not ending at the wrapped
    /// native; otherwise as [`swap_exact_in`](Self::swap_exact_in).
    #[instrument(
        skip(self, req),
        fields(%caller, path = %req.path, amount_in = %req.amount_in),
        err
    )]
    pub fn swap_exact_tokens_for_native(
        &mut self,
        caller: AccountId,
        req: &SwapExactIn,
    ) -> Result<RouteAmounts, AmmError> {
        self.swap_exact_in_inner(caller, req, false, true)
    }

    /// Buys exactly `req.amount_out` native with tokens; the path must end
    /// at the wrapped-native token.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidPath`] for a path not ending at the wrapped
    /// native; otherwise as [`swap_exact_out`](Self::swap_exact_out).
    #[instrument(
        skip(self, req),
        fields(%caller, path = %req.path, amount_out = %req.amount_out),
        err
    )]
    pub fn swap_tokens_for_exact_native(
        &mut self,
        caller: AccountId,
        req: &SwapExactOut,
    ) -> Result<RouteAmounts, AmmError> {
        self.swap_exact_out_inner(caller, req, false, true)
    }

    /// Buys exactly `req.amount_out` tokens with native; the path must
    /// start at the wrapped-native token.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidPath`] for a path not starting at the wrapped
    /// native; otherwise as [`swap_exact_out`](Self::swap_exact_out).
    #[instrument(
        skip(self, req),
        fields(%caller, path = %req.path, amount_out = %req.amount_out),
        err
    )]
    pub fn swap_native_for_exact_tokens(
        &mut self,
        caller: AccountId,
        req: &SwapExactOut,
    ) -> Result<RouteAmounts, AmmError> {
        self.swap_exact_out_inner(caller, req, true, false)
    }

    // -- staging --------------------------------------------------------------

    /// Starts a call at the clock's current time.
    pub(crate) fn begin(&self) -> Execution {
        Execution::new(self.now())
    }

    /// Stages the pool side of a deposit: creates the pool if needed,
    /// scales the amounts to the pool ratio and mints to the recipient
    /// (the caller when unset).  Custody movements are left to the caller.
    pub(crate) fn stage_add_liquidity(
        &self,
        exec: &mut Execution,
        caller: AccountId,
        req: &AddLiquidity,
    ) -> Result<(Amount, Amount, Liquidity), AmmError> {
        let pair = TokenPair::new(req.token_a, req.token_b)?;
        let pool = exec.pool_or_create(&self.registry, pair)?;
        let (amount_a, amount_b) = optimal_deposit(pool, req)?;
        let (amount0, amount1) = pair.orient(&req.token_a, (amount_a, amount_b))?;
        let shares = pool.mint(&req.recipient.unwrap_or(caller), amount0, amount1)?;
        debug!(%pair, %amount_a, %amount_b, %shares, "staged deposit");
        Ok((amount_a, amount_b, shares))
    }

    /// Applies the staged custody movements, then writes the staged pools
    /// back.  Either everything lands or nothing does.
    pub(crate) fn commit(&mut self, exec: Execution) -> Result<(), AmmError> {
        let (pools, batch) = exec.into_parts();
        batch.apply(&mut self.ledger)?;

        for (pool, created) in &pools {
            if *created {
                if let Err(err) = self.registry.create_pool(*pool.token_pair()) {
                    warn!(pair = %pool.token_pair(), %err, "pool creation failed at commit");
                    batch.revert(&mut self.ledger);
                    return Err(err);
                }
            }
        }
        // Every staged pool now exists in the registry.
        let mut previous = Vec::with_capacity(pools.len());
        for (pool, _) in &pools {
            let stored = self.registry.get_pool(pool.token_pair()).cloned();
            match stored {
                Ok(stored) => previous.push(stored),
                Err(err) => {
                    batch.revert(&mut self.ledger);
                    return Err(err);
                }
            }
        }
        for (i, (pool, _)) in pools.into_iter().enumerate() {
            let pair = *pool.token_pair();
            if let Err(err) = self.registry.store_pool(pool) {
                warn!(%pair, %err, "pool write failed at commit");
                batch.revert(&mut self.ledger);
                self.restore_pools(previous.into_iter().take(i));
                return Err(err);
            }
        }
        Ok(())
    }

    fn restore_pools(&mut self, pools: impl Iterator<Item = ConstantProductPool>) {
        for pool in pools {
            let pair = *pool.token_pair();
            if let Err(err) = self.registry.store_pool(pool) {
                error!(%pair, %err, "could not restore pool after a failed commit");
            }
        }
    }

    // -- internals ------------------------------------------------------------

    fn check_deadline(&self, deadline: Deadline) -> Result<(), AmmError> {
        deadline.check(self.now())
    }

    fn wrapped(&self) -> TokenAddress {
        self.config.wrapped_native()
    }

    fn require_native_side(&self, a: TokenAddress, b: TokenAddress) -> Result<(), AmmError> {
        if a != self.wrapped() && b != self.wrapped() {
            return Err(AmmError::InvalidToken("neither token is the wrapped native token"));
        }
        Ok(())
    }

    fn require_path_ends(
        &self,
        path: &SwapPath,
        native_in: bool,
        native_out: bool,
    ) -> Result<(), AmmError> {
        if native_in && path.first() != self.wrapped() {
            return Err(AmmError::InvalidPath("path must start at the wrapped native token"));
        }
        if native_out && path.last() != self.wrapped() {
            return Err(AmmError::InvalidPath("path must end at the wrapped native token"));
        }
        Ok(())
    }

    /// Queues `payer → custody`; native payments are wrapped on arrival.
    fn stage_payment_in(
        &self,
        exec: &mut Execution,
        payer: AccountId,
        token: TokenAddress,
        amount: Amount,
        native: bool,
    ) {
        let batch = exec.batch_mut();
        if native && token == self.wrapped() {
            batch.transfer_in(payer, Asset::Native, amount);
            batch.wrap(amount);
        } else {
            batch.transfer_in(payer, Asset::Token(token), amount);
        }
    }

    /// Queues `custody → payee`; native payouts are unwrapped first.
    fn stage_payment_out(
        &self,
        exec: &mut Execution,
        payee: AccountId,
        token: TokenAddress,
        amount: Amount,
        native: bool,
    ) {
        let batch = exec.batch_mut();
        if native && token == self.wrapped() {
            batch.unwrap(amount);
            batch.transfer_out(payee, Asset::Native, amount);
        } else {
            batch.transfer_out(payee, Asset::Token(token), amount);
        }
    }

    fn add_liquidity_inner(
        &mut self,
        caller: AccountId,
        req: &AddLiquidity,
        native: bool,
    ) -> Result<(Amount, Amount, Liquidity), AmmError> {
        self.check_deadline(req.deadline)?;
        let mut exec = self.begin();
        let (amount_a, amount_b, shares) = self.stage_add_liquidity(&mut exec, caller, req)?;
        self.stage_payment_in(&mut exec, caller, req.token_a, amount_a, native);
        self.stage_payment_in(&mut exec, caller, req.token_b, amount_b, native);
        self.commit(exec)?;
        info!(%amount_a, %amount_b, %shares, "liquidity added");
        Ok((amount_a, amount_b, shares))
    }

    fn remove_liquidity_inner(
        &mut self,
        caller: AccountId,
        req: &RemoveLiquidity,
        native: bool,
    ) -> Result<(Amount, Amount), AmmError> {
        self.check_deadline(req.deadline)?;
        let pair = TokenPair::new(req.token_a, req.token_b)?;
        let mut exec = self.begin();
        let pool = exec.pool(&self.registry, pair)?;
        let (amount0, amount1) = pool.burn(&caller, req.shares)?;
        let (amount_a, amount_b) = pair.orient(&req.token_a, (amount0, amount1))?;
        if amount_a < req.amount_a_min {
            return Err(AmmError::InsufficientAAmount);
        }
        if amount_b < req.amount_b_min {
            return Err(AmmError::InsufficientBAmount);
        }
        let recipient = req.recipient.unwrap_or(caller);
        self.stage_payment_out(&mut exec, recipient, req.token_a, amount_a, native);
        self.stage_payment_out(&mut exec, recipient, req.token_b, amount_b, native);
        self.commit(exec)?;
        info!(%amount_a, %amount_b, "liquidity removed");
        Ok((amount_a, amount_b))
    }

    fn swap_exact_in_inner(
        &mut self,
        caller: AccountId,
        req: &SwapExactIn,
        native_in: bool,
        native_out: bool,
    ) -> Result<RouteAmounts, AmmError> {
        self.check_deadline(req.deadline)?;
        self.require_path_ends(&req.path, native_in, native_out)?;
        let amounts = self.get_amounts_out(req.amount_in, &req.path)?;
        if amounts.amount_out() < req.amount_out_min {
            return Err(AmmError::ExcessiveSlippage);
        }

        let mut exec = self.begin();
        self.stage_payment_in(&mut exec, caller, req.path.first(), amounts.amount_in(), native_in);
        for (hop, (token_in, token_out)) in req.path.legs().enumerate() {
            let pool = exec.pool(&self.registry, TokenPair::new(token_in, token_out)?)?;
            let result = pool.swap(&token_in, amounts[hop], Amount::ZERO)?;
            check_leg(hop, amounts[hop + 1], result.amount_out())?;
        }
        let recipient = req.recipient.unwrap_or(caller);
        let payout = amounts.amount_out();
        self.stage_payment_out(&mut exec, recipient, req.path.last(), payout, native_out);
        self.commit(exec)?;

        info!(
            amount_in = %amounts.amount_in(),
            amount_out = %amounts.amount_out(),
            "swap executed"
        );
        Ok(amounts)
    }

    fn swap_exact_out_inner(
        &mut self,
        caller: AccountId,
        req: &SwapExactOut,
        native_in: bool,
        native_out: bool,
    ) -> Result<RouteAmounts, AmmError> {
        self.check_deadline(req.deadline)?;
        self.require_path_ends(&req.path, native_in, native_out)?;
        let amounts = self.get_amounts_in(req.amount_out, &req.path)?;
        if amounts.amount_in() > req.amount_in_max {
            return Err(AmmError::ExcessiveInputRequired);
        }

        let mut exec = self.begin();
        self.stage_payment_in(&mut exec, caller, req.path.first(), amounts.amount_in(), native_in);
        for (hop, (token_in, token_out)) in req.path.legs().enumerate() {
            let pool = exec.pool(&self.registry, TokenPair::new(token_in, token_out)?)?;
            let result = pool.swap_exact_out(&token_in, amounts[hop], amounts[hop + 1])?;
            check_leg(hop, amounts[hop], result.amount_in())?;
        }
        let recipient = req.recipient.unwrap_or(caller);
        let payout = amounts.amount_out();
        self.stage_payment_out(&mut exec, recipient, req.path.last(), payout, native_out);
        self.commit(exec)?;

        info!(
            amount_in = %amounts.amount_in(),
            amount_out = %amounts.amount_out(),
            "swap executed"
        );
        Ok(amounts)
    }
}

/// The deposit amounts that match the pool ratio without exceeding either
/// desired amount.  An empty pool takes the desired amounts as they are.
fn optimal_deposit(
    pool: &ConstantProductPool,
    req: &AddLiquidity,
) -> Result<(Amount, Amount), AmmError> {
    let (reserve_a, reserve_b) = pool.reserves_for(&req.token_a)?;
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((req.amount_a_desired, req.amount_b_desired));
    }
    let b_optimal = math::quote(req.amount_a_desired, reserve_a, reserve_b)?;
    if b_optimal <= req.amount_b_desired {
        if b_optimal < req.amount_b_min {
            return Err(AmmError::InsufficientBAmount);
        }
        return Ok((req.amount_a_desired, b_optimal));
    }
    let a_optimal = math::quote(req.amount_b_desired, reserve_b, reserve_a)?;
    if a_optimal > req.amount_a_desired || a_optimal < req.amount_a_min {
        return Err(AmmError::InsufficientAAmount);
    }
    Ok((a_optimal, req.amount_b_desired))
}

fn check_leg(hop: usize, quoted: Amount, executed: Amount) -> Result<(), AmmError> {
    if quoted != executed {
        warn!(hop, %quoted, %executed, "leg deviated from quoted route");
        return Err(AmmError::PathExecutionMismatch);
    }
    debug!(hop, amount = %executed, "leg staged");
    Ok(())
}
