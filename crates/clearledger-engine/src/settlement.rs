//! Matched-order settlement.
//!
//! Each `settle` call applies one matched buy/sell pair: for each side, the
//! source cost leaves the locked sub-balance and the destination amount is
//! credited as available. On the terminal fill of an order, the amount
//! over-reserved at lock time is returned to the available balance before
//! the debit runs.

use clearledger_store::LedgerStore;
use clearledger_types::{LedgerError, Order, Result, TxContext};
use tracing::debug;

use crate::asset_ledger::AssetLedger;
use crate::lock::LockCoordinator;
use crate::state::State;

/// What `settle` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Balances moved and both fill records were persisted.
    Applied,
    /// One of the fill UUIDs was already settled; no writes.
    AlreadyExecuted,
}

/// Owns the settlement transition for matched pairs.
pub struct SettlementEngine<'a, S: LedgerStore> {
    state: State<'a, S>,
}

impl<'a, S: LedgerStore> SettlementEngine<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            state: State::new(store),
        }
    }

    /// Settle one matched pair. The caller has already validated that the
    /// two sides trade mirrored currencies.
    pub fn settle(&mut self, buy: &Order, sell: &Order, ctx: TxContext) -> Result<SettleOutcome> {
        check_amounts(buy)?;
        check_amounts(sell)?;

        // Either UUID already settled means this exact match was applied in
        // a prior invocation; replaying it must not move balances again.
        if self.state.tx_log(&buy.uuid)?.is_some() || self.state.tx_log(&sell.uuid)?.is_some() {
            return Ok(SettleOutcome::AlreadyExecuted);
        }

        self.apply_side(buy, ctx)?;
        self.apply_side(sell, ctx)?;
        self.state.put_tx_pair(buy, sell)?;
        debug!(
            buy = %buy.uuid,
            sell = %sell.uuid,
            buy_cost = buy.final_cost,
            sell_cost = sell.final_cost,
            "pair settled"
        );
        Ok(SettleOutcome::Applied)
    }

    /// One side of the pair: terminal-fill reconciliation, then the locked
    /// debit of `final_cost`, then the credit of `des_count`.
    fn apply_side(&mut self, order: &Order, ctx: TxContext) -> Result<()> {
        if order.is_terminal_fill() {
            let unlock = self.compute_unlock(order)?;
            if unlock > 0 {
                // The inner unlock may have run in a previous partial
                // settlement of the same order; a recorded no-op is fine.
                let mut locks = LockCoordinator::new(self.state.store_mut());
                locks.set_lock(
                    &order.account,
                    &order.src_currency,
                    &order.raw_uuid,
                    unlock,
                    false,
                    ctx,
                )?;
                debug!(
                    order = %order.raw_uuid,
                    account = %order.account,
                    unlock,
                    "released over-reservation on terminal fill"
                );
            }
        }

        let mut asset = self
            .state
            .asset(&order.account, &order.src_currency)?
            .ok_or_else(|| LedgerError::AssetNotFound {
                owner: order.account.clone(),
                currency: order.src_currency.clone(),
            })?;
        if asset.lock_count < order.final_cost {
            return Err(LedgerError::InsufficientLocked {
                currency: order.src_currency.clone(),
                locked: asset.lock_count,
                needed: order.final_cost,
            });
        }
        asset.lock_count -= order.final_cost;
        self.state.put_asset(&asset)?;

        let mut ledger = AssetLedger::new(self.state.store_mut());
        ledger.credit(&order.account, &order.des_currency, order.des_count)?;
        Ok(())
    }

    /// Over-reservation on the terminal fill: the amount locked for the
    /// original order minus everything its prior fills cost minus this
    /// fill's cost.
    fn compute_unlock(&self, order: &Order) -> Result<i64> {
        let prior = self.state.fills(
            &order.account,
            &order.src_currency,
            &order.des_currency,
            &order.raw_uuid,
        )?;
        let cumulative: i64 = prior.iter().map(|fill| fill.final_cost).sum();

        let lock = self
            .state
            .lock_log(&order.account, &order.src_currency, &order.raw_uuid, true)?
            .ok_or_else(|| LedgerError::LockRecordMissing {
                owner: order.account.clone(),
                currency: order.src_currency.clone(),
                order: order.raw_uuid.clone(),
            })?;

        Ok(lock.lock_count - cumulative - order.final_cost)
    }
}

/// A matcher must never produce negative amounts; applying one would move
/// balances backwards (a negative cost grows the locked balance, a negative
/// credit drains the counterparty).
fn check_amounts(order: &Order) -> Result<()> {
    if order.final_cost < 0 {
        return Err(LedgerError::InvalidArgument {
            reason: format!(
                "fill {} has negative final cost {}",
                order.uuid, order.final_cost
            ),
        });
    }
    if order.des_count < 0 {
        return Err(LedgerError::InvalidArgument {
            reason: format!(
                "fill {} has negative destination count {}",
                order.uuid, order.des_count
            ),
        });
    }
    Ok(())
}
