//! Balance locking with idempotency.
//!
//! A lock moves value from the available to the locked sub-balance of one
//! asset row; an unlock moves it back. Each transition for a given
//! (owner, currency, order, direction) tuple executes at most once; the
//! appended `LockLogEntry` is the proof and the guard.

use clearledger_store::LedgerStore;
use clearledger_types::{LedgerError, LockLogEntry, RecordId, Result, TxContext};
use tracing::debug;

use crate::state::State;

/// What `set_lock` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// The transition ran and balances moved.
    Applied,
    /// A lock record for this exact transition already existed; balances
    /// were left untouched.
    AlreadyExecuted,
}

/// Owns lock/unlock transitions and their log.
pub struct LockCoordinator<'a, S: LedgerStore> {
    state: State<'a, S>,
}

impl<'a, S: LedgerStore> LockCoordinator<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            state: State::new(store),
        }
    }

    /// Lock (`is_lock = true`) or unlock `amount` of `currency` held by
    /// `owner`, on behalf of `order`.
    ///
    /// The idempotency lookup runs before the balance checks: a repeat of
    /// an already-executed transition must report `AlreadyExecuted` even
    /// though the first execution drained the balance it would re-check.
    pub fn set_lock(
        &mut self,
        owner: &str,
        currency: &str,
        order: &str,
        amount: i64,
        is_lock: bool,
        ctx: TxContext,
    ) -> Result<LockOutcome> {
        if amount < 0 {
            return Err(LedgerError::InvalidArgument {
                reason: format!("lock amount must not be negative, got {amount}"),
            });
        }
        let mut asset =
            self.state
                .asset(owner, currency)?
                .ok_or_else(|| LedgerError::AssetNotFound {
                    owner: owner.to_string(),
                    currency: currency.to_string(),
                })?;

        if self.state.lock_log(owner, currency, order, is_lock)?.is_some() {
            return Ok(LockOutcome::AlreadyExecuted);
        }

        if is_lock && asset.count < amount {
            return Err(LedgerError::InsufficientAvailable {
                currency: currency.to_string(),
                available: asset.count,
                needed: amount,
            });
        }
        if !is_lock && asset.lock_count < amount {
            return Err(LedgerError::InsufficientLocked {
                currency: currency.to_string(),
                locked: asset.lock_count,
                needed: amount,
            });
        }

        if is_lock {
            asset.count -= amount;
            asset.lock_count += amount;
        } else {
            asset.count += amount;
            asset.lock_count -= amount;
        }
        self.state.put_asset(&asset)?;
        self.state.put_lock_log(&LockLogEntry {
            uuid: RecordId::new(),
            owner: owner.to_string(),
            currency: currency.to_string(),
            order: order.to_string(),
            is_lock,
            lock_count: amount,
            lock_time: ctx.timestamp,
        })?;
        debug!(owner, currency, order, amount, is_lock, "lock state changed");
        Ok(LockOutcome::Applied)
    }

    /// The lock record for (owner, currency, order, direction), if the
    /// transition ever ran.
    pub fn lock_record(
        &self,
        owner: &str,
        currency: &str,
        order: &str,
        is_lock: bool,
    ) -> Result<Option<LockLogEntry>> {
        self.state.lock_log(owner, currency, order, is_lock)
    }
}
