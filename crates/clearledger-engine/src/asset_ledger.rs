//! Per-(owner, currency) balance bookkeeping.
//!
//! Asset rows are created lazily on first credit and never deleted, so a
//! missing row ("no record") stays distinguishable from a zero balance.

use clearledger_store::LedgerStore;
use clearledger_types::{Asset, Result};

use crate::state::{self, State};

/// Owns the Asset rows. All mutations go through here.
pub struct AssetLedger<'a, S: LedgerStore> {
    state: State<'a, S>,
}

impl<'a, S: LedgerStore> AssetLedger<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            state: State::new(store),
        }
    }

    /// The asset row for (owner, currency). `None` means no record exists,
    /// which is distinct from a recorded zero balance.
    pub fn balance(&self, owner: &str, currency: &str) -> Result<Option<Asset>> {
        self.state.asset(owner, currency)
    }

    /// Add `amount` to the owner's available balance, creating the row on
    /// first credit.
    pub fn credit(&mut self, owner: &str, currency: &str, amount: i64) -> Result<Asset> {
        let mut asset = self
            .state
            .asset(owner, currency)?
            .unwrap_or_else(|| Asset::new(owner, currency));
        asset.count += amount;
        self.state.put_asset(&asset)?;
        Ok(asset)
    }

    /// Make sure a zero-balance row exists for (owner, currency).
    /// Idempotent; an existing row is left untouched.
    pub fn ensure_account(&mut self, owner: &str, currency: &str) -> Result<Asset> {
        if let Some(existing) = self.state.asset(owner, currency)? {
            return Ok(existing);
        }
        let asset = Asset::new(owner, currency);
        self.state.put_asset(&asset)?;
        Ok(asset)
    }

    /// Every asset row the owner holds.
    pub fn assets_of(&mut self, owner: &str) -> Result<Vec<Asset>> {
        state::assets_of(&*self.state.store_mut(), owner)
    }
}
