//! Per-(owner, currency) balance record.
//!
//! Every balance is split into an available part (`count`, spendable or
//! lockable) and a locked part (`lock_count`, reserved against pending
//! orders). Rows are created lazily on first credit and never deleted.

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// One owner's holding of one currency.
///
/// Invariant: `count >= 0 && lock_count >= 0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub uuid: RecordId,
    pub owner: String,
    pub currency: String,
    /// Available balance.
    pub count: i64,
    /// Balance reserved against pending orders.
    #[serde(rename = "lockCount")]
    pub lock_count: i64,
}

impl Asset {
    /// A fresh zero-balance row.
    #[must_use]
    pub fn new(owner: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            uuid: RecordId::new(),
            owner: owner.into(),
            currency: currency.into(),
            count: 0,
            lock_count: 0,
        }
    }

    /// Total holding (available + locked).
    #[must_use]
    pub fn total(&self) -> i64 {
        self.count + self.lock_count
    }

    /// Check the non-negativity invariant.
    #[must_use]
    pub fn balances_ok(&self) -> bool {
        self.count >= 0 && self.lock_count >= 0
    }
}
