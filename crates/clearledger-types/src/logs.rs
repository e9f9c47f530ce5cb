//! Append-only audit records.
//!
//! Every balance-affecting action leaves one of these behind. They are
//! never updated or deleted; the lock log doubles as the idempotency
//! token for the locking protocol.

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Proof that a lock or unlock executed for (owner, currency, order).
///
/// Unique per (owner, currency, order, is_lock). Its mere existence means
/// "this exact transition already ran", and repeat calls are no-ops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockLogEntry {
    pub uuid: RecordId,
    pub owner: String,
    pub currency: String,
    pub order: String,
    #[serde(rename = "isLock")]
    pub is_lock: bool,
    #[serde(rename = "lockCount")]
    pub lock_count: i64,
    #[serde(rename = "lockTime")]
    pub lock_time: i64,
}

/// One release (issuance) of currency supply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseLogEntry {
    pub uuid: RecordId,
    pub currency: String,
    pub releaser: String,
    pub count: i64,
    #[serde(rename = "releaseTime")]
    pub release_time: i64,
}

/// One assignment of issued currency to an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignLogEntry {
    pub uuid: RecordId,
    pub currency: String,
    #[serde(rename = "fromUser")]
    pub from_user: String,
    #[serde(rename = "toUser")]
    pub to_user: String,
    pub count: i64,
    #[serde(rename = "assignTime")]
    pub assign_time: i64,
}

/// Assign history for one owner, split by direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignLogView {
    /// Assignments made to this owner.
    #[serde(rename = "toMe")]
    pub to_me: Vec<AssignLogEntry>,
    /// Assignments this owner made as a currency creator.
    #[serde(rename = "meTo")]
    pub me_to: Vec<AssignLogEntry>,
}
