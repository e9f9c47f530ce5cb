//! Typed argument payloads for batch operations.
//!
//! Wire decoding is the platform's job; the engine receives these already
//! shaped. Field names mirror the event/JSON conventions of the rest of
//! the system.

use serde::{Deserialize, Serialize};

/// One recipient of an assign batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignEntry {
    pub owner: String,
    pub count: i64,
}

/// Batch credit of issued currency to accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    pub currency: String,
    pub assigns: Vec<AssignEntry>,
}

/// One item of a lock/unlock batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockEntry {
    pub owner: String,
    pub currency: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub count: i64,
}
