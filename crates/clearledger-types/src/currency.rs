//! Currency registry entity.

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// An issued currency. `count` is the total ever issued, `left_count` the
/// remainder not yet assigned to any account.
///
/// Invariant: `0 <= left_count <= count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    pub uuid: RecordId,
    /// Unique registry name (e.g. "GOLD").
    pub name: String,
    /// Total issued supply.
    pub count: i64,
    /// Unassigned remainder.
    #[serde(rename = "leftCount")]
    pub left_count: i64,
    pub creator: String,
    /// UNIX seconds, supplied by the invocation context.
    #[serde(rename = "createTime")]
    pub create_time: i64,
}

impl Currency {
    #[must_use]
    pub fn new(name: impl Into<String>, count: i64, creator: impl Into<String>, now: i64) -> Self {
        Self {
            uuid: RecordId::new(),
            name: name.into(),
            count,
            left_count: count,
            creator: creator.into(),
            create_time: now,
        }
    }

    /// Assigned supply (issued minus unassigned).
    #[must_use]
    pub fn assigned(&self) -> i64 {
        self.count - self.left_count
    }

    /// Check the supply invariant.
    #[must_use]
    pub fn supply_ok(&self) -> bool {
        0 <= self.left_count && self.left_count <= self.count
    }
}
