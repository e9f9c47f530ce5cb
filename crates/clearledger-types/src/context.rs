//! Per-invocation context.

use serde::{Deserialize, Serialize};

/// Values supplied by the surrounding platform for one invocation.
///
/// The core never reads a clock; every timestamp written to a record comes
/// from here, so replaying the same invocation produces identical state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TxContext {
    /// UNIX seconds at which the platform stamped the invocation.
    pub timestamp: i64,
}

impl TxContext {
    #[must_use]
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }
}
