//! Generated record identifiers.
//!
//! Every persisted entity gets a [`RecordId`] as its primary store key.
//! UUIDv7 keeps keys time-ordered and lexicographically sortable, which
//! makes prefix scans over secondary indexes deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary key of a persisted record. Natural-key lookups resolve to a
/// `RecordId` through a composite-key secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The store key this record lives under.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
