//! # clearledger-store
//!
//! The key/value contract the ledger core runs against, plus the
//! composite-key convention used for natural-key secondary indexes.
//!
//! The real store is the platform's replicated state; [`MemoryStore`] is a
//! faithful single-process stand-in. The core only ever needs three
//! primitives: point get, point put, and an ordered prefix scan.

pub mod key;
pub mod memory;

pub use key::{SENTINEL, composite_key, composite_prefix, last_part, split_composite_key};
pub use memory::MemoryStore;

use clearledger_types::Result;

/// Abstract replicated key→value store.
///
/// Any failure surfaces as [`clearledger_types::LedgerError::Storage`] and is
/// fatal to the invocation: the surrounding platform owns the transaction
/// boundary and discards every write of a failed invocation.
pub trait LedgerStore {
    /// Point lookup. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Insert or overwrite one key.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// All keys starting with `prefix`, in ascending key order.
    ///
    /// The returned sequence is finite, single-pass, and non-restartable;
    /// callers consume it at most once per call.
    fn scan_prefix<'a>(
        &'a self,
        prefix: &str,
    ) -> Result<Box<dyn Iterator<Item = (String, Vec<u8>)> + 'a>>;
}
