//! In-memory reference store.

use std::collections::BTreeMap;

use clearledger_types::Result;

use crate::LedgerStore;

/// `BTreeMap`-backed [`LedgerStore`]. The ordered map makes prefix scans
/// cheap and deterministic; useful for tests and single-process embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of stored keys (entities plus index rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LedgerStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn scan_prefix<'a>(
        &'a self,
        prefix: &str,
    ) -> Result<Box<dyn Iterator<Item = (String, Vec<u8>)> + 'a>> {
        let prefix = prefix.to_string();
        let iter = self
            .entries
            .range(prefix.clone()..)
            .take_while(move |(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(Box::new(iter))
    }
}
