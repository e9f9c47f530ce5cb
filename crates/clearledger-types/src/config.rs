//! Engine configuration.
//!
//! One explicit object constructed by the embedder and passed to the
//! engine; there are no ambient singletons or package-level globals.

use serde::{Deserialize, Serialize};

/// Static configuration for a ledger instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Prefix for emitted event names (`{namespace}_lock`, `{namespace}_exchange`).
    pub namespace: String,
    /// The two protected base currencies, seeded at bootstrap and never
    /// releasable.
    pub base_currencies: [String; 2],
    /// Creator recorded on the seeded base currencies.
    pub system_account: String,
}

impl LedgerConfig {
    /// Whether `name` is one of the protected base currencies.
    #[must_use]
    pub fn is_protected(&self, name: &str) -> bool {
        self.base_currencies.iter().any(|c| c == name)
    }

    /// Event name for a batch operation, e.g. `event_name("lock")`.
    #[must_use]
    pub fn event_name(&self, op: &str) -> String {
        format!("{}_{op}", self.namespace)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            namespace: "ledger".to_string(),
            base_currencies: ["CNY".to_string(), "USD".to_string()],
            system_account: "system".to_string(),
        }
    }
}
