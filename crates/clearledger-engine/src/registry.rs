//! Currency lifecycle: bootstrap, creation, supply release, assignment.

use clearledger_store::LedgerStore;
use clearledger_types::{
    AssignEntry, AssignLogEntry, Currency, LedgerConfig, LedgerError, ReleaseLogEntry, Result,
    TxContext,
};
use tracing::debug;

use crate::asset_ledger::AssetLedger;
use crate::state::State;

/// Owns the currency registry and its audit logs.
pub struct CurrencyRegistry<'a, S: LedgerStore> {
    state: State<'a, S>,
    config: &'a LedgerConfig,
}

impl<'a, S: LedgerStore> CurrencyRegistry<'a, S> {
    pub fn new(store: &'a mut S, config: &'a LedgerConfig) -> Self {
        Self {
            state: State::new(store),
            config,
        }
    }

    /// Seed the protected base currencies. Idempotent: currencies that
    /// already exist are left untouched.
    pub fn bootstrap(&mut self, ctx: TxContext) -> Result<()> {
        for name in self.config.base_currencies.clone() {
            if self.state.currency_by_name(&name)?.is_some() {
                continue;
            }
            let currency = Currency::new(&name, 0, &self.config.system_account, ctx.timestamp);
            self.state.put_currency(&currency)?;
            debug!(currency = %name, "seeded base currency");
        }
        Ok(())
    }

    /// Register a new currency with `count` initial supply, all unassigned.
    pub fn create(
        &mut self,
        name: &str,
        count: i64,
        creator: &str,
        ctx: TxContext,
    ) -> Result<Currency> {
        if name.is_empty() {
            return Err(LedgerError::InvalidArgument {
                reason: "currency name must not be empty".to_string(),
            });
        }
        if count < 0 {
            return Err(LedgerError::InvalidArgument {
                reason: format!("currency count must not be negative, got {count}"),
            });
        }
        if self.state.currency_by_name(name)?.is_some() {
            return Err(LedgerError::CurrencyExists(name.to_string()));
        }

        let currency = Currency::new(name, count, creator, ctx.timestamp);
        self.state.put_currency(&currency)?;
        if count > 0 {
            self.state.put_release_log(&ReleaseLogEntry {
                uuid: clearledger_types::RecordId::new(),
                currency: name.to_string(),
                releaser: creator.to_string(),
                count,
                release_time: ctx.timestamp,
            })?;
        }
        debug!(currency = %name, count, "currency created");
        Ok(currency)
    }

    /// Issue `count` additional supply of an existing, unprotected currency.
    pub fn release(&mut self, name: &str, count: i64, ctx: TxContext) -> Result<Currency> {
        if count <= 0 {
            return Err(LedgerError::InvalidArgument {
                reason: format!("release count must be positive, got {count}"),
            });
        }
        if self.config.is_protected(name) {
            return Err(LedgerError::ProtectedCurrency(name.to_string()));
        }
        let mut currency = self
            .state
            .currency_by_name(name)?
            .ok_or_else(|| LedgerError::CurrencyNotFound(name.to_string()))?;

        currency.count += count;
        currency.left_count += count;
        self.state.put_currency(&currency)?;
        self.state.put_release_log(&ReleaseLogEntry {
            uuid: clearledger_types::RecordId::new(),
            currency: name.to_string(),
            releaser: currency.creator.clone(),
            count,
            release_time: ctx.timestamp,
        })?;
        debug!(currency = %name, count, left = currency.left_count, "supply released");
        Ok(currency)
    }

    /// Distribute unassigned supply to accounts.
    ///
    /// Two passes: the first validates the total against `left_count` so an
    /// oversubscribed batch is rejected with no partial effect; the second
    /// applies the credits and audit logs. Entries with `count <= 0` are
    /// skipped in both.
    pub fn assign(
        &mut self,
        currency_name: &str,
        entries: &[AssignEntry],
        ctx: TxContext,
    ) -> Result<Currency> {
        let mut currency = self
            .state
            .currency_by_name(currency_name)?
            .ok_or_else(|| LedgerError::CurrencyNotFound(currency_name.to_string()))?;

        let mut requested: i64 = 0;
        for entry in entries.iter().filter(|e| e.count > 0) {
            requested += entry.count;
            if requested > currency.left_count {
                return Err(LedgerError::InsufficientIssue {
                    currency: currency_name.to_string(),
                    left: currency.left_count,
                    requested,
                });
            }
        }

        for entry in entries.iter().filter(|e| e.count > 0) {
            self.state.put_assign_log(&AssignLogEntry {
                uuid: clearledger_types::RecordId::new(),
                currency: currency_name.to_string(),
                from_user: currency.creator.clone(),
                to_user: entry.owner.clone(),
                count: entry.count,
                assign_time: ctx.timestamp,
            })?;
            let mut ledger = AssetLedger::new(self.state.store_mut());
            ledger.credit(&entry.owner, currency_name, entry.count)?;
            currency.left_count -= entry.count;
        }
        self.state.put_currency(&currency)?;
        debug!(
            currency = %currency_name,
            assigned = requested,
            left = currency.left_count,
            "supply assigned"
        );
        Ok(currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearledger_store::MemoryStore;
    use clearledger_types::{ErrorKind, LedgerConfig};

    fn ctx() -> TxContext {
        TxContext::new(1_700_000_000)
    }

    fn registry<'a>(
        store: &'a mut MemoryStore,
        config: &'a LedgerConfig,
    ) -> CurrencyRegistry<'a, MemoryStore> {
        CurrencyRegistry::new(store, config)
    }

    fn default_config() -> &'static LedgerConfig {
        use std::sync::OnceLock;
        static CONFIG: OnceLock<LedgerConfig> = OnceLock::new();
        CONFIG.get_or_init(LedgerConfig::default)
    }

    #[test]
    fn bootstrap_seeds_base_currencies_once() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.bootstrap(ctx()).unwrap();
        reg.bootstrap(ctx()).unwrap();

        let cny = reg.state.currency_by_name("CNY").unwrap().unwrap();
        assert_eq!(cny.count, 0);
        assert_eq!(cny.creator, "system");
        assert!(reg.state.currency_by_name("USD").unwrap().is_some());
    }

    #[test]
    fn create_rejects_bad_arguments() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);

        let err = reg.create("", 10, "alice", ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = reg.create("GOLD", -1, "alice", ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn create_rejects_duplicate_name() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.create("GOLD", 1000, "alice", ctx()).unwrap();
        let err = reg.create("GOLD", 5, "carol", ctx()).unwrap_err();
        assert!(matches!(err, LedgerError::CurrencyExists(_)));
    }

    #[test]
    fn create_logs_release_only_for_positive_count() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.create("GOLD", 1000, "alice", ctx()).unwrap();
        reg.create("SILVER", 0, "alice", ctx()).unwrap();

        let logs = crate::state::release_logs(&store, "alice").unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].currency, "GOLD");
        assert_eq!(logs[0].count, 1000);
    }

    #[test]
    fn release_grows_supply_and_remainder() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.create("GOLD", 100, "alice", ctx()).unwrap();
        let gold = reg.release("GOLD", 50, ctx()).unwrap();
        assert_eq!(gold.count, 150);
        assert_eq!(gold.left_count, 150);
        assert!(gold.supply_ok());

        let logs = crate::state::release_logs(&store, "alice").unwrap();
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn release_refuses_protected_and_missing() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.bootstrap(ctx()).unwrap();

        let err = reg.release("CNY", 10, ctx()).unwrap_err();
        assert!(matches!(err, LedgerError::ProtectedCurrency(_)));
        let err = reg.release("GOLD", 10, ctx()).unwrap_err();
        assert!(matches!(err, LedgerError::CurrencyNotFound(_)));
        let err = reg.release("GOLD", 0, ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn assign_credits_accounts_and_decrements_remainder() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.create("GOLD", 1000, "alice", ctx()).unwrap();

        let entries = vec![
            AssignEntry {
                owner: "bob".into(),
                count: 400,
            },
            AssignEntry {
                owner: "carol".into(),
                count: 100,
            },
        ];
        let gold = reg.assign("GOLD", &entries, ctx()).unwrap();
        assert_eq!(gold.left_count, 500);
        assert_eq!(gold.assigned(), 500);

        let bob = crate::state::asset(&store, "bob", "GOLD").unwrap().unwrap();
        assert_eq!(bob.count, 400);
        let logs = crate::state::assign_logs_to(&store, "bob").unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].from_user, "alice");
    }

    #[test]
    fn assign_skips_non_positive_entries() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.create("GOLD", 100, "alice", ctx()).unwrap();

        let entries = vec![
            AssignEntry {
                owner: "bob".into(),
                count: 0,
            },
            AssignEntry {
                owner: "carol".into(),
                count: -5,
            },
            AssignEntry {
                owner: "dave".into(),
                count: 60,
            },
        ];
        let gold = reg.assign("GOLD", &entries, ctx()).unwrap();
        assert_eq!(gold.left_count, 40);
        assert!(crate::state::asset(&store, "bob", "GOLD").unwrap().is_none());
    }

    #[test]
    fn oversubscribed_assign_has_no_partial_effect() {
        let mut store = MemoryStore::new();
        let config = default_config();
        let mut reg = registry(&mut store, config);
        reg.create("GOLD", 100, "alice", ctx()).unwrap();

        let entries = vec![
            AssignEntry {
                owner: "bob".into(),
                count: 80,
            },
            AssignEntry {
                owner: "carol".into(),
                count: 30,
            },
        ];
        let err = reg.assign("GOLD", &entries, ctx()).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientIssue { .. }));

        // Neither recipient was credited.
        assert!(crate::state::asset(&store, "bob", "GOLD").unwrap().is_none());
        assert!(crate::state::asset(&store, "carol", "GOLD").unwrap().is_none());
        let gold = crate::state::currency_by_name(&store, "GOLD")
            .unwrap()
            .unwrap();
        assert_eq!(gold.left_count, 100);
    }
}
