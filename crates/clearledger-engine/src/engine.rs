//! The `LedgerEngine` facade.
//!
//! One object owning the store, the event sink, and the configuration,
//! exposing every ledger operation. Batch operations classify per-item
//! errors: business-rule failures land in the report's fail list and the
//! batch continues; storage failures abort immediately so the platform can
//! discard the invocation's writes.

use clearledger_store::LedgerStore;
use clearledger_types::{
    AssignLogView, AssignRequest, Asset, BatchReport, Currency, ExchangePair, LedgerConfig,
    LedgerError, LockEntry, Order, ReleaseLogEntry, Result, TxContext,
};
use tracing::debug;

use crate::batch::BatchReporter;
use crate::events::EventSink;
use crate::lock::LockCoordinator;
use crate::registry::CurrencyRegistry;
use crate::settlement::SettlementEngine;
use crate::state;
use crate::AssetLedger;

/// The ledger core. Generic over the backing store and the event sink.
pub struct LedgerEngine<S: LedgerStore, E: EventSink> {
    store: S,
    events: E,
    config: LedgerConfig,
}

impl<S: LedgerStore, E: EventSink> LedgerEngine<S, E> {
    pub fn new(store: S, events: E, config: LedgerConfig) -> Self {
        Self {
            store,
            events,
            config,
        }
    }

    /// The backing store, for embedders that persist or inspect it.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The event sink, for embedders that drain recorded events.
    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Currency lifecycle
    // -----------------------------------------------------------------

    /// Seed the protected base currencies. Idempotent.
    pub fn bootstrap(&mut self, ctx: TxContext) -> Result<()> {
        CurrencyRegistry::new(&mut self.store, &self.config).bootstrap(ctx)
    }

    /// Create zero-balance rows in both base currencies for a new user.
    /// Idempotent; existing rows keep their balances.
    pub fn init_account(&mut self, user: &str, _ctx: TxContext) -> Result<()> {
        let mut ledger = AssetLedger::new(&mut self.store);
        for name in &self.config.base_currencies {
            ledger.ensure_account(user, name)?;
        }
        debug!(user, "account initialized");
        Ok(())
    }

    pub fn create(
        &mut self,
        name: &str,
        count: i64,
        creator: &str,
        ctx: TxContext,
    ) -> Result<Currency> {
        CurrencyRegistry::new(&mut self.store, &self.config).create(name, count, creator, ctx)
    }

    pub fn release(&mut self, name: &str, count: i64, ctx: TxContext) -> Result<Currency> {
        CurrencyRegistry::new(&mut self.store, &self.config).release(name, count, ctx)
    }

    pub fn assign(&mut self, request: &AssignRequest, ctx: TxContext) -> Result<Currency> {
        CurrencyRegistry::new(&mut self.store, &self.config).assign(
            &request.currency,
            &request.assigns,
            ctx,
        )
    }

    // -----------------------------------------------------------------
    // Batch operations
    // -----------------------------------------------------------------

    /// Lock (`is_lock = true`) or unlock a batch of balances. Items that
    /// fail a business check are reported and skipped; an already-executed
    /// transition counts as success.
    pub fn lock(
        &mut self,
        entries: &[LockEntry],
        is_lock: bool,
        src_method: Option<String>,
        ctx: TxContext,
    ) -> Result<BatchReport> {
        let mut reporter = BatchReporter::new(self.config.event_name("lock"), src_method);
        for entry in entries {
            let mut locks = LockCoordinator::new(&mut self.store);
            match locks.set_lock(
                &entry.owner,
                &entry.currency,
                &entry.order_id,
                entry.count,
                is_lock,
                ctx,
            ) {
                Ok(_) => reporter.record_success(&entry.order_id),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => reporter.record_failure(&entry.order_id, err.to_string()),
            }
        }
        reporter.finish(&mut self.events)
    }

    /// Settle a batch of matched pairs. A currency-pair mismatch is a
    /// defect in the matcher's output and fails the whole call; everything
    /// else is per-pair.
    pub fn exchange(&mut self, pairs: &[ExchangePair], ctx: TxContext) -> Result<BatchReport> {
        let mut reporter = BatchReporter::new(self.config.event_name("exchange"), None);
        for pair in pairs {
            if !pair.currencies_mirrored() {
                return Err(LedgerError::CurrencyPairMismatch {
                    buy_src: pair.buy_order.src_currency.clone(),
                    buy_des: pair.buy_order.des_currency.clone(),
                    sell_src: pair.sell_order.src_currency.clone(),
                    sell_des: pair.sell_order.des_currency.clone(),
                });
            }
            let mut settlement = SettlementEngine::new(&mut self.store);
            match settlement.settle(&pair.buy_order, &pair.sell_order, ctx) {
                Ok(_) => reporter.record_success(pair.match_id()),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => reporter.record_failure(pair.match_id(), err.to_string()),
            }
        }
        reporter.finish(&mut self.events)
    }

    // -----------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------

    pub fn currency(&self, name: &str) -> Result<Currency> {
        state::currency_by_name(&self.store, name)?.ok_or(LedgerError::NoData)
    }

    pub fn currencies(&self) -> Result<Vec<Currency>> {
        non_empty(state::all_currencies(&self.store)?)
    }

    pub fn assets(&self, owner: &str) -> Result<Vec<Asset>> {
        non_empty(state::assets_of(&self.store, owner)?)
    }

    pub fn currencies_created_by(&self, owner: &str) -> Result<Vec<Currency>> {
        non_empty(state::currencies_by_creator(&self.store, owner)?)
    }

    pub fn release_logs(&self, owner: &str) -> Result<Vec<ReleaseLogEntry>> {
        non_empty(state::release_logs(&self.store, owner)?)
    }

    /// Assign history for one owner, split into assignments received and
    /// assignments made (as a currency creator).
    pub fn assign_logs(&self, owner: &str) -> Result<AssignLogView> {
        let view = AssignLogView {
            to_me: state::assign_logs_to(&self.store, owner)?,
            me_to: state::assign_logs_from(&self.store, owner)?,
        };
        if view.to_me.is_empty() && view.me_to.is_empty() {
            return Err(LedgerError::NoData);
        }
        Ok(view)
    }

    /// Every settled fill record.
    pub fn settlements(&self) -> Result<Vec<Order>> {
        non_empty(state::all_tx_logs(&self.store)?)
    }
}

fn non_empty<T>(rows: Vec<T>) -> Result<Vec<T>> {
    if rows.is_empty() {
        return Err(LedgerError::NoData);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use clearledger_store::MemoryStore;
    use clearledger_types::AssignEntry;

    fn ctx() -> TxContext {
        TxContext::new(1_700_000_000)
    }

    fn engine() -> LedgerEngine<MemoryStore, RecordingSink> {
        LedgerEngine::new(
            MemoryStore::new(),
            RecordingSink::new(),
            LedgerConfig::default(),
        )
    }

    #[test]
    fn init_account_seeds_both_base_currencies() {
        let mut eng = engine();
        eng.bootstrap(ctx()).unwrap();
        eng.init_account("bob", ctx()).unwrap();
        eng.init_account("bob", ctx()).unwrap();

        let assets = eng.assets("bob").unwrap();
        assert_eq!(assets.len(), 2);
        assert!(assets.iter().all(|a| a.total() == 0));
    }

    #[test]
    fn queries_report_no_data() {
        let eng = engine();
        assert!(matches!(eng.currency("GOLD"), Err(LedgerError::NoData)));
        assert!(matches!(eng.currencies(), Err(LedgerError::NoData)));
        assert!(matches!(eng.assets("bob"), Err(LedgerError::NoData)));
        assert!(matches!(
            eng.currencies_created_by("alice"),
            Err(LedgerError::NoData)
        ));
        assert!(matches!(eng.release_logs("alice"), Err(LedgerError::NoData)));
        assert!(matches!(eng.assign_logs("bob"), Err(LedgerError::NoData)));
        assert!(matches!(eng.settlements(), Err(LedgerError::NoData)));
    }

    #[test]
    fn assign_logs_split_by_direction() {
        let mut eng = engine();
        eng.create("GOLD", 1000, "alice", ctx()).unwrap();
        eng.assign(
            &AssignRequest {
                currency: "GOLD".into(),
                assigns: vec![AssignEntry {
                    owner: "bob".into(),
                    count: 400,
                }],
            },
            ctx(),
        )
        .unwrap();

        let bob = eng.assign_logs("bob").unwrap();
        assert_eq!(bob.to_me.len(), 1);
        assert!(bob.me_to.is_empty());
        let alice = eng.assign_logs("alice").unwrap();
        assert!(alice.to_me.is_empty());
        assert_eq!(alice.me_to.len(), 1);
    }

    #[test]
    fn lock_batch_mixes_success_and_failure() {
        let mut eng = engine();
        eng.create("GOLD", 1000, "alice", ctx()).unwrap();
        eng.assign(
            &AssignRequest {
                currency: "GOLD".into(),
                assigns: vec![AssignEntry {
                    owner: "bob".into(),
                    count: 400,
                }],
            },
            ctx(),
        )
        .unwrap();

        let entries = vec![
            LockEntry {
                owner: "bob".into(),
                currency: "GOLD".into(),
                order_id: "order1".into(),
                count: 300,
            },
            // More than bob has left available.
            LockEntry {
                owner: "bob".into(),
                currency: "GOLD".into(),
                order_id: "order2".into(),
                count: 200,
            },
        ];
        let report = eng.lock(&entries, true, Some("commitOrder".into()), ctx()).unwrap();
        assert_eq!(report.success, vec!["order1"]);
        assert_eq!(report.fail.len(), 1);
        assert_eq!(report.fail[0].id, "order2");

        let event = eng.events.last_json("ledger_lock").unwrap();
        assert_eq!(event["srcMethod"], "commitOrder");
        assert_eq!(event["success"][0], "order1");
    }

    #[test]
    fn repeat_lock_batch_counts_as_success() {
        let mut eng = engine();
        eng.create("GOLD", 1000, "alice", ctx()).unwrap();
        eng.assign(
            &AssignRequest {
                currency: "GOLD".into(),
                assigns: vec![AssignEntry {
                    owner: "bob".into(),
                    count: 400,
                }],
            },
            ctx(),
        )
        .unwrap();

        let entries = vec![LockEntry {
            owner: "bob".into(),
            currency: "GOLD".into(),
            order_id: "order1".into(),
            count: 400,
        }];
        eng.lock(&entries, true, None, ctx()).unwrap();
        let report = eng.lock(&entries, true, None, ctx()).unwrap();
        assert_eq!(report.success, vec!["order1"]);
        assert!(report.is_clean());

        let asset = eng
            .assets("bob")
            .unwrap()
            .into_iter()
            .find(|a| a.currency == "GOLD")
            .unwrap();
        assert_eq!(asset.lock_count, 400);
    }
}
