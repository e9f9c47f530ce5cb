//! Typed state access over the raw [`LedgerStore`].
//!
//! Every entity lives under its generated record id; natural-key lookups
//! go through composite-key index rows `(index, fields…, id) → sentinel`.
//! Updating an entity rewrites the same id, so re-putting its index rows
//! is idempotent. Nothing is ever deleted.

use clearledger_store::{LedgerStore, SENTINEL, composite_key, composite_prefix, last_part};
use clearledger_types::{
    AssignLogEntry, Asset, Currency, LedgerError, LockLogEntry, Order, ReleaseLogEntry, Result,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

// Index layouts. The trailing component is always the record id.
const IDX_CURRENCY_NAME: &str = "Currency~name~uuid";
const IDX_CURRENCY_ALL: &str = "Currency~uuid";
const IDX_CURRENCY_CREATOR: &str = "Currency~owner~uuid";
const IDX_ASSET_OWNER_CURRENCY: &str = "Asset~owner~currency~uuid";
const IDX_ASSET_OWNER: &str = "Asset~owner~uuid";
const IDX_RELEASE_LOG_OWNER: &str = "ReleaseLog~owner~uuid";
const IDX_ASSIGN_LOG_FROM: &str = "AssignLog~from~uuid";
const IDX_ASSIGN_LOG_TO: &str = "AssignLog~to~uuid";
const IDX_LOCK_LOG: &str = "LockLog~owner~curr~order~islock~uuid";
const IDX_TX_FILLS: &str = "Order~owner~src~des~raw~uuid";
const IDX_TX_ALL: &str = "Order~uuid";

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(LedgerError::from)
}

/// Point-get an entity by its record key.
fn get_entity<S: LedgerStore, T: DeserializeOwned>(store: &S, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(bytes) => Ok(Some(decode(&bytes)?)),
        None => Ok(None),
    }
}

/// Record keys of every index row matching the given leading fields.
fn index_keys<S: LedgerStore>(store: &S, index: &str, parts: &[&str]) -> Result<Vec<String>> {
    let prefix = composite_prefix(index, parts);
    let mut keys = Vec::new();
    for (composite, _) in store.scan_prefix(&prefix)? {
        let Some(key) = last_part(&composite) else {
            return Err(LedgerError::Storage(format!(
                "malformed index row in {index}"
            )));
        };
        keys.push(key);
    }
    Ok(keys)
}

/// First entity reachable through an index, if any. Used for unique
/// natural keys (currency name, owner+currency, full lock tuple).
fn first_by_index<S: LedgerStore, T: DeserializeOwned>(
    store: &S,
    index: &str,
    parts: &[&str],
) -> Result<Option<T>> {
    let keys = index_keys(store, index, parts)?;
    let Some(key) = keys.first() else {
        return Ok(None);
    };
    match get_entity(store, key)? {
        Some(entity) => Ok(Some(entity)),
        // The index row is written in the same invocation as the entity,
        // so a dangling row means the store lost data.
        None => Err(LedgerError::Storage(format!(
            "index {index} points at missing record {key}"
        ))),
    }
}

/// All entities reachable through an index, in key order.
fn all_by_index<S: LedgerStore, T: DeserializeOwned>(
    store: &S,
    index: &str,
    parts: &[&str],
) -> Result<Vec<T>> {
    let keys = index_keys(store, index, parts)?;
    let mut entities = Vec::with_capacity(keys.len());
    for key in keys {
        match get_entity(store, &key)? {
            Some(entity) => entities.push(entity),
            None => {
                return Err(LedgerError::Storage(format!(
                    "index {index} points at missing record {key}"
                )));
            }
        }
    }
    Ok(entities)
}

// ---------------------------------------------------------------------------
// Read-only lookups (usable with a shared borrow, e.g. from queries)
// ---------------------------------------------------------------------------

pub(crate) fn currency_by_name<S: LedgerStore>(store: &S, name: &str) -> Result<Option<Currency>> {
    first_by_index(store, IDX_CURRENCY_NAME, &[name])
}

pub(crate) fn all_currencies<S: LedgerStore>(store: &S) -> Result<Vec<Currency>> {
    all_by_index(store, IDX_CURRENCY_ALL, &[])
}

pub(crate) fn currencies_by_creator<S: LedgerStore>(
    store: &S,
    creator: &str,
) -> Result<Vec<Currency>> {
    all_by_index(store, IDX_CURRENCY_CREATOR, &[creator])
}

pub(crate) fn asset<S: LedgerStore>(
    store: &S,
    owner: &str,
    currency: &str,
) -> Result<Option<Asset>> {
    first_by_index(store, IDX_ASSET_OWNER_CURRENCY, &[owner, currency])
}

pub(crate) fn assets_of<S: LedgerStore>(store: &S, owner: &str) -> Result<Vec<Asset>> {
    all_by_index(store, IDX_ASSET_OWNER, &[owner])
}

pub(crate) fn release_logs<S: LedgerStore>(
    store: &S,
    releaser: &str,
) -> Result<Vec<ReleaseLogEntry>> {
    all_by_index(store, IDX_RELEASE_LOG_OWNER, &[releaser])
}

pub(crate) fn assign_logs_from<S: LedgerStore>(
    store: &S,
    owner: &str,
) -> Result<Vec<AssignLogEntry>> {
    all_by_index(store, IDX_ASSIGN_LOG_FROM, &[owner])
}

pub(crate) fn assign_logs_to<S: LedgerStore>(
    store: &S,
    owner: &str,
) -> Result<Vec<AssignLogEntry>> {
    all_by_index(store, IDX_ASSIGN_LOG_TO, &[owner])
}

pub(crate) fn lock_log<S: LedgerStore>(
    store: &S,
    owner: &str,
    currency: &str,
    order: &str,
    is_lock: bool,
) -> Result<Option<LockLogEntry>> {
    let flag = if is_lock { "true" } else { "false" };
    first_by_index(store, IDX_LOCK_LOG, &[owner, currency, order, flag])
}

/// The settled record of a fill, if this exact fill was settled before.
pub(crate) fn tx_log<S: LedgerStore>(store: &S, uuid: &str) -> Result<Option<Order>> {
    get_entity(store, uuid)
}

/// All settled fills for (account, src, des, raw order): the cumulative
/// history used by partial-fill reconciliation.
pub(crate) fn fills<S: LedgerStore>(
    store: &S,
    account: &str,
    src_currency: &str,
    des_currency: &str,
    raw_uuid: &str,
) -> Result<Vec<Order>> {
    all_by_index(
        store,
        IDX_TX_FILLS,
        &[account, src_currency, des_currency, raw_uuid],
    )
}

pub(crate) fn all_tx_logs<S: LedgerStore>(store: &S) -> Result<Vec<Order>> {
    all_by_index(store, IDX_TX_ALL, &[])
}

// ---------------------------------------------------------------------------
// Mutating accessor
// ---------------------------------------------------------------------------

/// Write half of the state layer. Wraps a mutable store borrow for the
/// duration of one component call.
pub(crate) struct State<'a, S: LedgerStore> {
    store: &'a mut S,
}

impl<'a, S: LedgerStore> State<'a, S> {
    pub(crate) fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Escape hatch for composing components over the same borrow.
    pub(crate) fn store_mut(&mut self) -> &mut S {
        self.store
    }

    fn put_entity<T: Serialize>(&mut self, key: &str, entity: &T) -> Result<()> {
        let bytes = serde_json::to_vec(entity)?;
        self.store.put(key, &bytes)
    }

    fn put_index(&mut self, index: &str, parts: &[&str]) -> Result<()> {
        self.store.put(&composite_key(index, parts), SENTINEL)
    }

    pub(crate) fn currency_by_name(&self, name: &str) -> Result<Option<Currency>> {
        currency_by_name(&*self.store, name)
    }

    pub(crate) fn put_currency(&mut self, currency: &Currency) -> Result<()> {
        let key = currency.uuid.key();
        self.put_entity(&key, currency)?;
        self.put_index(IDX_CURRENCY_NAME, &[&currency.name, &key])?;
        self.put_index(IDX_CURRENCY_ALL, &[&key])?;
        self.put_index(IDX_CURRENCY_CREATOR, &[&currency.creator, &key])
    }

    pub(crate) fn asset(&self, owner: &str, currency: &str) -> Result<Option<Asset>> {
        asset(&*self.store, owner, currency)
    }

    pub(crate) fn put_asset(&mut self, asset: &Asset) -> Result<()> {
        let key = asset.uuid.key();
        self.put_entity(&key, asset)?;
        self.put_index(IDX_ASSET_OWNER_CURRENCY, &[&asset.owner, &asset.currency, &key])?;
        self.put_index(IDX_ASSET_OWNER, &[&asset.owner, &key])
    }

    pub(crate) fn put_release_log(&mut self, log: &ReleaseLogEntry) -> Result<()> {
        let key = log.uuid.key();
        self.put_entity(&key, log)?;
        self.put_index(IDX_RELEASE_LOG_OWNER, &[&log.releaser, &key])
    }

    pub(crate) fn put_assign_log(&mut self, log: &AssignLogEntry) -> Result<()> {
        let key = log.uuid.key();
        self.put_entity(&key, log)?;
        self.put_index(IDX_ASSIGN_LOG_FROM, &[&log.from_user, &key])?;
        self.put_index(IDX_ASSIGN_LOG_TO, &[&log.to_user, &key])
    }

    pub(crate) fn lock_log(
        &self,
        owner: &str,
        currency: &str,
        order: &str,
        is_lock: bool,
    ) -> Result<Option<LockLogEntry>> {
        lock_log(&*self.store, owner, currency, order, is_lock)
    }

    pub(crate) fn put_lock_log(&mut self, log: &LockLogEntry) -> Result<()> {
        let key = log.uuid.key();
        let flag = if log.is_lock { "true" } else { "false" };
        self.put_entity(&key, log)?;
        self.put_index(
            IDX_LOCK_LOG,
            &[&log.owner, &log.currency, &log.order, flag, &key],
        )
    }

    pub(crate) fn tx_log(&self, uuid: &str) -> Result<Option<Order>> {
        tx_log(&*self.store, uuid)
    }

    pub(crate) fn fills(
        &self,
        account: &str,
        src_currency: &str,
        des_currency: &str,
        raw_uuid: &str,
    ) -> Result<Vec<Order>> {
        fills(&*self.store, account, src_currency, des_currency, raw_uuid)
    }

    /// Persist both sides of a settled pair: the fill records under their
    /// own UUIDs, the fills index rows for cumulative-cost lookups, and
    /// the all-settlements index.
    pub(crate) fn put_tx_pair(&mut self, buy: &Order, sell: &Order) -> Result<()> {
        for order in [buy, sell] {
            self.put_entity(&order.uuid, order)?;
            self.put_index(
                IDX_TX_FILLS,
                &[
                    &order.account,
                    &order.src_currency,
                    &order.des_currency,
                    &order.raw_uuid,
                    &order.uuid,
                ],
            )?;
            self.put_index(IDX_TX_ALL, &[&order.uuid])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearledger_store::MemoryStore;

    #[test]
    fn currency_lookup_by_name() {
        let mut store = MemoryStore::new();
        let mut state = State::new(&mut store);
        let gold = Currency::new("GOLD", 1000, "alice", 1);
        state.put_currency(&gold).unwrap();

        let found = state.currency_by_name("GOLD").unwrap().unwrap();
        assert_eq!(found, gold);
        assert!(state.currency_by_name("SILVER").unwrap().is_none());
    }

    #[test]
    fn currency_update_keeps_single_index_row() {
        let mut store = MemoryStore::new();
        let mut state = State::new(&mut store);
        let mut gold = Currency::new("GOLD", 100, "alice", 1);
        state.put_currency(&gold).unwrap();
        gold.count = 200;
        gold.left_count = 200;
        state.put_currency(&gold).unwrap();

        let all = all_currencies(&store).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].count, 200);
    }

    #[test]
    fn asset_natural_key_and_owner_scan() {
        let mut store = MemoryStore::new();
        let mut state = State::new(&mut store);
        let mut a = Asset::new("bob", "GOLD");
        a.count = 400;
        state.put_asset(&a).unwrap();
        let b = Asset::new("bob", "CNY");
        state.put_asset(&b).unwrap();
        let c = Asset::new("carol", "GOLD");
        state.put_asset(&c).unwrap();

        assert_eq!(state.asset("bob", "GOLD").unwrap().unwrap().count, 400);
        assert!(state.asset("bob", "USD").unwrap().is_none());
        assert_eq!(assets_of(&store, "bob").unwrap().len(), 2);
    }

    #[test]
    fn lock_log_keyed_by_direction() {
        let mut store = MemoryStore::new();
        let mut state = State::new(&mut store);
        let entry = LockLogEntry {
            uuid: clearledger_types::RecordId::new(),
            owner: "bob".into(),
            currency: "GOLD".into(),
            order: "order1".into(),
            is_lock: true,
            lock_count: 400,
            lock_time: 1,
        };
        state.put_lock_log(&entry).unwrap();

        assert!(state.lock_log("bob", "GOLD", "order1", true).unwrap().is_some());
        assert!(state.lock_log("bob", "GOLD", "order1", false).unwrap().is_none());
    }

    #[test]
    fn tx_pair_feeds_fills_and_all_logs() {
        let mut store = MemoryStore::new();
        let mut state = State::new(&mut store);
        let buy = Order {
            uuid: "b1".into(),
            raw_uuid: "raw-b".into(),
            account: "bob".into(),
            src_currency: "CNY".into(),
            src_count: 100,
            des_currency: "GOLD".into(),
            des_count: 10,
            is_buy_all: false,
            final_cost: 100,
            expired_time: 0,
            pending_time: 0,
            pended_time: 0,
            matched_time: 0,
            finished_time: 0,
            metadata: String::new(),
        };
        let mut sell = buy.clone();
        sell.uuid = "s1".into();
        sell.raw_uuid = "raw-s".into();
        sell.account = "carol".into();
        sell.src_currency = "GOLD".into();
        sell.des_currency = "CNY".into();
        state.put_tx_pair(&buy, &sell).unwrap();

        assert!(state.tx_log("b1").unwrap().is_some());
        assert!(state.tx_log("s1").unwrap().is_some());
        assert!(state.tx_log("b2").unwrap().is_none());
        assert_eq!(
            state.fills("bob", "CNY", "GOLD", "raw-b").unwrap().len(),
            1
        );
        assert_eq!(all_tx_logs(&store).unwrap().len(), 2);
    }
}
