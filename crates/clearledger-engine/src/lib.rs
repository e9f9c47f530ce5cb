//! # clearledger-engine
//!
//! The deterministic state-transition core of the ledger: currency
//! lifecycle, per-account balance locking, matched-order settlement with
//! partial-fill reconciliation, and batch success/failure accounting.
//!
//! Everything here is synchronous and clock-free. The engine runs against
//! any [`clearledger_store::LedgerStore`]; timestamps come from the
//! caller's [`clearledger_types::TxContext`], so replaying an invocation
//! against the same state produces identical writes. The surrounding
//! platform owns the transaction boundary: when an operation returns an
//! error, the platform discards every write the invocation made.
//!
//! [`LedgerEngine`] is the entry point; the component types underneath
//! ([`CurrencyRegistry`], [`AssetLedger`], [`LockCoordinator`],
//! [`SettlementEngine`]) are exported for embedders that compose them
//! directly.

pub mod asset_ledger;
pub mod batch;
pub mod engine;
pub mod events;
pub mod lock;
pub mod registry;
pub mod settlement;

mod state;

pub use asset_ledger::AssetLedger;
pub use batch::BatchReporter;
pub use engine::LedgerEngine;
pub use events::{EventSink, NullSink, RecordingSink};
pub use lock::{LockCoordinator, LockOutcome};
pub use registry::CurrencyRegistry;
pub use settlement::{SettleOutcome, SettlementEngine};
