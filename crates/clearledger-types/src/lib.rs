//! # clearledger-types
//!
//! Shared types, errors, and configuration for the **ClearLedger**
//! ledger/settlement core.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`RecordId`]
//! - **Entities**: [`Currency`], [`Asset`], [`Order`]
//! - **Audit records**: [`LockLogEntry`], [`ReleaseLogEntry`], [`AssignLogEntry`]
//! - **Batch payloads**: [`BatchReport`], [`FailInfo`], [`AssignRequest`], [`LockEntry`], [`ExchangePair`]
//! - **Configuration**: [`LedgerConfig`], [`TxContext`]
//! - **Errors**: [`LedgerError`] with `CL_ERR_` prefix codes and [`ErrorKind`]

pub mod asset;
pub mod config;
pub mod context;
pub mod currency;
pub mod error;
pub mod ids;
pub mod logs;
pub mod order;
pub mod report;
pub mod requests;

// Re-export all primary types at crate root for ergonomic imports:
//   use clearledger_types::{Currency, Asset, LedgerError, ...};

pub use asset::*;
pub use config::*;
pub use context::*;
pub use currency::*;
pub use error::*;
pub use ids::*;
pub use logs::*;
pub use order::*;
pub use report::*;
pub use requests::*;
