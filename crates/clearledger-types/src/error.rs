//! Error types for the ClearLedger core.
//!
//! All errors use the `CL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Argument validation errors
//! - 2xx: Currency errors
//! - 3xx: Asset / balance errors
//! - 4xx: Lock protocol errors
//! - 5xx: Settlement errors
//! - 6xx: Query errors
//! - 9xx: Storage / internal errors

use thiserror::Error;

/// Central error enum for all ClearLedger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// A call argument was malformed (empty name, negative count, etc.).
    /// Rejects the whole call with no partial effect.
    #[error("CL_ERR_100: Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // =================================================================
    // Currency Errors (2xx)
    // =================================================================
    /// A currency with this name is already registered.
    #[error("CL_ERR_200: Currency already exists: {0}")]
    CurrencyExists(String),

    /// The named currency was not found in the registry.
    #[error("CL_ERR_201: Currency not found: {0}")]
    CurrencyNotFound(String),

    /// Base currencies cannot be released.
    #[error("CL_ERR_202: Currency {0} is protected and cannot be released")]
    ProtectedCurrency(String),

    /// An assign batch requested more than the unassigned remainder.
    #[error(
        "CL_ERR_203: Insufficient unassigned supply of {currency}: left {left}, requested {requested}"
    )]
    InsufficientIssue {
        currency: String,
        left: i64,
        requested: i64,
    },

    // =================================================================
    // Asset / Balance Errors (3xx)
    // =================================================================
    /// The owner holds no asset record for this currency.
    #[error("CL_ERR_300: {owner} holds no asset in currency {currency}")]
    AssetNotFound { owner: String, currency: String },

    /// Not enough available balance to lock.
    #[error("CL_ERR_301: Insufficient available {currency}: have {available}, need {needed}")]
    InsufficientAvailable {
        currency: String,
        available: i64,
        needed: i64,
    },

    /// Not enough locked balance to unlock or settle.
    #[error("CL_ERR_302: Insufficient locked {currency}: have {locked}, need {needed}")]
    InsufficientLocked {
        currency: String,
        locked: i64,
        needed: i64,
    },

    // =================================================================
    // Lock Protocol Errors (4xx)
    // =================================================================
    /// Reconciliation needs the original lock record but none exists.
    #[error("CL_ERR_400: No lock record for owner {owner}, currency {currency}, order {order}")]
    LockRecordMissing {
        owner: String,
        currency: String,
        order: String,
    },

    // =================================================================
    // Settlement Errors (5xx)
    // =================================================================
    /// The two sides of a matched pair do not trade mirrored currencies.
    /// Fatal to the whole exchange call, never per-item.
    #[error("CL_ERR_500: Mismatched currency pair: buy {buy_src}->{buy_des}, sell {sell_src}->{sell_des}")]
    CurrencyPairMismatch {
        buy_src: String,
        buy_des: String,
        sell_src: String,
        sell_des: String,
    },

    // =================================================================
    // Query Errors (6xx)
    // =================================================================
    /// A read-only query matched no rows.
    #[error("CL_ERR_600: No data")]
    NoData,

    // =================================================================
    // Storage / Internal (9xx)
    // =================================================================
    /// The underlying store failed. Always fatal: aborts the remaining
    /// batch and surfaces to the invoker so the platform discards the
    /// invocation's writes.
    #[error("CL_ERR_900: Storage error: {0}")]
    Storage(String),

    /// Stored bytes could not be decoded. Treated like a storage failure.
    #[error("CL_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification driving batch success/failure accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed arguments. Rejects the whole call, no partial effect.
    Validation,
    /// A business precondition failed. Per-item in batch contexts.
    BusinessRule,
    /// Store failure. Fatal; the platform must discard all writes.
    Storage,
}

impl LedgerError {
    /// Classify this error for batch processing.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::Validation,
            Self::Storage(_) | Self::Serialization(_) => ErrorKind::Storage,
            _ => ErrorKind::BusinessRule,
        }
    }

    /// Whether this error aborts the remaining items of a batch.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;
