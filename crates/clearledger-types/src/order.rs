//! Matched-fill order records.
//!
//! An `Order` here is one side of one matched fill, produced by an external
//! matcher. A resting order filled across several executions yields several
//! `Order` records sharing the same `raw_uuid`; each carries its own `uuid`.

use serde::{Deserialize, Serialize};

/// One side of one matched fill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    /// Identifier of this fill.
    pub uuid: String,
    /// Identifier of the original order, constant across partial fills.
    #[serde(rename = "rawUUID")]
    pub raw_uuid: String,
    pub account: String,
    /// Currency this side pays with.
    #[serde(rename = "srcCurrency")]
    pub src_currency: String,
    #[serde(rename = "srcCount")]
    pub src_count: i64,
    /// Currency this side receives.
    #[serde(rename = "desCurrency")]
    pub des_currency: String,
    #[serde(rename = "desCount")]
    pub des_count: i64,
    /// Whether the original order buys a fixed destination amount
    /// (as opposed to spending a fixed source amount).
    #[serde(rename = "isBuyAll")]
    pub is_buy_all: bool,
    /// Actual source cost of this fill.
    #[serde(rename = "finalCost")]
    pub final_cost: i64,
    #[serde(rename = "expiredTime")]
    pub expired_time: i64,
    #[serde(rename = "pendingTime")]
    pub pending_time: i64,
    #[serde(rename = "pendedTime")]
    pub pended_time: i64,
    #[serde(rename = "matchedTime")]
    pub matched_time: i64,
    #[serde(rename = "finishedTime")]
    pub finished_time: i64,
    #[serde(default)]
    pub metadata: String,
}

impl Order {
    /// Whether this fill closes out its original order. Settlement runs
    /// over-reservation reconciliation exactly once, on the terminal fill.
    #[must_use]
    pub fn is_terminal_fill(&self) -> bool {
        self.is_buy_all && self.uuid == self.raw_uuid
    }
}

/// A matched buy/sell pair submitted for settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangePair {
    #[serde(rename = "buyOrder")]
    pub buy_order: Order,
    #[serde(rename = "sellOrder")]
    pub sell_order: Order,
}

impl ExchangePair {
    /// The id under which this pair is reported in batch accounting:
    /// `"buyUUID,sellUUID"`.
    #[must_use]
    pub fn match_id(&self) -> String {
        format!("{},{}", self.buy_order.uuid, self.sell_order.uuid)
    }

    /// Whether the two sides trade mirrored currencies.
    #[must_use]
    pub fn currencies_mirrored(&self) -> bool {
        self.buy_order.src_currency == self.sell_order.des_currency
            && self.buy_order.des_currency == self.sell_order.src_currency
    }
}
