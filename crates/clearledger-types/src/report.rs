//! Aggregated batch outcome payloads.
//!
//! Every batch operation returns (and emits as an event) the full
//! success/fail accounting, even when the call as a whole succeeds, so
//! external observers can reconcile which sub-items actually applied.

use serde::{Deserialize, Serialize};

/// One failed batch item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailInfo {
    pub id: String,
    pub info: String,
}

/// The aggregated outcome of one batch operation. Serialized as the
/// payload of the emitted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    #[serde(rename = "eventName")]
    pub event_name: String,
    /// The caller-side method that triggered the batch (lock batches only).
    #[serde(rename = "srcMethod", skip_serializing_if = "Option::is_none")]
    pub src_method: Option<String>,
    pub success: Vec<String>,
    pub fail: Vec<FailInfo>,
}

impl BatchReport {
    /// Whether every item applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fail.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_report() {
        let report = BatchReport {
            event_name: "ledger_lock".into(),
            src_method: Some("commitOrder".into()),
            success: vec!["order1".into()],
            fail: vec![],
        };
        assert!(report.is_clean());
    }

    #[test]
    fn payload_field_names() {
        let report = BatchReport {
            event_name: "ledger_exchange".into(),
            src_method: None,
            success: vec!["b1,s1".into()],
            fail: vec![FailInfo {
                id: "b2,s2".into(),
                info: "insufficient".into(),
            }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"eventName\""));
        assert!(json.contains("\"success\""));
        assert!(json.contains("\"fail\""));
        // srcMethod is omitted entirely when absent.
        assert!(!json.contains("srcMethod"));
    }

    #[test]
    fn src_method_present_when_set() {
        let report = BatchReport {
            event_name: "ledger_lock".into(),
            src_method: Some("cancelOrder".into()),
            success: vec![],
            fail: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"srcMethod\":\"cancelOrder\""));
    }
}
