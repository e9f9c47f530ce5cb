//! Batch success/failure accounting.
//!
//! Batches apply item by item. Business-rule failures are recorded and the
//! batch keeps going; the final report is returned to the caller and emitted
//! as an event whether or not every item applied.

use clearledger_types::{BatchReport, FailInfo, Result};
use tracing::{debug, warn};

use crate::events::EventSink;

/// Accumulates per-item outcomes for one batch operation.
pub struct BatchReporter {
    event_name: String,
    src_method: Option<String>,
    success: Vec<String>,
    fail: Vec<FailInfo>,
}

impl BatchReporter {
    #[must_use]
    pub fn new(event_name: impl Into<String>, src_method: Option<String>) -> Self {
        Self {
            event_name: event_name.into(),
            src_method,
            success: Vec::new(),
            fail: Vec::new(),
        }
    }

    pub fn record_success(&mut self, id: impl Into<String>) {
        self.success.push(id.into());
    }

    pub fn record_failure(&mut self, id: impl Into<String>, info: impl Into<String>) {
        let entry = FailInfo {
            id: id.into(),
            info: info.into(),
        };
        warn!(id = %entry.id, info = %entry.info, event = %self.event_name, "batch item failed");
        self.fail.push(entry);
    }

    /// Build the report and emit it through the sink.
    pub fn finish<E: EventSink>(self, sink: &mut E) -> Result<BatchReport> {
        let report = BatchReport {
            event_name: self.event_name,
            src_method: self.src_method,
            success: self.success,
            fail: self.fail,
        };
        let payload = serde_json::to_vec(&report)?;
        sink.emit(&report.event_name, &payload)?;
        debug!(
            event = %report.event_name,
            success = report.success.len(),
            fail = report.fail.len(),
            "batch finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;

    #[test]
    fn report_reaches_the_sink() {
        let mut reporter = BatchReporter::new("ledger_lock", Some("commitOrder".into()));
        reporter.record_success("order1");
        reporter.record_failure("order2", "CL_ERR_301: Insufficient available GOLD");

        let mut sink = RecordingSink::new();
        let report = reporter.finish(&mut sink).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.success, vec!["order1"]);
        assert_eq!(report.fail[0].id, "order2");

        let event = sink.last_json("ledger_lock").unwrap();
        assert_eq!(event["eventName"], "ledger_lock");
        assert_eq!(event["srcMethod"], "commitOrder");
        assert_eq!(event["fail"][0]["id"], "order2");
    }

    #[test]
    fn clean_batch_still_emits() {
        let reporter = BatchReporter::new("ledger_exchange", None);
        let mut sink = RecordingSink::new();
        let report = reporter.finish(&mut sink).unwrap();
        assert!(report.is_clean());
        assert_eq!(sink.events.len(), 1);
    }
}
