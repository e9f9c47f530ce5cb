//! Event emission seam.
//!
//! Batch operations publish their outcome payload through this trait; the
//! embedder decides where events go (the platform's event bus, a test
//! recorder, or nowhere).

use clearledger_types::Result;

/// Receives named JSON payloads emitted by batch operations.
pub trait EventSink {
    fn emit(&mut self, name: &str, payload: &[u8]) -> Result<()>;
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _name: &str, _payload: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Keeps every emitted event in memory. Test support.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<(String, Vec<u8>)>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent event with the given name, decoded as JSON.
    #[must_use]
    pub fn last_json(&self, name: &str) -> Option<serde_json::Value> {
        self.events
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .and_then(|(_, payload)| serde_json::from_slice(payload).ok())
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        self.events.push((name.to_string(), payload.to_vec()));
        Ok(())
    }
}
