//! Progress reporting seam
//!
//! The core emits structured events; the caller (a CLI, a chat bot) decides
//! how to render or forward them. Delivery is fire-and-forget: a sink that
//! drops or fails must never abort a harvest.

/// Incremental status of a running harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// One signature page was appended.
    Pagination {
        pages_done: usize,
        /// Cumulative signatures collected so far.
        signatures: usize,
    },
    /// One resolution batch settled.
    Resolution {
        batches_done: usize,
        total_batches: usize,
        /// Cumulative signatures processed so far (resolved or dropped).
        items_processed: usize,
    },
}

/// Receiver for progress events, owned by the caller.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}

/// Sink that discards every event.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn publish(&self, _event: ProgressEvent) {}
}

/// Sink that forwards events over an unbounded channel. A closed receiver is
/// ignored so a disappearing consumer cannot abort the harvest.
pub struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(tx: tokio::sync::mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn publish(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }
}
