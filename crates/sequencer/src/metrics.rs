use metrics::{Counter, Gauge};
use metrics_derive::Metrics;

/// The metrics for the inbox sequencer.
#[derive(Metrics, Clone)]
#[metrics(scope = "sequencer")]
pub struct SequencerMetrics {
    /// The number of L2 slots produced.
    pub slots_produced: Counter,
    /// The number of delayed messages executed.
    pub executed_messages: Counter,
    /// The number of delayed messages buffered and awaiting execution.
    pub pending_messages: Gauge,
}
