use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the in-memory execution engine.
#[derive(Metrics, Clone)]
#[metrics(scope = "engine")]
pub struct EngineMetrics {
    /// The number of inputs applied to the L2 state.
    pub applied_inputs: Counter,
    /// The number of inputs deterministically rejected.
    pub rejected_inputs: Counter,
}
