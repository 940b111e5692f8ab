use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::L1Watcher`].
#[derive(Metrics)]
#[metrics(scope = "l1_watcher")]
pub struct WatcherMetrics {
    /// A counter on the confirmed blocks emitted.
    pub confirmed_blocks: Counter,
    /// A counter on the inbox logs observed.
    pub inbox_logs: Counter,
}
