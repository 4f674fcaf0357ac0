use metrics::{counter, gauge};

/// Metrics collector for fan-out and SSE sessions
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "circle_sse",
        }
    }

    /// Record new SSE connection established
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record SSE connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record one publish sweep
    pub fn published(&self, delivered: usize) {
        counter!(format!("{}.publish.calls", self.prefix)).increment(1);
        counter!(format!("{}.publish.delivered", self.prefix)).increment(delivered as u64);
    }

    /// Record a subscriber removed for being too slow
    pub fn subscriber_evicted(&self) {
        counter!(format!("{}.subscribers.evicted", self.prefix)).increment(1);
    }

    /// Record items dropped by drain-and-replace
    pub fn items_dropped(&self, count: usize) {
        counter!(format!("{}.publish.dropped", self.prefix)).increment(count as u64);
    }

    /// Record SSE frames written to a response
    pub fn frames_written(&self, count: usize) {
        counter!(format!("{}.frames.written", self.prefix)).increment(count as u64);
    }

    /// Record a failed response write
    pub fn write_failed(&self) {
        counter!(format!("{}.errors.write", self.prefix)).increment(1);
    }

    /// Record subscription change
    pub fn subscription_changed(&self, action: &str) {
        counter!(format!("{}.subscriptions.{}", self.prefix, action)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
