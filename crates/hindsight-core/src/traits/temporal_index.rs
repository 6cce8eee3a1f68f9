use crate::models::TimeRange;

/// Time-window lookup over span timestamps.
pub trait ITemporalIndex: Send + Sync {
    /// Record a span's timestamp (epoch milliseconds).
    fn add(&mut self, id: &str, timestamp_ms: i64);

    /// Ids of spans recorded within the range, inclusive both ends.
    fn find_in_range(&self, range: &TimeRange) -> Vec<String>;
}
