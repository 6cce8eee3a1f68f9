//! Timestamp-range lookup over span ids.

use std::collections::BTreeMap;

use hindsight_core::models::TimeRange;
use hindsight_core::traits::ITemporalIndex;

/// BTreeMap-backed temporal index keyed by epoch milliseconds.
#[derive(Debug, Default)]
pub struct TemporalIndex {
    by_timestamp: BTreeMap<i64, Vec<String>>,
}

impl TemporalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_timestamp.values().map(|ids| ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_timestamp.is_empty()
    }
}

impl ITemporalIndex for TemporalIndex {
    fn add(&mut self, id: &str, timestamp_ms: i64) {
        self.by_timestamp
            .entry(timestamp_ms)
            .or_default()
            .push(id.to_string());
    }

    fn find_in_range(&self, range: &TimeRange) -> Vec<String> {
        if range.start > range.end {
            return Vec::new();
        }
        self.by_timestamp
            .range(range.start..=range.end)
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect()
    }
}
