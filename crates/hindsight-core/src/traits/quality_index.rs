/// Quality-threshold lookup over span quality scores.
pub trait IQualityIndex: Send + Sync {
    /// Record a span's quality score in [0, 100].
    fn add(&mut self, id: &str, score: f64);

    /// Ids of spans with quality at or above the threshold.
    /// The matcher treats this result as authoritative.
    fn find_above(&self, threshold: f64) -> Vec<String>;
}
