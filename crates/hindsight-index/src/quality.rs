//! Quality-threshold lookup over span ids.

use hindsight_core::traits::IQualityIndex;

/// Insertion-ordered quality index. `find_above` uses greater-or-equal
/// semantics; the matcher treats whatever comes back as authoritative.
#[derive(Debug, Default)]
pub struct QualityIndex {
    entries: Vec<(String, f64)>,
}

impl QualityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IQualityIndex for QualityIndex {
    fn add(&mut self, id: &str, score: f64) {
        self.entries.push((id.to_string(), score));
    }

    fn find_above(&self, threshold: f64) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, score)| *score >= threshold)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let mut idx = QualityIndex::new();
        idx.add("low", 40.0);
        idx.add("edge", 60.0);
        idx.add("high", 90.0);

        assert_eq!(idx.find_above(60.0), vec!["edge", "high"]);
        assert_eq!(idx.find_above(95.0), Vec::<String>::new());
        assert_eq!(idx.find_above(0.0).len(), 3);
    }
}
