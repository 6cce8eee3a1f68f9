//! Multi-field inverted filter: field → value → span-id postings.
//!
//! Postings are append-only and may hold duplicates; query operations apply
//! set semantics, preserving first-seen order. Intersection keeps the order
//! of its shorter operand.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

/// Substring containment only counts once both sides reach this length, so
/// short tokens ("get" in "regret") cannot over-match.
const MIN_SUBSTRING_LEN: usize = 4;

/// Fuzzy matches require at least this Levenshtein similarity.
const FUZZY_SIMILARITY_FLOOR: f64 = 0.7;

/// Field name used by tag filters.
const TAG_FIELD: &str = "tag";
/// Field name used by action filters.
const ACTION_FIELD: &str = "action";
/// Field name used by domain filters.
const DOMAIN_FIELD: &str = "domain";

/// Categorical filter over span fields.
///
/// Value maps are ordered so fuzzy scans and `field_values` come back in a
/// stable order regardless of insertion history.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    fields: FxHashMap<String, BTreeMap<String, Vec<String>>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the (field, value) posting.
    pub fn add(&mut self, id: &str, field: &str, value: &str) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .entry(value.to_string())
            .or_default()
            .push(id.to_string());
    }

    /// Exact lookup, deduplicated, first-seen order.
    pub fn find(&self, field: &str, value: &str) -> Vec<String> {
        self.fields
            .get(field)
            .and_then(|values| values.get(value))
            .map(|ids| dedupe(ids))
            .unwrap_or_default()
    }

    /// Filter by action. `seed` of `None` plays the wildcard role; a seed
    /// list is intersected into the result.
    ///
    /// Exact mode is a plain posting lookup. Fuzzy mode scans every stored
    /// action value and admits case-insensitive containment (either
    /// direction, length-gated) or Levenshtein similarity above 0.7.
    pub fn filter_by_action(
        &self,
        seed: Option<&[String]>,
        action: &str,
        fuzzy: bool,
    ) -> Vec<String> {
        let matched = if fuzzy {
            let mut out = Vec::new();
            if let Some(values) = self.fields.get(ACTION_FIELD) {
                for (value, ids) in values {
                    if fuzzy_match(action, value) {
                        out.extend(ids.iter().cloned());
                    }
                }
            }
            dedupe(&out)
        } else {
            self.find(ACTION_FIELD, action)
        };

        match seed {
            Some(seed_ids) => intersect(seed_ids, &matched),
            None => matched,
        }
    }

    /// OR across tags, optionally intersected with a seed list.
    pub fn filter_by_tags(&self, seed: Option<&[String]>, tags: &[String]) -> Vec<String> {
        let mut union = Vec::new();
        for tag in tags {
            union.extend(self.find(TAG_FIELD, tag));
        }
        let union = dedupe(&union);

        match seed {
            Some(seed_ids) => intersect(seed_ids, &union),
            None => union,
        }
    }

    /// Exact domain filter, optionally intersected with a seed list.
    pub fn filter_by_domain(&self, seed: Option<&[String]>, domain: &str) -> Vec<String> {
        let matched = self.find(DOMAIN_FIELD, domain);
        match seed {
            Some(seed_ids) => intersect(seed_ids, &matched),
            None => matched,
        }
    }

    /// AND across all (field, value) pairs by successive intersection.
    /// An empty filter map matches nothing.
    pub fn find_all(&self, filters: &BTreeMap<String, String>) -> Vec<String> {
        let mut iter = filters.iter();
        let Some((field, value)) = iter.next() else {
            return Vec::new();
        };
        let mut result = self.find(field, value);
        for (field, value) in iter {
            if result.is_empty() {
                return result;
            }
            result = intersect(&result, &self.find(field, value));
        }
        result
    }

    /// Distinct values stored under a field, in sorted order.
    pub fn field_values(&self, field: &str) -> Vec<String> {
        self.fields
            .get(field)
            .map(|values| values.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Raw posting length for (field, value) — counts repeated adds.
    pub fn count(&self, field: &str, value: &str) -> usize {
        self.fields
            .get(field)
            .and_then(|values| values.get(value))
            .map(|ids| ids.len())
            .unwrap_or(0)
    }
}

/// Set intersection preserving the order of the shorter operand.
pub(crate) fn intersect(a: &[String], b: &[String]) -> Vec<String> {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let membership: FxHashSet<&str> = long.iter().map(String::as_str).collect();
    let mut seen = FxHashSet::default();
    short
        .iter()
        .filter(|id| membership.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Deduplicate preserving first-seen order.
fn dedupe(ids: &[String]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Case-insensitive fuzzy comparison between a query action and a stored
/// action value.
fn fuzzy_match(query: &str, stored: &str) -> bool {
    let q = query.to_lowercase();
    let s = stored.to_lowercase();
    if q == s {
        return true;
    }
    if q.len() >= MIN_SUBSTRING_LEN && s.contains(&q) {
        return true;
    }
    if s.len() >= MIN_SUBSTRING_LEN && q.contains(&s) {
        return true;
    }
    levenshtein_similarity(&q, &s) > FUZZY_SIMILARITY_FLOOR
}

/// 1 − edit_distance / max_len. The degenerate 0/0 distance ratio counts
/// as 1, so two empty strings score 0 rather than dividing by zero.
pub(crate) fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Classic two-row dynamic-programming edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            cur[j + 1] = substitution.min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InvertedIndex {
        let mut idx = InvertedIndex::new();
        idx.add("span1", "action", "create_user");
        idx.add("span2", "action", "create_account");
        idx.add("span3", "action", "delete_user");
        idx
    }

    #[test]
    fn find_is_exact() {
        let idx = seeded();
        assert_eq!(idx.find("action", "create_user"), vec!["span1"]);
        assert!(idx.find("action", "missing").is_empty());
        assert!(idx.find("missing", "create_user").is_empty());
    }

    #[test]
    fn fuzzy_prefix_matches_both_creates() {
        let idx = seeded();
        let hits = idx.filter_by_action(None, "create", true);
        assert_eq!(hits, vec!["span2", "span1"]);
    }

    #[test]
    fn fuzzy_respects_seed_intersection() {
        let idx = seeded();
        let seed = vec!["span1".to_string(), "span3".to_string()];
        let hits = idx.filter_by_action(Some(&seed), "create", true);
        assert_eq!(hits, vec!["span1"]);
    }

    #[test]
    fn exact_mode_ignores_near_matches() {
        let idx = seeded();
        let hits = idx.filter_by_action(None, "create_user", false);
        assert_eq!(hits, vec!["span1"]);
        assert!(idx.filter_by_action(None, "create", false).is_empty());
    }

    #[test]
    fn short_query_does_not_substring_match() {
        let mut idx = InvertedIndex::new();
        idx.add("s1", "action", "regret");
        // "get" is below the substring gate and too far for Levenshtein.
        assert!(idx.filter_by_action(None, "get", true).is_empty());
    }

    #[test]
    fn tags_are_ored_then_seeded() {
        let mut idx = InvertedIndex::new();
        idx.add("s1", "tag", "alpha");
        idx.add("s2", "tag", "beta");
        idx.add("s3", "tag", "alpha");
        let hits = idx.filter_by_tags(None, &["alpha".into(), "beta".into()]);
        assert_eq!(hits, vec!["s1", "s3", "s2"]);

        let seed = vec!["s2".to_string()];
        assert_eq!(idx.filter_by_tags(Some(&seed), &["alpha".into(), "beta".into()]), vec!["s2"]);
    }

    #[test]
    fn domain_filter_is_exact() {
        let mut idx = InvertedIndex::new();
        idx.add("s1", "domain", "geography");
        idx.add("s2", "domain", "auth");
        assert_eq!(idx.filter_by_domain(None, "auth"), vec!["s2"]);
        let seed = vec!["s1".to_string()];
        assert!(idx.filter_by_domain(Some(&seed), "auth").is_empty());
    }

    #[test]
    fn find_all_ands_filters() {
        let mut idx = InvertedIndex::new();
        idx.add("s1", "action", "deploy");
        idx.add("s2", "action", "deploy");
        idx.add("s1", "domain", "prod");
        idx.add("s2", "domain", "staging");

        let mut filters = BTreeMap::new();
        filters.insert("action".to_string(), "deploy".to_string());
        filters.insert("domain".to_string(), "prod".to_string());
        assert_eq!(idx.find_all(&filters), vec!["s1"]);
    }

    #[test]
    fn find_all_empty_input_matches_nothing() {
        let idx = seeded();
        assert!(idx.find_all(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn duplicates_collapse_at_query_time() {
        let mut idx = InvertedIndex::new();
        idx.add("s1", "action", "ping");
        idx.add("s1", "action", "ping");
        assert_eq!(idx.find("action", "ping"), vec!["s1"]);
        assert_eq!(idx.count("action", "ping"), 2);
    }

    #[test]
    fn field_values_sorted() {
        let idx = seeded();
        assert_eq!(
            idx.field_values("action"),
            vec!["create_account", "create_user", "delete_user"]
        );
    }

    #[test]
    fn intersection_keeps_shorter_operand_order() {
        let a = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let b = vec!["z".to_string(), "x".to_string()];
        assert_eq!(intersect(&a, &b), vec!["z", "x"]);
    }

    #[test]
    fn levenshtein_classic_cases() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(levenshtein_similarity("", ""), 0.0);
        assert_eq!(levenshtein_similarity("abc", "abc"), 1.0);
        assert!(levenshtein_similarity("abc", "xyz") <= 0.0 + 1e-9);
        let sim = levenshtein_similarity("create_user", "create_usor");
        assert!(sim > FUZZY_SIMILARITY_FLOOR);
    }
}
