//! Output synthesis and confidence scoring over ranked evidence.

use hindsight_core::models::Evidence;

/// A single very strong match speaks for itself.
const DOMINANT_SCORE: f64 = 0.8;
/// Consensus voting needs at least this much evidence.
const CONSENSUS_MIN: usize = 3;
/// Consensus voting looks at no more than this many items.
const CONSENSUS_WINDOW: usize = 5;

/// Confidence factor weights: mean score, evidence volume, score agreement.
const W_AVG_SCORE: f64 = 0.6;
const W_VOLUME: f64 = 0.2;
const W_AGREEMENT: f64 = 0.2;

/// Evidence count at which the volume factor saturates.
const VOLUME_SATURATION: f64 = 5.0;

/// Synthesize the output string from evidence sorted score-descending.
/// Callers guarantee non-empty input.
pub(crate) fn synthesize_output(evidence: &[Evidence]) -> String {
    let top = &evidence[0];
    if top.score > DOMINANT_SCORE {
        return top.content.clone();
    }
    if evidence.len() >= CONSENSUS_MIN {
        return mode_content(&evidence[..evidence.len().min(CONSENSUS_WINDOW)]);
    }
    top.content.clone()
}

/// Most frequent content among the window; ties go to the first seen.
fn mode_content(window: &[Evidence]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::with_capacity(window.len());
    for item in window {
        match counts.iter_mut().find(|(content, _)| *content == item.content) {
            Some(entry) => entry.1 += 1,
            None => counts.push((item.content.as_str(), 1)),
        }
    }
    let mut best = counts[0];
    for candidate in &counts[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0.to_string()
}

/// Confidence in [0, 100] from evidence scores: weighted blend of the mean
/// score, evidence volume (saturating at 5), and score agreement
/// (exp-decayed variance).
pub(crate) fn score_confidence(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let n = scores.len() as f64;
    let avg = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - avg) * (s - avg)).sum::<f64>() / n;

    let blended = W_AVG_SCORE * avg
        + W_VOLUME * (n / VOLUME_SATURATION).min(1.0)
        + W_AGREEMENT * (-5.0 * variance).exp();
    (100.0 * blended).clamp(0.0, 100.0)
}
