//! Hashing-trick embedder with signed features.
//!
//! Tokens are hashed into buckets through `HASH_STREAMS` independent hash
//! streams; each contribution carries a sign drawn from a parallel stream so
//! collisions cancel in expectation rather than accumulate.

use std::collections::BTreeMap;

use hindsight_core::errors::HindsightResult;
use hindsight_core::traits::IEmbeddingProvider;

use crate::vector::normalize;

/// Hash streams per token.
const HASH_STREAMS: u64 = 3;
/// Offset separating the bucket streams from the sign streams.
const SIGN_STREAM_OFFSET: u64 = 1000;

/// Accumulator seed for the token mixer.
const ACC_INIT: u64 = 0xea55_0055_e83f_7e6d;
/// Stream discriminator multiplier.
const STREAM_MULT: u64 = 0xbf58_476d_1ce4_e5b9;
/// FNV-1a byte multiplier.
const BYTE_MULT: u64 = 0x0000_0100_0000_01b3;

/// Deterministic hashing-trick embedder.
///
/// The same (text, dimension) pair produces bit-identical vectors across
/// runs and platforms; there is no model state to load.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Two-stream multiply-xor-shift token mixer.
    ///
    /// FNV-style byte absorption under a stream-discriminated seed, then a
    /// splitmix-style finalizer for avalanche.
    fn mix(token: &str, stream: u64) -> u64 {
        let mut h = ACC_INIT ^ stream.wrapping_mul(STREAM_MULT);
        for &b in token.as_bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(BYTE_MULT);
            h ^= h >> 29;
        }
        h ^= h >> 30;
        h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        h ^= h >> 27;
        h = h.wrapping_mul(0x94d0_49bb_1331_11eb);
        h ^= h >> 31;
        h
    }

    /// Tokenize: lowercase, non-word characters become separators, tokens of
    /// length <= 2 are dropped.
    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|t| t.len() > 2)
            .map(str::to_string)
            .collect()
    }

    /// Embed text into a unit-norm vector of the configured dimension.
    ///
    /// Text with no usable tokens embeds to the zero vector, which is
    /// returned unnormalized.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let dims = self.dimensions;
        let mut v = vec![0.0f32; dims];

        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return v;
        }

        // Term frequencies, iterated in sorted order so float accumulation
        // is identical on every platform.
        let mut tf: BTreeMap<String, u32> = BTreeMap::new();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_default() += 1;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            let freq = *count as f32 / total;
            for h in 0..HASH_STREAMS {
                let bucket = (Self::mix(term, h) % dims as u64) as usize;
                let sign = if Self::mix(term, h + SIGN_STREAM_OFFSET) & 1 == 0 {
                    1.0f32
                } else {
                    -1.0f32
                };
                v[bucket] += sign * freq / HASH_STREAMS as f32;
            }
        }

        normalize(&mut v);
        v
    }

    /// Embed a structured value through its canonical JSON rendering.
    /// Object keys serialize in sorted order, so the rendering — and the
    /// resulting vector — is deterministic.
    pub fn embed_json(&self, value: &serde_json::Value) -> Vec<f32> {
        self.embed_text(&value.to_string())
    }
}

impl IEmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> HindsightResult<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn embed_batch(&self, texts: &[String]) -> HindsightResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing-trick"
    }
}
