//! Compact vector transport: raw little-endian f32 bytes, unpadded base64.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

use hindsight_core::errors::{EmbeddingError, HindsightResult};

/// Encode a vector as unpadded base64 over its little-endian f32 bytes.
pub fn to_base64(v: &[f32]) -> String {
    let mut bytes = Vec::with_capacity(v.len() * 4);
    for x in v {
        bytes.extend_from_slice(&x.to_le_bytes());
    }
    STANDARD_NO_PAD.encode(bytes)
}

/// Decode a vector previously encoded with [`to_base64`].
pub fn from_base64(s: &str) -> HindsightResult<Vec<f32>> {
    let bytes = STANDARD_NO_PAD
        .decode(s)
        .map_err(|e| EmbeddingError::InvalidEncoding {
            reason: e.to_string(),
        })?;
    if bytes.len() % 4 != 0 {
        return Err(EmbeddingError::InvalidEncoding {
            reason: format!("byte length {} is not a multiple of 4", bytes.len()),
        }
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
