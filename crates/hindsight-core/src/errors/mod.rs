pub mod calibration_error;
pub mod embedding_error;
pub mod index_error;

pub use calibration_error::CalibrationError;
pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;

/// Unified error for the hindsight engine.
///
/// User-visible failures are restricted to argument validation; operational
/// problems surface as degraded predictions, not errors.
#[derive(Debug, thiserror::Error)]
pub enum HindsightError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Result alias used across the workspace.
pub type HindsightResult<T> = Result<T, HindsightError>;
