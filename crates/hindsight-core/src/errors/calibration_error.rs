/// Calibration subsystem errors (Platt scaling, conformal quantiles).
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("empty score set: conformal calibration needs at least one score")]
    EmptyScores,

    #[error("alpha out of range: {alpha} (must lie in (0, 1))")]
    InvalidAlpha { alpha: f64 },
}
