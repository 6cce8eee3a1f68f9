//! # hindsight-learning
//!
//! Post-hoc calibration for matcher confidence: Platt scaling from raw
//! scores to probabilities, split-conformal quantiles for distribution-free
//! uncertainty intervals, and an outcome log that turns observed prediction
//! results into refreshed calibration models.

pub mod conformal;
pub mod feedback;
pub mod platt;

pub use conformal::{calibrate, interval, prediction_set, PredictionInterval};
pub use feedback::OutcomeLog;
pub use platt::{calibrate_confidence, PlattModel};
