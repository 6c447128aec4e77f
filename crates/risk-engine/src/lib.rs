//! Risk Scoring Engine
//!
//! Turns fused orientation, angular rate, and eye-closure timing into a single
//! 0-100 rider risk score:
//! - Obstruction (eyelid) sensor edge tracking
//! - Liveness-based reliability weighting
//! - Clamped sub-scores and weighted total

mod config;
mod obstruction;
mod score;
mod weights;

pub use config::RiskConfig;
pub use obstruction::ObstructionTracker;
pub use score::{RiskAggregator, ScoreSet, MAX_SCORE};
pub use weights::{ReliabilityWeighter, SensorHealth, WeightSet};

use thiserror::Error;

/// Risk engine error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Weights must be non-negative and sum to 1.0, got ({blink}, {tilt}, {speed})")]
    InvalidWeights { blink: f32, tilt: f32, speed: f32 },

    #[error("Scale for {0} must be positive")]
    InvalidScale(&'static str),
}
