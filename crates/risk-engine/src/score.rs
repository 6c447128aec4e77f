//! Sub-score computation and weighted aggregation

use crate::config::RiskConfig;
use crate::weights::WeightSet;
use crate::RiskError;
use serde::{Deserialize, Serialize};

/// Upper bound of every score
pub const MAX_SCORE: f32 = 100.0;

/// Per-cycle risk scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub blink: f32,
    pub tilt: f32,
    pub speed: f32,
    pub total: f32,
}

/// Clamp to [0, 100]; NaN counts as no risk
fn clamp_score(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_SCORE)
    }
}

/// Converts motion and eye metrics into clamped sub-scores and a weighted total
#[derive(Debug, Clone)]
pub struct RiskAggregator {
    max_tilt_deg: f32,
    max_speed_dps: f32,
    long_blink_ms: f32,
}

impl RiskAggregator {
    /// Create an aggregator; every scale must be positive
    pub fn new(config: &RiskConfig) -> Result<Self, RiskError> {
        let positive = |value: f32, name: &'static str| {
            if value > 0.0 {
                Ok(value)
            } else {
                Err(RiskError::InvalidScale(name))
            }
        };
        Ok(Self {
            max_tilt_deg: positive(config.max_tilt_deg, "max_tilt_deg")?,
            max_speed_dps: positive(config.max_speed_dps, "max_speed_dps")?,
            long_blink_ms: positive(config.long_blink_ms, "long_blink_ms")?,
        })
    }

    /// Forward pitch only; leaning back scores zero
    pub fn tilt_score(&self, pitch_deg: f32) -> f32 {
        clamp_score((pitch_deg / self.max_tilt_deg) * MAX_SCORE)
    }

    pub fn speed_score(&self, angular_rate_dps: f32) -> f32 {
        clamp_score((angular_rate_dps.abs() / self.max_speed_dps) * MAX_SCORE)
    }

    /// Zero while open (the tracker reports 0 ms)
    pub fn blink_score(&self, eye_closed_ms: u64) -> f32 {
        clamp_score((eye_closed_ms as f32 / self.long_blink_ms) * MAX_SCORE)
    }

    /// Compute all sub-scores and the weighted total
    pub fn compute_scores(
        &self,
        pitch_deg: f32,
        angular_rate_dps: f32,
        eye_closed_ms: u64,
        weights: &WeightSet,
    ) -> ScoreSet {
        let blink = self.blink_score(eye_closed_ms);
        let tilt = self.tilt_score(pitch_deg);
        let speed = self.speed_score(angular_rate_dps);
        // Rounding can overshoot 100 by an ulp even with unit-sum weights
        let total = clamp_score(weights.blink * blink + weights.tilt * tilt + weights.speed * speed);

        ScoreSet {
            blink,
            tilt,
            speed,
            total,
        }
    }
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self {
            max_tilt_deg: 45.0,
            max_speed_dps: 200.0,
            long_blink_ms: 400.0,
        }
    }
}
