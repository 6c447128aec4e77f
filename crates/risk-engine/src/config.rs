//! Risk engine configuration

use crate::weights::WeightSet;
use serde::{Deserialize, Serialize};

/// Risk engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Pitch that maps to a full tilt score (degrees)
    pub max_tilt_deg: f32,
    /// Angular rate that maps to a full speed score (deg/s)
    pub max_speed_dps: f32,
    /// Eye closure that maps to a full blink score (milliseconds)
    pub long_blink_ms: f32,
    /// Obstruction sensor is stale after this long without an edge (milliseconds)
    pub stale_timeout_ms: u64,
    /// Weights while the obstruction sensor is live
    pub reliable_weights: WeightSet,
    /// Weights once the obstruction sensor looks stuck
    pub unreliable_weights: WeightSet,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_tilt_deg: 45.0,
            max_speed_dps: 200.0,
            long_blink_ms: 400.0,
            stale_timeout_ms: 10_000,
            reliable_weights: WeightSet::RELIABLE,
            unreliable_weights: WeightSet::UNRELIABLE,
        }
    }
}
