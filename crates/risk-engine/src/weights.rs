//! Liveness-based reliability weighting

use crate::config::RiskConfig;
use crate::RiskError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Sub-score weights; always non-negative and summing to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub blink: f32,
    pub tilt: f32,
    pub speed: f32,
}

impl WeightSet {
    /// Obstruction sensor live
    pub const RELIABLE: WeightSet = WeightSet {
        blink: 0.40,
        tilt: 0.30,
        speed: 0.30,
    };

    /// Obstruction sensor stuck or disconnected
    pub const UNRELIABLE: WeightSet = WeightSet {
        blink: 0.10,
        tilt: 0.45,
        speed: 0.45,
    };

    /// Build a validated weight set
    pub fn new(blink: f32, tilt: f32, speed: f32) -> Result<Self, RiskError> {
        let weights = Self { blink, tilt, speed };
        weights.validate()?;
        Ok(weights)
    }

    /// Check non-negativity and unit sum (within 1e-6)
    pub fn validate(&self) -> Result<(), RiskError> {
        let non_negative = self.blink >= 0.0 && self.tilt >= 0.0 && self.speed >= 0.0;
        if !non_negative || (self.sum() - 1.0).abs() > 1e-6 {
            return Err(RiskError::InvalidWeights {
                blink: self.blink,
                tilt: self.tilt,
                speed: self.speed,
            });
        }
        Ok(())
    }

    pub fn sum(&self) -> f32 {
        self.blink + self.tilt + self.speed
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        Self::RELIABLE
    }
}

/// Obstruction sensor confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensorHealth {
    #[default]
    Reliable,
    Unreliable,
}

/// Two-state weighting policy driven by obstruction sensor activity
#[derive(Debug, Clone)]
pub struct ReliabilityWeighter {
    reliable: WeightSet,
    unreliable: WeightSet,
    stale_timeout_ms: u64,
    health: SensorHealth,
}

impl ReliabilityWeighter {
    /// Create a weighter, validating both configured weight sets
    pub fn new(config: &RiskConfig) -> Result<Self, RiskError> {
        config.reliable_weights.validate()?;
        config.unreliable_weights.validate()?;
        Ok(Self {
            reliable: config.reliable_weights,
            unreliable: config.unreliable_weights,
            stale_timeout_ms: config.stale_timeout_ms,
            health: SensorHealth::Reliable,
        })
    }

    /// Pick weights for this cycle.
    ///
    /// The sensor is unreliable once strictly more than the stale timeout has
    /// passed since its last state change.
    pub fn update_weights(&mut self, now_ms: u64, last_change_ms: u64) -> (WeightSet, SensorHealth) {
        let idle_ms = now_ms.saturating_sub(last_change_ms);
        let health = if idle_ms > self.stale_timeout_ms {
            SensorHealth::Unreliable
        } else {
            SensorHealth::Reliable
        };

        if health != self.health {
            match health {
                SensorHealth::Unreliable => warn!(
                    "Obstruction sensor idle for {} ms, shifting weight to motion",
                    idle_ms
                ),
                SensorHealth::Reliable => info!("Obstruction sensor active again"),
            }
            self.health = health;
        }

        let weights = match health {
            SensorHealth::Reliable => self.reliable,
            SensorHealth::Unreliable => self.unreliable,
        };
        (weights, health)
    }

    /// Health reported by the last update
    pub fn health(&self) -> SensorHealth {
        self.health
    }
}

impl Default for ReliabilityWeighter {
    fn default() -> Self {
        Self {
            reliable: WeightSet::RELIABLE,
            unreliable: WeightSet::UNRELIABLE,
            stale_timeout_ms: 10_000,
            health: SensorHealth::Reliable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_tuples_sum_to_one() {
        assert_eq!(WeightSet::RELIABLE.sum(), 1.0);
        assert_eq!(WeightSet::UNRELIABLE.sum(), 1.0);
    }

    #[test]
    fn test_recent_activity_is_reliable() {
        let mut weighter = ReliabilityWeighter::default();
        let (weights, health) = weighter.update_weights(9_000, 0);
        assert_eq!(health, SensorHealth::Reliable);
        assert_eq!(weights, WeightSet::RELIABLE);
    }

    #[test]
    fn test_frozen_sensor_is_unreliable() {
        let mut weighter = ReliabilityWeighter::default();
        let (weights, health) = weighter.update_weights(11_000, 0);
        assert_eq!(health, SensorHealth::Unreliable);
        assert_eq!(weights, WeightSet::UNRELIABLE);
    }

    #[test]
    fn test_timeout_boundary_is_strict() {
        let mut weighter = ReliabilityWeighter::default();
        assert_eq!(weighter.update_weights(15_000, 5_000).1, SensorHealth::Reliable);
        assert_eq!(weighter.update_weights(15_001, 5_000).1, SensorHealth::Unreliable);
    }

    #[test]
    fn test_recovers_after_new_edge() {
        let mut weighter = ReliabilityWeighter::default();
        weighter.update_weights(20_000, 0);
        assert_eq!(weighter.health(), SensorHealth::Unreliable);

        let (weights, _) = weighter.update_weights(20_020, 20_010);
        assert_eq!(weights, WeightSet::RELIABLE);
        assert_eq!(weighter.health(), SensorHealth::Reliable);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(WeightSet::new(0.5, 0.5, 0.5).is_err());
        assert!(WeightSet::new(-0.2, 0.6, 0.6).is_err());
        assert!(WeightSet::new(0.2, 0.4, 0.4).is_ok());

        let config = RiskConfig {
            unreliable_weights: WeightSet {
                blink: 0.0,
                tilt: 0.0,
                speed: 0.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            ReliabilityWeighter::new(&config),
            Err(RiskError::InvalidWeights { .. })
        ));
    }
}
