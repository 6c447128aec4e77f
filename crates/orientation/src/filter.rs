//! Complementary Filter Implementation

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filter tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Weight on the integrated estimate when the accelerometer is trusted (default: 0.98)
    pub alpha: f32,
    /// Accelerometer magnitude must be above this to be trusted (g, exclusive)
    pub accel_trust_min_g: f32,
    /// Accelerometer magnitude must be below this to be trusted (g, exclusive)
    pub accel_trust_max_g: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            alpha: 0.98,
            accel_trust_min_g: 0.85,
            accel_trust_max_g: 1.15,
        }
    }
}

/// Current attitude estimate (radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationState {
    pub roll: f32,
    pub pitch: f32,
    /// False until the first sample seeds the estimate
    pub initialized: bool,
}

/// Complementary filter over roll and pitch
#[derive(Debug, Clone)]
pub struct ComplementaryFilter {
    config: OrientationConfig,
    state: OrientationState,
}

impl ComplementaryFilter {
    /// Create a filter with the given tuning
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            config,
            state: OrientationState::default(),
        }
    }

    /// Advance the estimate by one sample.
    ///
    /// * `ax`, `ay`, `az` - acceleration (g)
    /// * `gx`, `gy` - angular rate about X and Y (rad/s)
    /// * `dt` - seconds since the previous sample
    pub fn update(&mut self, ax: f32, ay: f32, az: f32, gx: f32, gy: f32, dt: f32) {
        let roll_acc = ay.atan2(az);
        let pitch_acc = (-ax).atan2((ay * ay + az * az).sqrt());

        if !self.state.initialized {
            self.state = OrientationState {
                roll: roll_acc,
                pitch: pitch_acc,
                initialized: true,
            };
            debug!(roll = roll_acc, pitch = pitch_acc, "Orientation seeded from accelerometer");
            return;
        }

        self.state.roll += gx * dt;
        self.state.pitch += gy * dt;

        let a = if self.accel_trusted(ax, ay, az) {
            self.config.alpha
        } else {
            1.0
        };

        self.state.roll = a * self.state.roll + (1.0 - a) * roll_acc;
        self.state.pitch = a * self.state.pitch + (1.0 - a) * pitch_acc;
    }

    /// Accelerometer is usable as a gravity reference only near 1 g
    pub fn accel_trusted(&self, ax: f32, ay: f32, az: f32) -> bool {
        let magnitude = (ax * ax + ay * ay + az * az).sqrt();
        magnitude > self.config.accel_trust_min_g && magnitude < self.config.accel_trust_max_g
    }

    pub fn roll_degrees(&self) -> f32 {
        self.state.roll.to_degrees()
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.state.pitch.to_degrees()
    }

    /// Snapshot of the current estimate
    pub fn state(&self) -> OrientationState {
        self.state
    }
}

impl Default for ComplementaryFilter {
    fn default() -> Self {
        Self::new(OrientationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tilted(pitch_deg: f32) -> (f32, f32, f32) {
        let p = pitch_deg.to_radians();
        (-p.sin(), 0.0, p.cos())
    }

    #[test]
    fn test_first_update_seeds_from_accelerometer() {
        let mut filter = ComplementaryFilter::default();
        let (ax, ay, az) = tilted(30.0);

        // Large gyro and dt must not leak into the seed
        filter.update(ax, ay, az, 5.0, 5.0, 1.0);

        let state = filter.state();
        assert!(state.initialized);
        assert!((filter.pitch_degrees() - 30.0).abs() < 1e-3);
        assert!(filter.roll_degrees().abs() < 1e-3);
    }

    #[test]
    fn test_untrusted_accel_integrates_only() {
        let mut filter = ComplementaryFilter::default();
        filter.update(0.0, 0.0, 1.0, 0.0, 0.0, 0.02);
        assert_eq!(filter.state().pitch, 0.0);

        // 2 g: outside the trust window
        let gy = 0.5f32;
        let dt = 0.1f32;
        filter.update(0.0, 0.0, 2.0, 0.0, gy, dt);

        assert_eq!(filter.state().pitch, 0.0 + gy * dt);
    }

    #[test]
    fn test_trusted_accel_pulls_toward_gravity() {
        let mut filter = ComplementaryFilter::default();
        filter.update(0.0, 0.0, 1.0, 0.0, 0.0, 0.02);

        let (ax, ay, az) = tilted(20.0);
        filter.update(ax, ay, az, 0.0, 0.0, 0.02);
        let one_step = filter.pitch_degrees();
        assert!((one_step - 0.4).abs() < 1e-3);

        for _ in 0..500 {
            filter.update(ax, ay, az, 0.0, 0.0, 0.02);
        }
        assert!((filter.pitch_degrees() - 20.0).abs() < 0.1);
    }

    #[test]
    fn test_trust_window_is_exclusive() {
        let filter = ComplementaryFilter::default();
        assert!(filter.accel_trusted(0.0, 0.0, 1.0));
        assert!(!filter.accel_trusted(0.0, 0.0, 1.15));
        assert!(!filter.accel_trusted(0.0, 0.0, 0.85));
        assert!(!filter.accel_trusted(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_roll_tracks_symmetrically() {
        let mut filter = ComplementaryFilter::default();
        let r = 15.0f32.to_radians();
        filter.update(0.0, r.sin(), r.cos(), 0.0, 0.0, 0.02);
        assert!((filter.roll_degrees() - 15.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_finite_inputs_stay_finite(
            samples in proptest::collection::vec(
                (-4.0f32..4.0, -4.0f32..4.0, -4.0f32..4.0, -8.0f32..8.0, 0.0f32..0.1),
                1..50,
            )
        ) {
            let mut filter = ComplementaryFilter::default();
            for (ax, ay, az, gy, dt) in samples {
                filter.update(ax, ay, az, 0.0, gy, dt);
                prop_assert!(filter.pitch_degrees().is_finite());
                prop_assert!(filter.roll_degrees().is_finite());
            }
        }
    }
}
