//! Alert level mapping and actuator outputs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert thresholds on the total score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Above this the rider gets haptic feedback (default: 40)
    pub warning_threshold: f32,
    /// Above this both buzzer and vibration fire (default: 75)
    pub danger_threshold: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            warning_threshold: 40.0,
            danger_threshold: 75.0,
        }
    }
}

/// Discrete alert level, re-evaluated every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl AlertLevel {
    /// Actuator outputs for this level
    pub fn command(self) -> ActuatorCommand {
        match self {
            AlertLevel::Normal => ActuatorCommand {
                buzzer: false,
                vibration: false,
            },
            AlertLevel::Warning => ActuatorCommand {
                buzzer: false,
                vibration: true,
            },
            AlertLevel::Danger => ActuatorCommand {
                buzzer: true,
                vibration: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Normal => "NORMAL",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Danger => "DANGER",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio and haptic output state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorCommand {
    pub buzzer: bool,
    pub vibration: bool,
}

/// Digital outputs for the buzzer and vibration motor
pub trait Actuators {
    fn set_actuator(&mut self, buzzer: bool, vibration: bool);
}

/// Maps the total score to an alert level; not latched
#[derive(Debug, Clone, Default)]
pub struct AlertDriver {
    config: AlertConfig,
}

impl AlertDriver {
    pub fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    /// Level for this cycle's total score
    pub fn evaluate(&self, total_score: f32) -> AlertLevel {
        if total_score > self.config.danger_threshold {
            AlertLevel::Danger
        } else if total_score > self.config.warning_threshold {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    }
}
