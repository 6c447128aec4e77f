//! Monitor configuration
//!
//! Every section defaults to the firmware constants. An optional TOML/JSON/YAML
//! file and `RIDER_MONITOR__<SECTION>__<KEY>` environment variables override
//! them at startup; nothing is reconfigured at runtime.

use crate::MonitorError;
use alerting::{AccidentConfig, AlertConfig};
use imu::ImuConfig;
use orientation::OrientationConfig;
use peer_link::LinkConfig;
use risk_engine::RiskConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "RIDER_MONITOR";

/// Configuration file read when no path is given (optional)
pub const DEFAULT_CONFIG_PATH: &str = "monitor.toml";

/// Top-level monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Tracing max level ("error" .. "trace")
    pub log_level: String,
    /// Sampling period (milliseconds)
    pub cycle_period_ms: u64,
    /// Samples buffered between sampler and core
    pub sample_buffer: usize,
    /// Seconds before the simulated peer connects
    pub sim_peer_delay_s: u64,
    pub imu: ImuConfig,
    pub orientation: OrientationConfig,
    pub risk: RiskConfig,
    pub alerts: AlertConfig,
    pub accident: AccidentConfig,
    pub link: LinkConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            cycle_period_ms: 20,
            sample_buffer: 64,
            sim_peer_delay_s: 5,
            imu: ImuConfig::default(),
            orientation: OrientationConfig::default(),
            risk: RiskConfig::default(),
            alerts: AlertConfig::default(),
            accident: AccidentConfig::default(),
            link: LinkConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load from a file plus environment overrides.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&str>) -> Result<Self, MonitorError> {
        let file = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(file).required(path.is_some()))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// One-line description for the startup log
    pub fn summary(&self) -> String {
        format!(
            "cycle {} ms, accel {:?}, gyro {:?}, stale after {} ms, peer \"{}\"",
            self.cycle_period_ms,
            self.imu.accel_range,
            self.imu.gyro_range,
            self.risk.stale_timeout_ms,
            self.link.device_name
        )
    }

    pub fn cycle_period(&self) -> Duration {
        Duration::from_millis(self.cycle_period_ms)
    }

    pub fn calibration_delay(&self) -> Duration {
        Duration::from_millis(self.imu.calibration_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imu::GyroRange;

    #[test]
    fn test_defaults_match_firmware() {
        let config = MonitorConfig::default();
        assert_eq!(config.cycle_period(), Duration::from_millis(20));
        assert_eq!(config.imu.calibration_samples, 600);
        assert_eq!(config.orientation.alpha, 0.98);
        assert_eq!(config.risk.stale_timeout_ms, 10_000);
        assert_eq!(config.alerts.danger_threshold, 75.0);
        assert_eq!(config.accident.critical_threshold, 95.0);
    }

    #[test]
    fn test_file_overrides_sections() {
        let path = std::env::temp_dir().join(format!("rider-monitor-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "cycle_period_ms = 10\n\n[imu]\ngyro_range = \"dps1000\"\n\n[risk]\nmax_tilt_deg = 60.0\n",
        )
        .unwrap();

        let config = MonitorConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.cycle_period_ms, 10);
        assert_eq!(config.imu.gyro_range, GyroRange::Dps1000);
        assert_eq!(config.risk.max_tilt_deg, 60.0);
        // Untouched keys keep their defaults
        assert_eq!(config.risk.long_blink_ms, 400.0);
        assert_eq!(config.link.device_name, "ESP32_ACCIDENT_MONITOR");
    }

    #[test]
    fn test_summary_reflects_loaded_values() {
        let mut config = MonitorConfig::default();
        assert_eq!(
            config.summary(),
            "cycle 20 ms, accel G4, gyro Dps500, stale after 10000 ms, peer \"ESP32_ACCIDENT_MONITOR\""
        );

        config.cycle_period_ms = 10;
        assert!(config.summary().starts_with("cycle 10 ms"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = MonitorConfig::load(Some("/nonexistent/rider-monitor.toml"));
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }
}
