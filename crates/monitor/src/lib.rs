//! Rider Safety Monitor
//!
//! Wires the sensor collaborators to the fusion and decision core:
//! - A sampler thread turns bus, pin, and clock reads into `SensorSample`s
//! - A single consumer task owns `MonitorState` and runs one cycle per sample
//! - Each cycle drives the actuators, logs status, and releases at most one
//!   accident notification per run

pub mod clock;
pub mod config;
pub mod logging;
pub mod pin;
pub mod runner;
pub mod sample;
pub mod sampler;
pub mod sim;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::MonitorConfig;
pub use logging::init_logging;
pub use pin::{ObstructionInput, PinLevel};
pub use runner::{Monitor, RunSummary};
pub use sample::SensorSample;
pub use sampler::{SamplerHandle, SensorSampler};
pub use state::{CycleReport, MonitorState};

use thiserror::Error;

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IMU error: {0}")]
    Imu(#[from] imu::ImuError),

    #[error("Risk engine error: {0}")]
    Risk(#[from] risk_engine::RiskError),

    #[error("Peer link error: {0}")]
    Link(#[from] peer_link::LinkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
