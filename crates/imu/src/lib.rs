//! Inertial Sensor Support
//!
//! Talks to an MPU-6050 class accelerometer/gyroscope over an abstract
//! two-wire register bus:
//! - Register map and full-scale range selection
//! - 14-byte burst frame decoding (big-endian 16-bit words)
//! - One-shot gyro bias calibration
//! - Simulated bus for hosts without the sensor attached

pub mod calibration;
pub mod driver;
pub mod frame;
pub mod register;
pub mod sim;

pub use calibration::calibrate;
pub use driver::{ImuConfig, Mpu6050, RegisterBus};
pub use frame::{GyroBias, InertialReading, RawFrame, FRAME_LEN};
pub use register::{AccelRange, GyroRange};
pub use sim::SimulatedBus;

use thiserror::Error;

/// IMU error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImuError {
    #[error("Bus transaction failed: {0}")]
    Bus(String),

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Calibration failed: {0}")]
    Calibration(String),
}
