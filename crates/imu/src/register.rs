//! MPU-6050 register map and full-scale ranges

use serde::{Deserialize, Serialize};

/// Default two-wire address (AD0 low)
pub const DEVICE_ADDRESS: u8 = 0x68;

/// Power management 1 (write 0 to wake)
pub const PWR_MGMT_1: u8 = 0x6B;

/// First register of the accel/temp/gyro burst
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// Gyroscope full-scale select
pub const GYRO_CONFIG: u8 = 0x1B;

/// Accelerometer full-scale select
pub const ACCEL_CONFIG: u8 = 0x1C;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelRange {
    G2,
    #[default]
    G4,
    G8,
    G16,
}

impl AccelRange {
    /// FS_SEL field value
    pub fn fs_sel(self) -> u8 {
        match self {
            AccelRange::G2 => 0,
            AccelRange::G4 => 1,
            AccelRange::G8 => 2,
            AccelRange::G16 => 3,
        }
    }

    /// Value written to ACCEL_CONFIG
    pub fn register_value(self) -> u8 {
        self.fs_sel() << 3
    }

    /// Counts per g
    pub fn lsb_per_g(self) -> f32 {
        match self {
            AccelRange::G2 => 16384.0,
            AccelRange::G4 => 8192.0,
            AccelRange::G8 => 4096.0,
            AccelRange::G16 => 2048.0,
        }
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GyroRange {
    Dps250,
    #[default]
    Dps500,
    Dps1000,
    Dps2000,
}

impl GyroRange {
    /// FS_SEL field value
    pub fn fs_sel(self) -> u8 {
        match self {
            GyroRange::Dps250 => 0,
            GyroRange::Dps500 => 1,
            GyroRange::Dps1000 => 2,
            GyroRange::Dps2000 => 3,
        }
    }

    /// Value written to GYRO_CONFIG
    pub fn register_value(self) -> u8 {
        self.fs_sel() << 3
    }

    /// Counts per degree/second
    pub fn lsb_per_dps(self) -> f32 {
        match self {
            GyroRange::Dps250 => 131.0,
            GyroRange::Dps500 => 65.5,
            GyroRange::Dps1000 => 32.8,
            GyroRange::Dps2000 => 16.4,
        }
    }
}
