//! MPU-6050 driver over an abstract register bus

use crate::frame::{GyroBias, InertialReading, RawFrame, FRAME_LEN};
use crate::register::{self, AccelRange, GyroRange};
use crate::ImuError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Two-wire register access provided by the platform HAL
pub trait RegisterBus {
    /// Write a single register
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), ImuError>;

    /// Read `buf.len()` consecutive registers starting at `register`
    fn read_registers(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), ImuError>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), ImuError> {
        (**self).write_register(address, register, value)
    }

    fn read_registers(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), ImuError> {
        (**self).read_registers(address, register, buf)
    }
}

/// IMU configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImuConfig {
    /// Two-wire address (default: 0x68)
    pub address: u8,
    /// Bus clock for the HAL adapter (Hz)
    pub bus_clock_hz: u32,
    /// Accelerometer full-scale range
    pub accel_range: AccelRange,
    /// Gyroscope full-scale range
    pub gyro_range: GyroRange,
    /// Samples averaged during gyro calibration
    pub calibration_samples: u32,
    /// Delay between calibration samples (milliseconds)
    pub calibration_delay_ms: u64,
}

impl Default for ImuConfig {
    fn default() -> Self {
        Self {
            address: register::DEVICE_ADDRESS,
            bus_clock_hz: 400_000,
            accel_range: AccelRange::G4,
            gyro_range: GyroRange::Dps500,
            calibration_samples: 600,
            calibration_delay_ms: 2,
        }
    }
}

/// MPU-6050 driver
pub struct Mpu6050<B> {
    bus: B,
    address: u8,
    accel_range: AccelRange,
    gyro_range: GyroRange,
}

impl<B: RegisterBus> Mpu6050<B> {
    /// Create a driver; call [`Mpu6050::configure`] before reading
    pub fn new(bus: B, config: &ImuConfig) -> Self {
        Self {
            bus,
            address: config.address,
            accel_range: config.accel_range,
            gyro_range: config.gyro_range,
        }
    }

    /// Wake the device and program both full-scale ranges
    pub fn configure(&mut self) -> Result<(), ImuError> {
        self.bus.write_register(self.address, register::PWR_MGMT_1, 0x00)?;
        self.bus
            .write_register(self.address, register::ACCEL_CONFIG, self.accel_range.register_value())?;
        self.bus
            .write_register(self.address, register::GYRO_CONFIG, self.gyro_range.register_value())?;

        info!(
            "IMU configured at 0x{:02X}: accel {:?}, gyro {:?}",
            self.address, self.accel_range, self.gyro_range
        );
        Ok(())
    }

    /// Burst-read one raw frame
    pub fn read_frame(&mut self) -> Result<RawFrame, ImuError> {
        let mut buf = [0u8; FRAME_LEN];
        self.bus
            .read_registers(self.address, register::ACCEL_XOUT_H, &mut buf)?;
        Ok(RawFrame::decode(&buf))
    }

    /// Read one frame in physical units with bias removed
    pub fn read(&mut self, bias: GyroBias) -> Result<InertialReading, ImuError> {
        let frame = self.read_frame()?;
        let reading = frame.to_reading(self.accel_lsb(), self.gyro_lsb(), bias);
        debug!(?reading, "IMU sample");
        Ok(reading)
    }

    /// Accelerometer counts per g
    pub fn accel_lsb(&self) -> f32 {
        self.accel_range.lsb_per_g()
    }

    /// Gyroscope counts per deg/s
    pub fn gyro_lsb(&self) -> f32 {
        self.gyro_range.lsb_per_dps()
    }

    /// Borrow the bus (scripted buses queue frames through this)
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus
    pub fn into_inner(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedBus;

    #[test]
    fn test_configure_writes_registers() {
        let mut bus = SimulatedBus::level(AccelRange::G4);
        let mut imu = Mpu6050::new(&mut bus, &ImuConfig::default());
        imu.configure().unwrap();

        assert_eq!(
            bus.writes(),
            &[
                (register::PWR_MGMT_1, 0x00),
                (register::ACCEL_CONFIG, 0x08),
                (register::GYRO_CONFIG, 0x08),
            ]
        );
    }

    #[test]
    fn test_into_inner_returns_bus_state() {
        let config = ImuConfig {
            gyro_range: GyroRange::Dps2000,
            ..Default::default()
        };
        let mut imu = Mpu6050::new(SimulatedBus::level(AccelRange::G4), &config);
        imu.configure().unwrap();
        imu.read_frame().unwrap();

        let bus = imu.into_inner();
        assert_eq!(bus.writes().last(), Some(&(register::GYRO_CONFIG, 0x18)));
    }

    #[test]
    fn test_level_device_reads_one_g() {
        let bus = SimulatedBus::level(AccelRange::G4);
        let mut imu = Mpu6050::new(bus, &ImuConfig::default());
        let reading = imu.read(GyroBias::default()).unwrap();

        assert!((reading.accel_z - 1.0).abs() < 1e-6);
        assert_eq!(reading.accel_x, 0.0);
        assert_eq!(reading.gyro_y, 0.0);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut bus = SimulatedBus::level(AccelRange::G4);
        bus.fail_next_reads(1);
        let mut imu = Mpu6050::new(bus, &ImuConfig::default());

        assert!(matches!(imu.read_frame(), Err(ImuError::Bus(_))));
        assert!(imu.read_frame().is_ok());
    }
}
