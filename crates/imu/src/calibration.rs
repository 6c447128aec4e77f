//! Gyro zero-rate calibration
//!
//! Runs once at startup with the device held still. There is no stationarity
//! check: moving the device during calibration skews the bias for the whole
//! session.

use crate::driver::{Mpu6050, RegisterBus};
use crate::frame::GyroBias;
use crate::ImuError;
use std::time::Duration;
use tracing::info;

/// Average `sample_count` raw X/Y gyro readings into a bias (rad/s)
pub fn calibrate<B: RegisterBus>(
    imu: &mut Mpu6050<B>,
    sample_count: u32,
    delay: Duration,
) -> Result<GyroBias, ImuError> {
    if sample_count == 0 {
        return Err(ImuError::Calibration("sample count must be non-zero".to_string()));
    }

    info!("Calibrating gyro with {} samples...", sample_count);

    let mut sum_x: i64 = 0;
    let mut sum_y: i64 = 0;
    for _ in 0..sample_count {
        let frame = imu.read_frame()?;
        sum_x += frame.gyro_x as i64;
        sum_y += frame.gyro_y as i64;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    let lsb = imu.gyro_lsb();
    let to_rad = |sum: i64| (sum as f32 / sample_count as f32 / lsb).to_radians();
    let bias = GyroBias {
        x: to_rad(sum_x),
        y: to_rad(sum_y),
    };

    info!("Gyro bias: x={:.5} rad/s, y={:.5} rad/s", bias.x, bias.y);
    Ok(bias)
}
