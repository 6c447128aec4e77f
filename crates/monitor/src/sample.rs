//! Per-cycle sensor sample

/// One cycle's worth of sensor input, captured by the sampler
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSample {
    /// Capture time (monotonic microseconds)
    pub timestamp_us: u64,
    /// Acceleration in X (g)
    pub accel_x: f32,
    /// Acceleration in Y (g)
    pub accel_y: f32,
    /// Acceleration in Z (g)
    pub accel_z: f32,
    /// Angular rate about Y with bias removed (rad/s)
    pub gyro_y: f32,
    /// Obstruction sensor reads closed
    pub obstruction_closed: bool,
}

impl SensorSample {
    /// Capture time (monotonic milliseconds)
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_us / 1_000
    }
}
