//! Burst frame decoding and physical-unit conversion

/// Bytes in one ACCEL_XOUT_H burst read (accel, temp, gyro)
pub const FRAME_LEN: usize = 14;

/// Raw sensor counts (matches register layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawFrame {
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,
    pub temperature: i16,
    pub gyro_x: i16,
    pub gyro_y: i16,
    pub gyro_z: i16,
}

impl RawFrame {
    /// Decode big-endian words
    pub fn decode(bytes: &[u8; FRAME_LEN]) -> Self {
        let word = |i: usize| i16::from_be_bytes([bytes[i], bytes[i + 1]]);
        Self {
            accel_x: word(0),
            accel_y: word(2),
            accel_z: word(4),
            temperature: word(6),
            gyro_x: word(8),
            gyro_y: word(10),
            gyro_z: word(12),
        }
    }

    /// Encode back to register layout
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        let words = [
            self.accel_x,
            self.accel_y,
            self.accel_z,
            self.temperature,
            self.gyro_x,
            self.gyro_y,
            self.gyro_z,
        ];
        for (chunk, w) in out.chunks_exact_mut(2).zip(words) {
            chunk.copy_from_slice(&w.to_be_bytes());
        }
        out
    }

    /// Die temperature (Celsius)
    pub fn temperature_c(&self) -> f32 {
        self.temperature as f32 / 340.0 + 36.53
    }

    /// Convert to physical units, subtracting gyro bias
    pub fn to_reading(&self, lsb_per_g: f32, lsb_per_dps: f32, bias: GyroBias) -> InertialReading {
        let rate = |raw: i16| (raw as f32 / lsb_per_dps).to_radians();
        InertialReading {
            accel_x: self.accel_x as f32 / lsb_per_g,
            accel_y: self.accel_y as f32 / lsb_per_g,
            accel_z: self.accel_z as f32 / lsb_per_g,
            gyro_x: rate(self.gyro_x) - bias.x,
            gyro_y: rate(self.gyro_y) - bias.y,
            temperature: self.temperature_c(),
        }
    }
}

/// Processed inertial reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InertialReading {
    /// Acceleration in X (g)
    pub accel_x: f32,
    /// Acceleration in Y (g)
    pub accel_y: f32,
    /// Acceleration in Z (g)
    pub accel_z: f32,
    /// Angular rate X, bias removed (rad/s)
    pub gyro_x: f32,
    /// Angular rate Y, bias removed (rad/s)
    pub gyro_y: f32,
    /// Temperature (Celsius)
    pub temperature: f32,
}

/// Gyro zero-rate offset in rad/s, fixed after calibration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GyroBias {
    pub x: f32,
    pub y: f32,
}
