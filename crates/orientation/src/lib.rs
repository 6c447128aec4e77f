//! Orientation Estimation
//!
//! Roll/pitch from a complementary filter: integrated gyro rate for short-term
//! stability, pulled toward the accelerometer's gravity direction whenever the
//! accelerometer is close to 1 g.

mod filter;

pub use filter::{ComplementaryFilter, OrientationConfig, OrientationState};
