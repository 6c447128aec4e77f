//! Simulated collaborators for running without hardware

use crate::pin::{ObstructionInput, PinLevel};
use alerting::{ActuatorCommand, Actuators};
use imu::{ImuConfig, RawFrame, SimulatedBus};
use peer_link::{ConnectionEvents, ConnectionHandle};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Eyelid that blinks on a fixed read pattern, optionally shutting for good
#[derive(Debug, Clone)]
pub struct SimulatedEyelid {
    open_reads: u64,
    closed_reads: u64,
    shut_after: Option<u64>,
    reads: u64,
}

impl SimulatedEyelid {
    /// Open for `open_reads`, closed for `closed_reads`, repeating
    pub fn blinking(open_reads: u64, closed_reads: u64) -> Self {
        Self {
            open_reads: open_reads.max(1),
            closed_reads,
            shut_after: None,
            reads: 0,
        }
    }

    /// Stay closed from read number `reads` onward
    pub fn shut_after(mut self, reads: u64) -> Self {
        self.shut_after = Some(reads);
        self
    }
}

impl ObstructionInput for SimulatedEyelid {
    fn read_level(&mut self) -> PinLevel {
        let n = self.reads;
        self.reads += 1;

        if self.shut_after.is_some_and(|after| n >= after) {
            return PinLevel::Low;
        }
        if n % (self.open_reads + self.closed_reads) < self.open_reads {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

/// Actuators that log output changes instead of toggling pins
#[derive(Debug, Default)]
pub struct LoggingActuators {
    last: ActuatorCommand,
}

impl LoggingActuators {
    pub fn current(&self) -> ActuatorCommand {
        self.last
    }
}

impl Actuators for LoggingActuators {
    fn set_actuator(&mut self, buzzer: bool, vibration: bool) {
        let command = ActuatorCommand { buzzer, vibration };
        if command == self.last {
            return;
        }

        let state = |on: bool| if on { "ON" } else { "OFF" };
        if buzzer {
            warn!("Buzzer {}, vibration {}", state(buzzer), state(vibration));
        } else {
            info!("Buzzer {}, vibration {}", state(buzzer), state(vibration));
        }
        self.last = command;
    }
}

/// Peer that connects after `delay` and logs every frame it receives
pub fn spawn_peer(
    events: ConnectionHandle,
    mut frames: mpsc::Receiver<Vec<u8>>,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        events.on_connect();

        while let Some(frame) = frames.recv().await {
            info!("Peer received: {}", String::from_utf8_lossy(&frame));
        }
        events.on_disconnect();
    })
}

/// Queue a quiet ride followed by a tumble onto the side.
///
/// The rider pitches to 60 degrees at 300 deg/s and then lies still; the bus
/// keeps returning the final pose once the script runs out.
pub fn script_fall(bus: &mut SimulatedBus, imu: &ImuConfig, cycle_period: Duration, quiet_for: Duration) {
    let accel_lsb = imu.accel_range.lsb_per_g();
    let gyro_lsb = imu.gyro_range.lsb_per_dps();
    let period_ms = cycle_period.as_millis().max(1);

    let pose = |pitch_deg: f32, rate_dps: f32| {
        let p = pitch_deg.to_radians();
        RawFrame {
            accel_x: (-p.sin() * accel_lsb) as i16,
            accel_z: (p.cos() * accel_lsb) as i16,
            gyro_y: (rate_dps * gyro_lsb) as i16,
            ..Default::default()
        }
    };

    let quiet_frames = quiet_for.as_millis() / period_ms;
    for _ in 0..quiet_frames {
        bus.push_frame(pose(0.0, 0.0));
    }

    const FINAL_PITCH_DEG: f32 = 60.0;
    const TUMBLE_RATE_DPS: f32 = 300.0;
    let tumble_ms = FINAL_PITCH_DEG / TUMBLE_RATE_DPS * 1_000.0;
    let tumble_frames = ((tumble_ms as u128) / period_ms).max(1);
    for k in 1..=tumble_frames {
        let pitch = FINAL_PITCH_DEG * k as f32 / tumble_frames as f32;
        bus.push_frame(pose(pitch, TUMBLE_RATE_DPS));
    }

    bus.set_rest_frame(pose(FINAL_PITCH_DEG, 0.0));
    info!(
        "Scripted fall after {} quiet frames ({} tumble frames)",
        quiet_frames, tumble_frames
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use imu::{GyroBias, Mpu6050};

    #[test]
    fn test_eyelid_pattern() {
        let mut eyelid = SimulatedEyelid::blinking(3, 2);
        let closed: Vec<bool> = (0..10).map(|_| eyelid.is_closed()).collect();
        assert_eq!(
            closed,
            vec![false, false, false, true, true, false, false, false, true, true]
        );
    }

    #[test]
    fn test_eyelid_shuts_for_good() {
        let mut eyelid = SimulatedEyelid::blinking(3, 1).shut_after(5);
        let closed: Vec<bool> = (0..8).map(|_| eyelid.is_closed()).collect();
        assert_eq!(closed, vec![false, false, false, true, false, true, true, true]);
    }

    #[test]
    fn test_logging_actuators_track_last_command() {
        let mut actuators = LoggingActuators::default();
        actuators.set_actuator(true, true);
        assert_eq!(
            actuators.current(),
            ActuatorCommand {
                buzzer: true,
                vibration: true
            }
        );
        actuators.set_actuator(false, false);
        assert_eq!(actuators.current(), ActuatorCommand::default());
    }

    #[test]
    fn test_script_fall_ends_on_side() {
        let config = ImuConfig::default();
        let mut bus = SimulatedBus::level(config.accel_range);
        script_fall(&mut bus, &config, Duration::from_millis(20), Duration::from_millis(100));

        let mut imu = Mpu6050::new(bus, &config);
        for _ in 0..5 {
            let quiet = imu.read(GyroBias::default()).unwrap();
            assert!((quiet.accel_z - 1.0).abs() < 1e-3);
        }

        let tumble = imu.read(GyroBias::default()).unwrap();
        assert!((tumble.gyro_y.to_degrees() - 300.0).abs() < 0.1);

        for _ in 0..20 {
            imu.read(GyroBias::default()).unwrap();
        }
        let resting = imu.read(GyroBias::default()).unwrap();
        assert!((resting.accel_x + 0.866).abs() < 1e-3);
        assert_eq!(resting.gyro_y, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_peer_connects_after_delay() {
        let events = ConnectionHandle::default();
        let (tx, rx) = mpsc::channel(1);
        let peer = spawn_peer(events.clone(), rx, Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!events.is_connected());
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(events.is_connected());

        drop(tx);
        peer.await.unwrap();
        assert!(!events.is_connected());
    }
}
