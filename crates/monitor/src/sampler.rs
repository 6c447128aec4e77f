//! Sensor sampling (single producer)

use crate::clock::Clock;
use crate::pin::ObstructionInput;
use crate::sample::SensorSample;
use imu::{GyroBias, ImuError, Mpu6050, RegisterBus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Combines the IMU, obstruction pin, and clock into per-cycle samples
pub struct SensorSampler<B, P, C> {
    imu: Mpu6050<B>,
    bias: GyroBias,
    pin: P,
    clock: C,
}

impl<B, P, C> SensorSampler<B, P, C>
where
    B: RegisterBus,
    P: ObstructionInput,
    C: Clock,
{
    /// `bias` comes from calibration and stays fixed for the run
    pub fn new(imu: Mpu6050<B>, bias: GyroBias, pin: P, clock: C) -> Self {
        Self {
            imu,
            bias,
            pin,
            clock,
        }
    }

    /// Capture one sample, timestamped at the start of the cycle
    pub fn sample(&mut self) -> Result<SensorSample, ImuError> {
        let timestamp_us = self.clock.now_us();
        let reading = self.imu.read(self.bias)?;
        let obstruction_closed = self.pin.is_closed();

        Ok(SensorSample {
            timestamp_us,
            accel_x: reading.accel_x,
            accel_y: reading.accel_y,
            accel_z: reading.accel_z,
            gyro_y: reading.gyro_y,
            obstruction_closed,
        })
    }
}

impl<B, P, C> SensorSampler<B, P, C>
where
    B: RegisterBus + Send + 'static,
    P: ObstructionInput + Send + 'static,
    C: Clock + Send + 'static,
{
    /// Sample on a dedicated thread at a fixed period.
    ///
    /// Bus errors skip the cycle. The thread exits when the receiver is
    /// dropped or the handle is stopped.
    pub fn spawn(mut self, period: Duration, capacity: usize) -> (SamplerHandle, mpsc::Receiver<SensorSample>) {
        let (tx, rx) = mpsc::channel::<SensorSample>(capacity.max(1));
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let thread = std::thread::spawn(move || {
            info!("Sampler started ({} ms period)", period.as_millis());
            while !shutdown_clone.load(Ordering::SeqCst) {
                match self.sample() {
                    Ok(sample) => {
                        if tx.blocking_send(sample).is_err() {
                            debug!("Sample receiver dropped");
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("IMU read error, skipping cycle: {}", e);
                    }
                }
                std::thread::sleep(period);
            }
            info!("Sampler stopped");
        });

        (
            SamplerHandle {
                shutdown,
                thread: Some(thread),
            },
            rx,
        )
    }
}

/// Controls a spawned sampler thread
pub struct SamplerHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    /// Ask the sampler to stop after its current cycle
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Stop and wait for the thread to exit
    pub fn join(mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Sampler thread panicked");
            }
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
