//! Rider Safety Monitor - Main Entry Point
//!
//! Runs the full pipeline against simulated hardware: a quiet ride, then a
//! fall, with a peer that connects a few seconds after startup.

use anyhow::Context;
use imu::{calibrate, Mpu6050, SimulatedBus};
use monitor::sim::{script_fall, spawn_peer, LoggingActuators, SimulatedEyelid};
use monitor::{init_logging, Clock, Monitor, MonitorConfig, MonitorState, MonotonicClock, SensorSampler};
use peer_link::{ChannelSink, PeerLink};
use std::time::Duration;
use tracing::info;

/// Path to the configuration file (optional)
const CONFIG_PATH_VAR: &str = "RIDER_MONITOR_CONFIG";

/// Ride time before the scripted fall
const QUIET_RIDE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var(CONFIG_PATH_VAR).ok();
    let config = MonitorConfig::load(config_path.as_deref()).context("loading configuration")?;
    init_logging(&config.log_level)?;

    info!("=== Rider Safety Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", config.summary());

    // Sensor bring-up; calibration runs before any sample is taken
    let mut imu = Mpu6050::new(SimulatedBus::level(config.imu.accel_range), &config.imu);
    imu.configure().context("configuring IMU")?;
    let bias = calibrate(&mut imu, config.imu.calibration_samples, config.calibration_delay())
        .context("calibrating gyro")?;
    script_fall(imu.bus_mut(), &config.imu, config.cycle_period(), QUIET_RIDE);

    // Peer link with a simulated phone on the far side
    let (sink, frames) = ChannelSink::new(config.link.frame_buffer);
    let link = PeerLink::new(&config.link, sink)?;
    let peer = spawn_peer(
        link.events(),
        frames,
        Duration::from_secs(config.sim_peer_delay_s),
    );

    let clock = MonotonicClock::new();
    let state = MonitorState::new(&config, clock.now_ms())?;

    let quiet_reads = QUIET_RIDE.as_millis() as u64 / config.cycle_period_ms.max(1);
    let eyelid = SimulatedEyelid::blinking(150, 8).shut_after(quiet_reads);
    let sampler = SensorSampler::new(imu, bias, eyelid, clock);
    let (sampler_handle, samples) = sampler.spawn(config.cycle_period(), config.sample_buffer);

    let mut monitor = Monitor::new(state, link, LoggingActuators::default());
    let mut runner = tokio::spawn(async move { monitor.run(samples).await });

    let finished = tokio::select! {
        result = &mut runner => Some(result?),
        signal = tokio::signal::ctrl_c() => {
            signal.context("waiting for shutdown signal")?;
            None
        }
    };
    let summary = match finished {
        Some(summary) => summary,
        None => {
            info!("Shutdown requested");
            sampler_handle.stop();
            runner.await?
        }
    };

    sampler_handle.join();
    peer.abort();

    info!(
        "Stopped after {} cycles, accident state {:?}",
        summary.cycles, summary.accident
    );
    Ok(())
}
