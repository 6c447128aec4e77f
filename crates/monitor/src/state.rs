//! Per-cycle fusion and decision state

use crate::config::MonitorConfig;
use crate::sample::SensorSample;
use crate::MonitorError;
use alerting::{AccidentDecider, AccidentNotification, AccidentPhase, AlertDriver, AlertLevel};
use orientation::ComplementaryFilter;
use risk_engine::{ObstructionTracker, ReliabilityWeighter, RiskAggregator, ScoreSet, SensorHealth, WeightSet};

/// Everything one cycle produced
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub timestamp_ms: u64,
    pub pitch_deg: f32,
    pub roll_deg: f32,
    /// Absolute angular rate about Y (deg/s)
    pub angular_rate_dps: f32,
    pub eye_closed_ms: u64,
    pub weights: WeightSet,
    pub health: SensorHealth,
    pub scores: ScoreSet,
    pub alert: AlertLevel,
    /// Accident flagged on this cycle
    pub newly_detected: bool,
    /// Set on the single cycle the accident notification is released
    pub notification: Option<AccidentNotification>,
}

/// All core state, owned by the one task that runs cycles
#[derive(Debug)]
pub struct MonitorState {
    filter: ComplementaryFilter,
    tracker: ObstructionTracker,
    weighter: ReliabilityWeighter,
    aggregator: RiskAggregator,
    decider: AccidentDecider,
    alert_driver: AlertDriver,
    last_timestamp_us: Option<u64>,
    cycles: u64,
}

impl MonitorState {
    /// Build the core from configuration; `start_ms` seeds the obstruction tracker
    pub fn new(config: &MonitorConfig, start_ms: u64) -> Result<Self, MonitorError> {
        Ok(Self {
            filter: ComplementaryFilter::new(config.orientation),
            tracker: ObstructionTracker::new(start_ms),
            weighter: ReliabilityWeighter::new(&config.risk)?,
            aggregator: RiskAggregator::new(&config.risk)?,
            decider: AccidentDecider::new(config.accident.clone()),
            alert_driver: AlertDriver::new(config.alerts.clone()),
            last_timestamp_us: None,
            cycles: 0,
        })
    }

    /// Run one cycle: fusion, weighting, scoring, accident latch, alert level
    pub fn step(&mut self, sample: &SensorSample, peer_connected: bool) -> CycleReport {
        let dt = match self.last_timestamp_us {
            Some(prev) => sample.timestamp_us.saturating_sub(prev) as f32 * 1e-6,
            None => 0.0,
        };
        self.last_timestamp_us = Some(sample.timestamp_us);
        self.cycles += 1;

        // Single-axis rate input: roll is carried but never integrated
        self.filter.update(
            sample.accel_x,
            sample.accel_y,
            sample.accel_z,
            0.0,
            sample.gyro_y,
            dt,
        );
        let pitch_deg = self.filter.pitch_degrees();
        let angular_rate_dps = sample.gyro_y.to_degrees().abs();

        let now_ms = sample.timestamp_ms();
        let eye_closed_ms = self.tracker.update(now_ms, sample.obstruction_closed);
        let (weights, health) = self
            .weighter
            .update_weights(now_ms, self.tracker.last_change_ms());

        let scores = self
            .aggregator
            .compute_scores(pitch_deg, angular_rate_dps, eye_closed_ms, &weights);

        let newly_detected = self.decider.observe(&scores);
        let alert = self.alert_driver.evaluate(scores.total);
        let notification = self.decider.try_notify(scores.total, peer_connected);

        CycleReport {
            timestamp_ms: now_ms,
            pitch_deg,
            roll_deg: self.filter.roll_degrees(),
            angular_rate_dps,
            eye_closed_ms,
            weights,
            health,
            scores,
            alert,
            newly_detected,
            notification,
        }
    }

    pub fn accident_phase(&self) -> AccidentPhase {
        self.decider.phase()
    }

    /// Cycles run so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
