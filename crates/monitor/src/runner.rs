//! Cycle runner (single consumer)

use crate::sample::SensorSample;
use crate::state::{CycleReport, MonitorState};
use alerting::{AccidentPhase, Actuators};
use peer_link::{NotificationSink, PeerLink};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub accident: AccidentPhase,
}

/// Owns the core state and its outbound collaborators
pub struct Monitor<S, A> {
    state: MonitorState,
    link: PeerLink<S>,
    actuators: A,
}

impl<S, A> Monitor<S, A>
where
    S: NotificationSink,
    A: Actuators,
{
    pub fn new(state: MonitorState, link: PeerLink<S>, actuators: A) -> Self {
        Self {
            state,
            link,
            actuators,
        }
    }

    /// Run one cycle and apply its outputs
    pub fn handle(&mut self, sample: &SensorSample) -> CycleReport {
        // Sampled once: the latch and the send must agree on this cycle's peer
        let peer_connected = self.link.is_peer_connected();
        let report = self.state.step(sample, peer_connected);

        let command = report.alert.command();
        self.actuators.set_actuator(command.buzzer, command.vibration);

        info!(
            total_score = report.scores.total,
            alert = %report.alert,
            "Score: {:.2} | Alert: {}",
            report.scores.total,
            report.alert
        );

        if let Some(notification) = &report.notification {
            // One attempt only; the latch has already moved on
            if let Err(e) = self.link.send_accident(notification, peer_connected) {
                warn!("Accident notification not delivered: {}", e);
            }
        }

        report
    }

    /// Consume samples until the producer closes the channel
    pub async fn run(&mut self, mut samples: mpsc::Receiver<SensorSample>) -> RunSummary {
        info!("Monitor loop started");
        while let Some(sample) = samples.recv().await {
            self.handle(&sample);
        }

        let summary = self.summary();
        info!(
            "Monitor loop stopped after {} cycles ({:?})",
            summary.cycles, summary.accident
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            cycles: self.state.cycles(),
            accident: self.state.accident_phase(),
        }
    }

    pub fn link(&self) -> &PeerLink<S> {
        &self.link
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }
}
