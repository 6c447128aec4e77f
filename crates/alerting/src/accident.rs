//! One-shot accident latch

use crate::payload::{AccidentNotification, Severity};
use risk_engine::ScoreSet;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Accident detection and severity thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccidentConfig {
    /// Tilt sub-score that flags an accident (exclusive, default: 85)
    pub tilt_threshold: f32,
    /// Speed sub-score that flags an accident (exclusive, default: 90)
    pub speed_threshold: f32,
    /// Total score that flags an accident (exclusive, default: 85)
    pub total_threshold: f32,
    /// Total score above which severity is CRITICAL (default: 95)
    pub critical_threshold: f32,
    /// Total score above which severity is HIGH (default: 85)
    pub high_threshold: f32,
}

impl Default for AccidentConfig {
    fn default() -> Self {
        Self {
            tilt_threshold: 85.0,
            speed_threshold: 90.0,
            total_threshold: 85.0,
            critical_threshold: 95.0,
            high_threshold: 85.0,
        }
    }
}

/// Latch state; only ever moves forward within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccidentPhase {
    #[default]
    Idle,
    Detected,
    Notified { severity: Severity },
}

/// Flags an accident once and releases exactly one notification per run
#[derive(Debug, Clone, Default)]
pub struct AccidentDecider {
    config: AccidentConfig,
    phase: AccidentPhase,
}

impl AccidentDecider {
    pub fn new(config: AccidentConfig) -> Self {
        Self {
            config,
            phase: AccidentPhase::Idle,
        }
    }

    /// Check this cycle's scores; returns true on the cycle the accident is first flagged
    pub fn observe(&mut self, scores: &ScoreSet) -> bool {
        if self.phase != AccidentPhase::Idle {
            return false;
        }

        let tripped = scores.tilt > self.config.tilt_threshold
            || scores.speed > self.config.speed_threshold
            || scores.total > self.config.total_threshold;

        if tripped {
            warn!(
                tilt = scores.tilt,
                speed = scores.speed,
                total = scores.total,
                "Accident detected"
            );
            self.phase = AccidentPhase::Detected;
        }
        tripped
    }

    /// Release the notification on the first cycle a peer is connected after detection.
    ///
    /// Severity comes from `total_score` now, not from the detection cycle.
    pub fn try_notify(&mut self, total_score: f32, peer_connected: bool) -> Option<AccidentNotification> {
        if self.phase != AccidentPhase::Detected || !peer_connected {
            return None;
        }

        let severity = self.classify(total_score);
        self.phase = AccidentPhase::Notified { severity };
        info!("Accident notification released: {}", severity);
        Some(AccidentNotification::new(severity))
    }

    /// Severity tier for a total score
    pub fn classify(&self, total_score: f32) -> Severity {
        if total_score > self.config.critical_threshold {
            Severity::Critical
        } else if total_score > self.config.high_threshold {
            Severity::High
        } else {
            Severity::Moderate
        }
    }

    pub fn phase(&self) -> AccidentPhase {
        self.phase
    }

    /// Accident flagged (whether or not it has been sent)
    pub fn is_detected(&self) -> bool {
        self.phase != AccidentPhase::Idle
    }

    pub fn is_notified(&self) -> bool {
        matches!(self.phase, AccidentPhase::Notified { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scores(tilt: f32, speed: f32, total: f32) -> ScoreSet {
        ScoreSet {
            blink: 0.0,
            tilt,
            speed,
            total,
        }
    }

    #[test]
    fn test_each_condition_trips() {
        for s in [scores(86.0, 0.0, 0.0), scores(0.0, 91.0, 0.0), scores(0.0, 0.0, 86.0)] {
            let mut decider = AccidentDecider::default();
            assert!(decider.observe(&s));
            assert_eq!(decider.phase(), AccidentPhase::Detected);
        }
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let mut decider = AccidentDecider::default();
        assert!(!decider.observe(&scores(85.0, 90.0, 85.0)));
        assert_eq!(decider.phase(), AccidentPhase::Idle);
    }

    #[test]
    fn test_no_notification_without_peer() {
        let mut decider = AccidentDecider::default();
        decider.observe(&scores(100.0, 0.0, 30.0));

        for _ in 0..100 {
            assert!(decider.try_notify(30.0, false).is_none());
        }
        assert!(decider.is_detected());
        assert!(!decider.is_notified());
    }

    #[test]
    fn test_severity_at_notification_time() {
        let mut decider = AccidentDecider::default();
        decider.observe(&scores(0.0, 0.0, 88.0));

        // Score climbs before the peer connects
        let notification = decider.try_notify(96.0, true).unwrap();
        assert_eq!(notification.severity, Severity::Critical);
        assert_eq!(
            decider.phase(),
            AccidentPhase::Notified {
                severity: Severity::Critical
            }
        );
    }

    #[test]
    fn test_single_notification_per_run() {
        let mut decider = AccidentDecider::default();
        decider.observe(&scores(100.0, 100.0, 100.0));

        assert!(decider.try_notify(100.0, true).is_some());
        for total in [100.0, 0.0, 99.0] {
            assert!(!decider.observe(&scores(100.0, 100.0, total)));
            assert!(decider.try_notify(total, true).is_none());
        }
    }

    #[test]
    fn test_notify_before_detection_is_noop() {
        let mut decider = AccidentDecider::default();
        assert!(decider.try_notify(99.0, true).is_none());
        assert_eq!(decider.phase(), AccidentPhase::Idle);
    }

    #[test]
    fn test_classification_tiers() {
        let decider = AccidentDecider::default();
        assert_eq!(decider.classify(96.0), Severity::Critical);
        assert_eq!(decider.classify(95.0), Severity::High);
        assert_eq!(decider.classify(86.0), Severity::High);
        assert_eq!(decider.classify(85.0), Severity::Moderate);
        assert_eq!(decider.classify(20.0), Severity::Moderate);
    }

    proptest! {
        #[test]
        fn prop_latch_is_monotonic(
            cycles in proptest::collection::vec(
                (0.0f32..=100.0, 0.0f32..=100.0, 0.0f32..=100.0, any::<bool>()),
                1..200,
            )
        ) {
            let mut decider = AccidentDecider::default();
            let mut detected = false;
            let mut sent = 0;

            for (tilt, speed, total, peer) in cycles {
                decider.observe(&scores(tilt, speed, total));
                if decider.try_notify(total, peer).is_some() {
                    sent += 1;
                }
                if detected {
                    prop_assert!(decider.is_detected());
                }
                detected = decider.is_detected();
            }
            prop_assert!(sent <= 1);
        }
    }
}
