//! Obstruction (eyelid) sensor edge tracking

/// Tracks state changes and closure intervals of the obstruction sensor.
///
/// Feeds both the blink score (how long the sensor has read closed) and the
/// reliability signal (when it last changed state at all).
#[derive(Debug, Clone)]
pub struct ObstructionTracker {
    last_change_ms: u64,
    closure_start_ms: u64,
    previous_closed: bool,
}

impl ObstructionTracker {
    /// Start tracking at `now_ms`, assuming the sensor reads open
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_change_ms: now_ms,
            closure_start_ms: now_ms,
            previous_closed: false,
        }
    }

    /// Record this cycle's reading and return the current closure duration.
    ///
    /// Returns 0 while open; the closure interval restarts from the last open
    /// reading.
    pub fn update(&mut self, now_ms: u64, closed: bool) -> u64 {
        if closed != self.previous_closed {
            self.last_change_ms = now_ms;
        }
        self.previous_closed = closed;

        if closed {
            now_ms.saturating_sub(self.closure_start_ms)
        } else {
            self.closure_start_ms = now_ms;
            0
        }
    }

    /// Timestamp of the most recent edge (milliseconds)
    pub fn last_change_ms(&self) -> u64 {
        self.last_change_ms
    }

    /// Whether the last reading was closed
    pub fn is_closed(&self) -> bool {
        self.previous_closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reports_zero() {
        let mut tracker = ObstructionTracker::new(0);
        assert_eq!(tracker.update(20, false), 0);
        assert_eq!(tracker.update(40, false), 0);
        assert_eq!(tracker.last_change_ms(), 0);
    }

    #[test]
    fn test_closure_measured_from_last_open_reading() {
        let mut tracker = ObstructionTracker::new(0);
        tracker.update(100, false);
        assert_eq!(tracker.update(120, true), 20);
        assert_eq!(tracker.update(300, true), 200);
        assert_eq!(tracker.last_change_ms(), 120);
        assert!(tracker.is_closed());

        // Reopening resets the interval
        assert_eq!(tracker.update(320, false), 0);
        assert_eq!(tracker.last_change_ms(), 320);
        assert_eq!(tracker.update(340, true), 20);
    }

    #[test]
    fn test_closed_from_start() {
        let mut tracker = ObstructionTracker::new(1_000);
        assert_eq!(tracker.update(1_500, true), 500);
        assert_eq!(tracker.last_change_ms(), 1_500);
    }

    #[test]
    fn test_stuck_sensor_keeps_old_edge() {
        let mut tracker = ObstructionTracker::new(0);
        tracker.update(10, true);
        for t in (30..20_000).step_by(20) {
            tracker.update(t, true);
        }
        assert_eq!(tracker.last_change_ms(), 10);
    }
}
