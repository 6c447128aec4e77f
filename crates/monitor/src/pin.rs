//! Obstruction sensor digital input

/// Logic level on the sensor pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

/// Digital input wired to the obstruction sensor (pulled up, active low)
pub trait ObstructionInput {
    fn read_level(&mut self) -> PinLevel;

    /// Low means the beam is blocked (eye closed)
    fn is_closed(&mut self) -> bool {
        self.read_level() == PinLevel::Low
    }
}
