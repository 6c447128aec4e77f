//! Alerting System
//!
//! Provides per-cycle alert levels, the one-shot accident latch, and severity
//! classification for the outbound accident notification.

mod accident;
mod level;
mod payload;

pub use accident::{AccidentConfig, AccidentDecider, AccidentPhase};
pub use level::{ActuatorCommand, Actuators, AlertConfig, AlertDriver, AlertLevel};
pub use payload::{AccidentNotification, Severity};
