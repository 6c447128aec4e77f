//! Tracing subscriber setup

use crate::MonitorError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging at the given max level
pub fn init_logging(level: &str) -> Result<(), MonitorError> {
    let level: Level = level
        .parse()
        .map_err(|_| MonitorError::Logging(format!("unknown log level '{}'", level)))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MonitorError::Logging(e.to_string()))
}
