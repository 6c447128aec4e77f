//! Accident notification payload

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accident severity, judged from the total score when the notification goes out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Fixed rider-facing text sent with each tier
    pub fn message(self) -> &'static str {
        match self {
            Severity::Critical => "Severe crash detected. Immediate medical attention required.",
            Severity::High => "High impact detected. Please check rider immediately.",
            Severity::Moderate => "Sudden fall detected. Ensure rider safety.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Moderate => "MODERATE",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record sent to the paired peer. Field order is the wire key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentNotification {
    /// Always "YES"
    pub accident: String,
    pub severity: Severity,
    pub message: String,
}

impl AccidentNotification {
    pub fn new(severity: Severity) -> Self {
        Self {
            accident: "YES".to_string(),
            severity,
            message: severity.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&AccidentNotification::new(Severity::Critical)).unwrap();
        assert_eq!(
            json,
            r#"{"accident":"YES","severity":"CRITICAL","message":"Severe crash detected. Immediate medical attention required."}"#
        );
    }

    #[test]
    fn test_severity_strings() {
        for (severity, text) in [
            (Severity::Critical, "\"CRITICAL\""),
            (Severity::High, "\"HIGH\""),
            (Severity::Moderate, "\"MODERATE\""),
        ] {
            assert_eq!(serde_json::to_string(&severity).unwrap(), text);
        }
    }

    #[test]
    fn test_peer_can_parse() {
        let raw = r#"{"accident":"YES","severity":"MODERATE","message":"Sudden fall detected. Ensure rider safety."}"#;
        let parsed: AccidentNotification = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed, AccidentNotification::new(Severity::Moderate));
    }
}
