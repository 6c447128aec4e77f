//! Advertised link identity

use crate::LinkError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Peer link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Name advertised to peers
    pub device_name: String,
    /// Service the peer subscribes to
    pub service_uuid: String,
    /// Notify characteristic carrying accident frames
    pub characteristic_uuid: String,
    /// Frames buffered for the in-process sink
    pub frame_buffer: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device_name: "ESP32_ACCIDENT_MONITOR".to_string(),
            service_uuid: "12345678-1234-1234-1234-1234567890ab".to_string(),
            characteristic_uuid: "abcd1234-1234-1234-1234-1234567890ab".to_string(),
            frame_buffer: 4,
        }
    }
}

/// Parsed identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkIdentity {
    pub device_name: String,
    pub service: Uuid,
    pub characteristic: Uuid,
}

impl LinkConfig {
    /// Parse both UUIDs
    pub fn identity(&self) -> Result<LinkIdentity, LinkError> {
        let parse = |field: &'static str, raw: &str| {
            Uuid::parse_str(raw).map_err(|source| LinkError::InvalidUuid { field, source })
        };
        Ok(LinkIdentity {
            device_name: self.device_name.clone(),
            service: parse("service", &self.service_uuid)?,
            characteristic: parse("characteristic", &self.characteristic_uuid)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identity_parses() {
        let identity = LinkConfig::default().identity().unwrap();
        assert_eq!(identity.device_name, "ESP32_ACCIDENT_MONITOR");
        assert_eq!(
            identity.characteristic.to_string(),
            "abcd1234-1234-1234-1234-1234567890ab"
        );
    }

    #[test]
    fn test_bad_uuid_rejected() {
        let config = LinkConfig {
            service_uuid: "not-a-uuid".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.identity(),
            Err(LinkError::InvalidUuid { field: "service", .. })
        ));
    }
}
