//! Connection tracking and notification delivery

use crate::config::{LinkConfig, LinkIdentity};
use crate::LinkError;
use alerting::AccidentNotification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Connection callbacks raised by the radio stack
pub trait ConnectionEvents {
    fn on_connect(&self);
    fn on_disconnect(&self);
}

/// Cloneable handle the transport uses to report connection changes
#[derive(Debug, Clone, Default)]
pub struct ConnectionHandle {
    connected: Arc<AtomicBool>,
}

impl ConnectionHandle {
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl ConnectionEvents for ConnectionHandle {
    fn on_connect(&self) {
        info!("Peer connected");
        self.connected.store(true, Ordering::SeqCst);
    }

    fn on_disconnect(&self) {
        info!("Peer disconnected");
        self.connected.store(false, Ordering::SeqCst);
    }
}

/// Delivers one notification frame to subscribed peers
pub trait NotificationSink {
    fn send_frame(&mut self, frame: Vec<u8>) -> Result<(), LinkError>;
}

/// In-process sink over a bounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Vec<u8>>,
}

impl ChannelSink {
    /// Create a sink and the receiving end the simulated peer reads from
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn send_frame(&mut self, frame: Vec<u8>) -> Result<(), LinkError> {
        // Non-blocking: the cycle loop must not stall on the radio
        self.tx
            .try_send(frame)
            .map_err(|e| LinkError::Delivery(e.to_string()))
    }
}

/// Paired-peer link
pub struct PeerLink<S> {
    identity: LinkIdentity,
    events: ConnectionHandle,
    sink: S,
    frames_sent: u32,
}

impl<S: NotificationSink> PeerLink<S> {
    /// Create a link; fails if the configured UUIDs do not parse
    pub fn new(config: &LinkConfig, sink: S) -> Result<Self, LinkError> {
        let identity = config.identity()?;
        info!(
            "Advertising as {} (service {}, characteristic {})",
            identity.device_name, identity.service, identity.characteristic
        );
        Ok(Self {
            identity,
            events: ConnectionHandle::default(),
            sink,
            frames_sent: 0,
        })
    }

    /// Handle to pass to the transport's connection callbacks
    pub fn events(&self) -> ConnectionHandle {
        self.events.clone()
    }

    pub fn is_peer_connected(&self) -> bool {
        self.events.is_connected()
    }

    /// Serialize and send the accident record as a single frame.
    ///
    /// `peer_connected` is the connection state the caller decided on for this
    /// cycle; the shared flag is not read again here.
    pub fn send_accident(
        &mut self,
        notification: &AccidentNotification,
        peer_connected: bool,
    ) -> Result<(), LinkError> {
        if !peer_connected {
            return Err(LinkError::NotConnected);
        }

        let frame = serde_json::to_vec(notification)?;
        debug!("Sending {} byte notification frame", frame.len());
        self.sink.send_frame(frame)?;
        self.frames_sent += 1;

        info!(
            "Accident notification sent on {}: {}",
            self.identity.characteristic, notification.severity
        );
        Ok(())
    }

    pub fn identity(&self) -> &LinkIdentity {
        &self.identity
    }

    /// Frames delivered so far
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }
}
