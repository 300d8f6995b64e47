//! Mothership thread: simulated arbiter.
//!
//! Receives client packets, waits the configured latency and publishes the
//! replies on the mission's inbound channel.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use graha_map::arbiter::Packet;
use graha_map::sim::Mothership;

use crate::shared::SharedState;

/// Mothership thread state and logic.
pub struct MothershipThread {
    mothership: Mothership,
    outbound: Receiver<Packet>,
    inbound: Sender<Packet>,
    latency: Duration,
    shared_state: Arc<SharedState>,
}

impl MothershipThread {
    pub fn new(
        mothership: Mothership,
        outbound: Receiver<Packet>,
        inbound: Sender<Packet>,
        latency: Duration,
        shared_state: Arc<SharedState>,
    ) -> Self {
        Self {
            mothership,
            outbound,
            inbound,
            latency,
            shared_state,
        }
    }

    /// Run until shutdown or until the mission side hangs up.
    pub fn run(&mut self) {
        tracing::info!("Mothership thread started for '{}'", self.mothership.name());
        let poll = Duration::from_millis(100);

        loop {
            if self.shared_state.should_shutdown() {
                tracing::info!("Mothership thread shutting down");
                break;
            }

            let packet = match self.outbound.recv_timeout(poll) {
                Ok(packet) => packet,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::info!("Mission link closed, mothership stopping");
                    break;
                }
            };

            if !self.latency.is_zero() {
                std::thread::sleep(self.latency);
            }

            let replies = match self.mothership.handle_packet(&packet) {
                Ok(replies) => replies,
                Err(e) => {
                    tracing::warn!("Mothership rejected packet on {}: {}", packet.topic, e);
                    continue;
                }
            };
            self.shared_state.increment_messages();

            for reply in replies {
                if self.inbound.send(reply).is_err() {
                    tracing::info!("Mission inbox closed, mothership stopping");
                    return;
                }
            }
        }
    }
}
