//! Messaging with the mothership (the arbiter).
//!
//! The mission controller only sees the [`Arbiter`] trait. [`Communication`]
//! implements it on top of a [`Link`] for publishing and a packet channel for
//! receiving, with every inbound message type filed into its own
//! single-consumer slot of a [`Mailbox`].
//!
//! ```text
//!   MissionController ──Arbiter──► Communication ──Link::publish──► mothership
//!                                        ▲                              │
//!                                        └──── Mailbox ◄── Receiver ◄───┘
//! ```

mod communication;
mod config;
mod link;
mod mailbox;
pub mod messages;
pub mod wire;

pub use communication::Communication;
pub use config::ArbiterConfig;
pub use link::{ChannelLink, Link, Packet};
pub use mailbox::Mailbox;
pub use messages::{
    ClientMessage, DiscoveredPath, PathConfirmed, PathSelected, PathStatus, PathUnveiled,
    PlanetAssigned, ServerMessage,
};

use crate::core::{Direction, Node};
use crate::error::Result;

/// Topic names.
pub mod topics {
    /// Mission-level topic: ready, assignment and completion signals.
    pub fn explorer(group_id: &str) -> String {
        format!("explorer/{group_id}")
    }

    /// Planet topic: path reports and selections.
    pub fn planet(planet_name: &str, group_id: &str) -> String {
        format!("planet/{planet_name}/{group_id}")
    }
}

/// External authority the mission controller reports to.
///
/// Required exchanges return the reply or an error. Optional replies come
/// back as `Option`. The `take_*` notifications are cleared once returned.
pub trait Arbiter {
    /// Announce readiness and wait for the planet assignment.
    fn announce_ready(&mut self) -> Result<PlanetAssigned>;

    /// Report a driven path and wait for its confirmation.
    fn report_path(&mut self, path: DiscoveredPath) -> Result<PathConfirmed>;

    /// Report a path as blocked without waiting for a reply.
    fn report_blocked(&mut self, path: DiscoveredPath) -> Result<()>;

    /// Announce the chosen exit. Returns the forced direction if the arbiter overrides it.
    fn select_path(&mut self, selected: PathSelected) -> Result<Option<Direction>>;

    /// Signal that the target was reached. Returns the mission-done text if sent.
    fn target_reached(&mut self) -> Result<Option<String>>;

    /// Signal that nothing is left to explore. Returns the mission-done text if sent.
    fn exploration_completed(&mut self) -> Result<Option<String>>;

    /// Latest target change since the last call.
    fn take_target(&mut self) -> Option<Node>;

    /// Paths unveiled since the last call, in arrival order.
    fn take_unveiled(&mut self) -> Vec<PathUnveiled>;

    /// Mission-done text received since the last call.
    fn take_done(&mut self) -> Option<String>;

    /// Drop confirmation and override replies left over from earlier exchanges.
    fn discard_stale(&mut self);
}
