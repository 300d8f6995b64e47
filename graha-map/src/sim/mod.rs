//! Hardware-free simulation.
//!
//! A [`Mothership`] that knows the true planet and a [`Rover`] that drives
//! on it, both described by a [`PlanetFile`]. [`LoopbackLink`] connects a
//! [`Communication`] to the mothership in-process; [`run_mission`] runs the
//! arrival and decision cycle until the mission ends.

mod loopback;
mod mothership;
mod planet_file;
mod rover;
mod runner;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::arbiter::{ArbiterConfig, Communication};
use crate::exploration::MissionController;

pub use loopback::LoopbackLink;
pub use mothership::Mothership;
pub use planet_file::{
    DriftEntry, EndpointEntry, PathEntry, PlanetFile, ScriptedOverride, ScriptedTarget,
    ScriptedUnveil,
};
pub use rover::Rover;
pub use runner::{MissionReport, run_mission, run_mission_until};

/// Controller talking to an in-process mothership.
pub type LoopbackController = MissionController<Communication<LoopbackLink>>;

/// Everything needed for an in-process mission on `file`.
///
/// The mothership is returned as well so its received messages can be inspected.
pub fn loopback_mission(
    file: &PlanetFile,
    config: ArbiterConfig,
) -> (LoopbackController, Rover, Arc<Mutex<Mothership>>) {
    let mothership = Arc::new(Mutex::new(Mothership::new(file, config.group_id.clone())));
    let (link, inbound) = LoopbackLink::new(Arc::clone(&mothership));
    let controller = MissionController::new(Communication::new(link, inbound, config));
    (controller, Rover::from_planet_file(file), mothership)
}
