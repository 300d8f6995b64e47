//! Multi-threaded architecture for GrahaNav.
//!
//! Separates concerns into two threads:
//! - Mothership thread: simulated arbiter with message latency
//! - Mission thread: rover driving and mission decisions

mod mission;
mod mothership;

pub use mission::MissionThread;
pub use mothership::MothershipThread;

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use graha_map::arbiter::Packet;
use graha_map::sim::{Mothership, PlanetFile};

use crate::config::NavConfig;
use crate::error::Result;
use crate::shared::SharedState;

/// Thread handles for the multi-threaded system.
pub struct ThreadHandles {
    pub mothership: JoinHandle<()>,
    pub mission: JoinHandle<()>,
}

/// Spawn all threads and return handles.
pub fn spawn_threads(
    config: &NavConfig,
    planet: &PlanetFile,
    shared_state: Arc<SharedState>,
) -> Result<ThreadHandles> {
    // Client packets towards the mothership, replies back towards the mission
    let (outbound_tx, outbound_rx) = crossbeam_channel::unbounded::<Packet>();
    let (inbound_tx, inbound_rx) = crossbeam_channel::unbounded::<Packet>();

    let mothership = Mothership::new(planet, config.arbiter.group_id.clone());
    let latency = Duration::from_millis(config.simulation.latency_ms);
    let mothership_state = Arc::clone(&shared_state);

    let mothership_handle = thread::Builder::new()
        .name("mothership".into())
        .spawn(move || {
            let mut mothership_thread = MothershipThread::new(
                mothership,
                outbound_rx,
                inbound_tx,
                latency,
                mothership_state,
            );
            mothership_thread.run();
        })?;

    let mut mission_thread =
        MissionThread::new(config, planet, shared_state, outbound_tx, inbound_rx);
    let mission_handle = thread::Builder::new()
        .name("mission".into())
        .spawn(move || mission_thread.run())?;

    Ok(ThreadHandles {
        mothership: mothership_handle,
        mission: mission_handle,
    })
}
