//! Mission thread: rover and mission controller.
//!
//! Runs the arrival → scan → decide cycle against the mothership thread and
//! stores the outcome in the shared state.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use graha_map::arbiter::{ChannelLink, Packet};
use graha_map::sim::{PlanetFile, Rover, run_mission_until};
use graha_map::{Communication, MissionController};

use crate::config::NavConfig;
use crate::shared::{MissionOutcome, SharedState};

/// Mission thread state and logic.
pub struct MissionThread {
    shared_state: Arc<SharedState>,
    controller: MissionController<Communication<ChannelLink>>,
    rover: Rover,
    max_steps: usize,
}

impl MissionThread {
    pub fn new(
        config: &NavConfig,
        planet: &PlanetFile,
        shared_state: Arc<SharedState>,
        outbound: Sender<Packet>,
        inbound: Receiver<Packet>,
    ) -> Self {
        let arbiter = Communication::new(
            ChannelLink::new(outbound),
            inbound,
            config.arbiter.clone(),
        );

        Self {
            shared_state,
            controller: MissionController::new(arbiter),
            rover: Rover::from_planet_file(planet),
            max_steps: config.mission.max_steps,
        }
    }

    /// Run the mission to its end and publish the outcome.
    pub fn run(&mut self) {
        tracing::info!("Mission thread started");

        let shared_state = Arc::clone(&self.shared_state);
        let result = run_mission_until(
            &mut self.controller,
            &mut self.rover,
            self.max_steps,
            || shared_state.should_shutdown(),
        );

        match result {
            Ok(report) => {
                tracing::info!(
                    "Mission ended after {} steps ({} targets reached): {:?}",
                    report.steps,
                    report.segments,
                    report.finish
                );
                let discovered = match (self.controller.planet_name(), self.controller.start()) {
                    (Some(name), Some(start)) => Some(PlanetFile::from_planet(
                        name,
                        start,
                        self.controller.planet(),
                    )),
                    _ => None,
                };
                self.shared_state
                    .set_outcome(MissionOutcome { report, discovered });
            }
            Err(e) => {
                tracing::error!("Mission failed: {}", e);
                self.shared_state.set_failure(e.to_string());
            }
        }
    }
}
