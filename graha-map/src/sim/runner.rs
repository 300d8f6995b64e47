//! Drive a mission controller with a simulated rover.

use crate::arbiter::Arbiter;
use crate::error::Result;
use crate::exploration::{ArrivalOutcome, FinishReason, MissionController, MissionState};

use super::rover::Rover;

/// Summary of a simulated run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissionReport {
    /// Drives performed
    pub steps: usize,
    /// Targets reached
    pub segments: usize,
    /// Why the mission ended, `None` when it was cut short
    pub finish: Option<FinishReason>,
    /// The step limit ended the run
    pub step_limit_hit: bool,
    /// The stop callback ended the run
    pub stopped: bool,
}

/// Run until the mission finishes or `max_steps` drives were made.
pub fn run_mission<A: Arbiter>(
    controller: &mut MissionController<A>,
    rover: &mut Rover,
    max_steps: usize,
) -> Result<MissionReport> {
    run_mission_until(controller, rover, max_steps, || false)
}

/// Like [`run_mission`], also ending as soon as `stop` returns true.
pub fn run_mission_until<A, F>(
    controller: &mut MissionController<A>,
    rover: &mut Rover,
    max_steps: usize,
    mut stop: F,
) -> Result<MissionReport>
where
    A: Arbiter,
    F: FnMut() -> bool,
{
    let mut report = MissionReport::default();
    let mut arrival = rover.start_arrival();

    loop {
        if stop() {
            log::info!("Mission stopped after {} steps", report.steps);
            report.stopped = true;
            break;
        }

        match controller.on_arrival(arrival)? {
            ArrivalOutcome::Continue { node, heading } => rover.relocalize(node, heading),
            ArrivalOutcome::SegmentComplete => {
                report.segments += 1;
                if let Some(node) = controller.current_node() {
                    rover.relocalize(node, controller.heading());
                }
            }
        }
        if controller.is_finished() {
            break;
        }

        let scanned = (!controller.already_known()).then(|| rover.scan());
        let Some(direction) = controller.decide_next(scanned.as_deref())? else {
            break;
        };

        if report.steps >= max_steps {
            log::warn!("Step limit of {} reached", max_steps);
            report.step_limit_hit = true;
            break;
        }
        arrival = rover.drive(direction);
        report.steps += 1;
    }

    if let MissionState::Finished(reason) = controller.state() {
        report.finish = Some(reason.clone());
    }
    Ok(report)
}
