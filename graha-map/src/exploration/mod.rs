//! Autonomous planet exploration.
//!
//! Provides depth-first exploration with target routing on top of the
//! [`Planet`](crate::planet::Planet) map. The module is transport-agnostic:
//! the mothership is reached through the [`Arbiter`](crate::arbiter::Arbiter)
//! trait, and the caller handles driving, scanning and odometry.
//!
//! # Decision Cycle
//!
//! 1. [`MissionController::on_arrival`] reports the driven path and adopts
//!    the confirmed position
//! 2. [`MissionController::already_known`] tells whether the node needs a scan
//! 3. [`MissionController::decide_next`] picks the next exit, or `None` at the end
//!
//! # Example
//!
//! ```rust,ignore
//! use graha_map::exploration::{Arrival, ArrivalOutcome, MissionController};
//!
//! let mut controller = MissionController::new(arbiter);
//! let outcome = controller.on_arrival(Arrival::new(odometry_node, heading))?;
//! if let ArrivalOutcome::Continue { node, heading } = outcome {
//!     odometry.reset(node, heading);
//! }
//! let scanned = (!controller.already_known()).then(|| scan_node());
//! if let Some(direction) = controller.decide_next(scanned.as_deref())? {
//!     drive(direction);
//! }
//! ```

mod controller;
mod frontier;
mod state;

pub use controller::MissionController;
pub use frontier::{Frontier, FrontierSnapshot};
pub use state::{Arrival, ArrivalOutcome, FinishReason, MissionState};
