//! Mission state machine states and the events that drive it.

use crate::core::{Direction, Node};

/// Why a mission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinishReason {
    /// No target route and no reachable frontier candidate left
    ExplorationCompleted,
    /// The mothership declared the mission done
    MissionDone(String),
}

/// Mission controller state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MissionState {
    /// Waiting for the first arrival and the planet assignment
    AwaitingAssignment,

    /// Driving along a chosen exit
    Navigating {
        /// Node the robot left
        from: Node,
        /// Exit taken at that node
        exit: Direction,
    },

    /// At a node, next exit not chosen yet
    Deciding {
        /// Current node
        node: Node,
    },

    /// Mission over, no further moves
    Finished(FinishReason),
}

impl MissionState {
    /// Is this a terminal state?
    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionState::Finished(_))
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            MissionState::AwaitingAssignment => "AwaitingAssignment",
            MissionState::Navigating { .. } => "Navigating",
            MissionState::Deciding { .. } => "Deciding",
            MissionState::Finished(_) => "Finished",
        }
    }
}

/// Arrival event reported by the driving side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrival {
    /// Node estimated by odometry
    pub node: Node,
    /// Heading on arrival (the entrance direction)
    pub heading: Direction,
    /// An obstacle forced the robot back to the node it left
    pub obstacle: bool,
}

impl Arrival {
    pub fn new(node: Node, heading: Direction) -> Self {
        Self {
            node,
            heading,
            obstacle: false,
        }
    }

    /// Arrival after turning back at an obstacle.
    pub fn blocked(node: Node, heading: Direction) -> Self {
        Self {
            node,
            heading,
            obstacle: true,
        }
    }
}

/// Result of processing an arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrivalOutcome {
    /// Carry on from this (possibly corrected) pose
    Continue {
        /// Authoritative current node
        node: Node,
        /// Authoritative heading
        heading: Direction,
    },
    /// The active target was reached; the current leg is over
    SegmentComplete,
}
