//! # Graha-Map: Planet Mapping and Exploration Library
//!
//! The decision core of a maze-exploring robot. It keeps a graph map of a
//! grid planet, explores it depth-first, routes to targets assigned by a
//! mothership and reconciles its own observations with the mothership's
//! corrections.
//!
//! ## Quick Start
//!
//! ```rust
//! use graha_map::core::{Direction, Node};
//! use graha_map::planet::Planet;
//!
//! let mut planet = Planet::new();
//! planet.add_path(
//!     Node::new(0, 0).towards(Direction::East),
//!     Node::new(1, 0).towards(Direction::West),
//!     1,
//! );
//! planet.add_path(
//!     Node::new(1, 0).towards(Direction::North),
//!     Node::new(1, 1).towards(Direction::South),
//!     2,
//! );
//!
//! let route = planet.shortest_path(Node::new(0, 0), Node::new(1, 1)).unwrap();
//! assert_eq!(route.len(), 2);
//! assert_eq!(route[0].direction, Direction::East);
//! ```
//!
//! ## Grid Frame
//!
//! - **Nodes**: integer `(x, y)` coordinates
//! - **Directions**: degrees clockwise from north (`0, 90, 180, 270`)
//! - **Heading**: direction the robot faces; on arrival, the path end is the opposite
//!
//! ## Architecture
//!
//! - [`core`]: Node, Direction, Endpoint, path weights
//! - [`planet`]: graph map and shortest-path planning
//! - [`exploration`]: frontier and mission controller
//! - [`arbiter`]: messages, wire format and the request/reply exchange
//! - `sim`: simulated mothership and rover (feature `sim`)
//!
//! ## Data Flow
//!
//! ```text
//!        ┌───────────┐  Arrival   ┌───────────────────┐  Arbiter   ┌────────────┐
//!        │   Rover   │──────────► │ MissionController │ ─────────► │ Mothership │
//!        │ (driving) │ ◄──────────│                   │ ◄───────── │            │
//!        └───────────┘  Direction └─────────┬─────────┘  replies   └────────────┘
//!                                           │
//!                           ┌───────────────┴──────────────┐
//!                           ▼                              ▼
//!                    ┌────────────┐                 ┌────────────┐
//!                    │  Frontier  │ ──────────────► │   Planet   │
//!                    │   (DFS)    │  shortest_path  │ (Dijkstra) │
//!                    └────────────┘                 └────────────┘
//! ```

pub mod arbiter;
pub mod core;
pub mod error;
pub mod exploration;
pub mod planet;
#[cfg(feature = "sim")]
pub mod sim;

pub use arbiter::{Arbiter, ArbiterConfig, Communication};
pub use crate::core::{BLOCKED, Direction, Endpoint, Node, PathTarget, Route, Weight};
pub use error::{Error, Result};
pub use exploration::{Arrival, ArrivalOutcome, FinishReason, MissionController, MissionState};
pub use planet::Planet;
