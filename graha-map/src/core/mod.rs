//! Core types shared by the map, the planner and the mission controller.
//!
//! - [`Node`]: integer grid coordinate
//! - [`Direction`]: one of the four exit directions, wire-encoded as degrees
//! - [`Endpoint`]: a (node, direction) pair
//! - [`PathTarget`]: far end of a known path plus its [`Weight`]

mod direction;
mod node;

pub use direction::Direction;
pub use node::{BLOCKED, Endpoint, Node, PathTarget, Route, Weight};
