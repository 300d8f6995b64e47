//! Message types exchanged with the mothership.
//!
//! This module defines the payloads of both directions:
//! - Server messages (inbound): assignment, confirmations, overrides, unveiled paths, targets
//! - Client messages (outbound): ready, discovered paths, selections, completion signals
//! - Debug messages (inbound): validator feedback, only logged
//!
//! Field names follow the mothership's camelCase JSON; directions are degrees.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Endpoint, Node, Weight};

/// Status of a reported path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStatus {
    /// Path could be driven end to end
    Free,
    /// Obstacle on the path
    Blocked,
}

/// Planet assignment, the reply to `ready`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetAssigned {
    /// Planet name, used for the planet topic
    pub planet_name: String,
    /// Start node X
    pub start_x: i32,
    /// Start node Y
    pub start_y: i32,
    /// Heading at the start node
    #[serde(alias = "startDirection")]
    pub start_orientation: Direction,
}

impl PlanetAssigned {
    /// Start node.
    pub fn start(&self) -> Node {
        Node::new(self.start_x, self.start_y)
    }
}

/// Authoritative path record.
///
/// Sent as the confirmation of a discovered path and, unsolicited, as an
/// unveiled path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathConfirmed {
    pub start_x: i32,
    pub start_y: i32,
    pub start_direction: Direction,
    pub end_x: i32,
    pub end_y: i32,
    pub end_direction: Direction,
    pub path_status: PathStatus,
    /// `-1` for blocked paths
    pub path_weight: Weight,
}

impl PathConfirmed {
    /// Create a record from both endpoints.
    pub fn new(start: Endpoint, end: Endpoint, path_status: PathStatus, path_weight: Weight) -> Self {
        Self {
            start_x: start.node.x,
            start_y: start.node.y,
            start_direction: start.direction,
            end_x: end.node.x,
            end_y: end.node.y,
            end_direction: end.direction,
            path_status,
            path_weight,
        }
    }

    /// Start endpoint.
    pub fn start(&self) -> Endpoint {
        Endpoint::new(Node::new(self.start_x, self.start_y), self.start_direction)
    }

    /// End endpoint.
    pub fn end(&self) -> Endpoint {
        Endpoint::new(Node::new(self.end_x, self.end_y), self.end_direction)
    }
}

/// Unveiled paths carry the same fields as confirmations.
pub type PathUnveiled = PathConfirmed;

/// Forced exit direction, the optional reply to `pathSelect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSelectOverride {
    pub start_direction: Direction,
}

/// New navigation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSet {
    pub target_x: i32,
    pub target_y: i32,
}

impl TargetSet {
    /// Target node.
    pub fn node(&self) -> Node {
        Node::new(self.target_x, self.target_y)
    }
}

/// Free-text payload of `done` and of the completion signals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    pub message: String,
}

impl TextMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Path report sent after each arrival. Carries no weight; the mothership assigns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredPath {
    pub start_x: i32,
    pub start_y: i32,
    pub start_direction: Direction,
    pub end_x: i32,
    pub end_y: i32,
    pub end_direction: Direction,
    pub path_status: PathStatus,
}

impl DiscoveredPath {
    /// Create a report from both endpoints.
    pub fn new(start: Endpoint, end: Endpoint, path_status: PathStatus) -> Self {
        Self {
            start_x: start.node.x,
            start_y: start.node.y,
            start_direction: start.direction,
            end_x: end.node.x,
            end_y: end.node.y,
            end_direction: end.direction,
            path_status,
        }
    }

    /// Start endpoint.
    pub fn start(&self) -> Endpoint {
        Endpoint::new(Node::new(self.start_x, self.start_y), self.start_direction)
    }

    /// End endpoint.
    pub fn end(&self) -> Endpoint {
        Endpoint::new(Node::new(self.end_x, self.end_y), self.end_direction)
    }
}

/// Chosen exit at the current node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSelected {
    pub start_x: i32,
    pub start_y: i32,
    pub start_direction: Direction,
}

impl PathSelected {
    pub fn new(start: Endpoint) -> Self {
        Self {
            start_x: start.node.x,
            start_y: start.node.y,
            start_direction: start.direction,
        }
    }

    /// Start endpoint.
    pub fn start(&self) -> Endpoint {
        Endpoint::new(Node::new(self.start_x, self.start_y), self.start_direction)
    }
}

/// Messages sent by the mothership (`"from": "server"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMessage {
    Planet(PlanetAssigned),
    Path(PathConfirmed),
    PathSelect(PathSelectOverride),
    PathUnveiled(PathUnveiled),
    Target(TargetSet),
    Done(TextMessage),
}

impl ServerMessage {
    /// Wire `type` name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ServerMessage::Planet(_) => "planet",
            ServerMessage::Path(_) => "path",
            ServerMessage::PathSelect(_) => "pathSelect",
            ServerMessage::PathUnveiled(_) => "pathUnveiled",
            ServerMessage::Target(_) => "target",
            ServerMessage::Done(_) => "done",
        }
    }
}

/// Messages sent by the robot (`"from": "client"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
    Ready,
    Path(DiscoveredPath),
    PathSelect(PathSelected),
    TargetReached(TextMessage),
    ExplorationCompleted(TextMessage),
}

impl ClientMessage {
    /// Wire `type` name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ClientMessage::Ready => "ready",
            ClientMessage::Path(_) => "path",
            ClientMessage::PathSelect(_) => "pathSelect",
            ClientMessage::TargetReached(_) => "targetReached",
            ClientMessage::ExplorationCompleted(_) => "explorationCompleted",
        }
    }
}

/// Syntax check feedback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxReport {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Messages on the debug channel (`"from": "debug"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum DebugMessage {
    Notice(TextMessage),
    Syntax(SyntaxReport),
    Error(TextMessage),
}
