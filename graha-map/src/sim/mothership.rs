//! Simulated mothership.
//!
//! Knows the true planet and answers client messages the way the real
//! mothership does: the assignment after `ready`, the truth after every path
//! report, and `done` after completion signals. Scripted targets, unveiled
//! paths and overrides are released as the message count grows.

use crate::arbiter::messages::{
    ClientMessage, DiscoveredPath, PathConfirmed, PathSelectOverride, PathStatus, PlanetAssigned,
    ServerMessage, TargetSet, TextMessage,
};
use crate::arbiter::{Packet, topics, wire};
use crate::core::{BLOCKED, Endpoint};
use crate::error::Result;
use crate::planet::Planet;

use super::planet_file::{PlanetFile, ScriptedOverride, ScriptedTarget, ScriptedUnveil};

/// Simulated arbiter.
pub struct Mothership {
    name: String,
    group_id: String,
    start: Endpoint,
    truth: Planet,
    finish_on_target: bool,
    targets: Vec<ScriptedTarget>,
    unveils: Vec<ScriptedUnveil>,
    overrides: Vec<ScriptedOverride>,
    received: Vec<ClientMessage>,
    done: bool,
}

impl Mothership {
    /// Create a mothership for `file`, serving group `group_id`.
    pub fn new(file: &PlanetFile, group_id: impl Into<String>) -> Self {
        Self {
            name: file.name.clone(),
            group_id: group_id.into(),
            start: file.start_endpoint(),
            truth: file.planet(),
            finish_on_target: file.finish_on_target,
            targets: file.targets.clone(),
            unveils: file.unveils.clone(),
            overrides: file.overrides.clone(),
            received: Vec::new(),
            done: false,
        }
    }

    /// Planet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The true planet.
    pub fn truth(&self) -> &Planet {
        &self.truth
    }

    /// Every client message received so far.
    pub fn received(&self) -> &[ClientMessage] {
        &self.received
    }

    /// Whether `done` has been sent.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Decode one client packet and encode the replies.
    pub fn handle_packet(&mut self, packet: &Packet) -> Result<Vec<Packet>> {
        let message = wire::decode_client(&packet.payload)?;
        self.handle(&packet.topic, &message)
            .into_iter()
            .map(|(topic, reply)| Ok(Packet::new(topic, wire::encode_server(&reply)?)))
            .collect()
    }

    /// Answer one client message. Returns `(topic, message)` pairs to send.
    pub fn handle(&mut self, topic: &str, message: &ClientMessage) -> Vec<(String, ServerMessage)> {
        self.received.push(message.clone());
        let count = self.received.len();
        let explorer_topic = topics::explorer(&self.group_id);
        let planet_topic = topics::planet(&self.name, &self.group_id);

        let expected = match message {
            ClientMessage::Ready
            | ClientMessage::TargetReached(_)
            | ClientMessage::ExplorationCompleted(_) => &explorer_topic,
            ClientMessage::Path(_) | ClientMessage::PathSelect(_) => &planet_topic,
        };
        if topic != expected {
            log::warn!(
                "Mothership: '{}' on {} ignored, expected {}",
                message.name(),
                topic,
                expected
            );
            return Vec::new();
        }

        let mut replies = Vec::new();
        match message {
            ClientMessage::Ready => {
                replies.push((
                    explorer_topic.clone(),
                    ServerMessage::Planet(PlanetAssigned {
                        planet_name: self.name.clone(),
                        start_x: self.start.node.x,
                        start_y: self.start.node.y,
                        start_orientation: self.start.direction,
                    }),
                ));
            }
            ClientMessage::Path(report) => {
                if let Some(confirmed) = self.confirm(report) {
                    replies.push((planet_topic.clone(), ServerMessage::Path(confirmed)));
                }
            }
            ClientMessage::PathSelect(selected) => {
                if let Some(index) = self.overrides.iter().position(|o| o.after <= count) {
                    let forced = self.overrides.remove(index);
                    if forced.direction != selected.start_direction {
                        replies.push((
                            planet_topic.clone(),
                            ServerMessage::PathSelect(PathSelectOverride {
                                start_direction: forced.direction,
                            }),
                        ));
                    }
                }
            }
            ClientMessage::TargetReached(_) => {
                if self.finish_on_target {
                    self.done = true;
                    replies.push((
                        explorer_topic.clone(),
                        ServerMessage::Done(TextMessage::new("Target reached, mission done")),
                    ));
                }
            }
            ClientMessage::ExplorationCompleted(_) => {
                self.done = true;
                replies.push((
                    explorer_topic.clone(),
                    ServerMessage::Done(TextMessage::new("Planet explored, mission done")),
                ));
            }
        }

        if !self.done {
            self.release_scripted(count, &planet_topic, &mut replies);
        }
        replies
    }

    /// The truth about a reported path.
    fn confirm(&self, report: &DiscoveredPath) -> Option<PathConfirmed> {
        let start = report.start();
        if report.path_status == PathStatus::Blocked {
            return Some(PathConfirmed::new(
                start,
                report.end(),
                PathStatus::Blocked,
                BLOCKED,
            ));
        }

        match self.truth.path(start) {
            Some(target) => {
                let status = if target.is_blocked() {
                    PathStatus::Blocked
                } else {
                    PathStatus::Free
                };
                Some(PathConfirmed::new(
                    start,
                    target.endpoint(),
                    status,
                    target.weight,
                ))
            }
            None => {
                log::warn!("Mothership: no path leaves {}, report not confirmed", start);
                None
            }
        }
    }

    fn release_scripted(
        &mut self,
        count: usize,
        planet_topic: &str,
        replies: &mut Vec<(String, ServerMessage)>,
    ) {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.unveils.drain(..).partition(|unveil| unveil.after <= count);
        self.unveils = pending;
        for unveil in due {
            let status = if unveil.weight == BLOCKED {
                PathStatus::Blocked
            } else {
                PathStatus::Free
            };
            replies.push((
                planet_topic.to_string(),
                ServerMessage::PathUnveiled(PathConfirmed::new(
                    unveil.start.into(),
                    unveil.end.into(),
                    status,
                    unveil.weight,
                )),
            ));
        }

        let (due, pending): (Vec<_>, Vec<_>) =
            self.targets.drain(..).partition(|target| target.after <= count);
        self.targets = pending;
        for target in due {
            replies.push((
                planet_topic.to_string(),
                ServerMessage::Target(TargetSet {
                    target_x: target.x,
                    target_y: target.y,
                }),
            ));
        }
    }
}
