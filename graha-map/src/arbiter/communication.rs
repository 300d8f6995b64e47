//! Request/reply exchange with the mothership over a [`Link`].

use std::time::Instant;

use crossbeam_channel::Receiver;

use crate::core::{Direction, Node};
use crate::error::{Error, Result};

use super::config::ArbiterConfig;
use super::link::{Link, Packet};
use super::mailbox::Mailbox;
use super::messages::{
    ClientMessage, DiscoveredPath, PathConfirmed, PathSelected, PathUnveiled, PlanetAssigned,
    TextMessage,
};
use super::{Arbiter, topics, wire};

const TARGET_REACHED_TEXT: &str = "Target reached";
const EXPLORATION_COMPLETED_TEXT: &str = "The whole planet has been discovered";

/// [`Arbiter`] backed by a real message exchange.
///
/// Required replies (assignment, path confirmation) are re-sent on timeout
/// and fail the mission once all attempts are used. Optional replies
/// (override, mission done) are listened for once.
pub struct Communication<L: Link> {
    link: L,
    mailbox: Mailbox,
    config: ArbiterConfig,
    planet_name: Option<String>,
}

impl<L: Link> Communication<L> {
    /// Create a new exchange publishing on `link` and receiving on `inbound`.
    pub fn new(link: L, inbound: Receiver<Packet>, config: ArbiterConfig) -> Self {
        Self {
            link,
            mailbox: Mailbox::new(inbound),
            config,
            planet_name: None,
        }
    }

    /// Assigned planet name, once known.
    pub fn planet_name(&self) -> Option<&str> {
        self.planet_name.as_deref()
    }

    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    fn explorer_topic(&self) -> String {
        topics::explorer(&self.config.group_id)
    }

    fn planet_topic(&self) -> Result<String> {
        let name = self
            .planet_name
            .as_deref()
            .ok_or_else(|| Error::Link("no planet assigned yet".to_string()))?;
        Ok(topics::planet(name, &self.config.group_id))
    }

    fn send(&mut self, topic: &str, message: &ClientMessage) -> Result<()> {
        log::trace!("Sending '{}' on {}", message.name(), topic);
        let payload = wire::encode_client(message)?;
        self.link.publish(topic, payload)
    }

    /// Send `message` until `ready` holds, up to the configured attempts.
    fn request<F>(&mut self, topic: &str, message: &ClientMessage, ready: F) -> Result<()>
    where
        F: Fn(&Mailbox) -> bool,
    {
        let attempts = self.config.attempts();
        for attempt in 1..=attempts {
            self.send(topic, message)?;

            let deadline = Instant::now() + self.config.reply_timeout();
            if self.mailbox.wait_for(deadline, &ready)? {
                return Ok(());
            }
            log::warn!(
                "No reply to '{}' (attempt {}/{})",
                message.name(),
                attempt,
                attempts
            );
        }

        Err(Error::ArbiterTimeout {
            request: message.name(),
            attempts,
        })
    }

    /// Send a completion signal and listen for `done`.
    fn signal(&mut self, message: ClientMessage) -> Result<Option<String>> {
        let topic = self.explorer_topic();
        self.send(&topic, &message)?;

        let deadline = Instant::now() + self.config.optional_reply_window();
        self.mailbox.wait_for(deadline, Mailbox::has_done)?;
        Ok(self.mailbox.take_done())
    }
}

impl<L: Link> Arbiter for Communication<L> {
    fn announce_ready(&mut self) -> Result<PlanetAssigned> {
        let topic = self.explorer_topic();
        self.request(&topic, &ClientMessage::Ready, Mailbox::has_planet)?;

        let assigned = self.mailbox.take_planet().ok_or(Error::ArbiterTimeout {
            request: "ready",
            attempts: self.config.attempts(),
        })?;

        // The first assignment names the planet for the rest of the mission
        if self.planet_name.is_none() {
            log::info!("Assigned planet '{}'", assigned.planet_name);
            self.planet_name = Some(assigned.planet_name.clone());
        }
        Ok(assigned)
    }

    fn report_path(&mut self, path: DiscoveredPath) -> Result<PathConfirmed> {
        let topic = self.planet_topic()?;
        let start = path.start();
        self.request(&topic, &ClientMessage::Path(path), |mailbox| {
            mailbox.has_path(start)
        })?;

        self.mailbox.take_path(start).ok_or(Error::ArbiterTimeout {
            request: "path",
            attempts: self.config.attempts(),
        })
    }

    fn report_blocked(&mut self, path: DiscoveredPath) -> Result<()> {
        let topic = self.planet_topic()?;
        self.send(&topic, &ClientMessage::Path(path))
    }

    fn select_path(&mut self, selected: PathSelected) -> Result<Option<Direction>> {
        let topic = self.planet_topic()?;
        self.mailbox.take_path_select();
        self.send(&topic, &ClientMessage::PathSelect(selected))?;

        let deadline = Instant::now() + self.config.optional_reply_window();
        self.mailbox.wait_for(deadline, Mailbox::has_path_select)?;
        Ok(self.mailbox.take_path_select())
    }

    fn target_reached(&mut self) -> Result<Option<String>> {
        self.signal(ClientMessage::TargetReached(TextMessage::new(
            TARGET_REACHED_TEXT,
        )))
    }

    fn exploration_completed(&mut self) -> Result<Option<String>> {
        self.signal(ClientMessage::ExplorationCompleted(TextMessage::new(
            EXPLORATION_COMPLETED_TEXT,
        )))
    }

    fn take_target(&mut self) -> Option<Node> {
        self.mailbox.pump();
        self.mailbox.take_target()
    }

    fn take_unveiled(&mut self) -> Vec<PathUnveiled> {
        self.mailbox.pump();
        self.mailbox.take_unveiled()
    }

    fn take_done(&mut self) -> Option<String> {
        self.mailbox.pump();
        self.mailbox.take_done()
    }

    fn discard_stale(&mut self) {
        self.mailbox.pump();
        self.mailbox.discard_stale();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::ChannelLink;
    use crate::arbiter::messages::{PathSelectOverride, PathStatus, ServerMessage, TargetSet};
    use crossbeam_channel::{Sender, unbounded};

    struct Harness {
        comm: Communication<ChannelLink>,
        outbound: Receiver<Packet>,
        inbound: Sender<Packet>,
    }

    fn harness(config: ArbiterConfig) -> Harness {
        let (out_tx, outbound) = unbounded();
        let (inbound, in_rx) = unbounded();
        Harness {
            comm: Communication::new(ChannelLink::new(out_tx), in_rx, config),
            outbound,
            inbound,
        }
    }

    fn fast() -> ArbiterConfig {
        ArbiterConfig::new()
            .with_group_id("113")
            .with_reply_timeout_ms(10)
            .with_max_retries(2)
            .with_optional_reply_window_ms(0)
    }

    fn push(tx: &Sender<Packet>, message: ServerMessage) {
        let payload = wire::encode_server(&message).unwrap();
        tx.send(Packet::new("planet/Hawkeye/113", payload)).unwrap();
    }

    fn assignment() -> ServerMessage {
        ServerMessage::Planet(PlanetAssigned {
            planet_name: "Hawkeye".to_string(),
            start_x: 0,
            start_y: 0,
            start_orientation: Direction::North,
        })
    }

    #[test]
    fn test_ready_uses_explorer_topic() {
        let mut h = harness(fast());
        push(&h.inbound, assignment());

        let assigned = h.comm.announce_ready().unwrap();
        assert_eq!(assigned.start(), Node::new(0, 0));
        assert_eq!(h.comm.planet_name(), Some("Hawkeye"));

        let sent = h.outbound.try_recv().unwrap();
        assert_eq!(sent.topic, "explorer/113");
        assert_eq!(
            wire::decode_client(&sent.payload).unwrap(),
            ClientMessage::Ready
        );
    }

    #[test]
    fn test_required_reply_times_out_after_retries() {
        let mut h = harness(fast());
        let result = h.comm.announce_ready();

        assert!(matches!(
            result,
            Err(Error::ArbiterTimeout {
                request: "ready",
                attempts: 3
            })
        ));
        assert_eq!(h.outbound.try_iter().count(), 3);
    }

    #[test]
    fn test_path_report_needs_planet() {
        let mut h = harness(fast());
        let path = DiscoveredPath::new(
            Node::new(0, 0).towards(Direction::North),
            Node::new(0, 1).towards(Direction::South),
            PathStatus::Free,
        );
        assert!(matches!(h.comm.report_path(path), Err(Error::Link(_))));
    }

    #[test]
    fn test_path_confirmation_on_planet_topic() {
        let mut h = harness(fast());
        push(&h.inbound, assignment());
        h.comm.announce_ready().unwrap();

        let start = Node::new(0, 0).towards(Direction::North);
        let truth = PathConfirmed::new(
            start,
            Node::new(0, 2).towards(Direction::South),
            PathStatus::Free,
            2,
        );
        push(&h.inbound, ServerMessage::Path(truth.clone()));

        let reported = DiscoveredPath::new(
            start,
            Node::new(0, 1).towards(Direction::South),
            PathStatus::Free,
        );
        assert_eq!(h.comm.report_path(reported).unwrap(), truth);

        let topics: Vec<String> = h.outbound.try_iter().map(|p| p.topic).collect();
        assert_eq!(topics, vec!["explorer/113", "planet/Hawkeye/113"]);
    }

    #[test]
    fn test_select_path_without_override() {
        let mut h = harness(fast());
        push(&h.inbound, assignment());
        h.comm.announce_ready().unwrap();

        let selected = PathSelected::new(Node::new(0, 0).towards(Direction::East));
        assert_eq!(h.comm.select_path(selected).unwrap(), None);
    }

    #[test]
    fn test_select_path_override() {
        let mut h = harness(fast());
        push(&h.inbound, assignment());
        h.comm.announce_ready().unwrap();
        push(
            &h.inbound,
            ServerMessage::PathSelect(PathSelectOverride {
                start_direction: Direction::West,
            }),
        );

        let selected = PathSelected::new(Node::new(0, 0).towards(Direction::East));
        assert_eq!(h.comm.select_path(selected).unwrap(), Some(Direction::West));
    }

    #[test]
    fn test_notifications_are_read_once() {
        let mut h = harness(fast());
        push(
            &h.inbound,
            ServerMessage::Target(TargetSet {
                target_x: 3,
                target_y: 3,
            }),
        );

        assert_eq!(h.comm.take_target(), Some(Node::new(3, 3)));
        assert_eq!(h.comm.take_target(), None);
    }

    #[test]
    fn test_signal_collects_done() {
        let mut h = harness(fast());
        push(&h.inbound, ServerMessage::Done(TextMessage::new("Planet done")));

        assert_eq!(
            h.comm.exploration_completed().unwrap().as_deref(),
            Some("Planet done")
        );
        let sent = h.outbound.try_recv().unwrap();
        assert_eq!(sent.topic, "explorer/113");
    }
}
