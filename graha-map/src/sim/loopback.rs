//! In-process link to a simulated mothership

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::arbiter::{Link, Packet};
use crate::error::{Error, Result};

use super::mothership::Mothership;

/// Link that hands every packet straight to a [`Mothership`].
///
/// Replies are queued on the inbound channel before `publish` returns.
pub struct LoopbackLink {
    mothership: Arc<Mutex<Mothership>>,
    inbound: Sender<Packet>,
    echo: bool,
}

impl LoopbackLink {
    /// Create a link and the receiver its replies arrive on.
    pub fn new(mothership: Arc<Mutex<Mothership>>) -> (Self, Receiver<Packet>) {
        let (inbound, rx) = crossbeam_channel::unbounded();
        let link = Self {
            mothership,
            inbound,
            echo: false,
        };
        (link, rx)
    }

    /// Also deliver our own packets back, like a broker does for subscribed topics.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl Link for LoopbackLink {
    fn publish(&mut self, topic: &str, payload: Vec<u8>) -> Result<()> {
        let packet = Packet::new(topic, payload);
        if self.echo {
            self.inbound
                .send(packet.clone())
                .map_err(|_| Error::LinkClosed)?;
        }

        let replies = self.mothership.lock().handle_packet(&packet)?;
        for reply in replies {
            self.inbound.send(reply).map_err(|_| Error::LinkClosed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::{ClientMessage, ServerMessage, wire};
    use crate::core::Direction;
    use crate::sim::planet_file::{EndpointEntry, PlanetFile};

    fn mothership() -> Arc<Mutex<Mothership>> {
        let file = PlanetFile {
            name: "Echo".to_string(),
            finish_on_target: true,
            start: EndpointEntry {
                x: 1,
                y: 2,
                direction: Direction::East,
            },
            paths: Vec::new(),
            targets: Vec::new(),
            unveils: Vec::new(),
            overrides: Vec::new(),
            drift: Vec::new(),
        };
        Arc::new(Mutex::new(Mothership::new(&file, "000")))
    }

    #[test]
    fn test_replies_queued_on_publish() {
        let (mut link, rx) = LoopbackLink::new(mothership());
        link.publish("explorer/000", wire::encode_client(&ClientMessage::Ready).unwrap())
            .unwrap();

        let reply = rx.try_recv().unwrap();
        assert_eq!(reply.topic, "explorer/000");
        let wire::Inbound::Server(ServerMessage::Planet(assigned)) =
            wire::decode_inbound(&reply.payload).unwrap()
        else {
            panic!("expected a planet assignment");
        };
        assert_eq!(assigned.planet_name, "Echo");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_echo_comes_first() {
        let (link, rx) = LoopbackLink::new(mothership());
        let mut link = link.with_echo(true);
        link.publish("explorer/000", wire::encode_client(&ClientMessage::Ready).unwrap())
            .unwrap();

        let echo = rx.try_recv().unwrap();
        assert!(matches!(
            wire::decode_inbound(&echo.payload).unwrap(),
            wire::Inbound::Echo
        ));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_garbage_is_an_error() {
        let (mut link, _rx) = LoopbackLink::new(mothership());
        assert!(link.publish("explorer/000", b"not json".to_vec()).is_err());
    }
}
