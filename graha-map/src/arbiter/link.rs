//! Transport seam between the robot and the mothership

use crossbeam_channel::Sender;

use crate::error::{Error, Result};

/// One published message: a topic and an encoded envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Packet {
    pub fn new(topic: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }
}

/// Outbound transport for encoded messages
pub trait Link: Send {
    /// Publish `payload` on `topic`
    fn publish(&mut self, topic: &str, payload: Vec<u8>) -> Result<()>;
}

/// Link that publishes packets on a crossbeam channel.
///
/// The receiving end is typically a mothership thread.
#[derive(Clone)]
pub struct ChannelLink {
    tx: Sender<Packet>,
}

impl ChannelLink {
    pub fn new(tx: Sender<Packet>) -> Self {
        Self { tx }
    }
}

impl Link for ChannelLink {
    fn publish(&mut self, topic: &str, payload: Vec<u8>) -> Result<()> {
        self.tx
            .send(Packet::new(topic, payload))
            .map_err(|_| Error::LinkClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_link_publishes() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut link = ChannelLink::new(tx);

        link.publish("explorer/113", b"{}".to_vec()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Packet::new("explorer/113", b"{}".to_vec()));
    }

    #[test]
    fn test_channel_link_closed() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut link = ChannelLink::new(tx);

        assert!(matches!(
            link.publish("explorer/113", Vec::new()),
            Err(Error::LinkClosed)
        ));
    }
}
