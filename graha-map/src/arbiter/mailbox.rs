//! Single-consumer slots for inbound mothership messages.
//!
//! Every inbound message type has its own slot. A newer message of the same
//! type replaces the older one, except unveiled paths which accumulate in
//! arrival order and path confirmations which are kept until matched to the
//! report they answer. Every `take_*` empties what it returns.

use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

use crate::core::{Direction, Endpoint, Node};
use crate::error::{Error, Result};

use super::link::Packet;
use super::messages::{DebugMessage, PathConfirmed, PathUnveiled, PlanetAssigned, ServerMessage};
use super::wire::{self, Inbound};

/// Inbound message slots fed from a packet channel.
pub struct Mailbox {
    rx: Receiver<Packet>,
    closed: bool,
    planet: Option<PlanetAssigned>,
    paths: Vec<PathConfirmed>,
    path_select: Option<Direction>,
    unveiled: Vec<PathUnveiled>,
    target: Option<Node>,
    done: Option<String>,
}

impl Mailbox {
    pub fn new(rx: Receiver<Packet>) -> Self {
        Self {
            rx,
            closed: false,
            planet: None,
            paths: Vec::new(),
            path_select: None,
            unveiled: Vec::new(),
            target: None,
            done: None,
        }
    }

    /// File every packet that is already waiting. Returns how many were read.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.rx.try_recv() {
                Ok(packet) => {
                    self.file(packet);
                    count += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        count
    }

    /// Block until `ready` holds or `deadline` passes.
    ///
    /// Returns whether `ready` held. Fails with [`Error::LinkClosed`] when the
    /// channel is gone and nothing satisfying `ready` is left.
    pub fn wait_for<F>(&mut self, deadline: Instant, ready: F) -> Result<bool>
    where
        F: Fn(&Mailbox) -> bool,
    {
        loop {
            self.pump();
            if ready(self) {
                return Ok(true);
            }
            if self.closed {
                return Err(Error::LinkClosed);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(false);
            }

            match self.rx.recv_timeout(remaining) {
                Ok(packet) => self.file(packet),
                Err(RecvTimeoutError::Timeout) => return Ok(ready(self)),
                Err(RecvTimeoutError::Disconnected) => self.closed = true,
            }
        }
    }

    fn file(&mut self, packet: Packet) {
        let inbound = match wire::decode_inbound(&packet.payload) {
            Ok(inbound) => inbound,
            Err(e) => {
                log::warn!("Discarding message on {}: {}", packet.topic, e);
                return;
            }
        };

        match inbound {
            Inbound::Echo => {}
            Inbound::Debug(DebugMessage::Notice(notice)) => {
                log::debug!("Mothership notice: {}", notice.message);
            }
            Inbound::Debug(DebugMessage::Syntax(report)) => {
                log::warn!(
                    "Mothership syntax check: {} {:?}",
                    report.message,
                    report.errors
                );
            }
            Inbound::Debug(DebugMessage::Error(error)) => {
                log::warn!("Mothership error: {}", error.message);
            }
            Inbound::Server(message) => {
                log::trace!("Received '{}' on {}", message.name(), packet.topic);
                match message {
                    ServerMessage::Planet(assigned) => self.planet = Some(assigned),
                    ServerMessage::Path(path) => self.paths.push(path),
                    ServerMessage::PathSelect(forced) => {
                        self.path_select = Some(forced.start_direction)
                    }
                    ServerMessage::PathUnveiled(path) => self.unveiled.push(path),
                    ServerMessage::Target(target) => self.target = Some(target.node()),
                    ServerMessage::Done(done) => self.done = Some(done.message),
                }
            }
        }
    }

    pub fn has_planet(&self) -> bool {
        self.planet.is_some()
    }

    pub fn take_planet(&mut self) -> Option<PlanetAssigned> {
        self.planet.take()
    }

    /// Whether a confirmation for a path leaving `start` is waiting.
    pub fn has_path(&self, start: Endpoint) -> bool {
        self.paths.iter().any(|path| path.start() == start)
    }

    /// Take the confirmation for a path leaving `start`.
    ///
    /// Confirmations received before it answer older reports and are dropped.
    pub fn take_path(&mut self, start: Endpoint) -> Option<PathConfirmed> {
        let index = self.paths.iter().position(|path| path.start() == start)?;
        let mut answered: Vec<PathConfirmed> = self.paths.drain(..=index).collect();
        if answered.len() > 1 {
            log::debug!("Dropped {} unmatched path confirmations", answered.len() - 1);
        }
        answered.pop()
    }

    pub fn has_path_select(&self) -> bool {
        self.path_select.is_some()
    }

    pub fn take_path_select(&mut self) -> Option<Direction> {
        self.path_select.take()
    }

    /// All unveiled paths received so far, in arrival order.
    pub fn take_unveiled(&mut self) -> Vec<PathUnveiled> {
        std::mem::take(&mut self.unveiled)
    }

    pub fn take_target(&mut self) -> Option<Node> {
        self.target.take()
    }

    pub fn has_done(&self) -> bool {
        self.done.is_some()
    }

    pub fn take_done(&mut self) -> Option<String> {
        self.done.take()
    }

    /// Drop replies that belong to a finished exchange.
    pub fn discard_stale(&mut self) {
        self.paths.clear();
        self.path_select = None;
    }

    /// Whether the sending side has gone away.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
