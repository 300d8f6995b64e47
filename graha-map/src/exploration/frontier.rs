//! Depth-first exploration frontier.
//!
//! Holds the (node, direction) candidates that still need driving. Newly
//! discovered candidates go to the front of the queue, which gives the
//! exploration its depth-first character; reaching a candidate that does not
//! start at the current node is done by backtracking along a shortest route.

use std::collections::{HashSet, VecDeque};

use crate::core::{Endpoint, Node, Route};
use crate::planet::Planet;

/// Saved queue contents, see [`Frontier::snapshot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontierSnapshot {
    queue: VecDeque<Endpoint>,
}

impl FrontierSnapshot {
    /// Number of saved candidates.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the saved queue was empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Queue of unexplored candidates, most recent first.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Endpoint>,
    /// Candidate consumed by the last successful [`Frontier::next_step`].
    popped: Option<Endpoint>,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `entries` to the front, keeping their given order.
    ///
    /// An entry that is already queued is moved rather than duplicated.
    pub fn prepend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = Endpoint>,
    {
        let mut fresh: Vec<Endpoint> = Vec::new();
        for entry in entries {
            if !fresh.contains(&entry) {
                fresh.push(entry);
            }
        }

        self.queue.retain(|queued| !fresh.contains(queued));
        for entry in fresh.into_iter().rev() {
            self.queue.push_front(entry);
        }
    }

    /// Drop every candidate that is no longer worth driving.
    ///
    /// A candidate is dropped when its path is known blocked, or leads to a
    /// visited node, or leads to a node whose four exits are all known.
    /// Candidates with an unknown path are always kept.
    pub fn retain_interesting(&mut self, planet: &Planet, visited: &HashSet<Node>) {
        let before = self.queue.len();
        self.queue
            .retain(|entry| is_interesting(planet, visited, *entry));

        let dropped = before - self.queue.len();
        if dropped > 0 {
            log::trace!("Frontier: dropped {} candidates, {} left", dropped, self.queue.len());
        }
    }

    /// Next discovery route from `current`.
    ///
    /// A candidate leaving `current` is taken directly. Otherwise the first
    /// queued candidate whose start node is reachable is taken, with the
    /// backtracking route in front of it. Returns `None` when no candidate can
    /// be reached, which may happen with a non-empty queue.
    pub fn next_step(&mut self, planet: &Planet, current: Node) -> Option<Route> {
        if let Some(index) = self.queue.iter().position(|entry| entry.node == current) {
            let entry = self.queue.remove(index)?;
            self.popped = Some(entry);
            return Some(vec![entry]);
        }

        let (index, mut route) = self
            .queue
            .iter()
            .enumerate()
            .find_map(|(index, entry)| {
                planet
                    .shortest_path(current, entry.node)
                    .map(|route| (index, route))
            })?;

        let entry = self.queue.remove(index)?;
        log::debug!(
            "Frontier: backtracking {} steps from {} to reach {}",
            route.len(),
            current,
            entry
        );
        self.popped = Some(entry);
        route.push(entry);
        Some(route)
    }

    /// Copy of the current queue.
    pub fn snapshot(&self) -> FrontierSnapshot {
        FrontierSnapshot {
            queue: self.queue.clone(),
        }
    }

    /// Roll the queue back to `snapshot`.
    ///
    /// The last consumed candidate is forgotten, it is back in the queue.
    pub fn restore(&mut self, snapshot: FrontierSnapshot) {
        self.queue = snapshot.queue;
        self.popped = None;
    }

    /// Put the last consumed candidate back at the front, once.
    pub fn reinstate_popped(&mut self) {
        if let Some(entry) = self.popped.take() {
            self.prepend([entry]);
        }
    }

    /// Remove `entry` from the queue. Returns whether it was queued.
    pub fn remove(&mut self, entry: Endpoint) -> bool {
        let before = self.queue.len();
        self.queue.retain(|queued| *queued != entry);
        self.queue.len() != before
    }

    /// Whether `entry` is queued.
    pub fn contains(&self, entry: Endpoint) -> bool {
        self.queue.contains(&entry)
    }

    /// Last consumed candidate, if any.
    pub fn popped(&self) -> Option<Endpoint> {
        self.popped
    }

    /// Number of queued candidates.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued candidates, front first.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.queue.iter()
    }
}

fn is_interesting(planet: &Planet, visited: &HashSet<Node>, entry: Endpoint) -> bool {
    let Some(target) = planet.path(entry) else {
        return true;
    };

    !target.is_blocked() && !visited.contains(&target.node) && !planet.is_fully_known(target.node)
}
