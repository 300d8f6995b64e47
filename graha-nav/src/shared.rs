//! Shared state for multi-threaded architecture.
//!
//! Provides thread-safe shared state between:
//! - Mothership thread (simulated arbiter answering client packets)
//! - Mission thread (rover and mission controller)
//! - Main thread (monitoring, shutdown and output)

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use graha_map::sim::{MissionReport, PlanetFile};
use parking_lot::Mutex;

/// Result of a finished mission thread.
#[derive(Clone, Debug)]
pub struct MissionOutcome {
    pub report: MissionReport,
    /// Discovered map, `None` when no planet was ever assigned
    pub discovered: Option<PlanetFile>,
}

/// Shared state between all threads.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Shutdown signal for graceful termination
    shutdown: AtomicBool,

    /// Mission thread has finished (successfully or not)
    mission_finished: AtomicBool,

    /// Client messages handled by the mothership (for status reporting)
    messages_handled: AtomicU32,

    outcome: Mutex<Option<MissionOutcome>>,

    failure: Mutex<Option<String>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal shutdown.
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Check if shutdown is signaled.
    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Store the outcome and mark the mission finished.
    pub fn set_outcome(&self, outcome: MissionOutcome) {
        *self.outcome.lock() = Some(outcome);
        self.mission_finished.store(true, Ordering::Release);
    }

    /// Store a failure and mark the mission finished.
    pub fn set_failure(&self, reason: String) {
        *self.failure.lock() = Some(reason);
        self.mission_finished.store(true, Ordering::Release);
    }

    pub fn is_mission_finished(&self) -> bool {
        self.mission_finished.load(Ordering::Acquire)
    }

    /// Take the mission outcome, if one was stored.
    pub fn take_outcome(&self) -> Option<MissionOutcome> {
        self.outcome.lock().take()
    }

    pub fn failure(&self) -> Option<String> {
        self.failure.lock().clone()
    }

    pub fn increment_messages(&self) {
        self.messages_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn messages_handled(&self) -> u32 {
        self.messages_handled.load(Ordering::Relaxed)
    }
}
