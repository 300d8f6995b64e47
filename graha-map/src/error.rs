//! Error types for Graha-Map

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Graha-Map error types
///
/// Missing edges and unreachable targets are not errors; they surface as
/// `Option`s from the map and the planner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Degree value outside `{0, 90, 180, 270}`
    #[error("Invalid direction: {0}")]
    InvalidDirection(i32),

    /// A required arbiter reply never arrived
    #[error("No reply to '{request}' after {attempts} attempts")]
    ArbiterTimeout {
        /// Message type that went unanswered
        request: &'static str,
        /// Number of sends made
        attempts: u32,
    },

    /// Inbound channel disconnected
    #[error("Arbiter link closed")]
    LinkClosed,

    /// Transport failure
    #[error("Link error: {0}")]
    Link(String),

    /// Malformed planet description
    #[error("Planet file error: {0}")]
    PlanetFile(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
