//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// None of these are fatal: every operation that returns one leaves the
/// player in a consistent state (paused, previous valid index, or unchanged).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Playback request rejected before any state was touched
    #[error("Invalid playback request: {0}")]
    InvalidRequest(String),

    /// Explicit jump to a track index that does not exist
    #[error("Index {index} out of range for playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// The audio sink refused to start playback (e.g. blocked autoplay)
    #[error("Audio sink failed to start playback: {0}")]
    SinkPlayFailure(String),

    /// No caption with this sequence number on the current track
    #[error("Caption {0} not found")]
    CaptionNotFound(u32),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
