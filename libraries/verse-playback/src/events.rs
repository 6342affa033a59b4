//! Player events
//!
//! The controller queues events as it mutates state; hosts drain them after
//! each call to refresh their UI. Events are emitted at key points:
//! - Play/pause changes (including reverted play attempts)
//! - Track changes (manual navigation or end of track)
//! - Active caption changes
//! - Volume, mute and navigation mode changes

use serde::{Deserialize, Serialize};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playing flag changed
    StateChanged {
        /// Whether playback is now requested
        is_playing: bool,
    },

    /// Current track changed
    TrackChanged {
        /// Index of the new track in the playlist
        index: usize,
        /// ID of the new track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Active caption changed
    CaptionChanged {
        /// Sequence number of the caption that stopped being active
        previous: Option<u32>,
        /// Sequence number of the newly active caption
        current: Option<u32>,
    },

    /// Volume or mute state changed
    VolumeChanged {
        /// Stored volume (0.0-1.0)
        volume: f64,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Random or loop mode changed
    ModeChanged {
        /// Random mode flag
        random: bool,
        /// Loop mode flag
        looping: bool,
    },

    /// Playhead was relocated by a user action
    Seeked {
        /// New position in seconds
        position_seconds: f64,
    },

    /// Non-fatal, user-visible message (e.g. blocked autoplay)
    Notice {
        /// Message text
        message: String,
    },

    /// The user asked to leave the player
    ExitRequested,

    /// Session torn down; playlist and captions are empty
    SessionEnded,
}
