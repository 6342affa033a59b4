//! Core types for playback management

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};

/// Track handed to the player by the catalog
///
/// The player never mutates tracks. Only `id`, `audio_source` and
/// `caption_text` drive playback; the remaining fields are carried through
/// for hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identity
    pub id: String,

    /// Locator the audio sink loads (URL or path)
    #[serde(alias = "audio_url")]
    pub audio_source: String,

    /// Raw SRT lyric text, if the track has lyrics
    #[serde(default, alias = "lyrics_content")]
    pub caption_text: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Duration known to the catalog, in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Track {
    /// Create a track without lyrics or display metadata
    pub fn new(id: impl Into<String>, audio_source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            audio_source: audio_source.into(),
            caption_text: None,
            title: None,
            duration: None,
        }
    }

    /// Attach raw lyric text
    #[must_use]
    pub fn with_captions(mut self, caption_text: impl Into<String>) -> Self {
        self.caption_text = Some(caption_text.into());
        self
    }

    /// Attach a display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title for display, falling back to the id
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// Navigation mode requested by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// Play in list order
    #[default]
    #[serde(alias = "all")]
    Sequential,

    /// Pick a random different track on every advance
    Random,
}

/// Request that (re)initializes a player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackRequest {
    /// Tracks in play order
    pub tracks: Vec<Track>,

    /// Navigation mode
    #[serde(default)]
    pub mode: PlaybackMode,

    /// Index to start at (clamped into range)
    #[serde(default, alias = "index")]
    pub start_index: usize,
}

impl PlaybackRequest {
    /// Sequential request starting at the first track
    pub fn sequential(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            mode: PlaybackMode::Sequential,
            start_index: 0,
        }
    }

    /// Random-mode request starting at the first track
    pub fn random(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            mode: PlaybackMode::Random,
            start_index: 0,
        }
    }

    /// Set the starting index
    #[must_use]
    pub fn starting_at(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Reject requests that cannot start a session
    pub fn validate(&self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(PlaybackError::InvalidRequest(
                "playlist has no tracks".to_string(),
            ));
        }
        Ok(())
    }
}

/// Transport state mirrored from the audio sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportState {
    /// Whether playback has been requested and not rejected
    pub is_playing: bool,

    /// Playback position in seconds
    pub position_seconds: f64,

    /// Media duration in seconds (0 until metadata is loaded)
    pub duration_seconds: f64,

    /// Stored volume (0.0-1.0), kept while muted
    pub volume: f64,

    /// Whether the sink is currently driven at zero volume
    pub is_muted: bool,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            is_playing: false,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            volume: 1.0,
            is_muted: false,
        }
    }
}

/// Configuration for the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub initial_volume: f64,

    /// Seconds skipped by the seek keys (default: 10)
    pub seek_step_secs: f64,

    /// Volume change per volume key press, 0.01-1.0 (default: 0.1)
    pub volume_step: f64,

    /// Position above which "previous" restarts the track (default: 3)
    pub restart_threshold_secs: f64,

    /// Captions in the lookahead window (default: 2)
    pub lookahead_count: usize,

    /// Start playing as soon as a request is loaded (default: false)
    pub autoplay: bool,

    /// Seed for random-mode selection; `None` uses the thread RNG
    pub random_seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            seek_step_secs: 10.0,
            volume_step: 0.1,
            restart_threshold_secs: 3.0,
            lookahead_count: 2,
            autoplay: false,
            random_seed: None,
        }
    }
}

impl PlayerConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "initial_volume must be within 0.0-1.0, got {}",
                self.initial_volume
            )));
        }

        if !self.seek_step_secs.is_finite() || self.seek_step_secs <= 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "seek_step_secs must be positive, got {}",
                self.seek_step_secs
            )));
        }

        // Steps snap to the 0.01 grid
        if self.volume_step.is_nan() || self.volume_step < 0.01 || self.volume_step > 1.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume_step must be within 0.01-1.0, got {}",
                self.volume_step
            )));
        }

        if !self.restart_threshold_secs.is_finite() || self.restart_threshold_secs < 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "restart_threshold_secs must be non-negative, got {}",
                self.restart_threshold_secs
            )));
        }

        Ok(())
    }
}
