//! Core caption types

use serde::{Deserialize, Serialize};

/// One timed line of lyric text
///
/// Captions are created once per track by the parser and never mutated.
/// `sequence` is the number written in the source block; it identifies the
/// caption for highlighting and click-to-seek and is unrelated to the
/// caption's position in the sorted timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Sequence number from the source block (>= 1)
    pub sequence: u32,

    /// Start offset in seconds
    pub start: f64,

    /// End offset in seconds (always greater than `start`)
    pub end: f64,

    /// Caption text, line breaks preserved
    pub text: String,
}

impl Caption {
    /// Create a caption
    pub fn new(sequence: u32, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            sequence,
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether `time` falls inside this caption (both bounds inclusive)
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Length of the caption in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Display classification of a caption relative to the playback position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptionState {
    /// The active caption
    Current,

    /// Already finished
    Past,

    /// Starts within the lookahead horizon
    Upcoming,

    /// Everything else
    Future,
}
