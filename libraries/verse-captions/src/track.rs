//! Per-track caption timeline with change detection

use crate::index::{self, CaptionContext};
use crate::srt;
use crate::types::{Caption, CaptionState};
use serde::{Deserialize, Serialize};

/// Active caption transition reported by [`CaptionTrack::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionChange {
    /// Sequence number of the previously active caption
    pub previous: Option<u32>,

    /// Sequence number of the newly active caption
    pub current: Option<u32>,
}

/// The caption timeline of the track that is currently bound
///
/// The timeline is replaced wholesale on every track change. The active
/// caption is recomputed on every [`update`](Self::update); a change is only
/// reported when the active caption's identity differs from the last
/// resolution, so repeated ticks inside one caption (or on a boundary that
/// resolves to the same caption) produce nothing.
#[derive(Debug, Clone, Default)]
pub struct CaptionTrack {
    captions: Vec<Caption>,
    active: Option<u32>,
}

impl CaptionTrack {
    /// Create an empty track
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already parsed captions
    ///
    /// The captions must be sorted by start time and carry unique sequence
    /// numbers, as [`parse`](crate::parse) guarantees.
    pub fn from_captions(captions: Vec<Caption>) -> Self {
        Self {
            captions,
            active: None,
        }
    }

    /// Parse raw caption text
    ///
    /// `None` (a track without lyrics) gives an empty timeline.
    pub fn from_text(raw: Option<&str>) -> Self {
        Self::from_captions(raw.map(srt::parse).unwrap_or_default())
    }

    /// Replace the timeline and forget the last resolution
    pub fn replace(&mut self, captions: Vec<Caption>) {
        self.captions = captions;
        self.active = None;
    }

    /// Drop all captions
    pub fn clear(&mut self) {
        self.captions.clear();
        self.active = None;
    }

    /// Recompute the active caption for `time`
    ///
    /// Returns `Some` only when the active caption changed.
    pub fn update(&mut self, time: f64) -> Option<CaptionChange> {
        let resolved = index::active_caption(&self.captions, time).map(|c| c.sequence);

        if resolved == self.active {
            return None;
        }

        let change = CaptionChange {
            previous: self.active,
            current: resolved,
        };
        self.active = resolved;
        Some(change)
    }

    /// Sequence number of the caption resolved by the last update
    pub fn active_sequence(&self) -> Option<u32> {
        self.active
    }

    /// Caption resolved by the last update
    pub fn active(&self) -> Option<&Caption> {
        self.active
            .and_then(|seq| index::find_by_sequence(&self.captions, seq))
    }

    /// All captions in start order
    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    /// Number of captions
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Whether the track has no captions
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Look up a caption by sequence number
    pub fn find(&self, sequence: u32) -> Option<&Caption> {
        index::find_by_sequence(&self.captions, sequence)
    }

    /// Lookahead window after `time`
    pub fn upcoming(&self, time: f64, count: usize) -> Vec<&Caption> {
        index::upcoming_window(&self.captions, time, count)
    }

    /// Neighbourhood of `time`
    pub fn context(&self, time: f64, count: usize) -> CaptionContext<'_> {
        index::caption_context(&self.captions, time, count)
    }

    /// Classify every caption at `time`
    pub fn classify_all(&self, time: f64) -> Vec<(&Caption, CaptionState)> {
        let active = index::active_caption(&self.captions, time);
        self.captions
            .iter()
            .map(|c| (c, index::classify(c, time, active)))
            .collect()
    }
}
