//! Playlist state machine
//!
//! Two states:
//!
//! ```text
//! Empty ──load(non-empty)──▶ Selected(current)
//!   ▲                            │  next / previous / jump_to / end_of_track
//!   └──────────clear─────────────┘  (current always < len)
//! ```
//!
//! Track order is the order of the playback request and is never re-sorted.
//! Random mode does not shuffle the list; it picks a random *different*
//! index on every advance.

use crate::error::{PlaybackError, Result};
use crate::random::{self, RandomSource, ThreadRandom};
use crate::types::{PlaybackMode, PlaybackRequest, Track};

/// Result of a "previous" press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousOutcome {
    /// Far enough into the track: restart it in place
    Restart,

    /// Moved to this index
    Moved(usize),
}

/// Result of the current track reaching its natural end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfTrack {
    /// Loop mode: play the same track again from the start
    Replay,

    /// Advanced to this index
    Advance(usize),
}

/// Ordered tracks, current selection, and navigation modes
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
    random_mode: bool,
    loop_mode: bool,
    restart_threshold_secs: f64,
    rng: Box<dyn RandomSource>,
}

/// Default position (seconds) above which "previous" restarts the track
pub const DEFAULT_RESTART_THRESHOLD_SECS: f64 = 3.0;

impl Playlist {
    /// Create an empty playlist using the thread RNG
    pub fn new() -> Self {
        Self::with_random_source(Box::new(ThreadRandom))
    }

    /// Create an empty playlist with an injected random source
    pub fn with_random_source(rng: Box<dyn RandomSource>) -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            random_mode: false,
            loop_mode: false,
            restart_threshold_secs: DEFAULT_RESTART_THRESHOLD_SECS,
            rng,
        }
    }

    /// Create an empty playlist seeded for reproducible random mode
    pub fn seeded(seed: Option<u64>) -> Self {
        Self::with_random_source(random::source_for_seed(seed))
    }

    /// Replace the random source
    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.rng = rng;
    }

    /// Set the "previous" restart threshold in seconds
    pub fn set_restart_threshold(&mut self, seconds: f64) {
        self.restart_threshold_secs = seconds;
    }

    /// Replace the playlist wholesale
    ///
    /// Fails with `InvalidRequest` on an empty track list, leaving the
    /// current state untouched. `start_index` is clamped to the last track
    /// and loop mode starts off.
    pub fn load(&mut self, tracks: Vec<Track>, start_index: usize, random_mode: bool) -> Result<usize> {
        if tracks.is_empty() {
            return Err(PlaybackError::InvalidRequest(
                "playlist has no tracks".to_string(),
            ));
        }

        let start = start_index.min(tracks.len() - 1);
        self.tracks = tracks;
        self.current = Some(start);
        self.random_mode = random_mode;
        self.loop_mode = false;

        Ok(start)
    }

    /// Load a playback request
    pub fn load_request(&mut self, request: PlaybackRequest) -> Result<usize> {
        let random_mode = request.mode == PlaybackMode::Random;
        self.load(request.tracks, request.start_index, random_mode)
    }

    /// Return to the empty state
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Advance to the next track
    ///
    /// Random mode with more than one track never returns the current index.
    /// Sequential mode wraps from the last track to the first.
    /// Returns `None` when the playlist is empty.
    pub fn next(&mut self) -> Option<usize> {
        let current = self.current?;
        let len = self.tracks.len();

        let next = if self.random_mode && len > 1 {
            random::pick_other(self.rng.as_mut(), len, current)
        } else {
            (current + 1) % len
        };

        self.current = Some(next);
        Some(next)
    }

    /// Go back one track, or restart the current one
    ///
    /// When `position_seconds` is past the restart threshold the index stays
    /// and the caller restarts the track; otherwise the index moves back,
    /// wrapping from the first track to the last.
    pub fn previous(&mut self, position_seconds: f64) -> Option<PreviousOutcome> {
        let current = self.current?;

        if position_seconds > self.restart_threshold_secs {
            return Some(PreviousOutcome::Restart);
        }

        let len = self.tracks.len();
        let prev = if current == 0 { len - 1 } else { current - 1 };
        self.current = Some(prev);
        Some(PreviousOutcome::Moved(prev))
    }

    /// Select a track directly
    pub fn jump_to(&mut self, index: usize) -> Result<usize> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }

        self.current = Some(index);
        Ok(index)
    }

    /// Apply the end-of-track rule
    pub fn end_of_track(&mut self) -> Option<EndOfTrack> {
        self.current?;

        if self.loop_mode {
            Some(EndOfTrack::Replay)
        } else {
            self.next().map(EndOfTrack::Advance)
        }
    }

    /// Set random mode
    pub fn set_random_mode(&mut self, enabled: bool) {
        self.random_mode = enabled;
    }

    /// Set loop mode
    pub fn set_loop_mode(&mut self, enabled: bool) {
        self.loop_mode = enabled;
    }

    /// Flip random mode, returning the new value
    pub fn toggle_random_mode(&mut self) -> bool {
        self.random_mode = !self.random_mode;
        self.random_mode
    }

    /// Flip loop mode, returning the new value
    pub fn toggle_loop_mode(&mut self) -> bool {
        self.loop_mode = !self.loop_mode;
        self.loop_mode
    }

    /// Whether random mode is on
    pub fn random_mode(&self) -> bool {
        self.random_mode
    }

    /// Whether loop mode is on
    pub fn loop_mode(&self) -> bool {
        self.loop_mode
    }

    /// Current index, `None` when empty
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Current track, `None` when empty
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Playlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playlist")
            .field("tracks", &self.tracks.len())
            .field("current", &self.current)
            .field("random_mode", &self.random_mode)
            .field("loop_mode", &self.loop_mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn create_test_tracks(count: usize) -> Vec<Track> {
        (0..count)
            .map(|i| Track::new(format!("t{}", i), format!("/music/{}.mp3", i)))
            .collect()
    }

    /// Replays a fixed list of draws
    struct Scripted(VecDeque<usize>);

    impl RandomSource for Scripted {
        fn next_index(&mut self, bound: usize) -> usize {
            self.0.pop_front().unwrap_or(0) % bound
        }
    }

    #[test]
    fn create_empty_playlist() {
        let playlist = Playlist::new();
        assert!(playlist.is_empty());
        assert_eq!(playlist.current_index(), None);
        assert!(playlist.current_track().is_none());
    }

    #[test]
    fn empty_playlist_navigation_is_noop() {
        let mut playlist = Playlist::new();
        assert_eq!(playlist.next(), None);
        assert_eq!(playlist.previous(0.0), None);
        assert_eq!(playlist.end_of_track(), None);
        assert!(matches!(
            playlist.jump_to(0),
            Err(PlaybackError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn load_rejects_empty_and_keeps_prior_state() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 1, false).unwrap();

        let result = playlist.load(Vec::new(), 0, true);
        assert!(matches!(result, Err(PlaybackError::InvalidRequest(_))));
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.current_index(), Some(1));
        assert!(!playlist.random_mode());
    }

    #[test]
    fn load_clamps_start_index() {
        let mut playlist = Playlist::new();
        assert_eq!(playlist.load(create_test_tracks(3), 10, false).unwrap(), 2);
        assert_eq!(playlist.current_track().unwrap().id, "t2");
    }

    #[test]
    fn sequential_next_wraps() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 0, false).unwrap();

        assert_eq!(playlist.next(), Some(1));
        assert_eq!(playlist.next(), Some(2));
        assert_eq!(playlist.next(), Some(0));
    }

    #[test]
    fn random_next_never_repeats_current() {
        // Draw 0 every time: the shift past `current` keeps it moving
        let mut playlist = Playlist::with_random_source(Box::new(Scripted(VecDeque::from(vec![
            0, 0, 0, 0,
        ]))));
        playlist.load(create_test_tracks(3), 0, true).unwrap();

        assert_eq!(playlist.next(), Some(1)); // from 0: draw 0 -> 0 >= 0 -> 1
        assert_eq!(playlist.next(), Some(0)); // from 1: draw 0 -> 0
        assert_eq!(playlist.next(), Some(1));
    }

    #[test]
    fn random_single_track_repeats() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(1), 0, true).unwrap();
        assert_eq!(playlist.next(), Some(0));
        assert_eq!(playlist.next(), Some(0));
    }

    #[test]
    fn previous_restarts_after_threshold() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 1, false).unwrap();

        assert_eq!(playlist.previous(5.0), Some(PreviousOutcome::Restart));
        assert_eq!(playlist.current_index(), Some(1));
    }

    #[test]
    fn previous_moves_back_within_threshold() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 1, false).unwrap();

        assert_eq!(playlist.previous(2.0), Some(PreviousOutcome::Moved(0)));
        // Exactly at the threshold still moves
        assert_eq!(playlist.previous(3.0), Some(PreviousOutcome::Moved(2)));
    }

    #[test]
    fn previous_threshold_is_configurable() {
        let mut playlist = Playlist::new();
        playlist.set_restart_threshold(10.0);
        playlist.load(create_test_tracks(2), 0, false).unwrap();

        assert_eq!(playlist.previous(5.0), Some(PreviousOutcome::Moved(1)));
        assert_eq!(playlist.previous(10.5), Some(PreviousOutcome::Restart));
    }

    #[test]
    fn jump_to_validates_index() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 0, false).unwrap();

        assert_eq!(playlist.jump_to(2).unwrap(), 2);
        assert!(matches!(
            playlist.jump_to(3),
            Err(PlaybackError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(playlist.current_index(), Some(2));
    }

    #[test]
    fn end_of_track_loop_replays() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 1, false).unwrap();
        playlist.set_loop_mode(true);

        assert_eq!(playlist.end_of_track(), Some(EndOfTrack::Replay));
        assert_eq!(playlist.current_index(), Some(1));
    }

    #[test]
    fn end_of_track_advances() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 2, false).unwrap();
        assert_eq!(playlist.end_of_track(), Some(EndOfTrack::Advance(0)));
    }

    #[test]
    fn mode_toggles_do_not_move_index() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(3), 2, false).unwrap();

        assert!(playlist.toggle_random_mode());
        assert!(playlist.toggle_loop_mode());
        assert!(!playlist.toggle_loop_mode());
        playlist.set_random_mode(false);

        assert_eq!(playlist.current_index(), Some(2));
    }

    #[test]
    fn load_request_sets_mode() {
        let mut playlist = Playlist::new();
        let request = PlaybackRequest::random(create_test_tracks(4)).starting_at(3);
        assert_eq!(playlist.load_request(request).unwrap(), 3);
        assert!(playlist.random_mode());
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut playlist = Playlist::new();
        playlist.load(create_test_tracks(2), 0, false).unwrap();
        playlist.clear();
        assert!(playlist.is_empty());
        assert_eq!(playlist.next(), None);
    }
}
