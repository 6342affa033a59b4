//! Verse Player - Playback Management
//!
//! Platform-agnostic transport control for a lyrics-synchronised player.
//!
//! This crate provides:
//! - Playlist navigation (sequential, random, loop, restart-on-previous)
//! - Volume control (0.0-1.0, mute/unmute with stored level)
//! - Seek with clamping to the media duration
//! - Per-track caption resolution as the playhead moves
//! - Keyboard shortcut mapping
//!
//! # Architecture
//!
//! `verse-playback` never decodes or outputs audio itself. The host provides
//! an [`AudioSink`] and forwards its [`MediaEvent`]s; the controller reports
//! back through [`PlayerEvent`]s drained after each call.
//!
//! # Example
//!
//! ```rust
//! use verse_playback::{
//!     AudioSink, Binding, PlaybackRequest, PlayerEvent, Result, Track, TransportController,
//! };
//!
//! #[derive(Default)]
//! struct Silent;
//!
//! impl AudioSink for Silent {
//!     fn attach(&mut self, _binding: Binding, _source: &str) {}
//!     fn detach(&mut self, _binding: Binding) {}
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position_seconds: f64) {}
//!     fn set_volume(&mut self, _volume: f64) {}
//! }
//!
//! let mut player = TransportController::with_sink(Silent);
//! let lyrics = "1\n00:00:01,000 --> 00:00:03,000\nHello\n";
//! player
//!     .load(PlaybackRequest::sequential(vec![
//!         Track::new("a", "/music/a.mp3").with_captions(lyrics),
//!         Track::new("b", "/music/b.mp3"),
//!     ]))
//!     .unwrap();
//!
//! player.toggle_play().unwrap();
//! player.on_clock_tick(1.5);
//! assert_eq!(player.active_caption().map(|c| c.text.as_str()), Some("Hello"));
//!
//! player.next_track().unwrap();
//! assert_eq!(player.current_track().map(|t| t.id.as_str()), Some("b"));
//! assert!(player
//!     .drain_events()
//!     .iter()
//!     .any(|e| matches!(e, PlayerEvent::TrackChanged { index: 1, .. })));
//! ```

pub mod controller;
pub mod error;
pub mod events;
pub mod keymap;
pub mod playlist;
pub mod random;
pub mod sink;
pub mod types;
pub mod volume;

pub use controller::TransportController;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use keymap::{Command, InputFocus, Key, KeyChord, KeyOutcome, Modifiers};
pub use playlist::{EndOfTrack, Playlist, PreviousOutcome, DEFAULT_RESTART_THRESHOLD_SECS};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use sink::{AudioSink, Binding, MediaEvent, MediaEventKind};
pub use types::{PlaybackMode, PlaybackRequest, PlayerConfig, Track, TransportState};
pub use volume::Volume;

pub use verse_captions;
