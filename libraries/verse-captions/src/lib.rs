//! Verse Player - Captions
//!
//! Time-coded lyric tracks for Verse Player.
//!
//! This crate provides:
//! - A lenient SRT parser (malformed blocks are skipped, never fatal)
//! - Active-caption resolution with a deterministic overlap tie-break
//! - Lookahead windows and per-caption display classification
//! - [`CaptionTrack`], a per-track timeline that reports active-caption changes
//!
//! # Example
//!
//! ```rust
//! use verse_captions::{active_caption, parse, upcoming_window};
//!
//! let captions = parse(
//!     "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n\
//!      2\n00:00:02,500 --> 00:00:04,000\nworld\n",
//! );
//!
//! assert_eq!(active_caption(&captions, 1.0).map(|c| c.text.as_str()), Some("Hello"));
//! assert!(active_caption(&captions, 2.2).is_none());
//! assert_eq!(upcoming_window(&captions, 1.0, 3).len(), 1);
//! ```

mod index;
mod srt;
mod time;
mod track;
pub mod types;

pub use index::{
    active_caption, active_position, caption_context, classify, find_by_sequence, next_caption,
    upcoming_window, CaptionContext, UPCOMING_HORIZON_SECS,
};
pub use srt::{parse, parse_with_report, ParseReport, SkipReason, SkippedBlock};
pub use time::format_timestamp;
pub use track::{CaptionChange, CaptionTrack};
pub use types::{Caption, CaptionState};
