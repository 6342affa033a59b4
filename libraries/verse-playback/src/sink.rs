//! Audio sink abstraction
//!
//! The controller never decodes audio. It drives a host-provided sink
//! (a browser media element, a native player, or a simulation) through
//! [`AudioSink`], and the sink reports back with [`MediaEvent`]s.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Generation id of one attach of an audio source to the sink
///
/// Minted fresh on every rebind. Media events carry the binding they were
/// produced under so events from a previous track can be dropped.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Binding(u64);

impl Binding {
    /// Raw generation number
    pub fn generation(self) -> u64 {
        self.0
    }

    /// The binding minted after this one
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Audio output driven by the controller
///
/// All methods are requests; the sink reports the outcome (position,
/// duration, end of media, asynchronous play failures) through
/// [`MediaEvent`]s tagged with the binding passed to `attach`.
pub trait AudioSink {
    /// Load `source` and tag every subsequent event with `binding`
    fn attach(&mut self, binding: Binding, source: &str);

    /// Stop reporting events for `binding` and release its source
    fn detach(&mut self, binding: Binding);

    /// Start or resume playback
    ///
    /// Returns `SinkPlayFailure` when the sink refuses synchronously
    /// (e.g. autoplay blocked).
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Relocate the playhead
    fn seek(&mut self, position_seconds: f64);

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f64);
}

/// What happened on the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEventKind {
    /// Periodic playhead report
    ClockTick(f64),

    /// Duration became known
    MetadataLoaded(f64),

    /// Playback reached the end of the media
    Ended,

    /// Playback was rejected after `play()` returned
    PlayFailed(String),
}

/// Media lifecycle event reported by the sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEvent {
    /// Binding the event was produced under
    pub binding: Binding,

    /// Event payload
    pub kind: MediaEventKind,
}

impl MediaEvent {
    /// Create an event for `binding`
    pub fn new(binding: Binding, kind: MediaEventKind) -> Self {
        Self { binding, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_are_monotonic() {
        let first = Binding::default();
        let second = first.next();
        let third = second.next();

        assert!(first < second && second < third);
        assert_ne!(first, third);
        assert_eq!(third.generation(), 2);
        assert_eq!(third.to_string(), "#2");
    }

    #[test]
    fn media_event_carries_binding() {
        let binding = Binding::default().next();
        let event = MediaEvent::new(binding, MediaEventKind::ClockTick(1.5));
        assert_eq!(event.binding, binding);
        assert_eq!(event.kind, MediaEventKind::ClockTick(1.5));
    }
}
