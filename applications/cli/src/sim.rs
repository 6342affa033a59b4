//! Simulated audio sink on a virtual clock
//!
//! Stands in for a real media element: it "plays" a source for the
//! duration the catalog gave it and reports ticks, metadata and the end of
//! media as [`MediaEvent`]s tagged with the attach binding.

use std::collections::{HashMap, VecDeque};
use verse_playback::{AudioSink, Binding, MediaEvent, MediaEventKind, PlaybackRequest, Result};

/// Virtual-clock audio sink
#[derive(Debug)]
pub struct VirtualSink {
    /// Duration per audio source
    durations: HashMap<String, f64>,

    /// Duration for sources without a known length
    default_duration: f64,

    /// Binding of the attached source
    binding: Option<Binding>,

    /// Attached source
    source: Option<String>,

    playing: bool,
    position: f64,
    duration: f64,
    volume: f64,

    /// Events not yet delivered to the controller
    pending: VecDeque<MediaEvent>,
}

impl VirtualSink {
    /// Create a sink with no known durations
    pub fn new(default_duration: f64) -> Self {
        Self {
            durations: HashMap::new(),
            default_duration,
            binding: None,
            source: None,
            playing: false,
            position: 0.0,
            duration: 0.0,
            volume: 1.0,
            pending: VecDeque::new(),
        }
    }

    /// Create a sink that knows the durations of a request's tracks
    pub fn for_request(request: &PlaybackRequest, default_duration: f64) -> Self {
        let mut sink = Self::new(default_duration);
        for track in &request.tracks {
            if let Some(duration) = track.duration.filter(|d| d.is_finite() && *d > 0.0) {
                sink.durations.insert(track.audio_source.clone(), duration);
            }
        }
        sink
    }

    /// Advance the virtual clock by `seconds`
    ///
    /// Queues a tick while playing, and the end of media once the source
    /// runs out.
    pub fn advance(&mut self, seconds: f64) {
        let Some(binding) = self.binding else {
            return;
        };
        if !self.playing || seconds <= 0.0 {
            return;
        }

        self.position = (self.position + seconds).min(self.duration);
        self.pending
            .push_back(MediaEvent::new(binding, MediaEventKind::ClockTick(self.position)));

        if self.position >= self.duration {
            self.playing = false;
            self.pending
                .push_back(MediaEvent::new(binding, MediaEventKind::Ended));
        }
    }

    /// Take all queued media events
    pub fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.pending.drain(..).collect()
    }

    /// Attached source
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether the virtual clock is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Virtual playhead position
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Output volume
    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl AudioSink for VirtualSink {
    fn attach(&mut self, binding: Binding, source: &str) {
        self.binding = Some(binding);
        self.source = Some(source.to_string());
        self.playing = false;
        self.position = 0.0;
        self.duration = self
            .durations
            .get(source)
            .copied()
            .unwrap_or(self.default_duration);

        self.pending.push_back(MediaEvent::new(
            binding,
            MediaEventKind::MetadataLoaded(self.duration),
        ));
        tracing::debug!("Attached {} as {}", source, binding);
    }

    fn detach(&mut self, binding: Binding) {
        if self.binding == Some(binding) {
            self.binding = None;
            self.source = None;
            self.playing = false;
        }
        // Undelivered events from the old binding stay queued; the
        // controller discards them.
    }

    fn play(&mut self) -> Result<()> {
        if self.binding.is_some() {
            if self.position >= self.duration {
                self.position = 0.0;
            }
            self.playing = true;
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position_seconds: f64) {
        self.position = position_seconds.clamp(0.0, self.duration);
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verse_playback::Track;

    fn attached(duration: f64) -> (VirtualSink, Binding) {
        let mut sink = VirtualSink::new(duration);
        let binding = Binding::default();
        sink.attach(binding, "a.mp3");
        (sink, binding)
    }

    #[test]
    fn attach_reports_metadata() {
        let (mut sink, binding) = attached(42.0);
        assert_eq!(
            sink.poll_events(),
            vec![MediaEvent::new(binding, MediaEventKind::MetadataLoaded(42.0))]
        );
    }

    #[test]
    fn clock_only_runs_while_playing() {
        let (mut sink, _) = attached(10.0);
        sink.poll_events();

        sink.advance(1.0);
        assert!(sink.poll_events().is_empty());

        sink.play().unwrap();
        sink.advance(1.0);
        sink.advance(0.5);
        assert_eq!(sink.position(), 1.5);
        assert_eq!(sink.poll_events().len(), 2);
    }

    #[test]
    fn running_out_ends_the_media() {
        let (mut sink, binding) = attached(2.0);
        sink.poll_events();
        sink.play().unwrap();

        sink.advance(5.0);

        assert!(!sink.is_playing());
        assert_eq!(
            sink.poll_events(),
            vec![
                MediaEvent::new(binding, MediaEventKind::ClockTick(2.0)),
                MediaEvent::new(binding, MediaEventKind::Ended),
            ]
        );
    }

    #[test]
    fn catalog_durations_are_used() {
        let request = PlaybackRequest::sequential(vec![Track {
            duration: Some(12.5),
            ..Track::new("a", "a.mp3")
        }]);
        let mut sink = VirtualSink::for_request(&request, 180.0);
        sink.attach(Binding::default(), "a.mp3");

        assert!(matches!(
            sink.poll_events().as_slice(),
            [MediaEvent { kind: MediaEventKind::MetadataLoaded(d), .. }] if *d == 12.5
        ));
    }
}
