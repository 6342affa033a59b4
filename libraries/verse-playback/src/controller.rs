//! Transport controller - core orchestration
//!
//! Coordinates the playlist, the caption track of the current song, volume,
//! and the audio sink. All inputs (clock ticks, key presses, media lifecycle)
//! arrive as plain method calls and run to completion; the controller queues
//! [`PlayerEvent`]s for the host to drain afterwards.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    keymap::{Command, InputFocus, KeyChord, KeyOutcome},
    playlist::{EndOfTrack, Playlist, PreviousOutcome},
    random::RandomSource,
    sink::{AudioSink, Binding, MediaEvent, MediaEventKind},
    types::{PlaybackRequest, PlayerConfig, Track, TransportState},
    volume::Volume,
};
use tracing::{debug, info, warn};
use verse_captions::{Caption, CaptionContext, CaptionTrack};

/// Transport controller
///
/// Owns the single audio sink. Every time a track's source is attached the
/// controller mints a new [`Binding`]; media events produced under any other
/// binding are dropped.
pub struct TransportController<S: AudioSink> {
    /// Audio output
    sink: S,

    /// Configuration
    config: PlayerConfig,

    /// Tracks and navigation modes
    playlist: Playlist,

    /// Caption timeline of the bound track
    captions: CaptionTrack,

    /// Volume and mute state
    volume: Volume,

    /// Playback requested and not rejected
    is_playing: bool,

    /// Mirrored playhead position (seconds)
    position: f64,

    /// Duration reported by the sink (seconds, 0 until known)
    duration: f64,

    /// Binding of the attached source, if any
    binding: Option<Binding>,

    /// Last binding minted
    generation: Binding,

    /// Events waiting to be drained
    pending_events: Vec<PlayerEvent>,
}

impl<S: AudioSink> TransportController<S> {
    /// Create a controller with the given configuration
    pub fn new(sink: S, config: PlayerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(sink, config))
    }

    /// Create a controller with default configuration
    pub fn with_sink(sink: S) -> Self {
        Self::assemble(sink, PlayerConfig::default())
    }

    fn assemble(sink: S, config: PlayerConfig) -> Self {
        let mut playlist = Playlist::seeded(config.random_seed);
        playlist.set_restart_threshold(config.restart_threshold_secs);

        let mut controller = Self {
            sink,
            volume: Volume::new(config.initial_volume),
            config,
            playlist,
            captions: CaptionTrack::new(),
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            binding: None,
            generation: Binding::default(),
            pending_events: Vec::new(),
        };
        controller.sink.set_volume(controller.volume.output_level());
        controller
    }

    /// Replace the random source used by random mode
    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.playlist.set_random_source(rng);
    }

    // ===== Session =====

    /// Start a session from a playback request
    ///
    /// The request is validated before anything is touched, so an empty
    /// request leaves the current session running. Playback starts right
    /// away only when `autoplay` is configured; a rejected autoplay is
    /// reported as a notice and does not fail the load.
    pub fn load(&mut self, request: PlaybackRequest) -> Result<()> {
        request.validate()?;

        let previous_track_id = self.current_track().map(|t| t.id.clone());
        if self.is_playing {
            self.sink.pause();
            self.set_playing(false);
        }

        let track_count = request.tracks.len();
        let index = self.playlist.load_request(request)?;
        info!(
            tracks = track_count,
            index,
            random = self.playlist.random_mode(),
            "Loaded playback request"
        );

        self.emit_mode_changed();
        self.bind_current(previous_track_id);

        if self.config.autoplay {
            if let Err(e) = self.play() {
                debug!("Autoplay rejected: {}", e);
            }
        }

        Ok(())
    }

    /// Tear the session down
    ///
    /// Detaches the sink and empties the playlist and captions. Volume and
    /// mute survive into the next session.
    pub fn end_session(&mut self) {
        if let Some(binding) = self.binding.take() {
            if self.is_playing {
                self.sink.pause();
            }
            self.sink.detach(binding);
        }

        self.playlist.clear();
        self.captions.clear();
        self.is_playing = false;
        self.position = 0.0;
        self.duration = 0.0;

        info!("Session ended");
        self.pending_events.push(PlayerEvent::SessionEnded);
    }

    // ===== Playback Control =====

    /// Start playback of the bound track
    ///
    /// No-op when nothing is bound or playback is already running. When the
    /// sink refuses, the controller stays paused, a notice is queued and
    /// `SinkPlayFailure` is returned.
    pub fn play(&mut self) -> Result<()> {
        if self.binding.is_none() || self.is_playing {
            return Ok(());
        }

        self.start_sink()?;
        self.set_playing(true);
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if !self.is_playing {
            return;
        }
        self.sink.pause();
        self.set_playing(false);
    }

    /// Flip between playing and paused
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.is_playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Move the playhead, clamped to `[0, duration]`
    ///
    /// No-op when nothing is bound. Non-finite targets are ignored.
    pub fn seek(&mut self, target: f64) {
        if self.binding.is_none() || !target.is_finite() {
            return;
        }

        let position = target.clamp(0.0, self.duration.max(0.0));
        self.position = position;
        self.sink.seek(position);

        debug!("Seeked to {:.3}s", position);
        self.pending_events.push(PlayerEvent::Seeked {
            position_seconds: position,
        });
        self.refresh_caption();
    }

    /// Move the playhead relative to the current position
    pub fn seek_relative(&mut self, delta: f64) {
        self.seek(self.position + delta);
    }

    /// Seek to the start of a caption on the current track
    pub fn seek_to_caption(&mut self, sequence: u32) -> Result<()> {
        let start = self
            .captions
            .find(sequence)
            .map(|c| c.start)
            .ok_or(PlaybackError::CaptionNotFound(sequence))?;
        self.seek(start);
        Ok(())
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped)
    ///
    /// Zero mutes; any positive level unmutes.
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.volume.set_level(volume);
        self.apply_volume();
    }

    /// Change volume by `delta`, snapped to hundredths
    pub fn adjust_volume(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.volume.step(delta);
        self.apply_volume();
    }

    /// Toggle mute; the stored volume is kept
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Navigation =====

    /// Advance to the next track
    pub fn next_track(&mut self) -> Result<()> {
        let previous_track_id = self.current_track().map(|t| t.id.clone());
        if self.playlist.next().is_none() {
            return Ok(());
        }
        self.rebind(previous_track_id)
    }

    /// Restart the current track or go back one
    pub fn previous_track(&mut self) -> Result<()> {
        let previous_track_id = self.current_track().map(|t| t.id.clone());
        match self.playlist.previous(self.position) {
            None => Ok(()),
            Some(PreviousOutcome::Restart) => {
                self.restart_current();
                Ok(())
            }
            Some(PreviousOutcome::Moved(_)) => self.rebind(previous_track_id),
        }
    }

    /// Jump to a playlist index
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        let previous_track_id = self.current_track().map(|t| t.id.clone());
        self.playlist.jump_to(index)?;
        self.rebind(previous_track_id)
    }

    /// Enable or disable random mode
    pub fn set_random_mode(&mut self, enabled: bool) {
        self.playlist.set_random_mode(enabled);
        self.emit_mode_changed();
    }

    /// Enable or disable loop mode
    pub fn set_loop_mode(&mut self, enabled: bool) {
        self.playlist.set_loop_mode(enabled);
        self.emit_mode_changed();
    }

    /// Toggle random mode, returning the new flag
    pub fn toggle_random_mode(&mut self) -> bool {
        let enabled = self.playlist.toggle_random_mode();
        self.emit_mode_changed();
        enabled
    }

    /// Toggle loop mode, returning the new flag
    pub fn toggle_loop_mode(&mut self) -> bool {
        let enabled = self.playlist.toggle_loop_mode();
        self.emit_mode_changed();
        enabled
    }

    // ===== Media Events =====

    /// Dispatch a media event from the sink
    ///
    /// Events from any binding other than the current one are dropped.
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Result<()> {
        if self.binding != Some(event.binding) {
            debug!(
                "Dropping stale media event from binding {}: {:?}",
                event.binding, event.kind
            );
            return Ok(());
        }

        match event.kind {
            MediaEventKind::ClockTick(position) => {
                self.on_clock_tick(position);
                Ok(())
            }
            MediaEventKind::MetadataLoaded(duration) => {
                self.on_metadata_loaded(duration);
                Ok(())
            }
            MediaEventKind::Ended => self.on_track_ended(),
            MediaEventKind::PlayFailed(reason) => {
                self.on_play_failed(&reason);
                Ok(())
            }
        }
    }

    /// Mirror the playhead and recompute the active caption
    pub fn on_clock_tick(&mut self, position: f64) {
        if !position.is_finite() {
            return;
        }
        self.position = position.max(0.0);
        self.refresh_caption();
    }

    /// Record the media duration
    ///
    /// Negative or non-finite durations are treated as unknown (0).
    pub fn on_metadata_loaded(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        debug!("Duration known: {:.3}s", self.duration);
    }

    /// Apply the end-of-track rule
    ///
    /// Loop mode replays the track from the start; otherwise the playlist
    /// advances and playback continues on the new track.
    pub fn on_track_ended(&mut self) -> Result<()> {
        let previous_track_id = self.current_track().map(|t| t.id.clone());
        match self.playlist.end_of_track() {
            None => Ok(()),
            Some(EndOfTrack::Replay) => {
                debug!("Track ended, looping");
                self.restart_current();
                if self.is_playing {
                    self.start_sink()?;
                }
                Ok(())
            }
            Some(EndOfTrack::Advance(index)) => {
                debug!("Track ended, advancing to {}", index);
                self.rebind(previous_track_id)
            }
        }
    }

    /// The sink rejected playback after `play()` returned
    pub fn on_play_failed(&mut self, reason: &str) {
        self.reject_playback(reason);
    }

    // ===== Keyboard =====

    /// Offer a key press to the player
    ///
    /// Runs the mapped command unless focus is in a text field. Failures
    /// are already reported as notices, so only the outcome is returned.
    pub fn handle_key(&mut self, chord: KeyChord, focus: InputFocus) -> KeyOutcome {
        let outcome = KeyOutcome::resolve(chord, focus);
        if let Some(command) = outcome.command {
            if let Err(e) = self.execute(command) {
                debug!("Command {:?} failed: {}", command, e);
            }
        }
        outcome
    }

    /// Run a player command
    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::TogglePlay => return self.toggle_play(),
            Command::SeekBackward => self.seek_relative(-self.config.seek_step_secs),
            Command::SeekForward => self.seek_relative(self.config.seek_step_secs),
            Command::PreviousTrack => return self.previous_track(),
            Command::NextTrack => return self.next_track(),
            Command::VolumeUp => self.adjust_volume(self.config.volume_step),
            Command::VolumeDown => self.adjust_volume(-self.config.volume_step),
            Command::ToggleMute => self.toggle_mute(),
            Command::ToggleLoop => {
                self.toggle_loop_mode();
            }
            Command::ToggleRandom => {
                self.toggle_random_mode();
            }
            Command::Exit => self.pending_events.push(PlayerEvent::ExitRequested),
        }
        Ok(())
    }

    // ===== State Queries =====

    /// Snapshot of the transport state
    pub fn state(&self) -> TransportState {
        TransportState {
            is_playing: self.is_playing,
            position_seconds: self.position,
            duration_seconds: self.duration,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        }
    }

    /// Check if playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playlist and navigation modes
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Track currently bound
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.current_track()
    }

    /// Caption timeline of the current track
    pub fn captions(&self) -> &CaptionTrack {
        &self.captions
    }

    /// Active caption at the mirrored position
    pub fn active_caption(&self) -> Option<&Caption> {
        self.captions.active()
    }

    /// Captions starting within the lookahead horizon
    pub fn upcoming_captions(&self) -> Vec<&Caption> {
        self.captions
            .upcoming(self.position, self.config.lookahead_count)
    }

    /// Previous, current, next and upcoming captions
    pub fn caption_context(&self) -> CaptionContext<'_> {
        self.captions
            .context(self.position, self.config.lookahead_count)
    }

    /// Binding of the attached source
    pub fn binding(&self) -> Option<Binding> {
        self.binding
    }

    /// Configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Audio sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable audio sink, for host-side polling
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// Rebind to the playlist's current track and keep playing if we were
    fn rebind(&mut self, previous_track_id: Option<String>) -> Result<()> {
        self.bind_current(previous_track_id);
        if self.is_playing {
            self.start_sink()?;
        }
        Ok(())
    }

    /// Attach the current track under a fresh binding
    ///
    /// The old binding is detached first, in the same call, so no event from
    /// the previous source is accepted after this returns.
    fn bind_current(&mut self, previous_track_id: Option<String>) {
        let Some(index) = self.playlist.current_index() else {
            return;
        };
        let Some(track) = self.playlist.get(index) else {
            return;
        };
        let track_id = track.id.clone();
        let source = track.audio_source.clone();
        let captions = CaptionTrack::from_text(track.caption_text.as_deref());

        if let Some(old) = self.binding.take() {
            self.sink.detach(old);
        }
        self.generation = self.generation.next();
        let binding = self.generation;
        self.sink.attach(binding, &source);
        self.binding = Some(binding);

        self.position = 0.0;
        self.duration = 0.0;

        info!(
            index,
            track_id = %track_id,
            captions = captions.len(),
            "Bound track {}",
            binding
        );
        self.pending_events.push(PlayerEvent::TrackChanged {
            index,
            track_id,
            previous_track_id,
        });

        let previous_caption = self.captions.active_sequence();
        self.captions = captions;
        self.captions.update(self.position);
        let current_caption = self.captions.active_sequence();
        if previous_caption != current_caption {
            self.pending_events.push(PlayerEvent::CaptionChanged {
                previous: previous_caption,
                current: current_caption,
            });
        }
    }

    /// Put the playhead back at 0 on the same binding
    fn restart_current(&mut self) {
        self.position = 0.0;
        if self.binding.is_some() {
            self.sink.seek(0.0);
        }
        self.pending_events.push(PlayerEvent::Seeked {
            position_seconds: 0.0,
        });
        self.refresh_caption();
    }

    /// Ask the sink to play, falling back to paused on refusal
    fn start_sink(&mut self) -> Result<()> {
        if let Err(err) = self.sink.play() {
            let reason = match err {
                PlaybackError::SinkPlayFailure(reason) => reason,
                other => other.to_string(),
            };
            self.reject_playback(&reason);
            return Err(PlaybackError::SinkPlayFailure(reason));
        }
        Ok(())
    }

    /// Fall back to paused and tell the user
    fn reject_playback(&mut self, reason: &str) {
        warn!("Playback rejected by sink: {}", reason);
        if self.is_playing {
            self.set_playing(false);
        }
        self.pending_events.push(PlayerEvent::Notice {
            message: format!("Playback failed: {reason}"),
        });
    }

    fn set_playing(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
        self.pending_events
            .push(PlayerEvent::StateChanged { is_playing });
    }

    fn refresh_caption(&mut self) {
        if let Some(change) = self.captions.update(self.position) {
            self.pending_events.push(PlayerEvent::CaptionChanged {
                previous: change.previous,
                current: change.current,
            });
        }
    }

    fn apply_volume(&mut self) {
        self.sink.set_volume(self.volume.output_level());
        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn emit_mode_changed(&mut self) {
        self.pending_events.push(PlayerEvent::ModeChanged {
            random: self.playlist.random_mode(),
            looping: self.playlist.loop_mode(),
        });
    }
}

impl<S: AudioSink + std::fmt::Debug> std::fmt::Debug for TransportController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportController")
            .field("sink", &self.sink)
            .field("playlist", &self.playlist)
            .field("state", &self.state())
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}
