//! Playlist files
//!
//! A playlist file is JSON: either a bare array of tracks or a full
//! playback request object (`{ "tracks": [...], "mode": "random", ... }`).

use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use verse_playback::{PlaybackMode, PlaybackRequest, Track};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlaylistFile {
    Tracks(Vec<Track>),
    Request(PlaybackRequest),
}

/// Parse playlist JSON
pub fn parse_request(json: &str) -> Result<PlaybackRequest> {
    let request = match serde_json::from_str::<PlaylistFile>(json)? {
        PlaylistFile::Tracks(tracks) => PlaybackRequest::sequential(tracks),
        PlaylistFile::Request(request) => request,
    };

    if request.tracks.is_empty() {
        return Err(CliError::Playlist("playlist has no tracks".to_string()));
    }

    Ok(request)
}

/// Read a playlist file, applying command-line overrides
///
/// Caption text may be given inline or, for tracks whose `caption_text`
/// names an existing `.srt` file next to the playlist, loaded from that file.
pub fn load_request(
    path: &Path,
    mode: Option<PlaybackMode>,
    start_index: Option<usize>,
) -> Result<PlaybackRequest> {
    let json = std::fs::read_to_string(path)?;
    let mut request = parse_request(&json)?;

    if let Some(mode) = mode {
        request.mode = mode;
    }
    if let Some(start_index) = start_index {
        request.start_index = start_index;
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for track in &mut request.tracks {
        resolve_caption_file(base, track)?;
    }

    tracing::debug!(
        "Loaded {} tracks from {}",
        request.tracks.len(),
        path.display()
    );
    Ok(request)
}

fn resolve_caption_file(base: &Path, track: &mut Track) -> Result<()> {
    let Some(text) = track.caption_text.as_deref() else {
        return Ok(());
    };

    let trimmed = text.trim();
    if trimmed.contains('\n') || !trimmed.to_ascii_lowercase().ends_with(".srt") {
        return Ok(());
    }

    let candidate = base.join(trimmed);
    if candidate.is_file() {
        track.caption_text = Some(std::fs::read_to_string(&candidate)?);
    }
    Ok(())
}
