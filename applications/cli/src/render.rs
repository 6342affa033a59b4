//! Plain-text rendering for the terminal

use verse_captions::{format_timestamp, Caption, CaptionState, CaptionTrack, ParseReport};
use verse_playback::{AudioSink, TransportController};

/// One-line transport summary
///
/// `> 0:12 / 3:00  vol 80%  [random] [loop]  Song Title (2/5)`
pub fn now_playing_line<S: AudioSink>(player: &TransportController<S>) -> String {
    let state = player.state();
    let playlist = player.playlist();

    let icon = if state.is_playing { '>' } else { '|' };
    let volume = if state.is_muted {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", state.volume * 100.0)
    };

    let mut line = format!(
        "{} {} / {}  {}",
        icon,
        format_timestamp(state.position_seconds),
        format_timestamp(state.duration_seconds),
        volume
    );

    if playlist.random_mode() {
        line.push_str("  [random]");
    }
    if playlist.loop_mode() {
        line.push_str("  [loop]");
    }

    if let (Some(track), Some(index)) = (player.current_track(), playlist.current_index()) {
        line.push_str(&format!(
            "  {} ({}/{})",
            track.display_title(),
            index + 1,
            playlist.len()
        ));
    }

    line
}

/// Caption text flattened onto one line
fn single_line(caption: &Caption) -> String {
    caption.text.replace('\n', " / ")
}

/// Active caption text, or an empty string in a gap
pub fn caption_line<S: AudioSink>(player: &TransportController<S>) -> String {
    player.active_caption().map(single_line).unwrap_or_default()
}

/// One caption as a timeline row
pub fn caption_row(caption: &Caption) -> String {
    format!(
        "{:>4}  {} - {}  {}",
        caption.sequence,
        format_timestamp(caption.start),
        format_timestamp(caption.end),
        single_line(caption)
    )
}

/// Full timeline followed by skip diagnostics
pub fn timeline(report: &ParseReport) -> Vec<String> {
    let mut lines: Vec<String> = report.captions.iter().map(caption_row).collect();

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("skipped {} block(s):", report.skipped.len()));
        for skipped in &report.skipped {
            lines.push(format!("  block {}: {:?}", skipped.block, skipped.reason));
        }
    }

    lines
}

/// Classified view of a track at `time` with its lookahead window
pub fn at_time(track: &CaptionTrack, time: f64, window: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for (caption, state) in track.classify_all(time) {
        let marker = match state {
            CaptionState::Current => "*",
            CaptionState::Past => " ",
            CaptionState::Upcoming => "+",
            CaptionState::Future => ".",
        };
        lines.push(format!("{} {}", marker, caption_row(caption)));
    }

    let context = track.context(time, window);
    lines.push(String::new());
    lines.push(format!("at {}", format_timestamp(time)));
    lines.push(format!(
        "  previous: {}",
        context.previous.map_or("-".to_string(), single_line)
    ));
    lines.push(format!(
        "  current:  {}",
        context.current.map_or("-".to_string(), single_line)
    ));
    lines.push(format!(
        "  next:     {}",
        context.next.map_or("-".to_string(), single_line)
    ));
    for caption in context.upcoming {
        lines.push(format!("  upcoming: {}", caption_row(caption)));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use verse_captions::parse_with_report;

    const LYRICS: &str = "1\n00:00:01,000 --> 00:00:03,000\nHello\nthere\n\n\
                          oops\nnot a block\n\n\
                          2\n00:00:04,000 --> 00:00:06,000\nworld\n";

    #[test]
    fn timeline_lists_captions_and_skips() {
        let lines = timeline(&parse_with_report(LYRICS));

        assert_eq!(lines[0], "   1  0:01 - 0:03  Hello / there");
        assert_eq!(lines[1], "   2  0:04 - 0:06  world");
        assert!(lines.iter().any(|l| l.starts_with("skipped 1 block")));
        assert!(lines.contains(&"  block 2: TooFewLines".to_string()));
    }

    #[test]
    fn at_time_marks_current_caption() {
        let track = CaptionTrack::from_text(Some(LYRICS));
        let lines = at_time(&track, 2.0, 2);

        assert!(lines[0].starts_with('*'));
        assert!(lines[1].starts_with('+'));
        assert!(lines.contains(&"  current:  Hello / there".to_string()));
        assert!(lines.contains(&"  next:     world".to_string()));
        assert!(lines.iter().all(|l| !l.contains('\n')));
    }
}
