//! Time-indexed caption queries
//!
//! Every function here takes a start-sorted slice (as produced by
//! [`crate::parse`]) and a playback time in seconds. Nothing is cached: each
//! call is computed against the time it is given, so callers can re-run them
//! on every clock tick.

use crate::types::{Caption, CaptionState};

/// How far ahead (in seconds) a caption counts as upcoming
pub const UPCOMING_HORIZON_SECS: f64 = 10.0;

/// Neighbourhood of the playback position
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionContext<'a> {
    /// Caption before the active one (or the last finished one when nothing is active)
    pub previous: Option<&'a Caption>,

    /// Active caption
    pub current: Option<&'a Caption>,

    /// Caption after the active one (or the next to start when nothing is active)
    pub next: Option<&'a Caption>,

    /// Lookahead window of captions starting after the playback time
    pub upcoming: Vec<&'a Caption>,
}

/// Number of leading captions with `start <= time`
fn started_count(captions: &[Caption], time: f64) -> usize {
    captions.partition_point(|c| c.start <= time)
}

/// Resolve the active caption at `time`
///
/// Returns the first caption, in start order, whose closed interval
/// `[start, end]` contains `time`. When captions overlap the earliest-starting
/// one wins. `None` is a normal result (instrumental gaps, before the first
/// line, after the last one).
pub fn active_caption(captions: &[Caption], time: f64) -> Option<&Caption> {
    let started = started_count(captions, time);
    captions[..started].iter().find(|c| c.contains(time))
}

/// Position of the active caption within the sorted slice
pub fn active_position(captions: &[Caption], time: f64) -> Option<usize> {
    let started = started_count(captions, time);
    captions[..started].iter().position(|c| c.contains(time))
}

/// First caption that starts strictly after `time`
pub fn next_caption(captions: &[Caption], time: f64) -> Option<&Caption> {
    captions.get(started_count(captions, time))
}

/// The next `count` captions that start strictly after `time`, in order
pub fn upcoming_window(captions: &[Caption], time: f64, count: usize) -> Vec<&Caption> {
    let first = started_count(captions, time);
    captions[first..].iter().take(count).collect()
}

/// Find a caption by its source sequence number
pub fn find_by_sequence(captions: &[Caption], sequence: u32) -> Option<&Caption> {
    captions.iter().find(|c| c.sequence == sequence)
}

/// Active caption with its sorted neighbours and the lookahead window
pub fn caption_context(captions: &[Caption], time: f64, count: usize) -> CaptionContext<'_> {
    let upcoming = upcoming_window(captions, time, count);

    match active_position(captions, time) {
        Some(pos) => CaptionContext {
            previous: pos.checked_sub(1).and_then(|p| captions.get(p)),
            current: captions.get(pos),
            next: captions.get(pos + 1),
            upcoming,
        },
        None => CaptionContext {
            previous: captions
                .iter()
                .filter(|c| c.end < time)
                .max_by(|a, b| a.end.total_cmp(&b.end)),
            current: None,
            next: next_caption(captions, time),
            upcoming,
        },
    }
}

/// Classify one caption for display
///
/// `active` is the caption resolved by [`active_caption`] for the same
/// `time`; identity is compared by sequence number.
pub fn classify(caption: &Caption, time: f64, active: Option<&Caption>) -> CaptionState {
    if active.is_some_and(|a| a.sequence == caption.sequence) {
        CaptionState::Current
    } else if caption.end < time {
        CaptionState::Past
    } else if caption.start > time && caption.start <= time + UPCOMING_HORIZON_SECS {
        CaptionState::Upcoming
    } else {
        CaptionState::Future
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> Vec<Caption> {
        vec![
            Caption::new(1, 0.0, 2.0, "a"),
            Caption::new(2, 2.0, 4.0, "b"),
            Caption::new(3, 5.0, 7.0, "c"),
        ]
    }

    #[test]
    fn active_inside_interval() {
        let captions = timeline();
        assert_eq!(active_caption(&captions, 1.5).map(|c| c.sequence), Some(1));
        assert_eq!(active_caption(&captions, 6.0).map(|c| c.sequence), Some(3));
    }

    #[test]
    fn gap_has_no_active_caption() {
        let captions = timeline();
        assert!(active_caption(&captions, 4.5).is_none());
        assert!(active_caption(&captions, 7.5).is_none());
        assert!(active_caption(&captions, -1.0).is_none());
    }

    #[test]
    fn shared_boundary_resolves_to_earliest_start() {
        let captions = timeline();
        // caption 1 ends at 2.0 and caption 2 starts at 2.0
        assert_eq!(active_caption(&captions, 2.0).map(|c| c.sequence), Some(1));
    }

    #[test]
    fn overlap_resolves_to_earliest_start() {
        let captions = vec![
            Caption::new(4, 1.0, 10.0, "long"),
            Caption::new(2, 3.0, 5.0, "short"),
        ];
        assert_eq!(active_caption(&captions, 4.0).map(|c| c.sequence), Some(4));
    }

    #[test]
    fn overlap_falls_through_to_later_caption() {
        let captions = vec![
            Caption::new(1, 1.0, 2.0, "first"),
            Caption::new(2, 1.5, 5.0, "second"),
        ];
        assert_eq!(active_caption(&captions, 3.0).map(|c| c.sequence), Some(2));
    }

    #[test]
    fn empty_timeline() {
        assert!(active_caption(&[], 1.0).is_none());
        assert!(next_caption(&[], 1.0).is_none());
        assert!(upcoming_window(&[], 1.0, 3).is_empty());
    }

    #[test]
    fn upcoming_window_is_strictly_after() {
        let captions = timeline();
        let window: Vec<u32> = upcoming_window(&captions, 2.0, 5)
            .iter()
            .map(|c| c.sequence)
            .collect();
        assert_eq!(window, vec![3]);

        let window: Vec<u32> = upcoming_window(&captions, 0.5, 1)
            .iter()
            .map(|c| c.sequence)
            .collect();
        assert_eq!(window, vec![2]);
    }

    #[test]
    fn context_around_active() {
        let captions = timeline();
        let ctx = caption_context(&captions, 3.0, 2);
        assert_eq!(ctx.previous.map(|c| c.sequence), Some(1));
        assert_eq!(ctx.current.map(|c| c.sequence), Some(2));
        assert_eq!(ctx.next.map(|c| c.sequence), Some(3));
        assert_eq!(ctx.upcoming.len(), 1);
    }

    #[test]
    fn context_in_gap() {
        let captions = timeline();
        let ctx = caption_context(&captions, 4.5, 2);
        assert_eq!(ctx.previous.map(|c| c.sequence), Some(2));
        assert!(ctx.current.is_none());
        assert_eq!(ctx.next.map(|c| c.sequence), Some(3));
    }

    #[test]
    fn find_by_sequence_uses_identity_not_position() {
        let captions = vec![Caption::new(40, 0.0, 1.0, "x"), Caption::new(7, 1.0, 2.0, "y")];
        assert_eq!(find_by_sequence(&captions, 7).map(|c| c.text.as_str()), Some("y"));
        assert!(find_by_sequence(&captions, 1).is_none());
    }

    #[test]
    fn classification() {
        let captions = vec![
            Caption::new(1, 0.0, 2.0, "past"),
            Caption::new(2, 2.5, 4.0, "current"),
            Caption::new(3, 8.0, 9.0, "upcoming"),
            Caption::new(4, 13.0, 14.0, "edge"),
            Caption::new(5, 13.5, 15.0, "future"),
        ];
        let time = 3.0;
        let active = active_caption(&captions, time);

        let states: Vec<CaptionState> = captions
            .iter()
            .map(|c| classify(c, time, active))
            .collect();

        assert_eq!(
            states,
            vec![
                CaptionState::Past,
                CaptionState::Current,
                CaptionState::Upcoming,
                CaptionState::Upcoming, // starts exactly at time + 10
                CaptionState::Future,
            ]
        );
    }

    #[test]
    fn classification_without_active_caption() {
        let captions = timeline();
        let time = 4.5;
        let active = active_caption(&captions, time);
        assert!(active.is_none());

        assert_eq!(classify(&captions[1], time, active), CaptionState::Past);
        assert_eq!(classify(&captions[2], time, active), CaptionState::Upcoming);
    }

    #[test]
    fn overlapped_loser_is_future() {
        let captions = vec![
            Caption::new(1, 1.0, 10.0, "winner"),
            Caption::new(2, 2.0, 6.0, "loser"),
        ];
        let active = active_caption(&captions, 3.0);
        assert_eq!(classify(&captions[1], 3.0, active), CaptionState::Future);
    }
}
