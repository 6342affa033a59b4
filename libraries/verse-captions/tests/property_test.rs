//! Property-based tests for caption parsing and lookup
//!
//! Uses proptest to verify parser and index invariants across many inputs.

use proptest::prelude::*;
use verse_captions::{active_caption, classify, parse, upcoming_window, Caption, CaptionState};

// ===== Helpers =====

/// Render milliseconds as an SRT timestamp
fn srt_time(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// (sequence, start_ms, length_ms, text, well_formed)
type BlockSpec = (u32, u64, u64, String, bool);

fn arbitrary_block() -> impl Strategy<Value = BlockSpec> {
    (
        1u32..10_000,
        0u64..5_000_000,
        1u64..20_000,
        "[A-Za-z][A-Za-z ]{0,15}",
        prop::bool::weighted(0.8),
    )
}

fn render(blocks: &[BlockSpec]) -> String {
    blocks
        .iter()
        .map(|(seq, start, len, text, ok)| {
            if *ok {
                format!("{}\n{} --> {}\n{}", seq, srt_time(*start), srt_time(start + len), text)
            } else {
                // Broken timing separator
                format!("{}\n{} -> {}\n{}", seq, srt_time(*start), srt_time(start + len), text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn arbitrary_timeline() -> impl Strategy<Value = Vec<Caption>> {
    prop::collection::vec((0u32..600, 1u32..100), 0..30).prop_map(|spans| {
        let mut captions: Vec<Caption> = spans
            .into_iter()
            .enumerate()
            .map(|(i, (start, len))| {
                let start = f64::from(start) / 10.0;
                Caption::new(i as u32 + 1, start, start + f64::from(len) / 10.0, "x")
            })
            .collect();
        captions.sort_by(|a, b| a.start.total_cmp(&b.start));
        captions
    })
}

// ===== Property Tests =====

proptest! {
    /// Property: parser output is always sorted by start time
    #[test]
    fn parse_output_is_sorted(blocks in prop::collection::vec(arbitrary_block(), 0..40)) {
        let captions = parse(&render(&blocks));
        prop_assert!(captions.windows(2).all(|w| w[0].start <= w[1].start));
    }

    /// Property: the first well-formed block per sequence contributes a caption
    #[test]
    fn parse_keeps_exactly_well_formed_sequences(
        blocks in prop::collection::vec(arbitrary_block(), 0..40)
    ) {
        let captions = parse(&render(&blocks));

        let mut expected: Vec<u32> = blocks.iter().filter(|b| b.4).map(|b| b.0).collect();
        let mut actual: Vec<u32> = captions.iter().map(|c| c.sequence).collect();
        expected.sort_unstable();
        expected.dedup();
        actual.sort_unstable();

        prop_assert_eq!(expected, actual);
    }

    /// Property: every parsed caption has end > start
    #[test]
    fn parsed_intervals_are_non_empty(blocks in prop::collection::vec(arbitrary_block(), 0..40)) {
        for caption in parse(&render(&blocks)) {
            prop_assert!(caption.end > caption.start);
        }
    }

    /// Property: blank-line variation between blocks never changes the result
    #[test]
    fn blank_line_runs_are_equivalent(
        blocks in prop::collection::vec(arbitrary_block(), 1..20),
        extra in 1usize..4
    ) {
        let tight = render(&blocks);
        let loose = tight.replace("\n\n", &"\n".repeat(2 + extra));
        prop_assert_eq!(parse(&tight), parse(&loose));
    }

    /// Property: active caption matches the brute-force definition
    #[test]
    fn active_matches_first_containing(captions in arbitrary_timeline(), t in 0.0f64..80.0) {
        let expected = captions.iter().find(|c| t >= c.start && t <= c.end);
        prop_assert_eq!(active_caption(&captions, t), expected);
    }

    /// Property: upcoming window only holds captions starting after t, in order
    #[test]
    fn upcoming_window_is_ordered_and_after(
        captions in arbitrary_timeline(),
        t in 0.0f64..80.0,
        count in 0usize..6
    ) {
        let window = upcoming_window(&captions, t, count);
        prop_assert!(window.len() <= count);
        prop_assert!(window.iter().all(|c| c.start > t));
        prop_assert!(window.windows(2).all(|w| w[0].start <= w[1].start));

        let available = captions.iter().filter(|c| c.start > t).count();
        prop_assert_eq!(window.len(), available.min(count));
    }

    /// Property: exactly one caption is Current iff an active caption exists
    #[test]
    fn single_current_caption(captions in arbitrary_timeline(), t in 0.0f64..80.0) {
        let active = active_caption(&captions, t);
        let current = captions
            .iter()
            .filter(|c| classify(c, t, active) == CaptionState::Current)
            .count();
        prop_assert_eq!(current, usize::from(active.is_some()));
    }
}

// ===== Scenario Tests =====

#[test]
fn documented_timeline_resolution() {
    let captions = vec![
        Caption::new(1, 0.0, 2.0, "a"),
        Caption::new(2, 2.0, 4.0, "b"),
        Caption::new(3, 5.0, 7.0, "c"),
    ];

    assert_eq!(active_caption(&captions, 1.5), Some(&captions[0]));
    assert_eq!(active_caption(&captions, 4.5), None);
    assert_eq!(active_caption(&captions, 2.0), Some(&captions[0]));
}

#[test]
fn repeated_sequence_is_not_a_second_caption() {
    let captions = parse(
        "1\n00:00:00,000 --> 00:00:02,000\nfirst\n\n\
         1\n00:00:02,000 --> 00:00:04,000\nsecond\n",
    );
    assert_eq!(captions.len(), 1);

    let mut track = verse_captions::CaptionTrack::from_captions(captions);
    assert!(track.update(1.0).is_some());
    assert_eq!(track.active().map(|c| c.text.as_str()), Some("first"));

    // The dropped duplicate leaves 2-4 s uncovered
    let change = track.update(3.0).unwrap();
    assert_eq!(change.previous, Some(1));
    assert_eq!(change.current, None);
    assert!(track.active().is_none());

    let states: Vec<CaptionState> = track.classify_all(1.0).into_iter().map(|(_, s)| s).collect();
    assert_eq!(states, vec![CaptionState::Current]);
}

#[test]
fn whitespace_only_inputs() {
    assert!(parse("").is_empty());
    assert!(parse("   \n\n").is_empty());
}
