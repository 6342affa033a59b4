//! SRT timing parser
//!
//! Converts raw caption text into a start-sorted list of [`Caption`]s.
//!
//! The format is a sequence of blocks separated by blank lines:
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:03,500
//! First line
//! second line of the same caption
//!
//! 2
//! 00:00:04,000 --> 00:00:06,000
//! Next caption
//! ```
//!
//! Parsing is lenient: a malformed block is skipped and reported in
//! [`ParseReport::skipped`], it never fails the whole track.

use crate::types::Caption;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

/// Why a block was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Fewer than three lines (sequence, timing, text)
    TooFewLines,

    /// First line is not a sequence number >= 1
    InvalidSequence,

    /// Second line is not `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    InvalidTiming,

    /// End time does not come after the start time
    EmptyInterval,

    /// Sequence number already used by an earlier block
    DuplicateSequence,
}

/// A dropped block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedBlock {
    /// 1-based position of the block in the input
    pub block: usize,

    /// Why it was dropped
    pub reason: SkipReason,
}

/// Parser output with diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Well-formed captions, sorted by start time
    pub captions: Vec<Caption>,

    /// Blocks that were dropped
    pub skipped: Vec<SkippedBlock>,
}

fn timing_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})(?:\s.*)?$",
        )
        .expect("timing pattern is valid")
    })
}

/// Parse caption text into start-sorted captions
///
/// Empty or whitespace-only input yields an empty list.
pub fn parse(raw: &str) -> Vec<Caption> {
    parse_with_report(raw).captions
}

/// Parse caption text, keeping track of dropped blocks
///
/// Sequence numbers identify captions, so only the first block carrying a
/// given number is kept.
pub fn parse_with_report(raw: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut seen = HashSet::new();

    if raw.trim().is_empty() {
        return report;
    }

    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    for (ordinal, block) in split_blocks(&normalized).into_iter().enumerate() {
        let parsed = parse_block(&block).and_then(|caption| {
            if seen.insert(caption.sequence) {
                Ok(caption)
            } else {
                Err(SkipReason::DuplicateSequence)
            }
        });

        match parsed {
            Ok(caption) => report.captions.push(caption),
            Err(reason) => {
                debug!("Skipping caption block {}: {:?}", ordinal + 1, reason);
                report.skipped.push(SkippedBlock {
                    block: ordinal + 1,
                    reason,
                });
            }
        }
    }

    // Vec::sort_by is stable, so equal starts keep their input order
    report
        .captions
        .sort_by(|a, b| a.start.total_cmp(&b.start));

    debug!(
        "Parsed {} captions ({} blocks skipped)",
        report.captions.len(),
        report.skipped.len()
    );

    report
}

/// Split normalized text into blocks of lines
///
/// Any run of whitespace-only lines separates two blocks.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Result<Caption, SkipReason> {
    if lines.len() < 3 {
        return Err(SkipReason::TooFewLines);
    }

    let sequence = lines[0]
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or(SkipReason::InvalidSequence)?;

    let (start, end) = parse_timing_line(lines[1]).ok_or(SkipReason::InvalidTiming)?;

    if end <= start {
        return Err(SkipReason::EmptyInterval);
    }

    let text = lines[2..].join("\n").trim_end().to_string();

    Ok(Caption {
        sequence,
        start,
        end,
        text,
    })
}

/// Parse `HH:MM:SS,mmm --> HH:MM:SS,mmm` into start and end seconds
fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let caps = timing_pattern().captures(line.trim())?;

    let field = |i: usize| -> Option<u32> { caps.get(i)?.as_str().parse().ok() };

    let start = to_seconds(field(1)?, field(2)?, field(3)?, field(4)?);
    let end = to_seconds(field(5)?, field(6)?, field(7)?, field(8)?);

    Some((start, end))
}

fn to_seconds(hours: u32, minutes: u32, seconds: u32, millis: u32) -> f64 {
    f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + f64::from(seconds)
        + f64::from(millis) / 1000.0
}
