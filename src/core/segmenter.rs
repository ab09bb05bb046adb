//! Message-block segmentation and own-staff redaction.
//!
//! Chat exports put one timestamped header at the start of every message and
//! continue long messages on following lines. Two header layouts are
//! recognised, both anchored at the start of the line:
//!
//! - `[HH:MM, D/M/YYYY]` - e.g. `[08:15, 3/7/2024] Ali: ...`
//! - `[D/M/YYYY H:MM AM|PM]` - e.g. `[3/7/2024 8:15 AM] Ali: ...` (meridiem in any case)
//!
//! Cleaning drops every block whose header line names a configured staff
//! member, then trims and lowercases what is left. Lines that match neither
//! layout are continuation lines of the current block.
//!
//! Lines end at `\n`, `\r\n` or a bare `\r`. Vertical tab, form feed, the
//! `\x1c`-`\x1e` separators, NEL and the Unicode line and paragraph
//! separators also end a line (see [`split_lines`]).
//!
//! # Example
//!
//! ```rust
//! use ticketpack::config::RedactionNames;
//! use ticketpack::core::segmenter::segment_and_redact;
//!
//! let raw = "[08:00, 1/2/2024] Tina: on it\n[08:05, 1/2/2024] Customer: Full capping\nQ123456";
//! let names = RedactionNames::parse_list("Tina")?;
//! let cleaned = segment_and_redact(raw, &names);
//!
//! assert_eq!(cleaned.as_str(), "[08:05, 1/2/2024] customer: full capping q123456");
//! assert_eq!(cleaned.blocks_redacted, 1);
//! # Ok::<(), ticketpack::TicketpackError>(())
//! ```

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::config::RedactionNames;
use crate::core::models::{CleanedText, MessageBlock};

/// Block header grammar.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\[(?P<t24>\d{2}:\d{2}), (?P<d24>\d{1,2}/\d{1,2}/\d{4})\]|\[(?P<d12>\d{1,2}/\d{1,2}/\d{4}) (?P<t12>\d{1,2}:\d{2} [AaPp][Mm])\])",
    )
    .expect("HEADER_REGEX: invalid pattern")
});

/// Every sequence that terminates a line.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]")
        .expect("LINE_BREAK: invalid pattern")
});

/// Separator placed between cleaned blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Splits `raw` into lines.
///
/// A terminator at the very end does not produce a trailing empty line, and
/// empty input has no lines.
///
/// ```rust
/// use ticketpack::core::segmenter::split_lines;
///
/// assert_eq!(split_lines("a\rb\r\nc\u{2028}d\n"), vec!["a", "b", "c", "d"]);
/// assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(raw: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(raw).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// Returns `true` if `line` opens a new message block.
pub fn is_block_header(line: &str) -> bool {
    HEADER_REGEX.is_match(line)
}

/// Parses the timestamp of a header line.
///
/// Dates are day-first. Returns `None` if `line` is not a header or its
/// values don't form a valid date and time.
pub fn parse_header_timestamp(line: &str) -> Option<NaiveDateTime> {
    let caps = HEADER_REGEX.captures(line)?;

    if let (Some(time), Some(date)) = (caps.name("t24"), caps.name("d24")) {
        let stamp = format!("{} {}", date.as_str(), time.as_str());
        return NaiveDateTime::parse_from_str(&stamp, "%d/%m/%Y %H:%M").ok();
    }

    let date = caps.name("d12")?;
    let time = caps.name("t12")?;
    let stamp = format!("{} {}", date.as_str(), time.as_str());
    NaiveDateTime::parse_from_str(&stamp, "%d/%m/%Y %I:%M %p").ok()
}

/// Splits raw export text into message blocks.
///
/// Every input line lands in exactly one block, in order, so the blocks'
/// [`lines`](MessageBlock::lines) reconstruct the document. Lines before the
/// first header form a leading orphan block.
pub fn segment(raw: &str) -> Vec<MessageBlock> {
    let mut blocks = Vec::new();
    let mut current = MessageBlock::orphan();

    for line in split_lines(raw) {
        if is_block_header(line) {
            let previous = std::mem::replace(&mut current, MessageBlock::with_header(line));
            if previous.line_count() > 0 {
                blocks.push(previous);
            }
        } else {
            current.body.push(line.to_string());
        }
    }

    if current.line_count() > 0 {
        blocks.push(current);
    }

    blocks
}

/// Segments `raw`, drops blocks whose header names own staff, and normalises
/// the rest.
///
/// Surviving blocks are trimmed, lowercased, space-joined and separated by a
/// blank line. Blocks that are empty after trimming are not emitted. The
/// leading orphan block is never redacted since it has no header.
pub fn segment_and_redact(raw: &str, names: &RedactionNames) -> CleanedText {
    let blocks = segment(raw);
    let blocks_seen = blocks.len();
    let mut blocks_redacted = 0;
    let mut kept: Vec<String> = Vec::with_capacity(blocks_seen);

    for block in &blocks {
        if block.header.as_deref().is_some_and(|h| names.matches(h)) {
            blocks_redacted += 1;
            continue;
        }

        let normalized = block.normalized();
        if !normalized.is_empty() {
            kept.push(normalized);
        }
    }

    let blocks_emitted = kept.len();
    CleanedText::new(
        kept.join(BLOCK_SEPARATOR),
        blocks_seen,
        blocks_redacted,
        blocks_emitted,
    )
}

/// Cleaner bound to a fixed set of redaction names.
///
/// # Example
///
/// ```rust
/// use ticketpack::config::RedactionNames;
/// use ticketpack::core::segmenter::Segmenter;
///
/// let segmenter = Segmenter::new(RedactionNames::parse_list("Pom, Wan")?);
/// let cleaned = segmenter.clean("[1/2/2024 9:00 AM] Pom: noted");
/// assert!(cleaned.is_empty());
/// # Ok::<(), ticketpack::TicketpackError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    names: RedactionNames,
}

impl Segmenter {
    /// Creates a segmenter that redacts `names`.
    pub fn new(names: RedactionNames) -> Self {
        Self { names }
    }

    /// Returns the configured names.
    pub fn names(&self) -> &RedactionNames {
        &self.names
    }

    /// Cleans one raw document.
    pub fn clean(&self, raw: &str) -> CleanedText {
        segment_and_redact(raw, &self.names)
    }
}
