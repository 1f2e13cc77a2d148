use crate::srt::TimedEntry;

use log::debug;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::space0;
use nom::combinator::map_res;
use nom::IResult;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static STYLE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").unwrap());

/// Parses raw SRT text into timed transcript entries.
///
/// Never fails: blocks that cannot be interpreted as a cue (no timing
/// line, unreadable time-code, end before start) are skipped, and
/// whatever could be extracted is returned in file order. An empty
/// result is valid output, not an error.
pub fn parse(raw: &str) -> Vec<TimedEntry> {
    let raw = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);
    blocks(raw)
        .into_iter()
        .filter_map(|block| {
            let entry = cue(&block);
            if entry.is_none() {
                debug!("Skipping unreadable cue block: {:?}", block.first());
            }
            entry
        })
        .collect()
}

/// Splits the input into candidate cue blocks, separated by one or more
/// blank lines. A line containing only whitespace counts as blank.
fn blocks(input: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in input.lines() {
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

/// Parses a single block into an entry, or `None` if the block is not a
/// well-formed cue. The timing line must be the first or second line of
/// the block; an optional numeric index line may precede it.
fn cue(lines: &[&str]) -> Option<TimedEntry> {
    let timing_at = lines.iter().take(2).position(|l| l.contains("-->"))?;
    let (start_millis, end_millis) = timing_line(lines[timing_at])?;
    if end_millis < start_millis {
        return None;
    }
    Some(TimedEntry {
        start_seconds: start_millis as f64 / 1000.0,
        end_seconds: end_millis as f64 / 1000.0,
        text: caption_text(&lines[timing_at + 1..]),
    })
}

/// Joins the text lines of a cue with single spaces and strips `<...>`
/// tag spans and `{...}` styling directives.
fn caption_text(lines: &[&str]) -> String {
    let joined = lines.join(" ");
    let stripped = TAG_SPAN.replace_all(&joined, "");
    let stripped = STYLE_SPAN.replace_all(&stripped, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn timing_line(line: &str) -> Option<(u64, u64)> {
    match show_hide(line) {
        Ok((_, range)) => Some(range),
        Err(_) => None,
    }
}

fn show_hide(input: &str) -> IResult<&str, (u64, u64)> {
    let (input, _) = space0(input)?;
    let (input, show_at) = timestamp(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space0(input)?;
    let (input, hide_at) = timestamp(input)?;

    Ok((input, (show_at, hide_at)))
}

/// Parses a `HH:MM:SS,mmm` time-code into milliseconds. A `.` before the
/// milliseconds is accepted as well as the canonical `,`.
fn timestamp(input: &str) -> IResult<&str, u64> {
    const MILLIS_MIN: usize = 0;
    const MILLIS_MAX: usize = 3;
    let take_millis = || {
        map_res(
            take_while_m_n(MILLIS_MIN, MILLIS_MAX, |c: char| c.is_digit(10)),
            move |s: &str| {
                if s.len() < MILLIS_MAX {
                    // Sometimes, a milliseconds value like `,2` may be encountered.
                    // This is not valid SRT, but we must be able to handle it anyway.
                    // We choose to interpret this as `,200`. In other words, we right-pad
                    // every string until it reaches a length of 3 characters.
                    let millis = format!("{:0<3}", s);
                    millis.parse()
                } else {
                    s.parse()
                }
            },
        )
    };

    const HMS_MIN: usize = 1;
    const HMS_MAX: usize = 2;
    let take_hms = || {
        map_res(
            take_while_m_n(HMS_MIN, HMS_MAX, |c: char| c.is_digit(10)),
            |s: &str| {
                if s.len() < HMS_MAX {
                    // Here we left-pad the value instead, because it makes more
                    // sense to treat 1:13:45 as 01:13:45 than as 10:13:45.
                    let padded = format!("{:0>2}", s);
                    padded.parse()
                } else {
                    s.parse()
                }
            },
        )
    };

    let (input, hours): (_, u64) = take_hms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = take_hms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = take_hms()(input)?;
    let (input, _) = alt((tag(","), tag(".")))(input)?;
    let (input, millis): (_, u64) = take_millis()(input)?;

    Ok((
        input,
        millis + seconds * 1000 + minutes * 60 * 1000 + hours * 60 * 60 * 1000,
    ))
}
