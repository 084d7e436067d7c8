//! Plain-text output for the command-line tool.

use kupu_types::{Cue, Segment};
use kupu_vocab::{Occurrence, SearchResult};
use kupu_vtt::{SkippedCue, format_clock, format_timestamp};

use crate::session::{ActiveCue, AnnotatedCue};

/// Inline markup: tagged spans become `[text]{translation}`.
pub fn segments(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Tagged { text, entry, .. } => {
                out.push_str(&format!("[{text}]{{{}}}", entry.translation()));
            }
            Segment::Literal { text, .. } => out.push_str(text),
        }
    }
    out
}

pub fn cues(cues: &[Cue], skipped: &[SkippedCue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&format!(
            "{}\t{} --> {}\t{}\n",
            cue.id,
            format_timestamp(cue.start_time),
            format_timestamp(cue.end_time),
            cue.text
        ));
    }
    for skipped in skipped {
        out.push_str(&format!(
            "skipped line {}: {}\n",
            skipped.line, skipped.reason
        ));
    }
    out
}

pub fn active(t: f64, active: Option<&ActiveCue<'_>>) -> String {
    match active {
        Some(active) => format!(
            "{} #{} {}",
            format_clock(active.cue.start_time),
            active.cue.id,
            segments(&active.segments)
        ),
        None => format!("no cue at {t}s"),
    }
}

pub fn annotated(cues: &[AnnotatedCue<'_>]) -> String {
    let mut out = String::new();
    for annotated in cues {
        out.push_str(&format!(
            "{:>6}  {}\n",
            format_clock(annotated.cue.start_time),
            segments(&annotated.segments)
        ));
    }
    out
}

pub fn occurrences<'a, I>(occurrences: I) -> String
where
    I: IntoIterator<Item = &'a Occurrence>,
{
    let mut out = String::new();
    for occ in occurrences {
        out.push_str(&format!(
            "{} ({})\tcue {} line {} at {}\t{}\n",
            occ.headword,
            occ.translation,
            occ.cue_id,
            occ.line_number,
            format_clock(occ.start_time),
            occ.matched_text
        ));
    }
    out
}

pub fn search(phrase: &str, result: Option<&SearchResult<'_>>) -> String {
    let Some(result) = result else {
        return format!("no occurrences of '{phrase}'");
    };
    let mut out = format!(
        "{} = {} ({} occurrences)\n",
        result.headword, result.translation, result.total_count
    );
    if let Some(note) = result.note {
        out.push_str(&format!("  {note}\n"));
    }
    out.push_str(&occurrences(result.occurrences.iter().copied()));
    out
}
