use std::fmt;

use kupu_types::Cue;
use serde::Serialize;
use tracing::{debug, warn};

use crate::timestamp::{TimingError, parse_timing_line};

/// Result of a parse, including the cue blocks that were dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParsedTrack {
    pub cues: Vec<Cue>,
    pub skipped: Vec<SkippedCue>,
}

/// A cue block that did not make it into the output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedCue {
    /// 1-based line number of the block's timing line.
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    BadTiming(String),
    NoText,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BadTiming(detail) => write!(f, "bad timing: {detail}"),
            SkipReason::NoText => f.write_str("cue has no text"),
        }
    }
}

/// Parse WebVTT text into cues, in source order.
///
/// Never fails: malformed blocks are dropped and logged. Use
/// [`parse_with_diagnostics`] to see what was dropped.
pub fn parse(text: &str) -> Vec<Cue> {
    parse_with_diagnostics(text).cues
}

/// Parse WebVTT text, reporting every dropped cue block.
pub fn parse_with_diagnostics(text: &str) -> ParsedTrack {
    let lines: Vec<&str> = text
        .strip_prefix('\u{feff}')
        .unwrap_or(text)
        .split('\n')
        .map(|line| strip_cr(line).trim())
        .collect();

    let mut reader = Reader::new();
    for (idx, line) in lines.iter().enumerate() {
        let next_is_timing = lines.get(idx + 1).is_some_and(|next| is_timing(next));
        reader.feed(idx + 1, line, next_is_timing);
    }
    let track = reader.finish();

    debug!(
        cues = track.cues.len(),
        skipped = track.skipped.len(),
        "parsed vtt track"
    );
    track
}

/// Cue being assembled after a successful timing line.
struct PendingCue {
    line: usize,
    id: Option<String>,
    start: f64,
    end: f64,
    text: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Normal,
    /// Header, `NOTE`, `STYLE` or `REGION` block: ignored until a blank line.
    SkipBlock,
    /// Text lines under a timing line that failed to parse.
    SkipCue,
}

#[derive(Default)]
struct Reader {
    seen_content: bool,
    at_block_start: bool,
    mode: Mode,
    pending_id: Option<String>,
    current: Option<PendingCue>,
    track: ParsedTrack,
}

impl Reader {
    fn new() -> Self {
        Self {
            at_block_start: true,
            ..Self::default()
        }
    }

    fn feed(&mut self, line_no: usize, line: &str, next_is_timing: bool) {
        if line.is_empty() {
            self.at_block_start = true;
            if self.mode == Mode::SkipBlock {
                self.mode = Mode::Normal;
            }
            return;
        }
        let block_start = std::mem::replace(&mut self.at_block_start, false);
        let first = !std::mem::replace(&mut self.seen_content, true);

        if is_timing(line) {
            self.start_cue(line_no, line);
            return;
        }

        if first && line.starts_with("WEBVTT") {
            self.mode = Mode::SkipBlock;
            return;
        }

        // Only a line opening a block can name the next cue; a line inside
        // a cue stays text even when the next cue follows without a blank.
        if block_start && next_is_timing {
            self.pending_id = Some(line.to_string());
            return;
        }

        if block_start && is_metadata_block(line) {
            self.mode = Mode::SkipBlock;
            return;
        }

        if self.mode != Mode::Normal {
            return;
        }
        match self.current.as_mut() {
            Some(cue) => cue.text.push(line.to_string()),
            None => debug!(line = line_no, "ignoring text outside of any cue"),
        }
    }

    fn start_cue(&mut self, line_no: usize, line: &str) {
        self.flush();
        let id = self.pending_id.take();

        match parse_timing_line(line) {
            Ok((start, end)) => {
                self.mode = Mode::Normal;
                self.current = Some(PendingCue {
                    line: line_no,
                    id,
                    start,
                    end,
                    text: Vec::new(),
                });
            }
            Err(err) => {
                warn!(line = line_no, error = %err, "skipping cue with malformed timing");
                self.skip_cue(line_no, &err);
            }
        }
    }

    fn skip_cue(&mut self, line_no: usize, err: &TimingError) {
        self.mode = Mode::SkipCue;
        self.track.skipped.push(SkippedCue {
            line: line_no,
            reason: SkipReason::BadTiming(err.to_string()),
        });
    }

    fn flush(&mut self) {
        let Some(cue) = self.current.take() else {
            return;
        };
        if cue.text.is_empty() {
            debug!(line = cue.line, "dropping cue without text");
            self.track.skipped.push(SkippedCue {
                line: cue.line,
                reason: SkipReason::NoText,
            });
            return;
        }
        let ordinal = self.track.cues.len() + 1;
        self.track.cues.push(Cue {
            id: cue.id.unwrap_or_else(|| ordinal.to_string()),
            start_time: cue.start,
            end_time: cue.end,
            text: cue.text.join(" "),
        });
    }

    fn finish(mut self) -> ParsedTrack {
        self.flush();
        self.track
    }
}

fn is_timing(line: &str) -> bool {
    line.contains("-->")
}

fn is_metadata_block(line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"].iter().any(|keyword| {
        line.strip_prefix(*keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_cue() {
        let cues = parse("WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\nHello world\n");
        assert_eq!(cues, vec![Cue::new("1", 0.0, 2.0, "Hello world")]);
    }

    #[test]
    fn joins_multiline_text_with_single_space() {
        let cues = parse("WEBVTT\n\n1\n00:00:01.000 --> 00:00:03.000\n  Kia ora  \ne hoa\n");
        assert_eq!(cues[0].text, "Kia ora e hoa");
    }

    #[test]
    fn header_metadata_and_notes_are_ignored() {
        let input = "WEBVTT - Kupu\nKind: captions\nLanguage: mi\n\nNOTE authored by hand\nsecond note line\n\n1\n00:00:01.000 --> 00:00:02.000\nKia ora\n\nNOTE\ntrailing\n\n2\n00:00:03.000 --> 00:00:04.000\nKa pai\n";
        let cues = parse(input);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Kia ora");
        assert_eq!(cues[1].text, "Ka pai");
    }

    #[test]
    fn style_block_is_skipped() {
        let input = "WEBVTT\n\nSTYLE\n::cue { color: lime }\n\n00:00:01.000 --> 00:00:02.000\nKia ora\n";
        let cues = parse(input);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Kia ora");
    }

    #[test]
    fn crlf_and_bom_are_tolerated() {
        let input = "\u{feff}WEBVTT\r\n\r\n1\r\n00:00:01.000 --> 00:00:02.000\r\nKia ora\r\n";
        let cues = parse(input);
        assert_eq!(cues, vec![Cue::new("1", 1.0, 2.0, "Kia ora")]);
    }

    #[test]
    fn numeric_text_line_is_not_an_identifier() {
        let input = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nTatau:\n42\n";
        let cues = parse(input);
        assert_eq!(cues[0].id, "1");
        assert_eq!(cues[0].text, "Tatau: 42");
    }

    #[test]
    fn cue_text_directly_above_next_timing_stays_text() {
        let input = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\nHello\n00:00:02.000 --> 00:00:04.000\nWorld\n";
        let track = parse_with_diagnostics(input);
        assert_eq!(
            track.cues,
            vec![
                Cue::new("1", 0.0, 2.0, "Hello"),
                Cue::new("2", 2.0, 4.0, "World"),
            ]
        );
        assert!(track.skipped.is_empty());
    }

    #[test]
    fn number_inside_cue_above_next_timing_stays_text() {
        let input = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\nTatau:\n42\n00:00:02.000 --> 00:00:04.000\nWorld\n";
        let cues = parse(input);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Tatau: 42");
        assert_eq!(cues[1].id, "2");
        assert_eq!(cues[1].text, "World");
    }

    #[test]
    fn textual_identifier_is_kept() {
        let input = "WEBVTT\n\nintro\n00:00:01.000 --> 00:00:02.000\nKia ora\n";
        assert_eq!(parse(input)[0].id, "intro");
    }

    #[test]
    fn cue_without_text_is_reported() {
        let input = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\n\n2\n00:00:03.000 --> 00:00:04.000\nKa pai\n";
        let track = parse_with_diagnostics(input);
        assert_eq!(track.cues, vec![Cue::new("2", 3.0, 4.0, "Ka pai")]);
        assert_eq!(
            track.skipped,
            vec![SkippedCue {
                line: 4,
                reason: SkipReason::NoText
            }]
        );
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::NoText.to_string(), "cue has no text");
        assert_eq!(
            SkipReason::BadTiming("missing '-->' in timing line".into()).to_string(),
            "bad timing: missing '-->' in timing line"
        );
    }
}
