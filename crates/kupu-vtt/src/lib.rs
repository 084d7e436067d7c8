//! Read WebVTT subtitle tracks into [`Cue`]s and find the cue on screen.
//!
//! The reader is line-oriented and forgiving: header metadata, `NOTE`,
//! `STYLE` and `REGION` blocks are skipped, cue settings after the end
//! timestamp are ignored, and a cue whose timing line cannot be parsed is
//! dropped (and logged) without disturbing its neighbours. Parsing never
//! fails as a whole.
//!
//! Cue blocks without an identifier line are kept; their id is their 1-based
//! position in the returned list.
//!
//! # Example
//! ```rust
//! use kupu_vtt::{parse, resolve_active};
//!
//! let vtt = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.500\nKia ora, e hoa.\n\n\
//!            2\n00:00:05.000 --> 00:00:08.250\nKa pai tō mahi.\n";
//! let cues = parse(vtt);
//! assert_eq!(cues.len(), 2);
//! assert_eq!(resolve_active(&cues, 6.0).unwrap().id, "2");
//! assert!(resolve_active(&cues, 4.75).is_none());
//! ```
//!
//! For a runnable demo, see `cargo run -p kupu-vtt --example dump -- <file.vtt>`.

mod parser;
mod resolver;
mod timestamp;

pub use kupu_types::Cue;
pub use parser::{ParsedTrack, SkipReason, SkippedCue, parse, parse_with_diagnostics};
pub use resolver::{resolve_active, resolve_active_index};
pub use timestamp::{
    TimestampError, TimingError, format_clock, format_timestamp, parse_timestamp,
    parse_timing_line,
};
