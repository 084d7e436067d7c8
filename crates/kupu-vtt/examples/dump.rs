use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use kupu_vtt::{format_timestamp, parse_with_diagnostics, resolve_active_index};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p kupu-vtt --example dump -- <file.vtt> [seconds]")?;
    let at: Option<f64> = args
        .next()
        .map(|raw| raw.parse())
        .transpose()
        .context("seconds must be a number")?;

    let text =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let track = parse_with_diagnostics(&text);

    println!("Track: {}", path.display());
    println!("Cues   : {}", track.cues.len());
    println!("Skipped: {}", track.skipped.len());
    for cue in &track.cues {
        println!(
            "{:>4}  {} --> {}  {}",
            cue.id,
            format_timestamp(cue.start_time),
            format_timestamp(cue.end_time),
            cue.text
        );
    }
    for skipped in &track.skipped {
        println!("line {}: {}", skipped.line, skipped.reason);
    }

    if let Some(t) = at {
        match resolve_active_index(&track.cues, t) {
            Some(idx) => println!("Active at {t}s: cue #{} ({})", idx + 1, track.cues[idx].id),
            None => println!("Active at {t}s: none"),
        }
    }

    Ok(())
}
