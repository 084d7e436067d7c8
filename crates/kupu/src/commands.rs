use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use kupu_types::Cue;
use kupu_vocab::VocabularyIndex;
use kupu_vtt::SkippedCue;
use serde::Serialize;
use tracing::debug;

use crate::cli::Command;
use crate::config::{Config, OutputFormat};
use crate::render;
use crate::session::Transcript;

#[derive(Serialize)]
struct Track<'a> {
    cues: &'a [Cue],
    skipped: &'a [SkippedCue],
}

/// Execute one subcommand and return what should be printed.
pub fn run(command: &Command, config: &Config) -> Result<String> {
    let path = command.vtt_path();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let vocabulary = if command.needs_vocabulary() {
        config.load_vocabulary()?
    } else {
        Arc::new(VocabularyIndex::empty())
    };
    let transcript = Transcript::from_vtt(&text, vocabulary);
    debug!(
        cues = transcript.cues().len(),
        skipped = transcript.skipped().len(),
        vocabulary = transcript.vocabulary().len(),
        "transcript ready"
    );

    let json = config.output == OutputFormat::Json;
    match command {
        Command::Cues { .. } => {
            if json {
                to_json(&Track {
                    cues: transcript.cues(),
                    skipped: transcript.skipped(),
                })
            } else {
                Ok(render::cues(transcript.cues(), transcript.skipped()))
            }
        }
        Command::Active { at, .. } => {
            let active = transcript.active_at(*at);
            if json {
                to_json(&active)
            } else {
                Ok(render::active(*at, active.as_ref()))
            }
        }
        Command::Annotate { .. } => {
            let annotated = transcript.annotated();
            if json {
                to_json(&annotated)
            } else {
                Ok(render::annotated(&annotated))
            }
        }
        Command::Occurrences { phrase, .. } => {
            let occurrences = transcript.occurrences();
            match phrase {
                Some(phrase) => {
                    let result = occurrences.search(phrase);
                    if json {
                        to_json(&result)
                    } else {
                        Ok(render::search(phrase, result.as_ref()))
                    }
                }
                None if json => to_json(&occurrences.iter().collect::<Vec<_>>()),
                None => Ok(render::occurrences(occurrences.iter())),
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing output")
}
