use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kupu")]
#[command(about = "Inspect WebVTT transcripts and annotate them with vocabulary")]
pub struct Cli {
    /// Vocabulary JSON file. Falls back to KUPU_VOCAB_PATH.
    #[arg(long, global = true)]
    pub vocab: Option<PathBuf>,
    /// Print JSON instead of text. KUPU_OUTPUT=json does the same.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List parsed cues and the blocks that were dropped.
    Cues { vtt: PathBuf },
    /// Show the cue on screen at a playback time.
    Active {
        vtt: PathBuf,
        /// Playback time in seconds.
        #[arg(long, allow_negative_numbers = true)]
        at: f64,
    },
    /// Print every cue with vocabulary marked as [text]{translation}.
    Annotate { vtt: PathBuf },
    /// List where vocabulary occurs, or search for one phrase.
    Occurrences {
        vtt: PathBuf,
        #[arg(long)]
        phrase: Option<String>,
    },
}

impl Command {
    pub fn vtt_path(&self) -> &PathBuf {
        match self {
            Command::Cues { vtt }
            | Command::Active { vtt, .. }
            | Command::Annotate { vtt }
            | Command::Occurrences { vtt, .. } => vtt,
        }
    }

    pub fn needs_vocabulary(&self) -> bool {
        !matches!(self, Command::Cues { .. })
    }
}
