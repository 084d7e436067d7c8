pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
mod session;

pub use config::{Config, OutputFormat};
pub use kupu_types::{Cue, Segment, VocabularyEntry};
pub use kupu_vocab::{OccurrenceIndex, VocabularyIndex};
pub use session::{ActiveCue, AnnotatedCue, Transcript};
