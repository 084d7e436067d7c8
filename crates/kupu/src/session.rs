use std::sync::Arc;

use kupu_types::{Cue, Segment};
use kupu_vocab::{OccurrenceIndex, VocabularyIndex, annotate};
use kupu_vtt::{SkippedCue, parse_with_diagnostics, resolve_active_index};
use serde::Serialize;

/// The cue on screen at some playback time, already annotated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCue<'a> {
    /// Position in [`Transcript::cues`], for scrolling a transcript list.
    pub index: usize,
    pub cue: &'a Cue,
    pub segments: Vec<Segment<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AnnotatedCue<'a> {
    pub cue: &'a Cue,
    pub segments: Vec<Segment<'a>>,
}

/// One transcript paired with one vocabulary snapshot.
///
/// The vocabulary is shared, never mutated; use
/// [`with_vocabulary`](Self::with_vocabulary) to get a session over a newer
/// snapshot.
#[derive(Debug, Clone)]
pub struct Transcript {
    cues: Vec<Cue>,
    skipped: Vec<SkippedCue>,
    vocabulary: Arc<VocabularyIndex>,
}

impl Transcript {
    pub fn new(cues: Vec<Cue>, vocabulary: Arc<VocabularyIndex>) -> Self {
        Self {
            cues,
            skipped: Vec::new(),
            vocabulary,
        }
    }

    pub fn from_vtt(text: &str, vocabulary: Arc<VocabularyIndex>) -> Self {
        let track = parse_with_diagnostics(text);
        Self {
            cues: track.cues,
            skipped: track.skipped,
            vocabulary,
        }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Blocks dropped while parsing; empty for sessions built with [`new`](Self::new).
    pub fn skipped(&self) -> &[SkippedCue] {
        &self.skipped
    }

    pub fn vocabulary(&self) -> &Arc<VocabularyIndex> {
        &self.vocabulary
    }

    pub fn active_at(&self, t: f64) -> Option<ActiveCue<'_>> {
        let index = resolve_active_index(&self.cues, t)?;
        let cue = &self.cues[index];
        Some(ActiveCue {
            index,
            cue,
            segments: annotate(&cue.text, &self.vocabulary),
        })
    }

    pub fn annotated(&self) -> Vec<AnnotatedCue<'_>> {
        self.cues
            .iter()
            .map(|cue| AnnotatedCue {
                cue,
                segments: annotate(&cue.text, &self.vocabulary),
            })
            .collect()
    }

    pub fn occurrences(&self) -> OccurrenceIndex {
        OccurrenceIndex::build(&self.cues, &self.vocabulary)
    }

    pub fn with_vocabulary(&self, vocabulary: Arc<VocabularyIndex>) -> Self {
        Self {
            cues: self.cues.clone(),
            skipped: self.skipped.clone(),
            vocabulary,
        }
    }
}
