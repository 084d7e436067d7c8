use std::collections::HashMap;

use kupu_types::{Cue, Segment, normalize_key};
use serde::Serialize;
use tracing::debug;

use crate::annotate::annotate;
use crate::index::VocabularyIndex;

/// One place a vocabulary phrase is spoken.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub vocab_id: String,
    pub headword: String,
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub cue_id: String,
    /// 1-based position of the cue in the transcript.
    pub line_number: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub matched_text: String,
    pub cue_text: String,
}

/// Everything known about one phrase in a transcript.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'a> {
    pub headword: &'a str,
    pub translation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'a str>,
    pub occurrences: Vec<&'a Occurrence>,
    pub total_count: usize,
}

/// Every vocabulary hit of a transcript, grouped by headword key.
#[derive(Clone, Debug, Default)]
pub struct OccurrenceIndex {
    occurrences: Vec<Occurrence>,
    by_key: HashMap<String, Vec<usize>>,
    keys: Vec<String>,
}

impl OccurrenceIndex {
    pub fn build(cues: &[Cue], index: &VocabularyIndex) -> Self {
        let mut occurrences = Self::default();
        for (pos, cue) in cues.iter().enumerate() {
            for segment in annotate(&cue.text, index) {
                let Segment::Tagged {
                    matched_text,
                    entry,
                    ..
                } = segment
                else {
                    continue;
                };
                occurrences.push(Occurrence {
                    vocab_id: entry.id().to_string(),
                    headword: entry.headword().to_string(),
                    translation: entry.translation().to_string(),
                    note: entry.note().map(str::to_string),
                    cue_id: cue.id.clone(),
                    line_number: pos + 1,
                    start_time: cue.start_time,
                    end_time: cue.end_time,
                    matched_text,
                    cue_text: cue.text.clone(),
                });
            }
        }
        debug!(
            cues = cues.len(),
            occurrences = occurrences.len(),
            phrases = occurrences.keys.len(),
            "built occurrence index"
        );
        occurrences
    }

    fn push(&mut self, occurrence: Occurrence) {
        let key = normalize_key(&occurrence.headword);
        let slot = self.occurrences.len();
        self.by_key
            .entry(key)
            .or_insert_with_key(|key| {
                self.keys.push(key.clone());
                Vec::new()
            })
            .push(slot);
        self.occurrences.push(occurrence);
    }

    /// All occurrences of the headword `phrase` normalizes to.
    pub fn search(&self, phrase: &str) -> Option<SearchResult<'_>> {
        let slots = self.by_key.get(&normalize_key(phrase))?;
        let occurrences: Vec<&Occurrence> = slots.iter().map(|&i| &self.occurrences[i]).collect();
        let first = occurrences.first()?;
        Some(SearchResult {
            headword: &first.headword,
            translation: &first.translation,
            note: first.note.as_deref(),
            total_count: occurrences.len(),
            occurrences,
        })
    }

    /// Occurrences in transcript order.
    pub fn iter(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter()
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Distinct headword keys, in the order they first occur.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}
