//! Shared types for subtitle cues, vocabulary entries and annotated text.
//!
//! Every other kupu crate speaks these types: the VTT reader produces
//! [`Cue`]s, the vocabulary crate keys [`VocabularyEntry`] values by
//! [`normalize_key`] and hands back [`Segment`]s that borrow from both the
//! annotated text and the index.
//!
//! ```rust
//! use kupu_types::{Cue, VocabularyEntry, normalize_key};
//!
//! let cue = Cue::new("1", 1.0, 4.5, "Kia ora, e hoa.");
//! assert!(cue.contains(4.5));
//!
//! let entry = VocabularyEntry::new("v1", "  Kia Ora ", "hello").unwrap();
//! assert_eq!(entry.headword(), "Kia Ora");
//! assert_eq!(normalize_key(entry.headword()), "kia ora");
//! ```

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// One timed subtitle unit. Times are seconds, inclusive on both ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    pub id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl Cue {
    pub fn new(
        id: impl Into<String>,
        start_time: f64,
        end_time: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// `true` when `t` lies inside `[start_time, end_time]`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_time && t <= self.end_time
    }

    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }
}

/// Lookup key for a headword or a candidate phrase: lowercased, NFC-composed,
/// then trimmed.
///
/// Composition makes `"to\u{304}"` and `"tō"` the same key. Internal
/// whitespace is kept as-is, so `"kia  ora"` and `"kia ora"` are different
/// keys.
pub fn normalize_key(phrase: &str) -> String {
    let folded: String = phrase.to_lowercase().nfc().collect();
    folded.trim().to_string()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("vocabulary headword is empty")]
    EmptyHeadword,
}

/// A dictionary item. The headword is always trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    id: String,
    headword: String,
    translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pronunciation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl VocabularyEntry {
    pub fn new(
        id: impl Into<String>,
        headword: &str,
        translation: impl Into<String>,
    ) -> Result<Self, EntryError> {
        let headword = headword.trim();
        if headword.is_empty() {
            return Err(EntryError::EmptyHeadword);
        }
        Ok(Self {
            id: id.into(),
            headword: headword.to_string(),
            translation: translation.into(),
            pronunciation: None,
            note: None,
        })
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn headword(&self) -> &str {
        &self.headword
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn pronunciation(&self) -> Option<&str> {
        self.pronunciation.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Vocabulary record as delivered by the REST collaborator.
///
/// `maori` becomes the headword, `english` the translation and `description`
/// the note. Empty optional strings are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub maori: String,
    pub english: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<VocabularyRecord> for VocabularyEntry {
    type Error = EntryError;

    fn try_from(record: VocabularyRecord) -> Result<Self, Self::Error> {
        let id = non_empty(record.id).unwrap_or_else(|| normalize_key(&record.maori));
        let mut entry = VocabularyEntry::new(id, &record.maori, record.english)?;
        entry.pronunciation = non_empty(record.pronunciation);
        entry.note = non_empty(record.description);
        Ok(entry)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Presentation class of a literal segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Whitespace,
    Word,
    Punctuation,
}

/// One piece of an annotated text.
///
/// `text` is always the exact slice of the input this segment covers, so the
/// segments of one annotation concatenate back to the original string.
///
/// Serialized with a `type` tag of `literal` or `tagged`; tagged segments also
/// carry `vocabId` next to the nested `entry`.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment<'a> {
    Literal {
        text: &'a str,
        kind: LiteralKind,
    },
    Tagged {
        text: &'a str,
        matched_text: String,
        entry: &'a VocabularyEntry,
    },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Literal { text, .. } | Segment::Tagged { text, .. } => *text,
        }
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, Segment::Tagged { .. })
    }

    pub fn entry(&self) -> Option<&'a VocabularyEntry> {
        match self {
            Segment::Tagged { entry, .. } => Some(*entry),
            Segment::Literal { .. } => None,
        }
    }

    pub fn vocab_id(&self) -> Option<&'a str> {
        self.entry().map(VocabularyEntry::id)
    }
}

impl Serialize for Segment<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Segment::Literal { text, kind } => {
                let mut out = serializer.serialize_struct("Segment", 3)?;
                out.serialize_field("type", "literal")?;
                out.serialize_field("text", text)?;
                out.serialize_field("kind", kind)?;
                out.end()
            }
            Segment::Tagged {
                text,
                matched_text,
                entry,
            } => {
                let mut out = serializer.serialize_struct("Segment", 5)?;
                out.serialize_field("type", "tagged")?;
                out.serialize_field("text", text)?;
                out.serialize_field("matchedText", matched_text)?;
                out.serialize_field("vocabId", entry.id())?;
                out.serialize_field("entry", entry)?;
                out.end()
            }
        }
    }
}
