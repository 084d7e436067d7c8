//! Vocabulary lookup and annotation of transcript text.
//!
//! A [`VocabularyIndex`] maps normalized headwords to entries. [`annotate`]
//! walks a line of text, tags the longest vocabulary phrase found at each
//! word and returns a lossless list of [`Segment`]s. [`OccurrenceIndex`]
//! does the same for a whole cue list and groups the hits by headword.
//!
//! ```rust
//! use kupu_types::VocabularyEntry;
//! use kupu_vocab::{VocabularyIndex, annotate, reconstruct, tagged};
//!
//! let index = VocabularyIndex::build([
//!     VocabularyEntry::new("v1", "ka pai", "good").unwrap(),
//!     VocabularyEntry::new("v2", "ka pai tonu", "very good indeed").unwrap(),
//! ]);
//! let segments = annotate("ka pai tonu", &index);
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].vocab_id(), Some("v2"));
//!
//! let line = "Kia ora, ka pai!";
//! let segments = annotate(line, &index);
//! assert_eq!(reconstruct(&segments), line);
//! assert_eq!(tagged(&segments).count(), 1);
//! ```

mod annotate;
mod index;
mod matcher;
mod occurrences;

pub use annotate::{annotate, reconstruct, tagged};
pub use index::{IndexError, VocabularyIndex};
pub use kupu_types::{LiteralKind, Segment, VocabularyEntry, normalize_key};
pub use matcher::{MAX_PHRASE_WORDS, PhraseMatch, find_longest_match, word_core};
pub use occurrences::{Occurrence, OccurrenceIndex, SearchResult};
