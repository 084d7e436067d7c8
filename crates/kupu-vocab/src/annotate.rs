use kupu_types::{LiteralKind, Segment, VocabularyEntry};

use crate::index::VocabularyIndex;
use crate::matcher::{find_longest_match, is_core_char, word_core};

/// A maximal whitespace or non-whitespace run, as byte offsets into the text.
#[derive(Clone, Copy, Debug)]
struct Slot {
    start: usize,
    end: usize,
    space: bool,
}

/// Slots `first..=last` claimed by one vocabulary match.
struct Span<'a> {
    first: usize,
    last: usize,
    entry: &'a VocabularyEntry,
    matched_text: String,
}

/// Segment `text` into literal and vocabulary-tagged pieces.
///
/// Matching is greedy from left to right: at every word the longest phrase
/// found by [`find_longest_match`] is taken and the cursor jumps past it, so
/// tagged spans never overlap. Whitespace between matched words belongs to
/// the tagged segment. Joining the `text()` of every returned segment gives
/// back `text` unchanged.
pub fn annotate<'a>(text: &'a str, index: &'a VocabularyIndex) -> Vec<Segment<'a>> {
    let slots = split_slots(text);

    // Word position -> slot position. Slots that are pure punctuation are
    // not words and never start or extend a match.
    let word_slots: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| !slot.space && !word_core(slice(text, slot)).is_empty())
        .map(|(pos, _)| pos)
        .collect();
    let words: Vec<&str> = word_slots
        .iter()
        .map(|&pos| slice(text, &slots[pos]))
        .collect();

    let mut spans = Vec::new();
    let mut cursor = 0;
    while cursor < words.len() {
        match find_longest_match(&words, cursor, index) {
            Some(found) => {
                spans.push(Span {
                    first: word_slots[cursor],
                    last: word_slots[cursor + found.word_count - 1],
                    entry: found.entry,
                    matched_text: found.matched_text,
                });
                cursor += found.word_count;
            }
            None => cursor += 1,
        }
    }

    let mut segments = Vec::with_capacity(slots.len());
    let mut spans = spans.into_iter().peekable();
    let mut pos = 0;
    while pos < slots.len() {
        if let Some(span) = spans.next_if(|span| span.first == pos) {
            segments.push(Segment::Tagged {
                text: &text[slots[span.first].start..slots[span.last].end],
                matched_text: span.matched_text,
                entry: span.entry,
            });
            pos = span.last + 1;
            continue;
        }
        let slot = &slots[pos];
        if slot.space {
            segments.push(Segment::Literal {
                text: slice(text, slot),
                kind: LiteralKind::Whitespace,
            });
        } else {
            push_word_literals(slice(text, slot), &mut segments);
        }
        pos += 1;
    }
    segments
}

/// Concatenate segment texts.
pub fn reconstruct(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Only the vocabulary-tagged segments, in order.
pub fn tagged<'s, 'a>(segments: &'s [Segment<'a>]) -> impl Iterator<Item = &'s Segment<'a>> {
    segments.iter().filter(|segment| segment.is_tagged())
}

fn split_slots(text: &str) -> Vec<Slot> {
    let mut slots: Vec<Slot> = Vec::new();
    for (offset, c) in text.char_indices() {
        let space = c.is_whitespace();
        let end = offset + c.len_utf8();
        match slots.last_mut() {
            Some(slot) if slot.space == space => slot.end = end,
            _ => slots.push(Slot {
                start: offset,
                end,
                space,
            }),
        }
    }
    slots
}

fn slice<'a>(text: &'a str, slot: &Slot) -> &'a str {
    &text[slot.start..slot.end]
}

/// Unmatched word slot: leading punctuation, core, trailing punctuation.
fn push_word_literals<'a>(raw: &'a str, out: &mut Vec<Segment<'a>>) {
    let rest = raw.trim_start_matches(|c: char| !is_core_char(c));
    let lead = &raw[..raw.len() - rest.len()];
    let core = rest.trim_end_matches(|c: char| !is_core_char(c));
    let trail = &rest[core.len()..];

    for (text, kind) in [
        (lead, LiteralKind::Punctuation),
        (core, LiteralKind::Word),
        (trail, LiteralKind::Punctuation),
    ] {
        if !text.is_empty() {
            out.push(Segment::Literal { text, kind });
        }
    }
}
