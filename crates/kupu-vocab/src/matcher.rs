use kupu_types::VocabularyEntry;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::index::VocabularyIndex;

/// Longest headword, in words, that the matcher will try.
pub const MAX_PHRASE_WORDS: usize = 5;

/// A vocabulary hit starting at some word position.
#[derive(Clone, Debug, PartialEq)]
pub struct PhraseMatch<'a> {
    pub entry: &'a VocabularyEntry,
    /// Number of words consumed, at least 1.
    pub word_count: usize,
    /// Cores of the matched words joined by single spaces, original casing.
    pub matched_text: String,
}

/// Find the longest vocabulary phrase that begins at `words[start]`.
///
/// Candidate lengths run from `min(MAX_PHRASE_WORDS, remaining)` down to 1.
/// At each length the word cores are joined with spaces and looked up, then
/// joined with hyphens, so `"ka pai"` in text also finds a `ka-pai` headword.
/// The first hit wins.
pub fn find_longest_match<'a>(
    words: &[&str],
    start: usize,
    index: &'a VocabularyIndex,
) -> Option<PhraseMatch<'a>> {
    if index.is_empty() || start >= words.len() {
        return None;
    }
    let max_len = MAX_PHRASE_WORDS.min(words.len() - start);
    let cores: Vec<&str> = words[start..start + max_len]
        .iter()
        .map(|word| word_core(word))
        .collect();
    let forms: Vec<String> = cores.iter().map(|core| match_form(core)).collect();

    for len in (1..=max_len).rev() {
        let candidate = &forms[..len];
        let entry = index
            .lookup(&candidate.join(" "))
            .or_else(|| (len > 1).then(|| index.lookup(&candidate.join("-"))).flatten());
        if let Some(entry) = entry {
            return Some(PhraseMatch {
                entry,
                word_count: len,
                matched_text: cores[..len].join(" "),
            });
        }
    }
    None
}

/// `word` without leading or trailing punctuation.
///
/// Letters, digits, combining marks and dashes survive at the edges;
/// anything else (commas, quotes, brackets, stops) is trimmed. Keeping marks
/// means a decomposed `pa\u{304}` keeps its macron.
pub fn word_core(word: &str) -> &str {
    word.trim_matches(|c: char| !is_core_char(c))
}

pub(crate) fn is_core_char(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c) || is_dash(c)
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '\u{2010}'..='\u{2014}' | '\u{2212}')
}

/// Form of a core used to build lookup keys: NFC-composed, dash variants
/// read as `-`.
fn match_form(core: &str) -> String {
    core.nfc()
        .map(|c| if is_dash(c) { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(headwords: &[&str]) -> VocabularyIndex {
        VocabularyIndex::build(
            headwords
                .iter()
                .map(|h| VocabularyEntry::new(*h, h, format!("{h}-en")).unwrap()),
        )
    }

    #[test]
    fn prefers_longest_phrase() {
        let idx = index(&["ka pai", "ka pai tonu"]);
        let words = ["ka", "pai", "tonu"];
        let m = find_longest_match(&words, 0, &idx).unwrap();
        assert_eq!(m.word_count, 3);
        assert_eq!(m.entry.id(), "ka pai tonu");
        assert_eq!(m.matched_text, "ka pai tonu");
    }

    #[test]
    fn falls_back_to_shorter_phrase() {
        let idx = index(&["ka pai", "ka pai tonu"]);
        let words = ["Ka", "pai", "rawa"];
        let m = find_longest_match(&words, 0, &idx).unwrap();
        assert_eq!(m.word_count, 2);
        assert_eq!(m.matched_text, "Ka pai");
    }

    #[test]
    fn strips_punctuation_from_word_edges() {
        let idx = index(&["kia ora"]);
        let words = ["\"Kia", "ora,", "e", "hoa."];
        let m = find_longest_match(&words, 0, &idx).unwrap();
        assert_eq!(m.word_count, 2);
        assert_eq!(m.matched_text, "Kia ora");
    }

    #[test]
    fn hyphenated_headword_matches_spaced_text() {
        let idx = index(&["ka-pai"]);
        let m = find_longest_match(&["ka", "pai"], 0, &idx).unwrap();
        assert_eq!(m.word_count, 2);
        assert_eq!(m.entry.headword(), "ka-pai");
    }

    #[test]
    fn dash_variants_read_as_hyphen() {
        let idx = index(&["ka-pai"]);
        let m = find_longest_match(&["ka\u{2011}pai!"], 0, &idx).unwrap();
        assert_eq!(m.word_count, 1);
        assert_eq!(m.matched_text, "ka\u{2011}pai");
    }

    #[test]
    fn decomposed_macrons_match_their_own_headword() {
        let idx = index(&["ka pa", "tō", "pā"]);
        let m = find_longest_match(&["ka", "pa\u{304}"], 0, &idx);
        assert!(m.is_none());
        let m = find_longest_match(&["pa\u{304}!"], 0, &idx).unwrap();
        assert_eq!(m.entry.id(), "pā");
        assert_eq!(m.matched_text, "pa\u{304}");
        let m = find_longest_match(&["To\u{304}"], 0, &idx).unwrap();
        assert_eq!(m.entry.id(), "tō");
    }

    #[test]
    fn never_looks_past_five_words() {
        let idx = index(&["a b c d e f"]);
        let words = ["a", "b", "c", "d", "e", "f"];
        assert!(find_longest_match(&words, 0, &idx).is_none());
    }

    #[test]
    fn out_of_range_and_empty_index() {
        let idx = index(&["pai"]);
        assert!(find_longest_match(&["pai"], 1, &idx).is_none());
        assert!(find_longest_match(&[], 0, &idx).is_none());
        let empty = VocabularyIndex::empty();
        assert!(find_longest_match(&["pai"], 0, &empty).is_none());
    }

    #[test]
    fn word_core_trims_only_edges() {
        assert_eq!(word_core("(tēnā!)"), "tēnā");
        assert_eq!(word_core("o-te"), "o-te");
        assert_eq!(word_core("\"...\""), "");
        assert_eq!(word_core("ngā"), "ngā");
        assert_eq!(word_core("(nga\u{304})"), "nga\u{304}");
    }
}
