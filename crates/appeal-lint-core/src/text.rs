//! Text processing utilities.
//!
//! Sentence, word, and paragraph splitting for the quality scorer. The
//! splitting is intentionally plain: sentences end at `.`, `!`, or `?`, and
//! paragraphs are separated by blank lines.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for one or more blank lines (whitespace-only lines count as blank).
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("valid regex"));

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Split text into sentences on `.`, `!`, and `?`.
///
/// Runs of terminators (`?!`, `...`) end a single sentence. Fragments with
/// no words are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(is_sentence_terminator)
        .map(str::trim)
        .filter(|s| s.split_whitespace().next().is_some())
        .collect()
}

/// Extract words from text, splitting on whitespace and stripping punctuation.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Split text into paragraphs (separated by blank lines).
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Average words per sentence, or 0 when there are no sentences.
pub fn average_sentence_length(sentences: &[&str]) -> f64 {
    let words: usize = sentences
        .iter()
        .map(|s| s.split_whitespace().count())
        .sum();
    crate::scoring::ratio(words as f64, sentences.len() as f64)
}
