//! Deterministic prompt construction (spec ch. 4.4).
//!
//! Every function here is a pure string builder: same inputs, same text,
//! byte for byte. That determinism is part of the external contract —
//! tests snapshot exact prompt text rather than just shape.

use crate::syllable::{format_count_pattern, format_word_pattern, WordSyllables};
use crate::types::{format_keywords, KeywordMap};

const MAX_CONTEXT_LINES: usize = 8;

fn join_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        "(none yet)".to_string()
    } else {
        lines.join(" / ")
    }
}

/// Everything the initial-generation prompt needs beyond the original line
/// itself. Constructed by the engine from its pre-pass and per-line context
/// gather (spec ch. 4.5 step 1).
pub struct RhymeConstraint<'a> {
    pub group: &'a str,
    pub scheme: &'a str,
    pub peer_lines: &'a [String],
}

/// Build the initial-generation prompt.
#[allow(clippy::too_many_arguments)]
pub fn initial_prompt(
    original_line: &str,
    total_syllables: usize,
    keywords: &KeywordMap,
    previous_lines: &[String],
    word_syllables: &WordSyllables,
    rhyme: &RhymeConstraint,
) -> String {
    let previous = previous_lines
        .iter()
        .rev()
        .take(MAX_CONTEXT_LINES)
        .rev()
        .cloned()
        .collect::<Vec<_>>();

    format!(
        "Write one new lyric line that replaces the original line below.\n\
         Original line: \"{original}\"\n\
         Target syllable count: {total}\n\
         Word-by-word syllable pattern: {pattern}\n\
         Keywords to weave in (keyword: definition): {keywords}\n\
         Previous lines so far: {previous}\n\
         Rhyme group: {group} (scheme so far: {scheme}); lines already in this rhyme group: {peers}\n\
         Output only the new line, nothing else.",
        original = original_line,
        total = total_syllables,
        pattern = format_word_pattern(word_syllables),
        keywords = format_keywords(keywords),
        previous = join_lines(&previous),
        group = rhyme.group,
        scheme = rhyme.scheme,
        peers = join_lines(rhyme.peer_lines),
    )
}

/// Build the word-syllable refinement prompt.
pub fn word_syllable_refinement_prompt(
    current_candidate: &str,
    required: &WordSyllables,
    actual: &WordSyllables,
) -> String {
    format!(
        "The line below must have exactly this per-word syllable pattern: {required}\n\
         Its current pattern is: {actual}\n\
         Line: \"{line}\"\n\
         Rewrite it to match the required pattern exactly while keeping its theme and rhyme. \
         Output only the rewritten line.",
        required = format_count_pattern(required),
        actual = format_count_pattern(actual),
        line = current_candidate,
    )
}

/// Build the semantic-coherence refinement prompt.
pub fn semantic_coherence_prompt(
    current_candidate: &str,
    previous_lines: &[String],
    required: &WordSyllables,
) -> String {
    let previous = previous_lines
        .iter()
        .rev()
        .take(MAX_CONTEXT_LINES)
        .rev()
        .cloned()
        .collect::<Vec<_>>();

    format!(
        "Previous accepted lines: {previous}\n\
         Current line: \"{line}\"\n\
         Rewrite the current line so it advances the same theme as the previous lines, \
         keeping this exact per-word syllable pattern: {pattern}\n\
         Output only the rewritten line.",
        previous = join_lines(&previous),
        line = current_candidate,
        pattern = format_count_pattern(required),
    )
}

/// The multiset of punctuation characters present in `line`, in first-seen
/// order, rendered as a plain string (e.g. a line ending in `"!"` and
/// containing one `","` renders as `",!"`).
fn punctuation_summary(line: &str) -> String {
    line.chars().filter(|c| c.is_ascii_punctuation()).collect()
}

/// A coarse capitalization pattern: `U` for each word token whose first
/// letter is uppercase, `l` otherwise, in order.
fn capitalization_pattern(line: &str) -> String {
    crate::token::tokenize_line(line)
        .tokens
        .iter()
        .map(|t| if t.is_first_letter_uppercase { 'U' } else { 'l' })
        .collect()
}

/// Build the punctuation/capitalization refinement prompt.
pub fn punctuation_capitalization_prompt(current_candidate: &str, original_line: &str) -> String {
    format!(
        "Original line: \"{original}\"\n\
         Original punctuation characters: {punct}\n\
         Original capitalization pattern (U=capitalized, l=lowercase, one per word): {caps}\n\
         Line to rewrite: \"{line}\"\n\
         Rewrite it to match the original's punctuation and capitalization pattern while \
         keeping its own words and meaning. Output only the rewritten line.",
        original = original_line,
        punct = punctuation_summary(original_line),
        caps = capitalization_pattern(original_line),
        line = current_candidate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllable::analyze_line;

    fn keywords() -> KeywordMap {
        let mut k = KeywordMap::new();
        k.insert("ocean".to_string(), "a vast body of salt water".to_string());
        k
    }

    #[test]
    fn test_initial_prompt_deterministic() {
        let ws = analyze_line("hello world");
        let rhyme = RhymeConstraint {
            group: "A",
            scheme: "AB",
            peer_lines: &[],
        };
        let p1 = initial_prompt("Hello world", 3, &keywords(), &[], &ws, &rhyme);
        let p2 = initial_prompt("Hello world", 3, &keywords(), &[], &ws, &rhyme);
        assert_eq!(p1, p2);
        assert!(p1.contains("Target syllable count: 3"));
        assert!(p1.contains("hello(2) world(1)"));
        assert!(p1.contains("ocean: a vast body of salt water"));
        assert!(p1.contains("Rhyme group: A"));
    }

    #[test]
    fn test_initial_prompt_truncates_context_to_eight() {
        let ws = analyze_line("hi");
        let rhyme = RhymeConstraint {
            group: "A",
            scheme: "A",
            peer_lines: &[],
        };
        let previous: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();
        let p = initial_prompt("Hi", 1, &KeywordMap::new(), &previous, &ws, &rhyme);
        assert!(p.contains("line 12"));
        assert!(p.contains("line 19"));
        assert!(!p.contains("line 11"));
    }

    #[test]
    fn test_word_syllable_refinement_prompt_shows_both_patterns() {
        let required = analyze_line("hello world");
        let actual = analyze_line("hi earth now");
        let p = word_syllable_refinement_prompt("hi earth now", &required, &actual);
        assert!(p.contains("2-1"));
        assert!(p.contains("1-1-1"));
    }

    #[test]
    fn test_semantic_coherence_prompt_lists_previous() {
        let required = analyze_line("hello");
        let previous = vec!["first line".to_string(), "second line".to_string()];
        let p = semantic_coherence_prompt("candidate", &previous, &required);
        assert!(p.contains("first line"));
        assert!(p.contains("second line"));
    }

    #[test]
    fn test_punctuation_summary_and_capitalization() {
        assert_eq!(punctuation_summary("Hello, world!"), ",!");
        assert_eq!(capitalization_pattern("Hello, world!"), "Ul");
        assert_eq!(capitalization_pattern("hello world"), "ll");
    }

    #[test]
    fn test_punctuation_capitalization_prompt_contains_pattern() {
        let p = punctuation_capitalization_prompt("goodbye cruel sea", "Hello, world!");
        assert!(p.contains(",!"));
        assert!(p.contains("Ul"));
    }
}
