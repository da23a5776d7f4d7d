//! Syllable counting — an orthographic heuristic, not a phonetic oracle.
//!
//! The rule in [`count_word`] is a fixed contract (spec ch. 4.1): it is
//! known to be imperfect on some words and must not be "improved" beyond
//! what is written here, or two conforming implementations would diverge.

use crate::token::{letters_only_lowercase, tokenize_line};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Number of maximal vowel runs in a lowercase, letters-only string.
fn vowel_run_count(w: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in w.chars() {
        if is_vowel(c) {
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    runs
}

/// Count syllables in a single word using the orthographic heuristic.
///
/// Lowercases `s`, keeps only Unicode letters, then applies: count vowel
/// runs `v`; subtract one for a silent trailing `e` (if `v > 1`); add one
/// back for a trailing `le` preceded by a consonant (if `v > 1`); clamp
/// the result to at least 1. Empty input is the sole exception and
/// returns 0.
pub fn count_word(s: &str) -> usize {
    let w = letters_only_lowercase(s);
    if w.is_empty() {
        return 0;
    }

    let v = vowel_run_count(&w);
    let mut count = v as i64;

    if w.ends_with('e') && v > 1 {
        count -= 1;
    }

    if w.ends_with("le") && v > 1 {
        let before_le = w.chars().rev().nth(2);
        if let Some(c) = before_le {
            if !is_vowel(c) {
                count += 1;
            }
        }
    }

    count.max(1) as usize
}

/// Sum of [`count_word`] over a line's word tokens.
pub fn count_line(s: &str) -> usize {
    tokenize_line(s)
        .tokens
        .iter()
        .map(|t| count_word(&t.text))
        .sum()
}

/// Per-word syllable counts for a line, in order, aligned with its word tokens.
pub type WordSyllables = Vec<(String, usize)>;

/// Tokenize `s` and pair each word token with its syllable count.
pub fn analyze_line(s: &str) -> WordSyllables {
    tokenize_line(s)
        .tokens
        .into_iter()
        .map(|t| {
            let count = count_word(&t.text);
            (t.text, count)
        })
        .collect()
}

/// Render a `WordSyllables` pattern as `hello(2) world(1)`, the form used
/// in prompts and refinement validation.
pub fn format_word_pattern(ws: &WordSyllables) -> String {
    ws.iter()
        .map(|(word, count)| format!("{}({})", word, count))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render only the counts as `2-1-3`, the compact pattern used by the
/// word-syllable refinement prompt.
pub fn format_count_pattern(ws: &WordSyllables) -> String {
    ws.iter()
        .map(|(_, count)| count.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
