//! End-to-end exercises of `ParodyEngine` against a scripted fake backend.

use std::cell::RefCell;
use std::collections::HashMap;

use parody_core::{generate, CompleterError, KeywordMap, ParodyConfig, RunHooks, TextCompleter};

/// A minimal fake backend: maps a prompt substring to a fixed response,
/// falling back to a default, with call counting for assertions.
struct FakeCompleter {
    by_substring: HashMap<&'static str, &'static str>,
    default_response: &'static str,
    calls: RefCell<usize>,
}

impl FakeCompleter {
    fn new(default_response: &'static str) -> Self {
        Self {
            by_substring: HashMap::new(),
            default_response,
            calls: RefCell::new(0),
        }
    }

    fn with(mut self, substring: &'static str, response: &'static str) -> Self {
        self.by_substring.insert(substring, response);
        self
    }
}

impl TextCompleter for FakeCompleter {
    fn verify(&self) -> Result<(), CompleterError> {
        Ok(())
    }

    fn complete(&self, prompt: &str) -> Result<String, CompleterError> {
        *self.calls.borrow_mut() += 1;
        for (needle, response) in &self.by_substring {
            if prompt.contains(needle) {
                return Ok(response.to_string());
            }
        }
        Ok(self.default_response.to_string())
    }
}

fn lines(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn generate_preserves_length_and_blank_mask() {
    let input = lines(&[
        "Twinkle twinkle little star",
        "",
        "How I wonder what you are",
        "Up above the world so high",
        "Like a diamond in the sky",
    ]);
    let completer = FakeCompleter::new("shimmer glimmer tiny sun");

    let out = generate(&input, &KeywordMap::new(), &ParodyConfig::default(), &completer, RunHooks::default()).unwrap();

    assert_eq!(out.len(), input.len());
    for (i, line) in input.iter().enumerate() {
        if line.trim().is_empty() {
            assert_eq!(out[i], "");
        } else {
            assert!(!out[i].is_empty(), "line {i} should be non-empty");
        }
    }
}

#[test]
fn generate_is_deterministic_across_runs() {
    let input = lines(&["A bright and shining morning", "Calls me out into the day"]);
    let completer = FakeCompleter::new("a fine new line of words");

    let first = generate(&input, &KeywordMap::new(), &ParodyConfig::default(), &completer, RunHooks::default()).unwrap();
    let second = generate(&input, &KeywordMap::new(), &ParodyConfig::default(), &completer, RunHooks::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate_applies_style_transfer_capitalization_and_punctuation() {
    let input = lines(&["Hello, world!"]);
    let completer = FakeCompleter::new("goodbye cruel sea");

    let out = generate(&input, &KeywordMap::new(), &ParodyConfig::default(), &completer, RunHooks::default()).unwrap();

    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with('G'), "expected leading capital, got {:?}", out[0]);
}

#[test]
fn generate_carries_keywords_into_every_prompt() {
    let input = lines(&["One small step for a word"]);
    let mut keywords = KeywordMap::new();
    keywords.insert("tide".to_string(), "the rise and fall of the sea".to_string());
    let completer = FakeCompleter::new("a brand new tide line").with("tide: the rise and fall of the sea", "ocean swells and falls again");

    let out = generate(&input, &keywords, &ParodyConfig::default(), &completer, RunHooks::default()).unwrap();
    assert_eq!(out.len(), 1);
    assert!(!out[0].is_empty());
}

#[test]
fn generate_refinement_failure_falls_back_without_aborting() {
    let input = lines(&["Only one short line here"]);
    let completer = FakeCompleter::new("an accepted initial candidate");

    let out = generate(&input, &KeywordMap::new(), &ParodyConfig::default(), &completer, RunHooks::default()).unwrap();
    assert_eq!(out.len(), 1);
    assert!(!out[0].is_empty());
}

#[test]
fn generate_reports_progress_once_per_non_blank_line() {
    let input = lines(&["First line here", "", "Second line here"]);
    let completer = FakeCompleter::new("a replacement line of words");

    let mut seen = Vec::new();
    let mut progress = |done: usize, total: usize| seen.push((done, total));
    let hooks = RunHooks {
        progress: Some(&mut progress),
        cancelled: None,
    };

    generate(&input, &KeywordMap::new(), &ParodyConfig::default(), &completer, hooks).unwrap();
    assert_eq!(seen, vec![(1, 2), (2, 2)]);
}
