//! Word/separator tokenization shared by the syllable, rhyme, and style
//! transfer components.
//!
//! A word token is a maximal run of Unicode letters; everything else
//! (whitespace, digits, punctuation, apostrophes) is separator text. This
//! is the one tokenization rule every component in this crate must agree
//! on, so it lives in a single place.

/// A maximal run of Unicode letters extracted from a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    pub text: String,
    /// Whether the first Unicode letter in `text` is uppercase.
    /// `false` if `text` contains no letters (which cannot happen for a
    /// token produced by [`tokenize_line`], but callers may construct one).
    pub is_first_letter_uppercase: bool,
}

impl WordToken {
    fn new(text: String) -> Self {
        let is_first_letter_uppercase = text.chars().next().map(char::is_uppercase).unwrap_or(false);
        Self {
            text,
            is_first_letter_uppercase,
        }
    }
}

/// A line split into word tokens and the separator text surrounding them.
///
/// `separators[i]` is the text immediately following `tokens[i]`: for all
/// but the last token this is the inter-word separator, and for the last
/// token it is the line's trailing suffix. `leading` is any text before
/// the first token. Reconstructing `leading + tokens[0].text +
/// separators[0] + tokens[1].text + separators[1] + ...` yields the
/// original line exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineTokens {
    pub leading: String,
    pub tokens: Vec<WordToken>,
    pub separators: Vec<String>,
}

impl LineTokens {
    /// Reconstruct the original line from its parts. Used by round-trip tests.
    pub fn reconstruct(&self) -> String {
        let mut out = self.leading.clone();
        for (token, sep) in self.tokens.iter().zip(self.separators.iter()) {
            out.push_str(&token.text);
            out.push_str(sep);
        }
        out
    }
}

/// Split `line` into word tokens (maximal runs of Unicode letters) and the
/// separator text between/around them.
pub fn tokenize_line(line: &str) -> LineTokens {
    let mut tokens = Vec::new();
    let mut separators = Vec::new();
    let mut leading = String::new();
    let mut current_word = String::new();
    let mut current_sep = String::new();
    let mut seen_first_token = false;

    for ch in line.chars() {
        if ch.is_alphabetic() {
            if !current_word.is_empty() {
                current_word.push(ch);
            } else {
                // Starting a new word token: flush the separator that preceded it.
                if seen_first_token {
                    separators.push(std::mem::take(&mut current_sep));
                } else {
                    leading = std::mem::take(&mut current_sep);
                }
                current_word.push(ch);
            }
        } else {
            if !current_word.is_empty() {
                tokens.push(WordToken::new(std::mem::take(&mut current_word)));
                seen_first_token = true;
            }
            current_sep.push(ch);
        }
    }

    if !current_word.is_empty() {
        tokens.push(WordToken::new(current_word));
        seen_first_token = true;
    }
    if seen_first_token {
        separators.push(current_sep);
    } else {
        leading = current_sep;
    }

    LineTokens {
        leading,
        tokens,
        separators,
    }
}

/// `true` iff `line` contains only whitespace (or is empty).
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Lowercase `s` and keep only Unicode letters.
pub fn letters_only_lowercase(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
