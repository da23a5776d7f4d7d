//! Style transfer — copy the original line's capitalization and
//! inter-word punctuation onto a generated replacement line.
//!
//! Purely string-based; see spec ch. 4.3.

use crate::token::tokenize_line;

/// Adjust the first letter of `word` to upper/lowercase, leaving the rest untouched.
fn adjust_first_letter_case(word: &str, uppercase: bool) -> String {
    let mut out = String::with_capacity(word.len());
    let mut done = false;
    for c in word.chars() {
        if !done && c.is_alphabetic() {
            if uppercase {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply `original`'s capitalization and separators onto `generated`.
///
/// For each position up to `min(k, m)` (`k` = original's word count, `m` =
/// generated's), the generated word's first-letter case is matched to the
/// original's, and the original's separator at that position is copied
/// verbatim. Surplus generated words (if `m > k`) are appended after the
/// original's trailing suffix, space-separated.
pub fn apply(original: &str, generated: &str) -> String {
    let orig = tokenize_line(original);
    let gen = tokenize_line(generated);

    let k = orig.tokens.len();
    let m = gen.tokens.len();
    let p = k.min(m);

    let mut out = orig.leading.clone();
    for i in 0..p {
        let adjusted = adjust_first_letter_case(
            &gen.tokens[i].text,
            orig.tokens[i].is_first_letter_uppercase,
        );
        out.push_str(&adjusted);
        out.push_str(&orig.separators[i]);
    }

    if m > k {
        for extra in &gen.tokens[p..] {
            out.push(' ');
            out.push_str(&extra.text);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_transfer_basic() {
        let out = apply("Hello, world!", "goodbye cruel sea");
        assert!(out.starts_with('G'));
        assert!(out.contains(','));
        // "cruel" takes the original's second (and last) slot, carrying its
        // trailing "!"; "sea" is surplus and appended with a single space.
        assert_eq!(out, "Goodbye, cruel! sea");
    }

    #[test]
    fn test_style_transfer_exact_token_count() {
        let out = apply("Hello, world!", "goodbye world");
        assert_eq!(out, "Goodbye, world!");
    }

    #[test]
    fn test_style_transfer_fewer_generated_words() {
        let out = apply("Hello, dear world!", "hi");
        // Only one generated word: take original's first separator only.
        assert_eq!(out, "Hi, ");
    }

    #[test]
    fn test_style_transfer_preserves_lowercase() {
        let out = apply("hello world", "Greetings Planet");
        assert_eq!(out, "greetings planet");
    }

    #[test]
    fn test_style_transfer_leading_whitespace() {
        let out = apply("  Hello world", "hi earth");
        assert_eq!(out, "  Hi earth");
    }

    #[test]
    fn test_style_transfer_no_letters_in_original() {
        let out = apply("123!", "word");
        // original has no word tokens; k=0, p=0, surplus appended with a leading space.
        assert_eq!(out, "123! word");
    }

    #[test]
    fn test_first_letter_case_position_match() {
        for (orig, gen, expected_first) in [
            ("Apple pie", "banana tart", 'B'),
            ("apple PIE", "banana tart", 'b'),
        ] {
            let out = apply(orig, gen);
            assert_eq!(out.chars().next().unwrap(), expected_first);
        }
    }
}
