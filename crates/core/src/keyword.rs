//! KeywordGenerator (spec ch. 4.6): a thin, separate use of `TextCompleter`
//! that turns a list of subjects into a `keyword: definition` map.

use crate::completer::TextCompleter;
use crate::error::KeywordError;
use crate::types::KeywordMap;

/// Build the keyword-generation prompt for `subjects` and `count`.
pub fn keyword_prompt(subjects: &[String], count: u32) -> String {
    format!(
        "Generate exactly {count} lines, each in the form `keyword: definition`, about these subjects: {subjects}.\n\
         Each keyword should be one to three words; each definition a single sentence.\n\
         Output only the {count} lines, nothing else.",
        count = count,
        subjects = subjects.join(", "),
    )
}

/// Parse a completer's raw response into a [`KeywordMap`] (spec ch. 4.6):
/// split on line breaks, trim; split each line at the first `:`; trim and
/// strip a surrounding quote pair from key and value; discard empty keys
/// or values; on duplicate keys the later occurrence wins.
pub fn parse_keywords(response: &str) -> KeywordMap {
    let mut map = KeywordMap::new();
    for raw_line in response.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(colon) = line.find(':') else {
            continue;
        };
        let key = strip_quotes(line[..colon].trim());
        let value = strip_quotes(line[colon + 1..].trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key, value);
    }
    map
}

fn strip_quotes(s: &str) -> String {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = s.chars().next().unwrap();
        let last = s.chars().last().unwrap();
        if (first == '"' && last == '"') || (first == '\'' && last == '\'') {
            return s[first.len_utf8()..s.len() - last.len_utf8()].to_string();
        }
    }
    s.to_string()
}

/// Generate a [`KeywordMap`] for `subjects` by calling `completer` once and
/// parsing its response. `subjects` must be non-empty trimmed strings;
/// `count` is clamped to `1..=100` by the caller per the spec's contract.
pub fn generate_keywords(
    completer: &dyn TextCompleter,
    subjects: &[String],
    count: u32,
) -> Result<KeywordMap, KeywordError> {
    let prompt = keyword_prompt(subjects, count);
    let response = completer.complete(&prompt)?;
    let map = parse_keywords(&response);
    if map.is_empty() {
        return Err(KeywordError::ParseEmpty);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completer::test_support::ScriptedCompleter;
    use crate::error::CompleterError;

    #[test]
    fn test_parse_keywords_basic() {
        let response = "ocean: a vast body of salt water\nmoon: earth's only natural satellite";
        let map = parse_keywords(response);
        assert_eq!(map.get("ocean").unwrap(), "a vast body of salt water");
        assert_eq!(map.get("moon").unwrap(), "earth's only natural satellite");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_parse_keywords_strips_quotes_and_trims() {
        let response = "  \"storm\" : ' a violent disturbance of the atmosphere ' \n";
        let map = parse_keywords(response);
        assert_eq!(map.get("storm").unwrap(), "a violent disturbance of the atmosphere");
    }

    #[test]
    fn test_parse_keywords_discards_empty_and_malformed() {
        let response = "no colon here\n: missing key\nkeyword: \n\nvalid: a fine definition";
        let map = parse_keywords(response);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("valid").unwrap(), "a fine definition");
    }

    #[test]
    fn test_parse_keywords_duplicate_keys_later_wins() {
        let response = "tide: first definition\ntide: second definition";
        let map = parse_keywords(response);
        assert_eq!(map.get("tide").unwrap(), "second definition");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_keywords_splits_on_first_colon_only() {
        let response = "time: a measure, often: described precisely";
        let map = parse_keywords(response);
        assert_eq!(map.get("time").unwrap(), "a measure, often: described precisely");
    }

    #[test]
    fn test_generate_keywords_empty_response_is_error() {
        let completer = ScriptedCompleter::new("");
        let err = generate_keywords(&completer, &["the sea".to_string()], 3).unwrap_err();
        assert!(matches!(err, KeywordError::ParseEmpty));
    }

    #[test]
    fn test_generate_keywords_propagates_completer_error() {
        let completer = ScriptedCompleter::new("").failing_on("the sea", CompleterError::Unavailable);
        let err = generate_keywords(&completer, &["the sea".to_string()], 3).unwrap_err();
        assert!(matches!(err, KeywordError::CompleterFailed(CompleterError::Unavailable)));
    }

    #[test]
    fn test_generate_keywords_success() {
        let completer = ScriptedCompleter::new("ocean: a vast body of salt water");
        let map = generate_keywords(&completer, &["the sea".to_string()], 1).unwrap();
        assert_eq!(map.get("ocean").unwrap(), "a vast body of salt water");
    }
}
