//! Tolerant two-field extraction from raw model output.
//!
//! Upstream models are asked for a strict two-field JSON object but routinely
//! wrap it in markdown fences, drop the quotes around keys, or leak escape
//! sequences into the commentary. Rather than a full JSON parser, this module
//! scans for the two known keys and resolves value boundaries with a handful
//! of fixed rules, which is all a bounded two-field grammar needs.

use crate::error::{ExtractError, Result};
use crate::result::AffinityResult;

const SCORE_KEY: &str = "similarity";
const COMMENTARY_KEY: &str = "evaluation";

/// Recover the score and commentary fields from raw model text.
///
/// Tolerates:
/// - a ```` ```json ```` fence before the object and a ```` ``` ```` fence
///   after it,
/// - unquoted keys,
/// - quoting and whitespace noise around the score value,
/// - commas inside the commentary value (it is bounded by the *last* closing
///   brace in the text, not the nearest delimiter),
/// - `\"`, `\n` and `\t` escape sequences inside the commentary.
///
/// Known limitation, kept for compatibility with the behavior callers rely
/// on: the last-brace rule assumes the commentary is the final field and
/// contains no literal `}` character.
pub fn extract(raw_text: &str) -> Result<AffinityResult> {
    let text = strip_fences(raw_text);

    let score = extract_score(text)?;
    let commentary = extract_commentary(text)?;

    Ok(AffinityResult::new(score, commentary))
}

/// Strip a leading ```` ```json ```` marker and a trailing ```` ``` ````
/// marker, each independently, then re-trim.
fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Locate a field key: quoted form first, bare form as a fallback for
/// models that omit the quotes. Returns the byte offset of the match.
fn find_key(text: &str, key: &str) -> Option<usize> {
    let quoted = format!("\"{key}\"");
    text.find(&quoted).or_else(|| {
        text.find(key).inspect(|_| {
            tracing::debug!(key, "field key found unquoted");
        })
    })
}

fn extract_score(text: &str) -> Result<i64> {
    let start = find_key(text, SCORE_KEY).ok_or(ExtractError::MissingField(SCORE_KEY))?;
    let colon = text[start..]
        .find(':')
        .map(|i| start + i)
        .ok_or(ExtractError::MissingValue(SCORE_KEY))?;

    // The value ends at the first comma after the colon, unless the first
    // closing brace comes sooner (single-field object, or score last).
    let close = text[colon..]
        .find('}')
        .map(|i| colon + i)
        .ok_or(ExtractError::MissingValue(SCORE_KEY))?;
    let end = match text[colon..].find(',').map(|i| colon + i) {
        Some(comma) if comma < close => comma,
        _ => close,
    };

    let slice = &text[colon + 1..end];
    let cleaned: String = slice
        .chars()
        .filter(|c| *c != '"' && !c.is_whitespace())
        .collect();

    cleaned
        .parse::<i64>()
        .map_err(|_| ExtractError::InvalidScore {
            value: slice.trim().to_string(),
        })
}

fn extract_commentary(text: &str) -> Result<String> {
    let start = find_key(text, COMMENTARY_KEY).ok_or(ExtractError::MissingField(COMMENTARY_KEY))?;
    let colon = text[start..]
        .find(':')
        .map(|i| start + i)
        .ok_or(ExtractError::MissingValue(COMMENTARY_KEY))?;

    // Bound the value at the last closing brace in the entire text. The
    // commentary is assumed to be the final field, so commas inside it must
    // not terminate the value the way they do for the score.
    let close = text
        .rfind('}')
        .filter(|close| *close > colon)
        .ok_or(ExtractError::MissingValue(COMMENTARY_KEY))?;

    let value = text[colon + 1..close].trim();

    // Only the outermost quote pair is stripped; quotes inside the value
    // survive. Each side is stripped independently to tolerate a missing
    // opening or closing quote.
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);

    let value = value
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\t", " ");

    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_object() {
        let result = extract(r#"{"similarity": 78, "evaluation": "音调和谐"}"#).unwrap();
        assert_eq!(result.score, 78);
        assert_eq!(result.commentary, "音调和谐");
    }

    #[test]
    fn test_fenced_object_matches_unwrapped() {
        let plain = extract(r#"{"similarity": 50, "evaluation": "还行"}"#).unwrap();
        let fenced = extract("```json\n{\"similarity\": 50, \"evaluation\": \"还行\"}\n```").unwrap();
        assert_eq!(fenced.score, plain.score);
        assert_eq!(fenced.commentary, plain.commentary);
    }

    #[test]
    fn test_bare_keys_accepted() {
        let result = extract(r#"{similarity: 42, evaluation: "字形互补"}"#).unwrap();
        assert_eq!(result.score, 42);
        assert_eq!(result.commentary, "字形互补");
    }

    #[test]
    fn test_commentary_keeps_embedded_comma() {
        let result = extract(r#"{"similarity": 35, "evaluation": "像跨服聊天, 但合拍"}"#).unwrap();
        assert_eq!(result.score, 35);
        assert_eq!(result.commentary, "像跨服聊天, 但合拍");
    }

    #[test]
    fn test_commentary_unescapes_quotes_and_newlines() {
        let result =
            extract(r#"{"similarity": 66, "evaluation": "堪称\"绝配\"\n建议合拍"}"#).unwrap();
        assert_eq!(result.commentary, "堪称\"绝配\"\n建议合拍");
    }

    #[test]
    fn test_escaped_tab_becomes_space() {
        let result = extract(r#"{"similarity": 10, "evaluation": "前\t后"}"#).unwrap();
        assert_eq!(result.commentary, "前 后");
    }

    #[test]
    fn test_quoted_score_value() {
        let result = extract(r#"{"similarity": "91", "evaluation": "ok"}"#).unwrap();
        assert_eq!(result.score, 91);
    }

    #[test]
    fn test_missing_score_field() {
        let err = extract(r#"{"evaluation": "缺分数"}"#).unwrap_err();
        assert!(matches!(err, ExtractError::MissingField("similarity")));
    }

    #[test]
    fn test_missing_commentary_field() {
        let err = extract(r#"{"similarity": 80}"#).unwrap_err();
        assert!(matches!(err, ExtractError::MissingField("evaluation")));
    }

    #[test]
    fn test_non_numeric_score() {
        let err = extract(r#"{"similarity": "high", "evaluation": "无法量化"}"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidScore { .. }));
    }

    #[test]
    fn test_garbage_input() {
        assert!(extract("not json at all").is_err());
    }

    #[test]
    fn test_surrounding_prose_tolerated() {
        // Models sometimes preface the object with a sentence.
        let result =
            extract("分析结果如下：{\"similarity\": 72, \"evaluation\": \"有缘\"}").unwrap();
        assert_eq!(result.score, 72);
        assert_eq!(result.commentary, "有缘");
    }

    #[test]
    fn test_score_bounded_by_brace_when_no_comma() {
        // Commentary first, score last: no comma after the score value.
        let result = extract(r#"{"evaluation": "顺序颠倒", "similarity": 23}"#).unwrap();
        assert_eq!(result.score, 23);
    }
}
