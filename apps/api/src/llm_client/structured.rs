//! Best-effort structured decode of LLM output.
//!
//! Models are told to answer with bare JSON but routinely wrap it in prose or
//! markdown fences. `extract_json` tries, in this exact order:
//!
//! 1. the whole trimmed text
//! 2. the content of a fenced block tagged `json`
//! 3. the content of any fenced block
//! 4. the first balanced `{...}` / `[...]` substring that parses
//!
//! and returns `None` when every strategy fails. Callers treat `None` as
//! "no structured output" and substitute their static fallback.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[ \t]*(?i:json)[ \t]*\r?\n?(.*?)```").expect("valid json fence regex")
});

static ANY_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)```").expect("valid fence regex")
});

/// Extracts a JSON value from free-form model output. See module docs for the order.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(value) = parse_first_fence(&JSON_FENCE, trimmed) {
        return Some(value);
    }

    if let Some(value) = parse_first_fence(&ANY_FENCE, trimmed) {
        return Some(value);
    }

    parse_first_balanced(trimmed)
}

fn parse_first_fence(pattern: &Regex, text: &str) -> Option<Value> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find_map(|body| serde_json::from_str::<Value>(body.as_str().trim()).ok())
}

fn parse_first_balanced(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| matches!(b, b'{' | b'['))
        .find_map(|(start, _)| {
            let end = balanced_end(bytes, start)?;
            serde_json::from_str::<Value>(&text[start..end]).ok()
        })
}

/// Returns the exclusive end index of the bracket group opened at `start`.
/// String literals (with escapes) are skipped; a mismatched closer ends the scan.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => stack.push(b),
            b'}' | b']' => {
                let open = stack.pop()?;
                let expected = if open == b'{' { b'}' } else { b']' };
                if b != expected {
                    return None;
                }
                if stack.is_empty() {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_object_matches_direct_parse() {
        let text = r#"{"Skills": [{"Domain": "Cloud"}], "count": 1}"#;
        let direct: Value = serde_json::from_str(text).unwrap();
        assert_eq!(extract_json(text), Some(direct));
    }

    #[test]
    fn test_well_formed_array_and_scalars_match_direct_parse() {
        for text in ["[1, 2, 3]", "42", "\"plain\"", "true", "null"] {
            let direct: Value = serde_json::from_str(text).unwrap();
            assert_eq!(extract_json(text), Some(direct), "input: {text}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(extract_json("\n\t {\"a\": 1}  \n"), Some(json!({"a": 1})));
    }

    #[test]
    fn test_json_fence_matches_inner_parse() {
        let inner = r#"[{"employee_id": "EMP_1", "match_score": 80.5}]"#;
        let text = format!("Here are the results:\n```json\n{inner}\n```\nLet me know!");
        let expected: Value = serde_json::from_str(inner).unwrap();
        assert_eq!(extract_json(&text), Some(expected));
    }

    #[test]
    fn test_json_fence_tag_is_case_insensitive() {
        let text = "```JSON\n{\"ok\": true}\n```";
        assert_eq!(extract_json(text), Some(json!({"ok": true})));
    }

    #[test]
    fn test_untagged_fence() {
        let text = "Sure.\n```\n{\"ok\": true}\n```";
        assert_eq!(extract_json(text), Some(json!({"ok": true})));
    }

    #[test]
    fn test_fence_with_other_tag_still_used() {
        let text = "```javascript\n[1, 2]\n```";
        assert_eq!(extract_json(text), Some(json!([1, 2])));
    }

    #[test]
    fn test_json_fence_preferred_over_earlier_bare_object() {
        let text = "Draft {\"x\": 1} final:\n```json\n{\"y\": 2}\n```";
        assert_eq!(extract_json(text), Some(json!({"y": 2})));
    }

    #[test]
    fn test_tagged_fence_preferred_over_untagged_fence() {
        let text = "```\n{\"first\": 1}\n```\nand\n```json\n{\"second\": 2}\n```";
        assert_eq!(extract_json(text), Some(json!({"second": 2})));
    }

    #[test]
    fn test_balanced_object_in_prose() {
        let text = "The answer is {\"query_type\": \"top_performers\", \"limit\": 5}. Hope that helps.";
        assert_eq!(
            extract_json(text),
            Some(json!({"query_type": "top_performers", "limit": 5}))
        );
    }

    #[test]
    fn test_balanced_array_in_prose() {
        let text = "Results: [{\"a\": [1, 2]}, {\"b\": {}}] end";
        assert_eq!(extract_json(text), Some(json!([{"a": [1, 2]}, {"b": {}}])));
    }

    #[test]
    fn test_braces_inside_strings_do_not_break_balancing() {
        let text = r#"prefix {"note": "use } and { freely", "esc": "quote \" here"} suffix"#;
        assert_eq!(
            extract_json(text),
            Some(json!({"note": "use } and { freely", "esc": "quote \" here"}))
        );
    }

    #[test]
    fn test_skips_unparsable_candidate_and_uses_next() {
        let text = "first {not json} then {\"a\": 1}";
        assert_eq!(extract_json(text), Some(json!({"a": 1})));
    }

    #[test]
    fn test_garbage_returns_none() {
        assert_eq!(extract_json("I could not find any skills, sorry."), None);
        assert_eq!(extract_json("{ unclosed"), None);
        assert_eq!(extract_json("] mismatched ["), None);
        assert_eq!(extract_json("```json\nnot json\n```"), None);
    }

    #[test]
    fn test_empty_returns_none() {
        assert_eq!(extract_json(""), None);
        assert_eq!(extract_json("   \n"), None);
    }

    #[test]
    fn test_non_ascii_text_around_json() {
        let text = "Résumé analysé → {\"domaine\": \"Données\"} ✓";
        assert_eq!(extract_json(text), Some(json!({"domaine": "Données"})));
    }
}
