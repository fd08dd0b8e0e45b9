//! Placeholder substitution engine.
//!
//! This module provides the core substitution logic that replaces
//! `{{variable}}` patterns in composed request text with values from the
//! user's variable map. An unresolved placeholder is left verbatim in the
//! output so the user can see it in the sent request, rather than having it
//! silently become an empty string. Substitution is a single pass over one
//! snapshot of the map: a variable's value is never itself re-scanned for
//! placeholders, so expansion cannot recurse.

use super::VariableMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Cached regex pattern for matching {{variableName}} with optional whitespace.
/// This is compiled once and reused to avoid repeated regex compilation overhead.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("Failed to compile placeholder regex"));

/// Substitutes every `{{variable}}` placeholder in `text`.
///
/// The placeholder name is trimmed before lookup, so `{{ host }}` and
/// `{{host}}` resolve identically. A name missing from `variables` leaves
/// the whole placeholder (braces included) in place.
///
/// # Arguments
///
/// * `text` - The input text containing `{{variable}}` patterns
/// * `variables` - The current variable map
///
/// # Examples
///
/// ```
/// use api_preview::variables::{substitute, VariableMap};
///
/// let mut variables = VariableMap::new();
/// variables.insert("token".to_string(), "abc123".to_string());
///
/// assert_eq!(substitute("Bearer {{token}}", &variables), "Bearer abc123");
/// assert_eq!(substitute("Bearer {{missing}}", &variables), "Bearer {{missing}}");
/// ```
pub fn substitute(text: &str, variables: &VariableMap) -> String {
    // Fast path: if there are no placeholder markers at all, return as-is.
    if !text.contains("{{") {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut last_match_end = 0;

    for cap in PLACEHOLDER_REGEX.captures_iter(text) {
        let full_match = cap.get(0).unwrap();
        let name = cap.get(1).unwrap().as_str().trim();

        result.push_str(&text[last_match_end..full_match.start()]);

        match variables.get(name) {
            Some(value) => result.push_str(value),
            // Unresolved placeholders stay visible in the output.
            None => result.push_str(full_match.as_str()),
        }

        last_match_end = full_match.end();
    }

    result.push_str(&text[last_match_end..]);
    result
}

/// Applies [`substitute`] to every string value of a JSON object.
///
/// Non-string values (numbers, booleans, nested structures) pass through
/// unchanged; only the top level is visited.
pub fn substitute_shallow(object: &Map<String, Value>, variables: &VariableMap) -> Map<String, Value> {
    object
        .iter()
        .map(|(key, value)| {
            let replaced = match value {
                Value::String(text) => Value::String(substitute(text, variables)),
                other => other.clone(),
            };
            (key.clone(), replaced)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn test_variables() -> VariableMap {
        let mut variables = VariableMap::new();
        variables.insert("baseUrl".to_string(), "https://api.example.com".to_string());
        variables.insert("token".to_string(), "abc123".to_string());
        variables.insert("port".to_string(), "8080".to_string());
        variables
    }

    #[test]
    fn test_simple_substitution() {
        let variables = test_variables();
        assert_eq!(
            substitute("GET {{baseUrl}}/users", &variables),
            "GET https://api.example.com/users"
        );
    }

    #[test]
    fn test_multiple_placeholders() {
        let variables = test_variables();
        assert_eq!(
            substitute("{{baseUrl}}:{{port}}/api?key={{token}}", &variables),
            "https://api.example.com:8080/api?key=abc123"
        );
    }

    #[test]
    fn test_missing_variable_left_verbatim() {
        let variables = test_variables();
        assert_eq!(
            substitute("Bearer {{missing}}", &variables),
            "Bearer {{missing}}"
        );
    }

    #[test]
    fn test_mixed_resolved_and_missing() {
        let variables = test_variables();
        assert_eq!(
            substitute("{{baseUrl}}/{{unknown}}/x", &variables),
            "https://api.example.com/{{unknown}}/x"
        );
    }

    #[test]
    fn test_whitespace_trimmed_before_lookup() {
        let variables = test_variables();
        assert_eq!(
            substitute("GET {{  baseUrl  }}/users", &variables),
            "GET https://api.example.com/users"
        );
    }

    #[test]
    fn test_empty_input() {
        let variables = test_variables();
        assert_eq!(substitute("", &variables), "");
    }

    #[test]
    fn test_no_placeholders() {
        let variables = test_variables();
        let text = "GET https://example.com/users";
        assert_eq!(substitute(text, &variables), text);
    }

    #[test]
    fn test_empty_name_left_verbatim() {
        let variables = test_variables();
        assert_eq!(substitute("x{{}}y", &variables), "x{{}}y");
    }

    #[test]
    fn test_unclosed_placeholder_left_verbatim() {
        let variables = test_variables();
        assert_eq!(substitute("{{baseUrl", &variables), "{{baseUrl");
    }

    #[test]
    fn test_no_reentrant_expansion() {
        let mut variables = VariableMap::new();
        variables.insert("a".to_string(), "{{b}}".to_string());
        variables.insert("b".to_string(), "inner".to_string());

        // The substituted value is never re-scanned.
        assert_eq!(substitute("{{a}}", &variables), "{{b}}");
    }

    #[test]
    fn test_same_placeholder_twice() {
        let variables = test_variables();
        assert_eq!(
            substitute("{{baseUrl}}/a and {{baseUrl}}/b", &variables),
            "https://api.example.com/a and https://api.example.com/b"
        );
    }

    #[test]
    fn test_placeholder_in_json_body_text() {
        let variables = test_variables();
        assert_eq!(
            substitute(r#"{"token": "{{token}}"}"#, &variables),
            r#"{"token": "abc123"}"#
        );
    }

    #[test]
    fn test_substitute_shallow() {
        let variables = test_variables();
        let object = json!({
            "Authorization": "Bearer {{token}}",
            "X-Port": 8080,
            "X-Flag": true,
            "X-Nested": {"inner": "{{token}}"}
        });
        let object = object.as_object().unwrap();

        let result = substitute_shallow(object, &variables);

        assert_eq!(result["Authorization"], json!("Bearer abc123"));
        // Non-string values pass through unchanged, nested structures included.
        assert_eq!(result["X-Port"], json!(8080));
        assert_eq!(result["X-Flag"], json!(true));
        assert_eq!(result["X-Nested"], json!({"inner": "{{token}}"}));
    }

    #[test]
    fn test_substitute_shallow_preserves_keys() {
        let variables = test_variables();
        let object = json!({"{{token}}": "value"});
        let object = object.as_object().unwrap();

        // Keys are never substituted, only values.
        let result = substitute_shallow(object, &variables);
        assert!(result.contains_key("{{token}}"));
    }

    proptest! {
        #[test]
        fn prop_placeholder_free_text_passes_through(text in "[a-zA-Z0-9 ./:?=&_-]*") {
            let variables = test_variables();
            prop_assert_eq!(substitute(&text, &variables), text);
        }

        #[test]
        fn prop_resolved_placeholder_never_survives(name in "[a-z]{1,8}", value in "[a-z0-9]{0,12}") {
            let mut variables = VariableMap::new();
            variables.insert(name.clone(), value.clone());

            let text = format!("prefix {{{{{}}}}} suffix", name);
            let result = substitute(&text, &variables);
            prop_assert_eq!(result, format!("prefix {} suffix", value));
        }
    }
}
