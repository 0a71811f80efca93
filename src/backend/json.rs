//! Tolerant JSON extraction from model output.

use serde_json::Value;

/// Extract the first JSON object from model text.
///
/// Accepts raw JSON, fenced code blocks (with or without a `json` language
/// tag), and prose with an embedded object. Returns `None` when no object can
/// be recovered.
pub fn extract_json_object(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }

    let mut candidate = text.trim();
    if let Some(stripped) = candidate.strip_prefix("```") {
        candidate = match stripped.split_once('\n') {
            Some((_, rest)) => rest,
            None => stripped,
        };
    }
    candidate = candidate.strip_suffix("```").unwrap_or(candidate).trim();
    candidate = candidate.strip_prefix("json").unwrap_or(candidate).trim();

    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        if value.is_object() {
            return Some(value);
        }
    }

    // Scan for an embedded object, tolerating trailing prose after it.
    let mut search_from = 0;
    while let Some(offset) = candidate[search_from..].find('{') {
        let start = search_from + offset;
        let mut stream =
            serde_json::Deserializer::from_str(&candidate[start..]).into_iter::<Value>();
        if let Some(Ok(value)) = stream.next() {
            if value.is_object() {
                return Some(value);
            }
        }
        search_from = start + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_json() {
        let value = extract_json_object(r#"{"summary": "ok"}"#).unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn strips_fenced_blocks() {
        let fenced = "```json\n{\"fluid_type\": \"dry gas system\"}\n```";
        let value = extract_json_object(fenced).unwrap();
        assert_eq!(value["fluid_type"], "dry gas system");
    }

    #[test]
    fn recovers_object_embedded_in_prose() {
        let noisy = "Here is the interpretation: {\"summary\": \"x\", \"zones\": []} hope it helps";
        let value = extract_json_object(noisy).unwrap();
        assert_eq!(value["summary"], "x");
    }

    #[test]
    fn rejects_non_objects_and_garbage() {
        assert!(extract_json_object("").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("{broken").is_none());
    }
}
