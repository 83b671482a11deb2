//! Schema clean-up before it is shown to an LLM

use serde_json::{Map, Value};

/// Keywords whose value is a single subschema
const SUBSCHEMA_KEYWORDS: &[&str] = &["items", "additionalProperties", "additionalItems", "not"];

/// Keywords whose value is a list of subschemas
const SUBSCHEMA_LIST_KEYWORDS: &[&str] = &["anyOf", "oneOf", "allOf"];

/// Coerce every `description` in a schema tree to a string.
///
/// Some servers emit `null` or structured descriptions, which LLM APIs reject
/// ("description: Input should be a valid string"). Only schema positions are
/// rewritten; a property that happens to be named `description` is left alone.
pub fn sanitize_json_schema(schema: &Value) -> Value {
    let Value::Object(obj) = schema else {
        return schema.clone();
    };

    let mut sanitized = Map::new();
    for (key, value) in obj {
        let new_value = match (key.as_str(), value) {
            ("description", Value::String(_)) => value.clone(),
            ("description", Value::Null) => Value::String(String::new()),
            ("description", other) => Value::String(other.to_string()),
            ("properties", Value::Object(props)) => Value::Object(
                props
                    .iter()
                    .map(|(name, prop)| (name.clone(), sanitize_json_schema(prop)))
                    .collect(),
            ),
            (k, Value::Array(list)) if SUBSCHEMA_LIST_KEYWORDS.contains(&k) || k == "items" => {
                Value::Array(list.iter().map(sanitize_json_schema).collect())
            }
            (k, _) if SUBSCHEMA_KEYWORDS.contains(&k) => sanitize_json_schema(value),
            _ => value.clone(),
        };
        sanitized.insert(key.clone(), new_value);
    }
    Value::Object(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_nested_descriptions() {
        let schema = json!({
            "type": "object",
            "description": null,
            "properties": {
                "tags": {
                    "type": "array",
                    "items": { "type": "string", "description": 42 }
                },
                "mode": {
                    "anyOf": [
                        { "const": "fast", "description": { "text": "quick" } },
                        { "const": "slow" }
                    ]
                }
            }
        });

        let sanitized = sanitize_json_schema(&schema);

        assert_eq!(sanitized["description"], "");
        assert_eq!(sanitized["properties"]["tags"]["items"]["description"], "42");
        assert_eq!(
            sanitized["properties"]["mode"]["anyOf"][0]["description"],
            r#"{"text":"quick"}"#
        );
    }

    #[test]
    fn test_property_named_description_is_kept() {
        let schema = json!({
            "type": "object",
            "properties": {
                "description": { "type": "string", "description": "Summary text" }
            }
        });

        let sanitized = sanitize_json_schema(&schema);
        assert_eq!(sanitized, schema);
    }

    #[test]
    fn test_non_object_passthrough() {
        assert_eq!(sanitize_json_schema(&json!(true)), json!(true));
        assert_eq!(sanitize_json_schema(&Value::Null), Value::Null);
    }
}
