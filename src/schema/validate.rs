use serde_json::Value;

use super::Schema;

/// Check a candidate value against a schema. Pass/fail only: no coercion,
/// no default-filling. An absent candidate is always invalid.
///
/// The check is structural: declared type, required object fields, enum
/// membership, array items, and nested objects. A property schema with no
/// `type` and no `enum` accepts anything.
pub fn validate(candidate: Option<&Value>, schema: &Schema) -> bool {
    match candidate {
        Some(value) => conforms(value, schema.as_json()),
        None => false,
    }
}

fn conforms(value: &Value, schema: &Value) -> bool {
    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        return allowed.contains(value);
    }

    let Some(declared) = schema.get("type").and_then(Value::as_str) else {
        return true;
    };

    match declared {
        "object" => {
            let Some(fields) = value.as_object() else {
                return false;
            };
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for name in required.iter().filter_map(Value::as_str) {
                    if !fields.contains_key(name) {
                        return false;
                    }
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (name, property_schema) in properties {
                    // Optional fields are only checked when present
                    if let Some(field) = fields.get(name)
                        && !conforms(field, property_schema)
                    {
                        return false;
                    }
                }
            }
            true
        }
        "array" => {
            let Some(items) = value.as_array() else {
                return false;
            };
            match schema.get("items") {
                Some(item_schema) => items.iter().all(|item| conforms(item, item_schema)),
                None => true,
            }
        }
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => false,
    }
}
