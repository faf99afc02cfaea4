use serde_json::json;

use super::{Schema, validate};

fn person_schema() -> Schema {
    Schema::builder()
        .title("Person")
        .property(
            "name",
            json!({"type": "string", "description": "Person's name"}),
            true,
        )
        .property("age", json!({"type": "integer"}), true)
        .property("nickname", json!({"type": "string"}), false)
        .build()
}

#[test]
fn builder_produces_object_schema() {
    let schema = person_schema();
    let json = schema.as_json();

    assert_eq!(json["type"], "object");
    assert_eq!(json["title"], "Person");
    assert_eq!(json["properties"]["name"]["type"], "string");
    assert_eq!(json["required"], json!(["name", "age"]));
}

#[test]
fn enum_property_constrains_values() {
    let schema = Schema::builder()
        .enum_property("sentiment", &["positive", "negative", "neutral"], true)
        .build();

    assert!(validate(Some(&json!({"sentiment": "positive"})), &schema));
    assert!(!validate(Some(&json!({"sentiment": "lukewarm"})), &schema));
}

#[test]
fn describe_is_idempotent() {
    let schema = person_schema();
    let first = schema.describe().expect("describe should succeed");
    let second = schema.describe().expect("describe should succeed");
    assert_eq!(first, second);
}

#[test]
fn describe_embeds_rendered_schema_and_directive() {
    let instruction = person_schema().describe().expect("describe should succeed");
    assert!(instruction.contains("\"type\": \"object\""));
    assert!(instruction.contains("\"name\""));
    assert!(instruction.contains("Return ONLY the instance"));
}

#[test]
fn validate_accepts_conforming_object() {
    let value = json!({"name": "Jason", "age": 30});
    assert!(validate(Some(&value), &person_schema()));
}

#[test]
fn validate_rejects_missing_required_field() {
    let value = json!({"name": "Jason"});
    assert!(!validate(Some(&value), &person_schema()));
}

#[test]
fn validate_rejects_absent_value() {
    assert!(!validate(None, &person_schema()));
}

#[test]
fn validate_rejects_type_mismatch() {
    let value = json!({"name": "Jason", "age": "thirty"});
    assert!(!validate(Some(&value), &person_schema()));
}

#[test]
fn validate_skips_absent_optional_fields() {
    let with = json!({"name": "Jason", "age": 30, "nickname": "J"});
    let without = json!({"name": "Jason", "age": 30});
    let wrong = json!({"name": "Jason", "age": 30, "nickname": 7});

    assert!(validate(Some(&with), &person_schema()));
    assert!(validate(Some(&without), &person_schema()));
    assert!(!validate(Some(&wrong), &person_schema()));
}

#[test]
fn validate_checks_array_items() {
    let schema = Schema::builder()
        .property(
            "tags",
            json!({"type": "array", "items": {"type": "string"}}),
            true,
        )
        .build();

    assert!(validate(Some(&json!({"tags": ["a", "b"]})), &schema));
    assert!(!validate(Some(&json!({"tags": ["a", 2]})), &schema));
    assert!(!validate(Some(&json!({"tags": "a"})), &schema));
}

#[test]
fn validate_checks_nested_objects() {
    let schema = Schema::builder()
        .property(
            "address",
            json!({
                "type": "object",
                "properties": {"city": {"type": "string"}},
                "required": ["city"]
            }),
            true,
        )
        .build();

    assert!(validate(
        Some(&json!({"address": {"city": "Anytown"}})),
        &schema
    ));
    assert!(!validate(Some(&json!({"address": {}})), &schema));
}
