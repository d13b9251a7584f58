//! Schema validation tests

use super::*;
use crate::types::ValidationPolicy;
use serde_json::json;

fn candidate_schema() -> serde_json::Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "id": {"type": "integer"},
            "updated_at": {"type": "string"},
            "first_name": {"type": ["string", "null"]}
        },
        "required": ["id"],
        "additionalProperties": true
    })
}

#[test]
fn test_valid_record_passes() {
    let validator =
        SchemaValidator::new("candidates", &candidate_schema(), ValidationPolicy::Drop).unwrap();

    let record = json!({"id": 1, "updated_at": "2024-05-01T00:00:00Z", "first_name": "Alice"});
    assert!(validator.is_valid(&record));
    assert!(validator.validate(&record).is_ok());
    assert!(validator.check(&record).unwrap());
}

#[test]
fn test_nullable_field() {
    let validator =
        SchemaValidator::new("candidates", &candidate_schema(), ValidationPolicy::Drop).unwrap();

    let record = json!({"id": 1, "first_name": null});
    assert!(validator.is_valid(&record));
}

#[test]
fn test_extra_fields_allowed() {
    let validator =
        SchemaValidator::new("candidates", &candidate_schema(), ValidationPolicy::Drop).unwrap();

    let record = json!({"id": 1, "unexpected": {"nested": true}});
    assert!(validator.is_valid(&record));
}

#[test]
fn test_wrong_type_fails() {
    let validator =
        SchemaValidator::new("candidates", &candidate_schema(), ValidationPolicy::Drop).unwrap();

    let record = json!({"id": "not-an-integer"});
    assert!(!validator.is_valid(&record));

    let err = validator.validate(&record).unwrap_err();
    assert!(err.to_string().contains("candidates"));
}

#[test]
fn test_missing_required_fails() {
    let validator =
        SchemaValidator::new("candidates", &candidate_schema(), ValidationPolicy::Drop).unwrap();

    let record = json!({"updated_at": "2024-05-01T00:00:00Z"});
    assert!(!validator.is_valid(&record));
}

#[test]
fn test_drop_policy_drops_invalid() {
    let validator =
        SchemaValidator::new("candidates", &candidate_schema(), ValidationPolicy::Drop).unwrap();

    let record = json!({"id": "bad"});
    assert!(!validator.check(&record).unwrap());
}

#[test]
fn test_fail_policy_errors_on_invalid() {
    let validator =
        SchemaValidator::new("candidates", &candidate_schema(), ValidationPolicy::Fail).unwrap();

    let record = json!({"id": "bad"});
    let result = validator.check(&record);
    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        crate::error::Error::Validation { .. }
    ));
}

#[test]
fn test_invalid_schema_fails_to_compile() {
    let bad_schema = json!({"type": "definitely-not-a-type"});
    let result = SchemaValidator::new("jobs", &bad_schema, ValidationPolicy::Drop);
    assert!(result.is_err());
}

#[test]
fn test_default_schema_accepts_anything() {
    let validator =
        SchemaValidator::new("departments", &default_schema(), ValidationPolicy::Fail).unwrap();

    assert!(validator.is_valid(&json!({"anything": [1, 2, 3]})));
    assert!(validator.is_valid(&json!({})));
}

#[test]
fn test_validator_metadata() {
    let validator =
        SchemaValidator::new("offers", &default_schema(), ValidationPolicy::Drop).unwrap();
    assert_eq!(validator.stream(), "offers");
    assert_eq!(validator.policy(), ValidationPolicy::Drop);
}
