//! Payload validation for write endpoints.
//!
//! A payload goes through two passes. The shape pass walks the raw JSON and
//! records every declared field that is missing or not a string. The rule pass
//! then deserializes the typed record, with shape-violating fields stood in by
//! placeholders, trims it, and runs the record's `validator` rules. Rule
//! failures on fields already rejected by the shape pass are dropped, so each
//! field is reported once.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use service_core::validation::{FieldViolation, ValidationReport};
use validator::Validate;

use crate::models::EntityKind;

/// A declared string field of an entity schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

pub trait Schema: DeserializeOwned + Validate {
    const ENTITY: EntityKind;
    const FIELDS: &'static [FieldSpec];

    /// Canonicalizes values before rule checks run.
    fn normalize(&mut self) {}
}

/// Turns a raw request body into a validated record of type `T`.
pub fn validate_payload<T: Schema>(body: &[u8]) -> Result<T, ValidationReport> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationReport::single("body", format!("invalid JSON: {}", e)))?;

    let object = match value {
        Value::Object(map) => map,
        _ => return Err(ValidationReport::single("body", "expected a JSON object")),
    };

    let mut report = check_shape(T::FIELDS, &object);
    let candidate = rule_candidate(T::FIELDS, object, &report);

    let mut record: T = serde_json::from_value(Value::Object(candidate))
        .map_err(|e| ValidationReport::single("body", e.to_string()))?;
    record.normalize();

    if let Err(errors) = record.validate() {
        for violation in ValidationReport::from(errors).violations() {
            if !report.contains_field(&violation.field) {
                report.push(violation.clone());
            }
        }
    }

    report.into_result()?;
    Ok(record)
}

fn check_shape(fields: &[FieldSpec], object: &Map<String, Value>) -> ValidationReport {
    let mut report = ValidationReport::new();
    for spec in fields {
        match object.get(spec.name) {
            None | Some(Value::Null) if spec.required => {
                report.push(FieldViolation::missing(spec.name));
            }
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => report.push(FieldViolation::wrong_type(spec.name, "string")),
        }
    }
    report
}

/// Declared fields only, with every shape-rejected field made deserializable:
/// required ones become an empty string, optional ones are removed.
fn rule_candidate(
    fields: &[FieldSpec],
    mut object: Map<String, Value>,
    shape: &ValidationReport,
) -> Map<String, Value> {
    object.retain(|key, _| fields.iter().any(|spec| spec.name == key.as_str()));
    for spec in fields.iter().filter(|spec| shape.contains_field(spec.name)) {
        if spec.required {
            object.insert(spec.name.to_string(), Value::String(String::new()));
        } else {
            object.remove(spec.name);
        }
    }
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConnectionRequest, Lead};

    #[test]
    fn test_minimal_lead_is_accepted() {
        let lead: Lead = validate_payload(br#"{"name":"A","email":"a@b.com"}"#).unwrap();
        assert_eq!(lead.name, "A");
        assert_eq!(lead.email, "a@b.com");
        assert_eq!(lead.phone, None);
    }

    #[test]
    fn test_every_shape_violation_is_reported() {
        let report = validate_payload::<Lead>(br#"{"phone": 12345, "source": ["x"]}"#)
            .unwrap_err();

        let fields: Vec<&str> = report
            .violations()
            .iter()
            .map(|v| v.field.as_str())
            .collect();
        assert_eq!(fields, vec!["name", "email", "phone", "source"]);
        assert_eq!(report.violations()[0].reason, "missing");
        assert_eq!(report.violations()[2].reason, "wrong type (expected string)");
    }

    #[test]
    fn test_rule_violations_are_reported_alongside_shape_violations() {
        let report =
            validate_payload::<Lead>(br#"{"email":"a@b.com","phone":"1"}"#).unwrap_err();

        assert_eq!(
            report.violations(),
            &[
                FieldViolation::missing("name"),
                FieldViolation::new("phone", "must be between 5 and 32 characters"),
            ]
        );
    }

    #[test]
    fn test_shape_rejected_field_is_reported_once() {
        let report =
            validate_payload::<ConnectionRequest>(br#"{"name": 7, "email": "bad"}"#).unwrap_err();

        assert_eq!(
            report.violations(),
            &[
                FieldViolation::wrong_type("name", "string"),
                FieldViolation::new("email", "must be a valid email address"),
            ]
        );
    }

    #[test]
    fn test_null_required_field_counts_as_missing() {
        let report =
            validate_payload::<Lead>(br#"{"name": null, "email": "a@b.com"}"#).unwrap_err();
        assert_eq!(report.violations(), &[FieldViolation::missing("name")]);
    }

    #[test]
    fn test_rule_violations_follow_shape_pass() {
        let report = validate_payload::<ConnectionRequest>(
            br#"{"name": "   ", "email": "not-an-email"}"#,
        )
        .unwrap_err();

        assert!(report.contains_field("name"));
        assert!(report.contains_field("email"));
    }

    #[test]
    fn test_optional_values_are_trimmed_and_blank_dropped() {
        let request: ConnectionRequest = validate_payload(
            br#"{"name":" Ada ","email":"ada@example.com","company":"  ","topic":" Custody "}"#,
        )
        .unwrap();

        assert_eq!(request.name, "Ada");
        assert_eq!(request.company, None);
        assert_eq!(request.topic.as_deref(), Some("Custody"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let lead: Lead =
            validate_payload(br#"{"name":"A","email":"a@b.com","admin":true}"#).unwrap();
        assert_eq!(lead.source, None);
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let report = validate_payload::<Lead>(b"[1,2,3]").unwrap_err();
        assert_eq!(
            report.violations(),
            &[FieldViolation::new("body", "expected a JSON object")]
        );

        let report = validate_payload::<Lead>(b"{not json").unwrap_err();
        assert!(report.contains_field("body"));
    }
}
