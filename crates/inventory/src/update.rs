//! Field-level update contract: one named field of one record per request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use meditrack_core::RecordId;

use crate::field::Field;
use crate::record::{InventoryRecord, RecordKind};
use crate::validation::{FieldValue, ValidationContext, ValidationError, validate_field};

/// Request to change one field of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdateRequest {
    pub kind: RecordKind,
    pub record_id: RecordId,
    pub field_name: String,
    pub new_value: String,
}

impl FieldUpdateRequest {
    pub fn new(
        kind: RecordKind,
        record_id: RecordId,
        field_name: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            record_id,
            field_name: field_name.into(),
            new_value: new_value.into(),
        }
    }
}

/// Outcome of an update, as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdateResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FieldUpdateResult {
    pub fn ok(formatted_value: impl Into<String>) -> Self {
        Self {
            success: true,
            formatted_value: Some(formatted_value.into()),
            error_message: None,
        }
    }

    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            formatted_value: None,
            error_message: Some(error_message.into()),
        }
    }
}

impl From<Result<FieldValue, UpdateError>> for FieldUpdateResult {
    fn from(res: Result<FieldValue, UpdateError>) -> Self {
        match res {
            Ok(v) => Self::ok(v.display()),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: RecordId },

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error(transparent)]
    InvalidValue(#[from] ValidationError),
}

/// Resolve a wire field name against the kind's schema.
pub fn resolve_field(kind: RecordKind, field_name: &str) -> Result<Field, UpdateError> {
    field_name
        .parse::<Field>()
        .ok()
        .filter(|f| kind.allows(*f))
        .ok_or_else(|| UpdateError::InvalidField(field_name.to_string()))
}

/// Schema check plus value validation, without touching any record.
pub fn validate_update(
    kind: RecordKind,
    field_name: &str,
    raw: &str,
    ctx: &ValidationContext,
) -> Result<(Field, FieldValue), UpdateError> {
    let field = resolve_field(kind, field_name)?;
    let value = validate_field(field, raw, ctx)?;
    Ok((field, value))
}

/// Validate against `record`'s own state and write the field in place.
pub fn apply_update(
    record: &mut InventoryRecord,
    field_name: &str,
    raw: &str,
    today: chrono::NaiveDate,
) -> Result<FieldValue, UpdateError> {
    let ctx = record.validation_context(today);
    let (field, value) = validate_update(record.kind(), field_name, raw, &ctx)?;
    if !record.set(field, value.clone()) {
        return Err(UpdateError::InvalidField(field_name.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::{equipment, medicine, ymd};

    #[test]
    fn cost_update_returns_formatted_value() {
        let mut rec = medicine(1, 10, ymd(2027, 1, 1));
        let v = apply_update(&mut rec, "cost", "19.5", ymd(2026, 10, 19)).unwrap();
        assert_eq!(v.display(), "₹19.50");
        assert_eq!(rec.display(crate::Field::Cost).as_deref(), Some("₹19.50"));
    }

    #[test]
    fn field_outside_schema_is_invalid_field() {
        let mut rec = medicine(1, 10, ymd(2027, 1, 1));
        let err = apply_update(&mut rec, "next_maintenance", "2027-01-01", ymd(2026, 10, 19))
            .unwrap_err();
        assert_eq!(err, UpdateError::InvalidField("next_maintenance".into()));
        assert_eq!(err.to_string(), "Invalid field: next_maintenance");

        let err = apply_update(&mut rec, "colour", "red", ymd(2026, 10, 19)).unwrap_err();
        assert!(matches!(err, UpdateError::InvalidField(_)));
    }

    #[test]
    fn rejected_value_leaves_record_untouched() {
        let mut rec = equipment(2, ymd(2026, 5, 1), ymd(2026, 11, 1));
        let before = rec.clone();
        let err = apply_update(&mut rec, "next_maintenance", "2026-05-01", ymd(2026, 10, 19))
            .unwrap_err();
        assert_eq!(err, UpdateError::InvalidValue(ValidationError::MaintenanceOrder));
        assert_eq!(rec, before);
    }

    #[test]
    fn result_conversion() {
        let ok: FieldUpdateResult = Ok(FieldValue::Quantity(7)).into();
        assert_eq!(ok, FieldUpdateResult::ok("7"));

        let err: FieldUpdateResult = Err(UpdateError::NotFound {
            kind: RecordKind::Medicine,
            id: RecordId::new(99),
        })
        .into();
        assert!(!err.success);
        assert_eq!(err.error_message.as_deref(), Some("medicine 99 not found"));
    }
}
