//! Building new records from raw form values.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use meditrack_core::RecordId;

use crate::field::Field;
use crate::record::{Equipment, InventoryRecord, Medicine, RecordData, RecordKind, SurgerySupply};
use crate::update::resolve_field;
use crate::validation::{FieldValue, ValidationContext, ValidationError, validate_field};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateError {
    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("{} is required", .0.label())]
    Missing(Field),

    #[error("{}: {source}", .field.label())]
    Invalid {
        field: Field,
        source: ValidationError,
    },
}

/// Fields that fall back to a default when omitted.
fn has_default(field: Field) -> bool {
    matches!(field, Field::Location | Field::Status)
}

struct Values(BTreeMap<Field, FieldValue>);

impl Values {
    fn take(&mut self, field: Field) -> Result<FieldValue, CreateError> {
        self.0.remove(&field).ok_or(CreateError::Missing(field))
    }

    fn text(&mut self, field: Field) -> Result<String, CreateError> {
        match self.take(field)? {
            FieldValue::Text(s) => Ok(s),
            other => Ok(other.display()),
        }
    }

    fn text_or(&mut self, field: Field, default: &str) -> String {
        self.text(field).unwrap_or_else(|_| default.to_string())
    }

    fn money(&mut self, field: Field) -> Result<crate::Money, CreateError> {
        match self.take(field)? {
            FieldValue::Money(m) => Ok(m),
            _ => Err(CreateError::Missing(field)),
        }
    }

    fn quantity(&mut self, field: Field) -> Result<u32, CreateError> {
        match self.take(field)? {
            FieldValue::Quantity(q) => Ok(q),
            _ => Err(CreateError::Missing(field)),
        }
    }

    fn date(&mut self, field: Field) -> Result<NaiveDate, CreateError> {
        match self.take(field)? {
            FieldValue::Date(d) => Ok(d),
            _ => Err(CreateError::Missing(field)),
        }
    }
}

/// Validate every submitted value with the shared field rules and assemble a
/// record of `kind`.
///
/// Maintenance dates are checked against each other: `last_maintenance` is
/// validated first and `next_maintenance` must fall strictly after it.
pub fn build_record(
    kind: RecordKind,
    id: RecordId,
    date_added: NaiveDate,
    raw: &BTreeMap<String, String>,
    today: NaiveDate,
) -> Result<InventoryRecord, CreateError> {
    let mut submitted = BTreeMap::new();
    for (name, value) in raw {
        let field = resolve_field(kind, name).map_err(|_| CreateError::InvalidField(name.clone()))?;
        submitted.insert(field, value.as_str());
    }

    let mut ctx = ValidationContext::new(today);
    let mut values = BTreeMap::new();
    for &field in kind.fields() {
        let Some(raw) = submitted.get(&field) else {
            if has_default(field) {
                continue;
            }
            return Err(CreateError::Missing(field));
        };
        let value = validate_field(field, raw, &ctx)
            .map_err(|source| CreateError::Invalid { field, source })?;
        if let (Field::LastMaintenance, FieldValue::Date(d)) = (field, &value) {
            ctx.last_maintenance = Some(*d);
        }
        values.insert(field, value);
    }
    let mut v = Values(values);

    let data = match kind {
        RecordKind::Medicine => RecordData::Medicine(Medicine {
            name: v.text(Field::Name)?,
            manufacturer: v.text(Field::Manufacturer)?,
            quantity: v.quantity(Field::Quantity)?,
            cost: v.money(Field::Cost)?,
            expiry_date: v.date(Field::ExpiryDate)?,
        }),
        RecordKind::Equipment => RecordData::Equipment(Equipment {
            name: v.text(Field::Name)?,
            manufacturer: v.text(Field::Manufacturer)?,
            cost: v.money(Field::Cost)?,
            location: v.text_or(Field::Location, "Unknown"),
            last_maintenance: v.date(Field::LastMaintenance)?,
            next_maintenance: v.date(Field::NextMaintenance)?,
            status: v.text_or(Field::Status, "Operational"),
        }),
        RecordKind::SurgerySupply => RecordData::SurgerySupply(SurgerySupply {
            name: v.text(Field::Name)?,
            manufacturer: v.text(Field::Manufacturer)?,
            cost: v.money(Field::Cost)?,
            last_maintenance: v.date(Field::LastMaintenance)?,
            next_maintenance: v.date(Field::NextMaintenance)?,
            quantity: v.quantity(Field::Quantity)?,
            item_type: v.text(Field::ItemType)?,
        }),
    };

    Ok(InventoryRecord::new(id, date_added, data))
}
