//! Field schema: every editable attribute an inventory record can carry.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Editable record field, named by its wire name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Manufacturer,
    Quantity,
    Cost,
    ExpiryDate,
    LastMaintenance,
    NextMaintenance,
    Location,
    Status,
    #[serde(rename = "type")]
    ItemType,
}

/// Format class that decides which validation rules apply to a field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldClass {
    Date,
    Numeric,
    Text,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Manufacturer,
        Field::Quantity,
        Field::Cost,
        Field::ExpiryDate,
        Field::LastMaintenance,
        Field::NextMaintenance,
        Field::Location,
        Field::Status,
        Field::ItemType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Manufacturer => "manufacturer",
            Field::Quantity => "quantity",
            Field::Cost => "cost",
            Field::ExpiryDate => "expiry_date",
            Field::LastMaintenance => "last_maintenance",
            Field::NextMaintenance => "next_maintenance",
            Field::Location => "location",
            Field::Status => "status",
            Field::ItemType => "type",
        }
    }

    /// Column header used in tables and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Manufacturer => "Manufacturer",
            Field::Quantity => "Quantity",
            Field::Cost => "Cost",
            Field::ExpiryDate => "Expiry Date",
            Field::LastMaintenance => "Last Maintenance",
            Field::NextMaintenance => "Next Maintenance",
            Field::Location => "Location",
            Field::Status => "Status",
            Field::ItemType => "Type",
        }
    }

    pub fn class(&self) -> FieldClass {
        match self {
            Field::ExpiryDate | Field::LastMaintenance | Field::NextMaintenance => FieldClass::Date,
            Field::Cost | Field::Quantity => FieldClass::Numeric,
            _ => FieldClass::Text,
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert_eq!("type".parse::<Field>().unwrap(), Field::ItemType);
        assert!("price".parse::<Field>().is_err());
    }

    #[test]
    fn classes() {
        assert_eq!(Field::ExpiryDate.class(), FieldClass::Date);
        assert_eq!(Field::NextMaintenance.class(), FieldClass::Date);
        assert_eq!(Field::Cost.class(), FieldClass::Numeric);
        assert_eq!(Field::Quantity.class(), FieldClass::Numeric);
        assert_eq!(Field::Manufacturer.class(), FieldClass::Text);
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Field::ItemType).unwrap(), "\"type\"");
        assert_eq!(
            serde_json::from_str::<Field>("\"expiry_date\"").unwrap(),
            Field::ExpiryDate
        );
    }
}
