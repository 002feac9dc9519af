use chrono::NaiveDate;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use meditrack_core::{Entity, RecordId};

use crate::field::Field;
use crate::money::Money;
use crate::validation::{FieldValue, ValidationContext};

/// The three record collections. A record's kind is fixed at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Medicine,
    Equipment,
    SurgerySupply,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown record kind: {0}")]
pub struct UnknownKind(pub String);

const MEDICINE_FIELDS: &[Field] = &[
    Field::Name,
    Field::Manufacturer,
    Field::Quantity,
    Field::Cost,
    Field::ExpiryDate,
];

const EQUIPMENT_FIELDS: &[Field] = &[
    Field::Name,
    Field::Manufacturer,
    Field::Cost,
    Field::LastMaintenance,
    Field::NextMaintenance,
    Field::Location,
    Field::Status,
];

const SURGERY_SUPPLY_FIELDS: &[Field] = &[
    Field::Name,
    Field::Manufacturer,
    Field::Cost,
    Field::LastMaintenance,
    Field::NextMaintenance,
    Field::Quantity,
    Field::ItemType,
];

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Medicine,
        RecordKind::Equipment,
        RecordKind::SurgerySupply,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Medicine => "medicine",
            RecordKind::Equipment => "equipment",
            RecordKind::SurgerySupply => "surgery_supply",
        }
    }

    /// Declared field set, in table column order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            RecordKind::Medicine => MEDICINE_FIELDS,
            RecordKind::Equipment => EQUIPMENT_FIELDS,
            RecordKind::SurgerySupply => SURGERY_SUPPLY_FIELDS,
        }
    }

    pub fn allows(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "medicine" | "medicines" => Ok(RecordKind::Medicine),
            "equipment" | "equipments" => Ok(RecordKind::Equipment),
            "surgery_supply" | "surgery_supplies" | "surgery" | "general_surgery"
            | "general_surgerys" => Ok(RecordKind::SurgerySupply),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub manufacturer: String,
    pub quantity: u32,
    pub cost: Money,
    pub expiry_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub manufacturer: String,
    pub cost: Money,
    #[serde(default = "unknown_location")]
    pub location: String,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    #[serde(default = "operational")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurgerySupply {
    pub name: String,
    pub manufacturer: String,
    pub cost: Money,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub item_type: String,
}

fn unknown_location() -> String {
    "Unknown".to_string()
}

fn operational() -> String {
    "Operational".to_string()
}

/// Kind-specific payload. The variant *is* the kind, so it cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordData {
    Medicine(Medicine),
    Equipment(Equipment),
    SurgerySupply(SurgerySupply),
}

/// One inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: RecordId,
    pub date_added: NaiveDate,
    #[serde(flatten)]
    data: RecordData,
}

impl Entity for InventoryRecord {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl InventoryRecord {
    pub fn new(id: RecordId, date_added: NaiveDate, data: RecordData) -> Self {
        Self {
            id,
            date_added,
            data,
        }
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    pub fn kind(&self) -> RecordKind {
        match self.data {
            RecordData::Medicine(_) => RecordKind::Medicine,
            RecordData::Equipment(_) => RecordKind::Equipment,
            RecordData::SurgerySupply(_) => RecordKind::SurgerySupply,
        }
    }

    pub fn name(&self) -> &str {
        match &self.data {
            RecordData::Medicine(m) => &m.name,
            RecordData::Equipment(e) => &e.name,
            RecordData::SurgerySupply(s) => &s.name,
        }
    }

    pub fn manufacturer(&self) -> &str {
        match &self.data {
            RecordData::Medicine(m) => &m.manufacturer,
            RecordData::Equipment(e) => &e.manufacturer,
            RecordData::SurgerySupply(s) => &s.manufacturer,
        }
    }

    pub fn cost(&self) -> Money {
        match &self.data {
            RecordData::Medicine(m) => m.cost,
            RecordData::Equipment(e) => e.cost,
            RecordData::SurgerySupply(s) => s.cost,
        }
    }

    pub fn quantity(&self) -> Option<u32> {
        match &self.data {
            RecordData::Medicine(m) => Some(m.quantity),
            RecordData::Equipment(_) => None,
            RecordData::SurgerySupply(s) => Some(s.quantity),
        }
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        match &self.data {
            RecordData::Medicine(m) => Some(m.expiry_date),
            _ => None,
        }
    }

    pub fn last_maintenance(&self) -> Option<NaiveDate> {
        match &self.data {
            RecordData::Medicine(_) => None,
            RecordData::Equipment(e) => Some(e.last_maintenance),
            RecordData::SurgerySupply(s) => Some(s.last_maintenance),
        }
    }

    pub fn next_maintenance(&self) -> Option<NaiveDate> {
        match &self.data {
            RecordData::Medicine(_) => None,
            RecordData::Equipment(e) => Some(e.next_maintenance),
            RecordData::SurgerySupply(s) => Some(s.next_maintenance),
        }
    }

    /// Current value of `field`, or `None` if the kind has no such field.
    pub fn value(&self, field: Field) -> Option<FieldValue> {
        let text = |s: &String| Some(FieldValue::Text(s.clone()));
        match (&self.data, field) {
            (_, Field::Name) => Some(FieldValue::Text(self.name().to_string())),
            (_, Field::Manufacturer) => Some(FieldValue::Text(self.manufacturer().to_string())),
            (_, Field::Cost) => Some(FieldValue::Money(self.cost())),
            (_, Field::Quantity) => self.quantity().map(FieldValue::Quantity),
            (_, Field::ExpiryDate) => self.expiry_date().map(FieldValue::Date),
            (_, Field::LastMaintenance) => self.last_maintenance().map(FieldValue::Date),
            (_, Field::NextMaintenance) => self.next_maintenance().map(FieldValue::Date),
            (RecordData::Equipment(e), Field::Location) => text(&e.location),
            (RecordData::Equipment(e), Field::Status) => text(&e.status),
            (RecordData::SurgerySupply(s), Field::ItemType) => text(&s.item_type),
            _ => None,
        }
    }

    /// Display text for a cell.
    pub fn display(&self, field: Field) -> Option<String> {
        self.value(field).map(|v| v.display())
    }

    /// Rule context for editing this record on `today`.
    pub fn validation_context(&self, today: NaiveDate) -> ValidationContext {
        ValidationContext::new(today)
            .with_maintenance(self.last_maintenance(), self.next_maintenance())
    }

    /// Write one validated value. Returns `false` (and changes nothing) when
    /// the field is not part of this kind or the value has the wrong shape.
    pub fn set(&mut self, field: Field, value: FieldValue) -> bool {
        use FieldValue as V;

        match (&mut self.data, field, value) {
            (RecordData::Medicine(m), Field::Name, V::Text(s)) => m.name = s,
            (RecordData::Equipment(e), Field::Name, V::Text(s)) => e.name = s,
            (RecordData::SurgerySupply(x), Field::Name, V::Text(s)) => x.name = s,

            (RecordData::Medicine(m), Field::Manufacturer, V::Text(s)) => m.manufacturer = s,
            (RecordData::Equipment(e), Field::Manufacturer, V::Text(s)) => e.manufacturer = s,
            (RecordData::SurgerySupply(x), Field::Manufacturer, V::Text(s)) => x.manufacturer = s,

            (RecordData::Medicine(m), Field::Cost, V::Money(c)) => m.cost = c,
            (RecordData::Equipment(e), Field::Cost, V::Money(c)) => e.cost = c,
            (RecordData::SurgerySupply(x), Field::Cost, V::Money(c)) => x.cost = c,

            (RecordData::Medicine(m), Field::Quantity, V::Quantity(q)) => m.quantity = q,
            (RecordData::SurgerySupply(x), Field::Quantity, V::Quantity(q)) => x.quantity = q,

            (RecordData::Medicine(m), Field::ExpiryDate, V::Date(d)) => m.expiry_date = d,

            (RecordData::Equipment(e), Field::LastMaintenance, V::Date(d)) => {
                e.last_maintenance = d
            }
            (RecordData::SurgerySupply(x), Field::LastMaintenance, V::Date(d)) => {
                x.last_maintenance = d
            }
            (RecordData::Equipment(e), Field::NextMaintenance, V::Date(d)) => {
                e.next_maintenance = d
            }
            (RecordData::SurgerySupply(x), Field::NextMaintenance, V::Date(d)) => {
                x.next_maintenance = d
            }

            (RecordData::Equipment(e), Field::Location, V::Text(s)) => e.location = s,
            (RecordData::Equipment(e), Field::Status, V::Text(s)) => e.status = s,
            (RecordData::SurgerySupply(x), Field::ItemType, V::Text(s)) => x.item_type = s,

            _ => return false,
        }
        true
    }
}
