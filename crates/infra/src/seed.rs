//! Sample records for development and demos.

use chrono::NaiveDate;

use meditrack_core::{DomainError, DomainResult, RecordId};
use meditrack_inventory::{Equipment, InventoryRecord, Medicine, Money, RecordData, SurgerySupply};

use crate::record_store::RecordStore;

fn date(y: i32, m: u32, d: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DomainError::validation(format!("invalid seed date {y}-{m:02}-{d:02}")))
}

/// One record per kind, each with id 1.
pub fn sample_records(date_added: NaiveDate) -> DomainResult<Vec<InventoryRecord>> {
    Ok(vec![
        InventoryRecord::new(
            RecordId::new(1),
            date_added,
            RecordData::Equipment(Equipment {
                name: "X-Ray Machine".into(),
                manufacturer: "Siemens".into(),
                cost: Money::from_paise(5_000_000),
                location: "Radiology".into(),
                last_maintenance: date(2026, 4, 1)?,
                next_maintenance: date(2026, 12, 1)?,
                status: "Operational".into(),
            }),
        ),
        InventoryRecord::new(
            RecordId::new(1),
            date_added,
            RecordData::Medicine(Medicine {
                name: "Paracetamol".into(),
                manufacturer: "GSK".into(),
                quantity: 100,
                cost: Money::from_paise(599),
                expiry_date: date(2027, 12, 31)?,
            }),
        ),
        InventoryRecord::new(
            RecordId::new(1),
            date_added,
            RecordData::SurgerySupply(SurgerySupply {
                name: "Surgical Scissors".into(),
                manufacturer: "Medtronic".into(),
                cost: Money::from_paise(12_999),
                last_maintenance: date(2026, 5, 15)?,
                next_maintenance: date(2026, 11, 15)?,
                quantity: 50,
                item_type: "Cutting".into(),
            }),
        ),
    ])
}

pub fn load_records(store: &dyn RecordStore, date_added: NaiveDate) -> DomainResult<usize> {
    let records = sample_records(date_added)?;
    let n = records.len();
    for rec in records {
        store.insert(rec)?;
    }
    tracing::info!(records = n, "seed records loaded");
    Ok(n)
}
