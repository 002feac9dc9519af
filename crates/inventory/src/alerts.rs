//! Alert and dashboard read models built from current records.

use chrono::NaiveDate;
use serde::Serialize;

use meditrack_core::RecordId;

use crate::money::Money;
use crate::record::{InventoryRecord, RecordKind};
use crate::status::{EXPIRY_WINDOW_DAYS, LOW_STOCK_THRESHOLD, MAINTENANCE_WINDOW_DAYS, days_until};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryAlert {
    pub id: RecordId,
    pub name: String,
    pub manufacturer: String,
    pub quantity: u32,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceAlert {
    pub kind: RecordKind,
    pub id: RecordId,
    pub name: String,
    pub manufacturer: String,
    pub next_maintenance: NaiveDate,
    pub days_until_maintenance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockAlert {
    pub kind: RecordKind,
    pub id: RecordId,
    pub name: String,
    pub manufacturer: String,
    pub quantity: u32,
    pub cost: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub expiring_medicines: Vec<ExpiryAlert>,
    pub maintenance_due: Vec<MaintenanceAlert>,
    pub low_stock: Vec<LowStockAlert>,
    pub alert_count: usize,
}

/// Collect alerts across all kinds.
///
/// Expiring medicines include already-expired ones. Lists are ordered by
/// urgency: soonest date first, lowest quantity first.
pub fn collect_alerts<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
    today: NaiveDate,
) -> AlertSummary {
    let mut summary = AlertSummary::default();

    for rec in records {
        if let Some(expiry_date) = rec.expiry_date() {
            let days = days_until(expiry_date, today);
            if days <= EXPIRY_WINDOW_DAYS {
                summary.expiring_medicines.push(ExpiryAlert {
                    id: rec.id,
                    name: rec.name().to_string(),
                    manufacturer: rec.manufacturer().to_string(),
                    quantity: rec.quantity().unwrap_or_default(),
                    expiry_date,
                    days_until_expiry: days,
                });
            }
        }

        if let Some(next) = rec.next_maintenance() {
            let days = days_until(next, today);
            if days <= MAINTENANCE_WINDOW_DAYS {
                summary.maintenance_due.push(MaintenanceAlert {
                    kind: rec.kind(),
                    id: rec.id,
                    name: rec.name().to_string(),
                    manufacturer: rec.manufacturer().to_string(),
                    next_maintenance: next,
                    days_until_maintenance: days,
                });
            }
        }

        if let Some(quantity) = rec.quantity() {
            if quantity <= LOW_STOCK_THRESHOLD {
                summary.low_stock.push(LowStockAlert {
                    kind: rec.kind(),
                    id: rec.id,
                    name: rec.name().to_string(),
                    manufacturer: rec.manufacturer().to_string(),
                    quantity,
                    cost: rec.cost(),
                });
            }
        }
    }

    summary
        .expiring_medicines
        .sort_by_key(|a| (a.expiry_date, a.id));
    summary
        .maintenance_due
        .sort_by_key(|a| (a.next_maintenance, a.kind, a.id));
    summary.low_stock.sort_by_key(|a| (a.quantity, a.kind, a.id));
    summary.alert_count =
        summary.expiring_medicines.len() + summary.maintenance_due.len() + summary.low_stock.len();
    summary
}

/// Landing-page counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub medicine_count: usize,
    pub equipment_count: usize,
    pub surgery_supply_count: usize,
    pub alerts: AlertSummary,
}

pub fn dashboard<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord> + Clone,
    today: NaiveDate,
) -> Dashboard {
    let count = |kind: RecordKind| records.clone().into_iter().filter(|r| r.kind() == kind).count();
    Dashboard {
        medicine_count: count(RecordKind::Medicine),
        equipment_count: count(RecordKind::Equipment),
        surgery_supply_count: count(RecordKind::SurgerySupply),
        alerts: collect_alerts(records, today),
    }
}
