//! Derived status flags (expiry, stock, maintenance).
//!
//! Pure function of a record and the current date; recomputed on every render
//! and never stored.

use chrono::NaiveDate;
use serde::Serialize;

use crate::field::Field;
use crate::record::InventoryRecord;

/// Expiry within this many days is "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Maintenance within this many days is "maintenance soon".
pub const MAINTENANCE_WINDOW_DAYS: i64 = 7;

/// Quantity at or below this is "low stock".
pub const LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFlag {
    ExpiringSoon,
    Expired,
    LowStock,
    MaintenanceSoon,
    MaintenanceOverdue,
}

impl StatusFlag {
    /// CSS class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFlag::ExpiringSoon => "expiring-soon",
            StatusFlag::Expired => "expired",
            StatusFlag::LowStock => "low-stock",
            StatusFlag::MaintenanceSoon => "maintenance-soon",
            StatusFlag::MaintenanceOverdue => "maintenance-overdue",
        }
    }

    /// The cell this flag decorates.
    pub fn field(&self) -> Field {
        match self {
            StatusFlag::ExpiringSoon | StatusFlag::Expired => Field::ExpiryDate,
            StatusFlag::LowStock => Field::Quantity,
            StatusFlag::MaintenanceSoon | StatusFlag::MaintenanceOverdue => Field::NextMaintenance,
        }
    }
}

impl core::fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flag plus its tooltip text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMark {
    pub flag: StatusFlag,
    pub field: Field,
    pub title: String,
}

impl StatusMark {
    fn new(flag: StatusFlag, title: impl Into<String>) -> Self {
        Self {
            flag,
            field: flag.field(),
            title: title.into(),
        }
    }
}

/// All flags that currently apply to one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DerivedStatus(Vec<StatusMark>);

impl DerivedStatus {
    pub fn has(&self, flag: StatusFlag) -> bool {
        self.0.iter().any(|m| m.flag == flag)
    }

    pub fn marks(&self) -> &[StatusMark] {
        &self.0
    }

    pub fn flags(&self) -> impl Iterator<Item = StatusFlag> + '_ {
        self.0.iter().map(|m| m.flag)
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &StatusMark> + '_ {
        self.0.iter().filter(move |m| m.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whole days from `today` to `date`.
///
/// Both sides are calendar dates, so this equals the ceiling of the elapsed
/// time in days.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn expiry_mark(expiry_date: NaiveDate, today: NaiveDate) -> Option<StatusMark> {
    let days = days_until(expiry_date, today);
    if days <= 0 {
        Some(StatusMark::new(StatusFlag::Expired, "Expired"))
    } else if days <= EXPIRY_WINDOW_DAYS {
        Some(StatusMark::new(
            StatusFlag::ExpiringSoon,
            format!("Expiring in {days} days"),
        ))
    } else {
        None
    }
}

pub fn stock_mark(quantity: u32) -> Option<StatusMark> {
    (quantity <= LOW_STOCK_THRESHOLD).then(|| StatusMark::new(StatusFlag::LowStock, "Low stock"))
}

pub fn maintenance_mark(next_maintenance: NaiveDate, today: NaiveDate) -> Option<StatusMark> {
    let days = days_until(next_maintenance, today);
    if days <= 0 {
        Some(StatusMark::new(
            StatusFlag::MaintenanceOverdue,
            "Maintenance overdue",
        ))
    } else if days <= MAINTENANCE_WINDOW_DAYS {
        Some(StatusMark::new(
            StatusFlag::MaintenanceSoon,
            format!("Maintenance due in {days} days"),
        ))
    } else {
        None
    }
}

/// Compute every flag for `record` as of `today`.
pub fn derive_status(record: &InventoryRecord, today: NaiveDate) -> DerivedStatus {
    let marks = [
        record.expiry_date().and_then(|d| expiry_mark(d, today)),
        record.quantity().and_then(stock_mark),
        record.next_maintenance().and_then(|d| maintenance_mark(d, today)),
    ];
    DerivedStatus(marks.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::{equipment, medicine, surgery_supply, ymd};
    use chrono::Duration;

    fn today() -> NaiveDate {
        ymd(2026, 10, 19)
    }

    #[test]
    fn low_quantity_is_low_stock() {
        let rec = medicine(1, 3, today() + Duration::days(200));
        let status = derive_status(&rec, today());
        assert!(status.has(StatusFlag::LowStock));
        assert!(!status.has(StatusFlag::ExpiringSoon));

        let rec = medicine(1, 5, today() + Duration::days(200));
        assert!(derive_status(&rec, today()).has(StatusFlag::LowStock));
        let rec = medicine(1, 6, today() + Duration::days(200));
        assert!(derive_status(&rec, today()).is_empty());
    }

    #[test]
    fn ten_days_out_is_expiring_soon_not_expired() {
        let rec = medicine(1, 100, today() + Duration::days(10));
        let status = derive_status(&rec, today());
        assert!(status.has(StatusFlag::ExpiringSoon));
        assert!(!status.has(StatusFlag::Expired));
        let mark = status.for_field(Field::ExpiryDate).next().unwrap();
        assert_eq!(mark.title, "Expiring in 10 days");
    }

    #[test]
    fn expiry_boundaries() {
        let flag = |days: i64| expiry_mark(today() + Duration::days(days), today()).map(|m| m.flag);
        assert_eq!(flag(31), None);
        assert_eq!(flag(30), Some(StatusFlag::ExpiringSoon));
        assert_eq!(flag(1), Some(StatusFlag::ExpiringSoon));
        assert_eq!(flag(0), Some(StatusFlag::Expired));
        assert_eq!(flag(-5), Some(StatusFlag::Expired));
    }

    #[test]
    fn maintenance_boundaries() {
        let flag =
            |days: i64| maintenance_mark(today() + Duration::days(days), today()).map(|m| m.flag);
        assert_eq!(flag(8), None);
        assert_eq!(flag(7), Some(StatusFlag::MaintenanceSoon));
        assert_eq!(flag(1), Some(StatusFlag::MaintenanceSoon));
        assert_eq!(flag(0), Some(StatusFlag::MaintenanceOverdue));
        assert_eq!(flag(-30), Some(StatusFlag::MaintenanceOverdue));
    }

    #[test]
    fn flags_are_not_exclusive() {
        let rec = medicine(1, 2, today() + Duration::days(3));
        let flags: Vec<_> = derive_status(&rec, today()).flags().collect();
        assert_eq!(flags, vec![StatusFlag::ExpiringSoon, StatusFlag::LowStock]);

        let rec = surgery_supply(2, 1, today() - Duration::days(1));
        let status = derive_status(&rec, today());
        assert!(status.has(StatusFlag::LowStock));
        assert!(status.has(StatusFlag::MaintenanceOverdue));
    }

    #[test]
    fn equipment_has_no_stock_flag() {
        let rec = equipment(1, ymd(2026, 1, 1), today() + Duration::days(2));
        let status = derive_status(&rec, today());
        assert_eq!(status.flags().collect::<Vec<_>>(), vec![StatusFlag::MaintenanceSoon]);
        assert_eq!(
            status.for_field(Field::NextMaintenance).next().unwrap().title,
            "Maintenance due in 2 days"
        );
    }
}
