//! Inventory valuation report.

use chrono::NaiveDate;
use serde::Serialize;

use meditrack_core::RecordId;

use crate::money::Money;
use crate::record::{InventoryRecord, RecordKind};

/// Which records a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Inclusive `date_added` range.
    pub added_between: Option<(NaiveDate, NaiveDate)>,
    /// `None` means every kind.
    pub kind: Option<RecordKind>,
}

impl ReportFilter {
    fn includes(&self, rec: &InventoryRecord) -> bool {
        let kind_ok = self.kind.is_none_or(|k| k == rec.kind());
        let date_ok = self
            .added_between
            .is_none_or(|(from, to)| rec.date_added >= from && rec.date_added <= to);
        kind_ok && date_ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindTotals {
    pub kind: RecordKind,
    pub count: usize,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub kind: RecordKind,
    pub id: RecordId,
    pub name: String,
    pub manufacturer: String,
    pub cost: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub date_added: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub totals: Vec<KindTotals>,
    pub total_items: usize,
    pub total_value: Money,
    pub rows: Vec<ReportRow>,
}

/// Stock value of one record: unit cost times quantity where the kind counts
/// units, otherwise the cost itself.
pub fn record_value(rec: &InventoryRecord) -> Money {
    match rec.quantity() {
        Some(q) => rec.cost().times(q),
        None => rec.cost(),
    }
}

pub fn build_report<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
    filter: &ReportFilter,
) -> InventoryReport {
    let mut included: Vec<&InventoryRecord> =
        records.into_iter().filter(|r| filter.includes(r)).collect();
    included.sort_by(|a, b| a.kind().cmp(&b.kind()).then(b.id.cmp(&a.id)));

    let totals: Vec<KindTotals> = RecordKind::ALL
        .into_iter()
        .filter(|k| filter.kind.is_none_or(|f| f == *k))
        .map(|kind| {
            let of_kind = included.iter().filter(|r| r.kind() == kind);
            KindTotals {
                kind,
                count: of_kind.clone().count(),
                value: of_kind.map(|r| record_value(r)).sum(),
            }
        })
        .collect();

    InventoryReport {
        total_items: totals.iter().map(|t| t.count).sum(),
        total_value: totals.iter().map(|t| t.value).sum(),
        totals,
        rows: included
            .into_iter()
            .map(|r| ReportRow {
                kind: r.kind(),
                id: r.id,
                name: r.name().to_string(),
                manufacturer: r.manufacturer().to_string(),
                cost: r.cost(),
                quantity: r.quantity(),
                date_added: r.date_added,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::{equipment, medicine, surgery_supply, ymd};

    #[test]
    fn values_by_kind() {
        let records = vec![
            medicine(1, 100, ymd(2027, 1, 1)),
            equipment(1, ymd(2026, 1, 1), ymd(2026, 12, 1)),
            surgery_supply(1, 50, ymd(2027, 1, 1)),
        ];
        let report = build_report(&records, &ReportFilter::default());

        assert_eq!(report.total_items, 3);
        let value = |k| report.totals.iter().find(|t| t.kind == k).unwrap().value;
        assert_eq!(value(RecordKind::Medicine), Money::from_paise(59_900));
        assert_eq!(value(RecordKind::Equipment), Money::from_paise(5_000_000));
        assert_eq!(value(RecordKind::SurgerySupply), Money::from_paise(649_950));
        assert_eq!(report.total_value, Money::from_paise(5_709_850));
        assert_eq!(report.total_value.to_string(), "₹57098.50");
    }

    #[test]
    fn filters_by_kind_and_date_added() {
        let mut newer = medicine(2, 10, ymd(2027, 1, 1));
        newer.date_added = ymd(2026, 9, 1);
        let records = vec![
            medicine(1, 10, ymd(2027, 1, 1)),
            newer,
            equipment(1, ymd(2026, 1, 1), ymd(2026, 12, 1)),
        ];

        let filter = ReportFilter {
            added_between: Some((ymd(2026, 8, 1), ymd(2026, 10, 19))),
            kind: Some(RecordKind::Medicine),
        };
        let report = build_report(&records, &filter);
        assert_eq!(report.totals.len(), 1);
        assert_eq!(report.total_items, 1);
        assert_eq!(report.rows[0].id, RecordId::new(2));
    }

    #[test]
    fn rows_are_newest_id_first_within_kind() {
        let records = vec![medicine(1, 10, ymd(2027, 1, 1)), medicine(7, 10, ymd(2027, 1, 1))];
        let report = build_report(&records, &ReportFilter::default());
        let ids: Vec<_> = report.rows.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![7, 1]);
    }
}
