//! In-memory model of a rendered inventory table.

use chrono::NaiveDate;
use serde::Serialize;

use meditrack_core::RecordId;
use meditrack_inventory::{
    DerivedStatus, Field, FieldValue, InventoryRecord, RecordKind, status::derive_status,
};

use crate::cell::{Cell, CellState};

/// One row: the last confirmed record plus its editable cells.
#[derive(Debug, Clone)]
pub struct RowView {
    pub(crate) record: InventoryRecord,
    pub(crate) cells: Vec<Cell>,
    pub(crate) status: DerivedStatus,
}

impl RowView {
    pub fn new(record: InventoryRecord, today: NaiveDate) -> Self {
        let cells = record
            .kind()
            .fields()
            .iter()
            .map(|f| Cell::new(*f, record.display(*f).unwrap_or_default()))
            .collect();
        let status = derive_status(&record, today);
        Self {
            record,
            cells,
            status,
        }
    }

    pub fn id(&self) -> RecordId {
        self.record.id
    }

    /// Server-confirmed values as last seen by this client.
    pub fn record(&self) -> &InventoryRecord {
        &self.record
    }

    pub fn status(&self) -> &DerivedStatus {
        &self.status
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, field: Field) -> Option<&Cell> {
        self.cells.iter().find(|c| c.field == field)
    }

    pub(crate) fn cell_mut(&mut self, field: Field) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.field == field)
    }

    /// Transient "updating" state: true while any cell awaits a response.
    pub fn is_updating(&self) -> bool {
        self.cells.iter().any(|c| !c.in_flight.is_empty())
    }

    /// Initial input text when editing starts. Money is shown without the
    /// currency symbol so it can be resubmitted as typed.
    pub fn edit_text(&self, field: Field) -> Option<String> {
        match self.record.value(field)? {
            FieldValue::Money(m) => Some(m.digits()),
            other => Some(other.display()),
        }
    }

    /// Write a confirmed value and refresh the cell text and derived flags.
    pub(crate) fn confirm(&mut self, field: Field, value: FieldValue, today: NaiveDate) {
        self.record.set(field, value);
        self.status = derive_status(&self.record, today);
        let text = self.record.display(field).unwrap_or_default();
        if let Some(cell) = self.cell_mut(field) {
            cell.text = text;
        }
    }

    /// Put the confirmed text back after a failed update.
    pub(crate) fn revert(&mut self, field: Field) {
        let text = self.record.display(field).unwrap_or_default();
        if let Some(cell) = self.cell_mut(field) {
            cell.text = text;
        }
    }

    pub fn view(&self, field: Field) -> Option<CellView> {
        let cell = self.cell(field)?;
        let marks: Vec<_> = self.status.for_field(field).collect();

        let mut classes = vec!["editable"];
        match cell.state {
            CellState::Editing => classes.push("editing"),
            CellState::Submitting => classes.push("submitting"),
            _ => {}
        }
        if cell.updated {
            classes.push("updated");
        }
        if cell.error.is_some() {
            classes.push("error");
        }
        classes.extend(marks.iter().map(|m| m.flag.as_str()));

        let title = (!marks.is_empty()).then(|| {
            marks
                .iter()
                .map(|m| m.title.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        });

        Some(CellView {
            field,
            text: cell.text.clone(),
            state: cell.state,
            classes,
            title,
            error: cell.error.as_ref().map(|e| e.to_string()),
        })
    }
}

/// Render-ready snapshot of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub field: Field,
    pub text: String,
    pub state: CellState,
    pub classes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CellView {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

/// All rows of one kind, in display order.
#[derive(Debug, Clone)]
pub struct TableView {
    kind: RecordKind,
    rows: Vec<RowView>,
}

impl TableView {
    /// Records of other kinds are skipped.
    pub fn new(kind: RecordKind, records: Vec<InventoryRecord>, today: NaiveDate) -> Self {
        let rows = records
            .into_iter()
            .filter(|r| r.kind() == kind)
            .map(|r| RowView::new(r, today))
            .collect();
        Self { kind, rows }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn row(&self, id: RecordId) -> Option<&RowView> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub(crate) fn row_mut(&mut self, id: RecordId) -> Option<&mut RowView> {
        self.rows.iter_mut().find(|r| r.id() == id)
    }

    /// Recompute every row's derived flags, e.g. when the date rolls over.
    pub fn refresh_status(&mut self, today: NaiveDate) {
        for row in &mut self.rows {
            row.status = derive_status(&row.record, today);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meditrack_inventory::{Medicine, Money, RecordData};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn medicine(quantity: u32, expiry_date: NaiveDate) -> InventoryRecord {
        InventoryRecord::new(
            RecordId::new(1),
            ymd(2026, 1, 1),
            RecordData::Medicine(Medicine {
                name: "Paracetamol".into(),
                manufacturer: "GSK".into(),
                quantity,
                cost: Money::from_paise(599),
                expiry_date,
            }),
        )
    }

    #[test]
    fn low_stock_and_expiring_cells_carry_classes_and_titles() {
        let today = ymd(2026, 10, 19);
        let row = RowView::new(medicine(3, ymd(2026, 10, 29)), today);

        let qty = row.view(Field::Quantity).unwrap();
        assert!(qty.has_class("low-stock"));
        assert_eq!(qty.title.as_deref(), Some("Low stock"));

        let expiry = row.view(Field::ExpiryDate).unwrap();
        assert!(expiry.has_class("expiring-soon"));
        assert!(!expiry.has_class("expired"));
        assert_eq!(expiry.title.as_deref(), Some("Expiring in 10 days"));

        let name = row.view(Field::Name).unwrap();
        assert_eq!(name.classes, vec!["editable"]);
        assert_eq!(name.title, None);
    }

    #[test]
    fn money_edit_text_has_no_symbol() {
        let row = RowView::new(medicine(30, ymd(2027, 1, 1)), ymd(2026, 10, 19));
        assert_eq!(row.cell(Field::Cost).unwrap().text(), "₹5.99");
        assert_eq!(row.edit_text(Field::Cost).as_deref(), Some("5.99"));
    }

    #[test]
    fn status_refreshes_when_the_date_moves() {
        let mut table = TableView::new(
            RecordKind::Medicine,
            vec![medicine(30, ymd(2026, 11, 30))],
            ymd(2026, 10, 19),
        );
        assert!(table.rows()[0].status().is_empty());
        table.refresh_status(ymd(2026, 12, 1));
        let view = table.rows()[0].view(Field::ExpiryDate).unwrap();
        assert!(view.has_class("expired"));
        assert_eq!(view.title.as_deref(), Some("Expired"));
    }
}
