//! The inline editor: validation, round trip, reconciliation.

use std::future::Future;
use std::sync::Arc;

use meditrack_core::{Clock, RecordId};
use meditrack_inventory::{Field, FieldValue, update::validate_update};

use crate::cell::{CellState, InFlight, Transition};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::table::TableView;
use crate::toast::{Toast, ToastKind, ToastQueue};
use crate::transport::{TransportError, UpdateReply, UpdateTransport};

pub const UPDATE_SUCCESS_TOAST: &str = "Item updated successfully";
pub const TRANSPORT_FAILURE_ALERT: &str = "Error updating field. Please try again.";

/// Where an edit came from. Side-panel updates also raise a success toast.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditSource {
    Cell,
    SidePanel,
}

/// Handle for one in-flight update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub record_id: RecordId,
    pub field: Field,
    /// Raw text as sent.
    pub value: String,
}

/// How an update settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// New cell text.
    Reconciled(String),
    /// Message shown to the user.
    Failed(String),
}

type AlertFn = Box<dyn FnMut(&str) + Send>;
type TransitionFn = Box<dyn FnMut(&Transition) + Send>;
type ToastFn = Box<dyn FnMut(&Toast) + Send>;

pub struct InlineEditor<T> {
    transport: T,
    config: EditorConfig,
    clock: Arc<dyn Clock>,
    table: TableView,
    toasts: ToastQueue,
    next_seq: u64,
    on_alert: Vec<AlertFn>,
    on_transition: Vec<TransitionFn>,
    on_toast: Vec<ToastFn>,
}

impl<T> core::fmt::Debug for InlineEditor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InlineEditor")
            .field("kind", &self.table.kind())
            .field("rows", &self.table.rows().len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T: UpdateTransport> InlineEditor<T> {
    pub fn new(
        transport: T,
        config: EditorConfig,
        clock: Arc<dyn Clock>,
        table: TableView,
    ) -> Self {
        Self {
            transport,
            config,
            clock,
            table,
            toasts: ToastQueue::new(),
            next_seq: 0,
            on_alert: Vec::new(),
            on_transition: Vec::new(),
            on_toast: Vec::new(),
        }
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        self.toasts.dismiss(id)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Blocking user-facing error (the browser `alert`).
    pub fn on_alert(&mut self, f: impl FnMut(&str) + Send + 'static) {
        self.on_alert.push(Box::new(f));
    }

    pub fn on_transition(&mut self, f: impl FnMut(&Transition) + Send + 'static) {
        self.on_transition.push(Box::new(f));
    }

    pub fn on_toast(&mut self, f: impl FnMut(&Toast) + Send + 'static) {
        self.on_toast.push(Box::new(f));
    }

    fn emit_transition(&mut self, t: Option<Transition>) {
        if let Some(t) = t {
            tracing::debug!(
                record_id = %t.record_id,
                field = %t.field,
                from = t.from.as_str(),
                to = t.to.as_str(),
                "cell transition"
            );
            for f in &mut self.on_transition {
                f(&t);
            }
        }
    }

    fn alert(&mut self, message: &str) {
        for f in &mut self.on_alert {
            f(message);
        }
    }

    fn toast(&mut self, kind: ToastKind, message: &str) {
        let toast = self.toasts.push(kind, message);
        for f in &mut self.on_toast {
            f(&toast);
        }
    }

    fn check_cell(&self, record_id: RecordId, field: Field) -> Result<CellState, EditorError> {
        self.table
            .row(record_id)
            .and_then(|r| r.cell(field))
            .map(|c| c.state())
            .ok_or(EditorError::UnknownCell { record_id, field })
    }

    fn advance(&mut self, record_id: RecordId, field: Field, next: CellState) {
        let t = self
            .table
            .row_mut(record_id)
            .and_then(|r| r.cell_mut(field))
            .and_then(|c| c.advance(record_id, next));
        self.emit_transition(t);
    }

    /// `Viewing → Editing`. Refused while the cell awaits a response.
    pub fn begin_edit(&mut self, record_id: RecordId, field: Field) -> Result<(), EditorError> {
        match self.check_cell(record_id, field)? {
            CellState::Submitting => return Err(EditorError::CellBusy),
            CellState::Editing => return Ok(()),
            _ => {}
        }
        let draft = self
            .table
            .row(record_id)
            .and_then(|r| r.edit_text(field))
            .unwrap_or_default();
        if let Some(cell) = self.table.row_mut(record_id).and_then(|r| r.cell_mut(field)) {
            cell.draft = Some(draft);
            cell.updated = false;
        }
        self.advance(record_id, field, CellState::Editing);
        Ok(())
    }

    /// Replace the input text; clears any inline error.
    pub fn input(
        &mut self,
        record_id: RecordId,
        field: Field,
        text: &str,
    ) -> Result<(), EditorError> {
        if self.check_cell(record_id, field)? != CellState::Editing {
            return Err(EditorError::NotEditing);
        }
        if let Some(cell) = self.table.row_mut(record_id).and_then(|r| r.cell_mut(field)) {
            cell.draft = Some(text.to_string());
            cell.error = None;
        }
        Ok(())
    }

    /// `Editing → Viewing` without sending anything.
    pub fn cancel_edit(&mut self, record_id: RecordId, field: Field) -> Result<(), EditorError> {
        if self.check_cell(record_id, field)? != CellState::Editing {
            return Err(EditorError::NotEditing);
        }
        if let Some(cell) = self.table.row_mut(record_id).and_then(|r| r.cell_mut(field)) {
            cell.draft = None;
            cell.error = None;
        }
        self.advance(record_id, field, CellState::Viewing);
        Ok(())
    }

    /// Blur on an edited cell: validate the draft and, if it passes, mark the
    /// cell `Submitting`. On a validation failure the error is attached to
    /// the cell, which stays in `Editing`, and nothing is sent.
    pub fn submit(&mut self, record_id: RecordId, field: Field) -> Result<Ticket, EditorError> {
        if self.check_cell(record_id, field)? != CellState::Editing {
            return Err(EditorError::NotEditing);
        }
        let raw = self
            .table
            .row(record_id)
            .and_then(|r| r.cell(field))
            .and_then(|c| c.draft().map(str::to_string))
            .unwrap_or_default();
        self.enqueue(record_id, field, raw, EditSource::Cell)
    }

    /// Side-panel update: field selector plus value, no prior `begin_edit`.
    ///
    /// Not serialized against other updates to the same cell; if several are
    /// in flight the last response to arrive decides the final text.
    pub fn submit_value(
        &mut self,
        record_id: RecordId,
        field: Field,
        raw: &str,
    ) -> Result<Ticket, EditorError> {
        self.check_cell(record_id, field)?;
        self.enqueue(record_id, field, raw.to_string(), EditSource::SidePanel)
    }

    fn enqueue(
        &mut self,
        record_id: RecordId,
        field: Field,
        raw: String,
        source: EditSource,
    ) -> Result<Ticket, EditorError> {
        let today = self.clock.today();
        let kind = self.table.kind();
        let row = self
            .table
            .row_mut(record_id)
            .ok_or(EditorError::UnknownCell { record_id, field })?;
        let ctx = row.record().validation_context(today);

        let value = match validate_update(kind, field.as_str(), &raw, &ctx) {
            Ok((_, value)) => value,
            Err(meditrack_inventory::UpdateError::InvalidValue(e)) => {
                if let Some(cell) = row.cell_mut(field) {
                    cell.error = Some(e.clone());
                }
                return Err(EditorError::Invalid(e));
            }
            Err(_) => return Err(EditorError::UnknownCell { record_id, field }),
        };

        self.next_seq += 1;
        let seq = self.next_seq;
        let cell = row
            .cell_mut(field)
            .ok_or(EditorError::UnknownCell { record_id, field })?;
        cell.error = None;
        cell.draft = None;
        cell.updated = false;
        cell.in_flight.push(InFlight {
            ticket: seq,
            value,
            side_panel: source == EditSource::SidePanel,
        });
        let already_submitting = cell.state == CellState::Submitting;

        if !already_submitting {
            self.advance(record_id, field, CellState::Submitting);
        }
        tracing::debug!(%record_id, %field, seq, "update queued");

        Ok(Ticket {
            seq,
            record_id,
            field,
            value: raw,
        })
    }

    /// Settle one in-flight update with the transport's result.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        result: Result<UpdateReply, TransportError>,
    ) -> Result<Outcome, EditorError> {
        let today = self.clock.today();
        let Ticket {
            seq,
            record_id,
            field,
            ..
        } = *ticket;

        let row = self
            .table
            .row_mut(record_id)
            .ok_or(EditorError::UnknownTicket(seq))?;
        let cell = row.cell_mut(field).ok_or(EditorError::UnknownTicket(seq))?;
        let pos = cell
            .in_flight
            .iter()
            .position(|f| f.ticket == seq)
            .ok_or(EditorError::UnknownTicket(seq))?;
        let flight = cell.in_flight.remove(pos);
        let settled = cell.in_flight.is_empty();

        let outcome = match result {
            Ok(reply) if reply.success => {
                row.confirm(field, flight.value, today);
                let text = row.cell(field).map(|c| c.text().to_string()).unwrap_or_default();
                if let Some(cell) = row.cell_mut(field) {
                    cell.updated = true;
                    cell.error = None;
                }
                Outcome::Reconciled(text)
            }
            Ok(reply) => {
                row.revert(field);
                let msg = reply.error.unwrap_or_else(|| "Unknown error".to_string());
                Outcome::Failed(format!("Error updating field: {msg}"))
            }
            Err(e) => {
                row.revert(field);
                tracing::warn!(%record_id, %field, error = %e, "update transport failed");
                Outcome::Failed(TRANSPORT_FAILURE_ALERT.to_string())
            }
        };

        match &outcome {
            Outcome::Reconciled(_) => {
                if flight.side_panel {
                    self.toast(ToastKind::Success, UPDATE_SUCCESS_TOAST);
                }
                if settled {
                    self.advance(record_id, field, CellState::Reconciled);
                }
            }
            Outcome::Failed(msg) => {
                let msg = msg.clone();
                self.alert(&msg);
                if settled {
                    self.advance(record_id, field, CellState::Failed);
                }
            }
        }
        if settled {
            self.advance(record_id, field, CellState::Viewing);
        }
        Ok(outcome)
    }
}

impl<T> InlineEditor<T>
where
    T: UpdateTransport + Clone + 'static,
{
    /// Future that delivers `ticket` within the configured timeout. It does
    /// not borrow the editor, so several may be in flight at once.
    pub fn dispatch(
        &self,
        ticket: &Ticket,
    ) -> impl Future<Output = Result<UpdateReply, TransportError>> + Send + 'static {
        let transport = self.transport.clone();
        let timeout = self.config.request_timeout;
        let kind = self.table.kind();
        let ticket = ticket.clone();
        async move {
            let call = transport.send(kind, ticket.record_id, ticket.field, &ticket.value);
            match tokio::time::timeout(timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout(timeout)),
            }
        }
    }

    /// Blur handler: validate, send, and reconcile in one step.
    pub async fn commit(
        &mut self,
        record_id: RecordId,
        field: Field,
    ) -> Result<Outcome, EditorError> {
        let ticket = self.submit(record_id, field)?;
        let result = self.dispatch(&ticket).await;
        self.complete(&ticket, result)
    }

    /// Side-panel handler: validate, send, and reconcile in one step.
    pub async fn update_value(
        &mut self,
        record_id: RecordId,
        field: Field,
        raw: &str,
    ) -> Result<Outcome, EditorError> {
        let ticket = self.submit_value(record_id, field, raw)?;
        let result = self.dispatch(&ticket).await;
        self.complete(&ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use meditrack_core::FixedClock;
    use meditrack_inventory::{Medicine, Money, RecordData, RecordKind, InventoryRecord};

    /// Answers every request with the same reply.
    #[derive(Clone)]
    struct Fixed(Result<UpdateReply, TransportError>);

    impl UpdateTransport for Fixed {
        async fn send(
            &self,
            _kind: RecordKind,
            _record_id: RecordId,
            _field: Field,
            _value: &str,
        ) -> Result<UpdateReply, TransportError> {
            self.0.clone()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn editor(reply: Result<UpdateReply, TransportError>) -> InlineEditor<Fixed> {
        let rec = InventoryRecord::new(
            RecordId::new(1),
            today(),
            RecordData::Medicine(Medicine {
                name: "Paracetamol".into(),
                manufacturer: "GSK".into(),
                quantity: 100,
                cost: Money::from_paise(599),
                expiry_date: NaiveDate::from_ymd_opt(2027, 12, 31).unwrap(),
            }),
        );
        InlineEditor::new(
            Fixed(reply),
            EditorConfig::new("http://unused"),
            Arc::new(FixedClock(today())),
            TableView::new(RecordKind::Medicine, vec![rec], today()),
        )
    }

    const ID: RecordId = RecordId::new(1);

    #[tokio::test]
    async fn blur_commit_reconciles_with_client_formatting() {
        let mut ed = editor(Ok(UpdateReply::ok()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        ed.on_transition(move |t| sink.lock().unwrap().push(t.to));

        ed.begin_edit(ID, Field::Cost).unwrap();
        assert_eq!(ed.table().row(ID).unwrap().cell(Field::Cost).unwrap().draft(), Some("5.99"));
        ed.input(ID, Field::Cost, "19.5").unwrap();
        let out = ed.commit(ID, Field::Cost).await.unwrap();

        assert_eq!(out, Outcome::Reconciled("₹19.50".into()));
        let view = ed.table().row(ID).unwrap().view(Field::Cost).unwrap();
        assert_eq!(view.text, "₹19.50");
        assert!(view.has_class("updated"));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                CellState::Editing,
                CellState::Submitting,
                CellState::Reconciled,
                CellState::Viewing
            ]
        );
        // Cell edits do not toast.
        assert!(ed.toasts().visible().is_empty());
    }

    #[tokio::test]
    async fn validation_failure_sends_nothing_and_input_clears_it() {
        let mut ed = editor(Err(TransportError::Network("should not be called".into())));
        ed.begin_edit(ID, Field::ExpiryDate).unwrap();
        ed.input(ID, Field::ExpiryDate, "2026-13-01").unwrap();

        let err = ed.commit(ID, Field::ExpiryDate).await.unwrap_err();
        assert!(matches!(err, EditorError::Invalid(_)));
        let row = ed.table().row(ID).unwrap();
        assert!(!row.is_updating());
        let view = row.view(Field::ExpiryDate).unwrap();
        assert_eq!(view.state, CellState::Editing);
        assert!(view.has_class("error"));

        ed.input(ID, Field::ExpiryDate, "2027").unwrap();
        let view = ed.table().row(ID).unwrap().view(Field::ExpiryDate).unwrap();
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn empty_text_reports_required() {
        let mut ed = editor(Ok(UpdateReply::ok()));
        ed.begin_edit(ID, Field::Name).unwrap();
        ed.input(ID, Field::Name, "  ").unwrap();
        let err = ed.submit(ID, Field::Name).unwrap_err();
        assert_eq!(err.to_string(), "This field is required");
    }

    #[tokio::test]
    async fn logical_failure_alerts_and_reverts() {
        let mut ed = editor(Ok(UpdateReply::rejected("medicine 1 not found")));
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let sink = alerts.clone();
        ed.on_alert(move |m| sink.lock().unwrap().push(m.to_string()));

        let out = ed.update_value(ID, Field::Name, "Dolo 650").await.unwrap();
        assert_eq!(out, Outcome::Failed("Error updating field: medicine 1 not found".into()));
        assert_eq!(*alerts.lock().unwrap(), vec!["Error updating field: medicine 1 not found"]);

        let row = ed.table().row(ID).unwrap();
        assert_eq!(row.cell(Field::Name).unwrap().text(), "Paracetamol");
        assert_eq!(row.cell(Field::Name).unwrap().state(), CellState::Viewing);
        assert!(!row.is_updating());
    }

    #[tokio::test]
    async fn side_panel_success_raises_toast() {
        let mut ed = editor(Ok(UpdateReply::ok()));
        let toasts = Arc::new(Mutex::new(Vec::new()));
        let sink = toasts.clone();
        ed.on_toast(move |t| sink.lock().unwrap().push(t.message.clone()));

        ed.update_value(ID, Field::Quantity, "3").await.unwrap();
        assert_eq!(*toasts.lock().unwrap(), vec![UPDATE_SUCCESS_TOAST]);
        let view = ed.table().row(ID).unwrap().view(Field::Quantity).unwrap();
        assert!(view.has_class("low-stock"));

        let id = ed.toasts().visible()[0].id;
        assert!(ed.dismiss_toast(id));
    }

    #[tokio::test]
    async fn begin_edit_is_refused_while_submitting() {
        let mut ed = editor(Ok(UpdateReply::ok()));
        let ticket = ed.submit_value(ID, Field::Name, "Crocin").unwrap();
        assert!(ed.table().row(ID).unwrap().is_updating());
        assert_eq!(ed.begin_edit(ID, Field::Name), Err(EditorError::CellBusy));

        ed.complete(&ticket, Ok(UpdateReply::ok())).unwrap();
        assert_eq!(
            ed.complete(&ticket, Ok(UpdateReply::ok())),
            Err(EditorError::UnknownTicket(ticket.seq))
        );
        assert!(ed.begin_edit(ID, Field::Name).is_ok());
    }

    #[test]
    fn last_response_wins_over_last_request() {
        let mut ed = editor(Ok(UpdateReply::ok()));
        let first = ed.submit_value(ID, Field::Cost, "10").unwrap();
        let second = ed.submit_value(ID, Field::Cost, "20").unwrap();

        // The later request is answered first.
        ed.complete(&second, Ok(UpdateReply::ok())).unwrap();
        let row = ed.table().row(ID).unwrap();
        assert_eq!(row.cell(Field::Cost).unwrap().text(), "₹20.00");
        assert!(row.is_updating());
        assert_eq!(row.cell(Field::Cost).unwrap().state(), CellState::Submitting);

        ed.complete(&first, Ok(UpdateReply::ok())).unwrap();
        let row = ed.table().row(ID).unwrap();
        assert_eq!(row.cell(Field::Cost).unwrap().text(), "₹10.00");
        assert!(!row.is_updating());
        assert_eq!(row.cell(Field::Cost).unwrap().state(), CellState::Viewing);
    }

    #[tokio::test]
    async fn transport_error_uses_generic_alert() {
        let mut ed = editor(Err(TransportError::Status(500, "boom".into())));
        let out = ed.update_value(ID, Field::Cost, "7").await.unwrap();
        assert_eq!(out, Outcome::Failed(TRANSPORT_FAILURE_ALERT.into()));
        assert_eq!(ed.table().row(ID).unwrap().cell(Field::Cost).unwrap().text(), "₹5.99");
    }
}
