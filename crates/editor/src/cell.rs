//! Per-cell edit state.

use serde::Serialize;

use meditrack_core::RecordId;
use meditrack_inventory::{Field, ValidationError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Viewing,
    Editing,
    Submitting,
    Reconciled,
    Failed,
}

impl CellState {
    /// Edges of the edit cycle. `Reconciled` and `Failed` only lead back to
    /// `Viewing`.
    pub fn can_become(self, next: CellState) -> bool {
        use CellState::*;
        matches!(
            (self, next),
            (Viewing, Editing)
                | (Editing, Viewing)
                | (Editing, Submitting)
                | (Viewing, Submitting)
                | (Submitting, Reconciled)
                | (Submitting, Failed)
                | (Reconciled, Viewing)
                | (Failed, Viewing)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Viewing => "viewing",
            CellState::Editing => "editing",
            CellState::Submitting => "submitting",
            CellState::Reconciled => "reconciled",
            CellState::Failed => "failed",
        }
    }
}

/// A state change, as reported to `on_transition` observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub record_id: RecordId,
    pub field: Field,
    pub from: CellState,
    pub to: CellState,
}

/// An update that has been sent and not yet settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub ticket: u64,
    pub value: meditrack_inventory::FieldValue,
    pub side_panel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) field: Field,
    pub(crate) text: String,
    pub(crate) state: CellState,
    pub(crate) draft: Option<String>,
    pub(crate) error: Option<ValidationError>,
    pub(crate) updated: bool,
    pub(crate) in_flight: Vec<InFlight>,
}

impl Cell {
    pub(crate) fn new(field: Field, text: String) -> Self {
        Self {
            field,
            text,
            state: CellState::Viewing,
            draft: None,
            error: None,
            updated: false,
            in_flight: Vec::new(),
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// What the cell currently shows.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// Input text while editing.
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Inline validation message shown next to the input.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Set after a confirmed update; drives the attention highlight.
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Move to `next` if the edge exists. Returns the transition taken.
    pub(crate) fn advance(&mut self, record_id: RecordId, next: CellState) -> Option<Transition> {
        if !self.state.can_become(next) {
            return None;
        }
        let from = self.state;
        self.state = next;
        Some(Transition {
            record_id,
            field: self.field,
            from,
            to: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_states_only_return_to_viewing() {
        for settled in [CellState::Reconciled, CellState::Failed] {
            assert!(settled.can_become(CellState::Viewing));
            assert!(!settled.can_become(CellState::Editing));
            assert!(!settled.can_become(CellState::Submitting));
        }
        assert!(!CellState::Viewing.can_become(CellState::Reconciled));
        assert!(!CellState::Submitting.can_become(CellState::Editing));
    }

    #[test]
    fn advance_reports_the_edge() {
        let mut cell = Cell::new(Field::Name, "Paracetamol".into());
        let t = cell.advance(RecordId::new(1), CellState::Editing).unwrap();
        assert_eq!((t.from, t.to), (CellState::Viewing, CellState::Editing));
        assert!(cell.advance(RecordId::new(1), CellState::Failed).is_none());
        assert_eq!(cell.state(), CellState::Editing);
    }
}
