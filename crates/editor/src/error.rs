use thiserror::Error;

use meditrack_core::RecordId;
use meditrack_inventory::{Field, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("no cell for record {record_id}, field {field}")]
    UnknownCell { record_id: RecordId, field: Field },

    /// The cell is waiting for a response; edits resume once it settles.
    #[error("cell is being updated")]
    CellBusy,

    #[error("cell is not being edited")]
    NotEditing,

    /// Blocked before any request was made.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("unknown or already settled update #{0}")]
    UnknownTicket(u64),
}
