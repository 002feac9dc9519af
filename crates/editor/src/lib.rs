//! `meditrack-editor`
//!
//! **Responsibility:** inline editing of inventory tables against the
//! MediTrack API.
//!
//! This crate provides:
//! - A per-cell state machine (`Viewing → Editing → Submitting → Reconciled | Failed`)
//! - Client-side validation using the shared inventory rules
//! - Update round trips with a bounded timeout and reconciliation
//! - Derived status highlighting, toasts, and CSV export
//!
//! The API remains the authority; the editor only mirrors confirmed values.

pub mod cell;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod table;
pub mod toast;
pub mod transport;

pub use cell::{CellState, Transition};
pub use config::EditorConfig;
pub use editor::{EditSource, InlineEditor, Outcome, Ticket};
pub use error::EditorError;
pub use export::{CsvExport, export_csv};
pub use table::{CellView, RowView, TableView};
pub use toast::{Toast, ToastKind, ToastQueue};
pub use transport::{HttpTransport, TransportError, UpdateReply, UpdateTransport};
