//! Inventory domain module.
//!
//! This crate contains business rules for the medical inventory (medicines,
//! equipment, surgery supplies), implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage). The validation rules defined here are
//! the single source of truth for both the server and the inline editor.

pub mod alerts;
pub mod create;
pub mod field;
pub mod money;
pub mod record;
pub mod report;
pub mod search;
pub mod status;
pub mod update;
pub mod validation;

pub use alerts::{AlertSummary, Dashboard, ExpiryAlert, LowStockAlert, MaintenanceAlert};
pub use create::{CreateError, build_record};
pub use field::{Field, FieldClass, UnknownField};
pub use money::Money;
pub use record::{
    Equipment, InventoryRecord, Medicine, RecordData, RecordKind, SurgerySupply, UnknownKind,
};
pub use report::{InventoryReport, KindTotals, ReportFilter, ReportRow};
pub use search::{SearchBy, Suggestion};
pub use status::{DerivedStatus, StatusFlag, StatusMark};
pub use update::{FieldUpdateRequest, FieldUpdateResult, UpdateError};
pub use validation::{FieldValue, ValidationContext, ValidationError};
