//! Inventory record storage abstractions.

pub mod in_memory;

pub use in_memory::InMemoryRecordStore;

use std::sync::Arc;

use meditrack_core::{DomainResult, RecordId};
use meditrack_inventory::{
    FieldUpdateRequest, FieldValue, InventoryRecord, RecordKind, UpdateError,
};

/// Owner of all inventory records.
///
/// Handlers receive a store explicitly (no ambient module state). Writes to
/// one record are serialized; writes to different records may run in parallel.
pub trait RecordStore: Send + Sync {
    fn get(&self, kind: RecordKind, id: RecordId) -> Option<InventoryRecord>;

    /// Records of one kind, ordered by id.
    fn list(&self, kind: RecordKind) -> Vec<InventoryRecord>;

    /// Every record, ordered by kind then id.
    fn all(&self) -> Vec<InventoryRecord>;

    /// Add a record. Fails with `Conflict` if the id is taken for its kind.
    fn insert(&self, record: InventoryRecord) -> DomainResult<()>;

    /// Next unused id for `kind`.
    fn next_id(&self, kind: RecordKind) -> RecordId;

    /// Pick the next id for `kind`, build the record with it and insert it,
    /// all under one write lock. Returns the stored record.
    fn insert_with_next_id(
        &self,
        kind: RecordKind,
        build: &dyn Fn(RecordId) -> DomainResult<InventoryRecord>,
    ) -> DomainResult<InventoryRecord>;

    /// Validate and write exactly one field; returns the stored value.
    fn update(&self, request: &FieldUpdateRequest) -> Result<FieldValue, UpdateError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn get(&self, kind: RecordKind, id: RecordId) -> Option<InventoryRecord> {
        (**self).get(kind, id)
    }

    fn list(&self, kind: RecordKind) -> Vec<InventoryRecord> {
        (**self).list(kind)
    }

    fn all(&self) -> Vec<InventoryRecord> {
        (**self).all()
    }

    fn insert(&self, record: InventoryRecord) -> DomainResult<()> {
        (**self).insert(record)
    }

    fn next_id(&self, kind: RecordKind) -> RecordId {
        (**self).next_id(kind)
    }

    fn insert_with_next_id(
        &self,
        kind: RecordKind,
        build: &dyn Fn(RecordId) -> DomainResult<InventoryRecord>,
    ) -> DomainResult<InventoryRecord> {
        (**self).insert_with_next_id(kind, build)
    }

    fn update(&self, request: &FieldUpdateRequest) -> Result<FieldValue, UpdateError> {
        (**self).update(request)
    }
}
