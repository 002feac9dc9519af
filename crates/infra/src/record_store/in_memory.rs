use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use meditrack_core::{Clock, DomainError, DomainResult, Entity, RecordId, SystemClock};
use meditrack_inventory::{
    FieldUpdateRequest, FieldValue, InventoryRecord, RecordKind, UpdateError, update::apply_update,
};

use super::RecordStore;

type Key = (RecordKind, RecordId);
type RecordMap = BTreeMap<Key, Arc<Mutex<InventoryRecord>>>;

/// In-memory store with one mutex per record.
///
/// The outer map lock is held only long enough to find the record; the
/// validate-and-write step runs under the record's own lock so cross-field
/// rules (maintenance ordering) see a consistent record.
pub struct InMemoryRecordStore {
    records: RwLock<RecordMap>,
    clock: Arc<dyn Clock>,
}

impl core::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("records", &self.len())
            .finish()
    }
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, RecordMap> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, kind: RecordKind, id: RecordId) -> Option<Arc<Mutex<InventoryRecord>>> {
        self.read_map().get(&(kind, id)).cloned()
    }

    fn next_id_in(map: &RecordMap, kind: RecordKind) -> RecordId {
        let last = map
            .range((kind, RecordId::new(0))..=(kind, RecordId::new(u64::MAX)))
            .next_back()
            .map(|((_, id), _)| id.get())
            .unwrap_or(0);
        RecordId::new(last.saturating_add(1))
    }

    fn insert_locked(map: &mut RecordMap, record: InventoryRecord) -> DomainResult<()> {
        let key = (record.kind(), *record.id());
        if map.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "{} {} already exists",
                key.0, key.1
            )));
        }
        tracing::info!(kind = %key.0, record_id = %key.1, "record created");
        map.insert(key, Arc::new(Mutex::new(record)));
        Ok(())
    }

    fn snapshot(cell: &Mutex<InventoryRecord>) -> InventoryRecord {
        cell.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, kind: RecordKind, id: RecordId) -> Option<InventoryRecord> {
        self.entry(kind, id).map(|cell| Self::snapshot(&cell))
    }

    fn list(&self, kind: RecordKind) -> Vec<InventoryRecord> {
        self.read_map()
            .range((kind, RecordId::new(0))..=(kind, RecordId::new(u64::MAX)))
            .map(|(_, cell)| Self::snapshot(cell))
            .collect()
    }

    fn all(&self) -> Vec<InventoryRecord> {
        self.read_map()
            .values()
            .map(|cell| Self::snapshot(cell))
            .collect()
    }

    fn insert(&self, record: InventoryRecord) -> DomainResult<()> {
        let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
        Self::insert_locked(&mut map, record)
    }

    fn next_id(&self, kind: RecordKind) -> RecordId {
        Self::next_id_in(&self.read_map(), kind)
    }

    fn insert_with_next_id(
        &self,
        kind: RecordKind,
        build: &dyn Fn(RecordId) -> DomainResult<InventoryRecord>,
    ) -> DomainResult<InventoryRecord> {
        let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let id = Self::next_id_in(&map, kind);
        let record = build(id)?;
        if record.kind() != kind || *record.id() != id {
            return Err(DomainError::validation(format!(
                "built record {} {} does not match assigned {kind} {id}",
                record.kind(),
                record.id()
            )));
        }
        Self::insert_locked(&mut map, record.clone())?;
        Ok(record)
    }

    fn update(&self, request: &FieldUpdateRequest) -> Result<FieldValue, UpdateError> {
        let Some(cell) = self.entry(request.kind, request.record_id) else {
            tracing::warn!(
                kind = %request.kind,
                record_id = %request.record_id,
                "update for unknown record"
            );
            return Err(UpdateError::NotFound {
                kind: request.kind,
                id: request.record_id,
            });
        };

        let mut record = cell.lock().unwrap_or_else(PoisonError::into_inner);
        match apply_update(
            &mut record,
            &request.field_name,
            &request.new_value,
            self.clock.today(),
        ) {
            Ok(value) => {
                tracing::info!(
                    kind = %request.kind,
                    record_id = %request.record_id,
                    field = %request.field_name,
                    "record field updated"
                );
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(
                    kind = %request.kind,
                    record_id = %request.record_id,
                    field = %request.field_name,
                    error = %e,
                    "record field update rejected"
                );
                Err(e)
            }
        }
    }
}
