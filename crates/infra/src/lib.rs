//! Infrastructure layer: record storage and seed data.

pub mod record_store;
pub mod seed;

pub use record_store::{InMemoryRecordStore, RecordStore};
