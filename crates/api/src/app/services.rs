use std::sync::Arc;

use chrono::NaiveDate;

use meditrack_auth::{AccountDirectory, InMemoryAccountDirectory, seed_accounts};
use meditrack_core::Clock;
use meditrack_infra::{InMemoryRecordStore, RecordStore, seed};
use meditrack_portal::{Catalog, RegistrationBook, fixtures};

/// Everything a handler may touch. Passed explicitly through an `Extension`.
pub struct AppServices {
    pub records: Arc<dyn RecordStore>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub catalog: Catalog,
    pub registrations: RegistrationBook,
    clock: Arc<dyn Clock>,
}

impl AppServices {
    /// Empty stores.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(InMemoryRecordStore::with_clock(clock.clone())),
            accounts: Arc::new(InMemoryAccountDirectory::new()),
            catalog: Catalog::default(),
            registrations: RegistrationBook::new(),
            clock,
        }
    }

    /// Stores populated with sample records, demo accounts and portal content.
    pub fn seeded(clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let mut services = Self::new(clock);
        seed::load_records(services.records.as_ref(), services.today())?;
        seed_accounts(services.accounts.as_ref())?;
        services.catalog = fixtures::catalog();
        Ok(services)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
