//! Calendar source for date-relative rules (expiry, maintenance windows).
//!
//! Domain code never reads the wall clock directly; callers pass a `Clock`
//! (or an explicit `NaiveDate`) so rules stay deterministic under test.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the server's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date (tests, replays).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
