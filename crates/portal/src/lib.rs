//! College portal content: course material, faculty, events, and event
//! registrations.

pub mod catalog;
pub mod fixtures;
pub mod registration;

pub use catalog::{Academic, Catalog, Event, EventCatalog, FacultyMember, ResourceLinks};
pub use registration::{Registration, RegistrationBook, RegistrationError, RegistrationRequest};
