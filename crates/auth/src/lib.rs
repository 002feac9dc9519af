//! `meditrack-auth` — portal accounts and credential checks.
//!
//! Decoupled from HTTP; the api crate maps [`AuthError`] to responses.

pub mod account;
pub mod directory;
pub mod login;
pub mod password;
pub mod roles;

pub use account::{Account, UserSummary};
pub use directory::{AccountDirectory, InMemoryAccountDirectory};
pub use login::{AuthError, authenticate, seed_accounts};
pub use roles::{PortalRole, UnknownRole};
