use thiserror::Error;

use meditrack_core::{Entity, UserId};

use crate::account::{Account, UserSummary};
use crate::directory::AccountDirectory;
use crate::password::{hash_password, verify_password};
use crate::roles::PortalRole;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Covers every rejected login, whatever the cause.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("password hash error: {0}")]
    Hash(String),
}

/// Check `email`/`password` against the accounts of one portal.
pub fn authenticate(
    directory: &dyn AccountDirectory,
    role: PortalRole,
    email: &str,
    password: &str,
) -> Result<UserSummary, AuthError> {
    let Some(account) = directory.find(role, email) else {
        tracing::warn!(%role, "login for unknown account");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, &account.password_hash)? {
        tracing::warn!(%role, user_id = %account.id(), "login with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!(%role, user_id = %account.id(), "login succeeded");
    Ok(account.summary())
}

/// Demo accounts, one per portal.
pub fn seed_accounts(directory: &dyn AccountDirectory) -> Result<(), AuthError> {
    let seeds = [
        (PortalRole::Student, "Rohan Kumar", "student@srms.ac.in", "password123"),
        (PortalRole::Admin, "Admin User", "admin@srms.ac.in", "admin123"),
    ];
    for (role, name, email, password) in seeds {
        directory.add(Account {
            id: UserId::new(),
            role,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        });
    }
    Ok(())
}
