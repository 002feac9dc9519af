use std::sync::{Arc, PoisonError, RwLock};

use crate::account::Account;
use crate::roles::PortalRole;

/// Lookup of portal accounts by role and email.
pub trait AccountDirectory: Send + Sync {
    fn find(&self, role: PortalRole, email: &str) -> Option<Account>;

    fn add(&self, account: Account);
}

impl<S> AccountDirectory for Arc<S>
where
    S: AccountDirectory + ?Sized,
{
    fn find(&self, role: PortalRole, email: &str) -> Option<Account> {
        (**self).find(role, email)
    }

    fn add(&self, account: Account) {
        (**self).add(account)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn find(&self, role: PortalRole, email: &str) -> Option<Account> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|a| a.role == role && a.email_matches(email))
            .cloned()
    }

    /// Replaces any existing account with the same role and email.
    fn add(&self, account: Account) {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        accounts.retain(|a| !(a.role == account.role && a.email_matches(&account.email)));
        accounts.push(account);
    }
}
