use serde::{Deserialize, Serialize};

use meditrack_core::{Entity, UserId};

use crate::roles::PortalRole;

/// A portal account. The password is only ever held as an Argon2 hash.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: UserId,
    pub role: PortalRole,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl Account {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl Entity for Account {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// What a successful login reveals about the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}
