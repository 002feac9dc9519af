use std::sync::{LazyLock, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use meditrack_core::RegistrationId;

use crate::catalog::EventCatalog;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Registration form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub name: String,
    pub email: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("{email} is already registered for {event}")]
    AlreadyRegistered { email: String, event: String },
}

fn required(value: &str, name: &'static str) -> Result<String, RegistrationError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(RegistrationError::Missing(name));
    }
    Ok(v.to_string())
}

fn optional(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Event sign-ups, at most one per email and event.
#[derive(Debug, Default)]
pub struct RegistrationBook {
    entries: RwLock<Vec<Registration>>,
}

impl RegistrationBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        events: &EventCatalog,
        req: &RegistrationRequest,
        now: DateTime<Utc>,
    ) -> Result<Registration, RegistrationError> {
        let name = required(&req.name, "name")?;
        let email = required(&req.email, "email")?;
        let event_name = required(&req.event, "event")?;

        if !is_valid_email(&email) {
            return Err(RegistrationError::InvalidEmail);
        }
        let event = events
            .find(&event_name)
            .ok_or_else(|| RegistrationError::UnknownEvent(event_name.clone()))?;

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries
            .iter()
            .any(|r| r.event == event.name && r.email.eq_ignore_ascii_case(&email))
        {
            return Err(RegistrationError::AlreadyRegistered {
                email,
                event: event.name.clone(),
            });
        }

        let registration = Registration {
            id: RegistrationId::new(),
            name,
            email,
            event: event.name.clone(),
            phone: optional(req.phone.as_ref()),
            branch: optional(req.branch.as_ref()),
            registered_at: now,
        };
        tracing::info!(
            registration_id = %registration.id,
            event = %registration.event,
            "event registration received"
        );
        entries.push(registration.clone());
        Ok(registration)
    }

    pub fn list(&self) -> Vec<Registration> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
