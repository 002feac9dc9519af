//! Field validation rules shared by the server and the inline editor.
//!
//! The editor runs these before it sends anything; the record store runs them
//! again against its own copy of the record and is the authority.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use meditrack_core::ValueObject;

use crate::field::{Field, FieldClass};
use crate::money::Money;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is a valid regex"));

/// Validation failure, phrased for display next to the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid date in YYYY-MM-DD format")]
    InvalidDate,

    #[error("Please enter a valid number")]
    InvalidNumber,

    #[error("{0} cannot be negative")]
    Negative(Field),

    #[error("{0} must be a whole number")]
    NotWholeNumber(Field),

    #[error("Expiry date must be in the future")]
    NotInFuture,

    #[error("Next maintenance must be after last maintenance")]
    MaintenanceOrder,
}

/// A validated, typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Money(Money),
    Quantity(u32),
    Date(NaiveDate),
}

impl ValueObject for FieldValue {}

impl FieldValue {
    /// Canonical display form (what a table cell shows).
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Money(m) => m.to_string(),
            FieldValue::Quantity(q) => q.to_string(),
            FieldValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }
}

impl core::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Everything a rule needs besides the raw input: the current date and the
/// record's other maintenance date.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            last_maintenance: None,
            next_maintenance: None,
        }
    }

    pub fn with_maintenance(
        mut self,
        last: Option<NaiveDate>,
        next: Option<NaiveDate>,
    ) -> Self {
        self.last_maintenance = last;
        self.next_maintenance = next;
        self
    }
}

/// `YYYY-MM-DD` that names a real calendar day.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let s = raw.trim();
    if !DATE_PATTERN.is_match(s) {
        return Err(ValidationError::InvalidDate);
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)
}

/// Any finite number.
pub fn parse_number(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ValidationError::InvalidNumber),
    }
}

/// Validate `raw` for `field` and return the typed value.
///
/// Field membership (is this field part of the record's kind?) is checked by
/// the caller; see `update::resolve_field`.
pub fn validate_field(
    field: Field,
    raw: &str,
    ctx: &ValidationContext,
) -> Result<FieldValue, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }

    match field.class() {
        FieldClass::Date => validate_date(field, trimmed, ctx).map(FieldValue::Date),
        FieldClass::Numeric => validate_number(field, trimmed),
        FieldClass::Text => Ok(FieldValue::Text(trimmed.to_string())),
    }
}

fn validate_date(
    field: Field,
    raw: &str,
    ctx: &ValidationContext,
) -> Result<NaiveDate, ValidationError> {
    let date = parse_date(raw)?;
    match field {
        Field::ExpiryDate => {
            if date <= ctx.today {
                return Err(ValidationError::NotInFuture);
            }
        }
        Field::NextMaintenance => {
            if let Some(last) = ctx.last_maintenance {
                if date <= last {
                    return Err(ValidationError::MaintenanceOrder);
                }
            }
        }
        Field::LastMaintenance => {
            if let Some(next) = ctx.next_maintenance {
                if date >= next {
                    return Err(ValidationError::MaintenanceOrder);
                }
            }
        }
        _ => {}
    }
    Ok(date)
}

fn validate_number(field: Field, raw: &str) -> Result<FieldValue, ValidationError> {
    let n = parse_number(raw)?;
    if n < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    match field {
        Field::Quantity => {
            if n.fract() != 0.0 {
                return Err(ValidationError::NotWholeNumber(field));
            }
            if n > f64::from(u32::MAX) {
                return Err(ValidationError::InvalidNumber);
            }
            Ok(FieldValue::Quantity(n as u32))
        }
        _ => Money::from_rupees(n)
            .map(FieldValue::Money)
            .ok_or(ValidationError::InvalidNumber),
    }
}
