//! Currency amounts (Indian rupees), stored as integer paise.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use meditrack_core::ValueObject;

/// Display prefix for amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Prefix used where the rupee sign is not safe (CSV exports).
pub const CURRENCY_ASCII: &str = "Rs.";

/// Non-negative money amount with two-decimal precision.
///
/// Serialized as a decimal number of rupees (`19.5`), displayed as `₹19.50`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    paise: u64,
}

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money { paise: 0 };

    pub const fn from_paise(paise: u64) -> Self {
        Self { paise }
    }

    pub fn paise(&self) -> u64 {
        self.paise
    }

    /// Convert a rupee amount, rounding to the nearest paisa.
    ///
    /// Returns `None` for negative, non-finite or out-of-range amounts.
    pub fn from_rupees(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let paise = (amount * 100.0).round();
        if paise > u64::MAX as f64 {
            return None;
        }
        Some(Self {
            paise: paise as u64,
        })
    }

    pub fn as_rupees(&self) -> f64 {
        self.paise as f64 / 100.0
    }

    /// Parse a displayed amount back (`₹12.00`, `Rs.12.00`, `12`).
    pub fn parse_display(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s
            .strip_prefix(CURRENCY_SYMBOL)
            .or_else(|| s.strip_prefix(CURRENCY_ASCII))
            .unwrap_or(s);
        s.trim().parse::<f64>().ok().and_then(Self::from_rupees)
    }

    /// Multiply by a unit count (saturating).
    pub fn times(&self, units: u32) -> Self {
        Self {
            paise: self.paise.saturating_mul(u64::from(units)),
        }
    }

    /// Same digits as `Display`, with the ASCII prefix.
    pub fn ascii_display(&self) -> String {
        format!("{CURRENCY_ASCII}{}", self.digits())
    }

    /// Two-decimal amount without any currency prefix (`12.00`).
    pub fn digits(&self) -> String {
        format!("{}.{:02}", self.paise / 100, self.paise % 100)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{}", self.digits())
    }
}

impl core::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            paise: self.paise.saturating_add(rhs.paise),
        }
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_rupees())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_rupees(amount)
            .ok_or_else(|| serde::de::Error::custom("cost must be a non-negative finite amount"))
    }
}
