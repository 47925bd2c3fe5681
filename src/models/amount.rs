//! Monetary amount type used throughout the cash-flow math
//!
//! Amounts arrive from the household backend and from user input in many
//! shapes: numbers, numeric strings, blanks, nulls. `Amount` coerces all of
//! them into a finite `f64`, with anything unusable becoming zero, so that the
//! arithmetic downstream never has to handle a parse failure.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A monetary amount; non-negative for stored amounts, signed for deltas
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount, normalizing NaN and infinities to zero
    pub fn new(value: f64) -> Self {
        Self(if value.is_finite() { value } else { 0.0 })
    }

    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Parse user or backend text, never failing
    pub fn parse_lenient(s: &str) -> Self {
        Self::new(to_number(s))
    }

    pub const fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Round to whole cents
    pub fn round_cents(&self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }

    /// Format with a currency symbol, e.g. `$1,234.50` or `-$12.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format_currency(self.0, symbol)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(n) => Amount::new(n),
            RawAmount::Text(s) => Amount::parse_lenient(&s),
            RawAmount::Other(_) => Amount::zero(),
        };
        Ok(amount)
    }
}

/// Parse text as a finite number, ignoring currency symbols, thousands
/// separators and whitespace. `None` when nothing numeric is left.
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' ' | '_'))
        .collect();

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce text to a number the way [`parse_number`] reads it; anything
/// unparseable is `0`.
pub fn to_number(s: &str) -> f64 {
    parse_number(s).unwrap_or(0.0)
}

/// Format a raw value as currency rounded to cents
pub fn format_currency(value: f64, symbol: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" after rounding is shown as zero
    let negative = value < 0.0 && fixed != "0.00";
    if negative {
        format!("-{}{}.{}", symbol, grouped, cents)
    } else {
        format!("{}{}.{}", symbol, grouped, cents)
    }
}
