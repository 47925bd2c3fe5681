//! Payment frequency model
//!
//! A frequency is the cadence at which an amount recurs. Records keep their
//! raw frequency text because the backend may hand back anything; typed
//! parsing happens where the frequency is used, and each call site decides
//! what an unrecognized token degrades to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::period::Bucket;

/// The cadence at which a monetary amount recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Frequency {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Fortnightly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Parse a raw token, returning `None` for anything unrecognized
    pub fn from_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    /// Occurrences per year. Daily depends on the financial year's length.
    pub fn annual_multiplier(&self, days_in_year: u32) -> f64 {
        match self {
            Self::Daily => f64::from(days_in_year),
            Self::Weekly => 52.0,
            Self::Fortnightly => 26.0,
            Self::Monthly => 12.0,
            Self::Quarterly => 4.0,
            Self::Yearly => 1.0,
        }
    }

    /// The display bucket that shares this cadence; quarterly has none
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            Self::Daily => Some(Bucket::Day),
            Self::Weekly => Some(Bucket::Week),
            Self::Fortnightly => Some(Bucket::Fortnight),
            Self::Monthly => Some(Bucket::Month),
            Self::Quarterly => None,
            Self::Yearly => Some(Bucket::Year),
        }
    }

    /// Canonical lower-case form used for comparisons
    pub fn canonical(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Fortnightly => "fortnightly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Fortnightly => "Fortnightly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        };
        write!(f, "{}", label)
    }
}

/// Error type for frequency parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(pub String);

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown frequency '{}' (expected daily, weekly, fortnightly, monthly, quarterly or yearly)",
            self.0
        )
    }
}

impl std::error::Error for FrequencyParseError {}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "fortnightly" | "biweekly" | "bi-weekly" => Ok(Self::Fortnightly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            _ => Err(FrequencyParseError(s.to_string())),
        }
    }
}

/// Multiplier for a raw token; unrecognized tokens annualize to zero
pub fn annual_multiplier(token: &str, days_in_year: u32) -> f64 {
    Frequency::from_token(token).map_or(0.0, |f| f.annual_multiplier(days_in_year))
}
