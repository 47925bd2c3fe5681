//! Normalized periods and the financial year
//!
//! Every amount in the application is ultimately shown in five buckets:
//! per day, week, fortnight, month and year. The size of the day bucket
//! depends on how many days the current financial year has.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Days assumed when the financial year cannot be sized
pub const FALLBACK_DAYS_IN_YEAR: u32 = 365;

/// One of the five normalized display periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Day,
    Week,
    Fortnight,
    Month,
    Year,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Day,
        Bucket::Week,
        Bucket::Fortnight,
        Bucket::Month,
        Bucket::Year,
    ];

    /// How many of this bucket fit in a year
    pub fn per_year(&self, days_in_year: u32) -> f64 {
        match self {
            Self::Day => f64::from(days_in_year),
            Self::Week => 52.0,
            Self::Fortnight => 26.0,
            Self::Month => 12.0,
            Self::Year => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Per day",
            Self::Week => "Per week",
            Self::Fortnight => "Per fortnight",
            Self::Month => "Per month",
            Self::Year => "Per year",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An amount expressed in all five buckets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PeriodTotals {
    pub per_day: f64,
    pub per_week: f64,
    pub per_fortnight: f64,
    pub per_month: f64,
    pub per_year: f64,
}

impl PeriodTotals {
    pub const fn zero() -> Self {
        Self {
            per_day: 0.0,
            per_week: 0.0,
            per_fortnight: 0.0,
            per_month: 0.0,
            per_year: 0.0,
        }
    }

    /// Build totals by evaluating `f` for each bucket
    pub fn from_fn(mut f: impl FnMut(Bucket) -> f64) -> Self {
        Self {
            per_day: f(Bucket::Day),
            per_week: f(Bucket::Week),
            per_fortnight: f(Bucket::Fortnight),
            per_month: f(Bucket::Month),
            per_year: f(Bucket::Year),
        }
    }

    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Day => self.per_day,
            Bucket::Week => self.per_week,
            Bucket::Fortnight => self.per_fortnight,
            Bucket::Month => self.per_month,
            Bucket::Year => self.per_year,
        }
    }

    /// Multiply every bucket by the same factor
    pub fn scale(&self, factor: f64) -> Self {
        Self::from_fn(|bucket| self.get(bucket) * factor)
    }

    pub fn is_zero(&self) -> bool {
        Bucket::ALL.iter().all(|b| self.get(*b) == 0.0)
    }
}

impl Add for PeriodTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_fn(|bucket| self.get(bucket) + other.get(bucket))
    }
}

impl AddAssign for PeriodTotals {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for PeriodTotals {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from_fn(|bucket| self.get(bucket) - other.get(bucket))
    }
}

impl std::iter::Sum for PeriodTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(PeriodTotals::zero(), |acc, t| acc + t)
    }
}

/// A twelve-month accounting period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialYear {
    start: NaiveDate,
    /// First day of the following financial year
    end: NaiveDate,
}

impl FinancialYear {
    /// The financial year containing `today`, starting on `start_month`/`start_day`.
    ///
    /// Returns `None` when the start day does not exist in the relevant year.
    pub fn containing(today: NaiveDate, start_month: u32, start_day: u32) -> Option<Self> {
        let this_year = NaiveDate::from_ymd_opt(today.year(), start_month, start_day)?;
        let start = if today >= this_year {
            this_year
        } else {
            NaiveDate::from_ymd_opt(today.year() - 1, start_month, start_day)?
        };
        let end = start.checked_add_months(Months::new(12))?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day that still belongs to this financial year
    pub fn end_inclusive(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }

    /// Whole days in the year, or 365 when that comes out as zero
    pub fn days(&self) -> u32 {
        match u32::try_from((self.end - self.start).num_days()) {
            Ok(days) if days > 0 => days,
            _ => FALLBACK_DAYS_IN_YEAR,
        }
    }

    /// Label such as `FY2025-26`
    pub fn label(&self) -> String {
        format!("FY{}-{:02}", self.start.year(), self.end.year() % 100)
    }
}

/// Day count of the financial year containing `today`, falling back to 365
pub fn days_in_financial_year(today: NaiveDate, start_month: u32, start_day: u32) -> u32 {
    FinancialYear::containing(today, start_month, start_day)
        .map(|fy| fy.days())
        .unwrap_or(FALLBACK_DAYS_IN_YEAR)
}
