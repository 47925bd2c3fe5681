//! Recurring expense record

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::frequency::Frequency;
use super::ids::ExpenseId;
use super::period::PeriodTotals;

/// A recurring expense as returned by the household backend.
///
/// Disabled expenses are kept for reference but never counted in totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub label: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub frequency: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default, rename = "Type")]
    pub expense_type: Option<String>,
    #[serde(default)]
    pub cadence: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub per_day: Amount,
    #[serde(default)]
    pub per_week: Amount,
    #[serde(default)]
    pub per_fortnight: Amount,
    #[serde(default)]
    pub per_month: Amount,
    #[serde(default)]
    pub per_year: Amount,
}

fn default_enabled() -> bool {
    true
}

impl Expense {
    pub fn frequency(&self) -> Option<Frequency> {
        Frequency::from_token(&self.frequency)
    }

    /// The backend's precomputed bucket values
    pub fn totals(&self) -> PeriodTotals {
        PeriodTotals {
            per_day: self.per_day.value(),
            per_week: self.per_week.value(),
            per_fortnight: self.per_fortnight.value(),
            per_month: self.per_month.value(),
            per_year: self.per_year.value(),
        }
    }

    /// Case-insensitive match of `query` against the descriptive fields
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [
            Some(self.label.as_str()),
            self.account.as_deref(),
            self.expense_type.as_deref(),
            self.cadence.as_deref(),
            self.notes.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }
}
