//! Income stream record
//!
//! Income streams are owned by the household backend. The backend supplies the
//! stored net and gross amounts together with their precomputed per-bucket
//! values; this crate only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::frequency::Frequency;
use super::ids::IncomeStreamId;
use super::period::PeriodTotals;

/// An income stream as returned by the household backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IncomeStream {
    pub id: IncomeStreamId,
    pub label: String,
    #[serde(default)]
    pub net_amount: Amount,
    #[serde(default)]
    pub gross_amount: Amount,
    /// Raw frequency token as stored by the backend
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub first_pay_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_pay_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_pay_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub net_per_day: Amount,
    #[serde(default)]
    pub net_per_week: Amount,
    #[serde(default)]
    pub net_per_fortnight: Amount,
    #[serde(default)]
    pub net_per_month: Amount,
    #[serde(default)]
    pub net_per_year: Amount,

    #[serde(default)]
    pub gross_per_day: Amount,
    #[serde(default)]
    pub gross_per_week: Amount,
    #[serde(default)]
    pub gross_per_fortnight: Amount,
    #[serde(default)]
    pub gross_per_month: Amount,
    #[serde(default)]
    pub gross_per_year: Amount,
}

impl IncomeStream {
    /// Typed frequency, `None` if the backend token is unrecognized
    pub fn frequency(&self) -> Option<Frequency> {
        Frequency::from_token(&self.frequency)
    }

    /// Stored amount at the stream's own frequency
    pub fn amount(&self, net: bool) -> Amount {
        if net {
            self.net_amount
        } else {
            self.gross_amount
        }
    }

    /// The backend's precomputed bucket values for the chosen basis
    pub fn totals(&self, net: bool) -> PeriodTotals {
        if net {
            PeriodTotals {
                per_day: self.net_per_day.value(),
                per_week: self.net_per_week.value(),
                per_fortnight: self.net_per_fortnight.value(),
                per_month: self.net_per_month.value(),
                per_year: self.net_per_year.value(),
            }
        } else {
            PeriodTotals {
                per_day: self.gross_per_day.value(),
                per_week: self.gross_per_week.value(),
                per_fortnight: self.gross_per_fortnight.value(),
                per_month: self.gross_per_month.value(),
                per_year: self.gross_per_year.value(),
            }
        }
    }

    /// Whether the stream has stopped paying as of `today`
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALARY: &str = r#"{
        "Id": 1,
        "Label": "Salary",
        "NetAmount": "1000.00",
        "GrossAmount": 1300,
        "Frequency": "Monthly",
        "FirstPayDate": "2025-07-15",
        "EndDate": null,
        "NetPerDay": 32.876712,
        "NetPerWeek": 230.769231,
        "NetPerFortnight": 461.538462,
        "NetPerMonth": 1000,
        "NetPerYear": 12000,
        "GrossPerYear": 15600
    }"#;

    #[test]
    fn test_deserialize_backend_shape() {
        let stream: IncomeStream = serde_json::from_str(SALARY).unwrap();
        assert_eq!(stream.id, IncomeStreamId::new(1));
        assert_eq!(stream.net_amount.value(), 1000.0);
        assert_eq!(stream.gross_amount.value(), 1300.0);
        assert_eq!(stream.frequency(), Some(Frequency::Monthly));
        assert!(stream.end_date.is_none());
        // Missing bucket fields default to zero
        assert_eq!(stream.gross_per_day.value(), 0.0);
    }

    #[test]
    fn test_totals_by_basis() {
        let stream: IncomeStream = serde_json::from_str(SALARY).unwrap();
        assert_eq!(stream.totals(true).per_month, 1000.0);
        assert_eq!(stream.totals(false).per_year, 15600.0);
        assert_eq!(stream.amount(false).value(), 1300.0);
    }

    #[test]
    fn test_has_ended() {
        let mut stream: IncomeStream = serde_json::from_str(SALARY).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(!stream.has_ended(today));
        stream.end_date = NaiveDate::from_ymd_opt(2025, 12, 31);
        assert!(stream.has_ended(today));
    }

    #[test]
    fn test_unknown_frequency_token() {
        let mut stream: IncomeStream = serde_json::from_str(SALARY).unwrap();
        stream.frequency = "whenever".into();
        assert_eq!(stream.frequency(), None);
    }
}
