//! Period conversion
//!
//! Converts an amount at one payment frequency into a yearly figure and
//! spreads a yearly figure across the five display buckets, using the length
//! of the current financial year for the day bucket.

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::config::settings::Settings;
use crate::models::frequency::annual_multiplier;
use crate::models::{days_in_financial_year, Amount, Bucket, Frequency, IncomeStream, PeriodTotals};

/// Converter between payment frequencies and display buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodConverter {
    days_in_year: u32,
}

impl PeriodConverter {
    pub fn new(days_in_year: u32) -> Self {
        Self { days_in_year }
    }

    /// Converter for the financial year containing `today`
    pub fn for_date(today: NaiveDate, settings: &Settings) -> Self {
        Self::new(days_in_financial_year(
            today,
            settings.financial_year_start_month,
            settings.financial_year_start_day,
        ))
    }

    /// Converter for the financial year containing the local date
    pub fn current(settings: &Settings) -> Self {
        Self::for_date(Local::now().date_naive(), settings)
    }

    pub fn days_in_year(&self) -> u32 {
        self.days_in_year
    }

    /// `amount` times the frequency's occurrences per year.
    ///
    /// Unrecognized frequency tokens annualize to zero.
    pub fn annualize(&self, amount: f64, frequency: &str) -> f64 {
        let multiplier = annual_multiplier(frequency, self.days_in_year);
        if multiplier == 0.0 && !frequency.trim().is_empty() {
            warn!(frequency, "unrecognized frequency annualized to zero");
        }
        amount * multiplier
    }

    /// Spread a yearly amount across the five buckets
    pub fn distribute(&self, annual: f64) -> PeriodTotals {
        PeriodTotals::from_fn(|bucket| {
            let per_year = bucket.per_year(self.days_in_year);
            if per_year == 0.0 {
                0.0
            } else {
                annual / per_year
            }
        })
    }

    /// Annualize then distribute in one step
    pub fn breakdown(&self, amount: f64, frequency: &str) -> PeriodTotals {
        self.distribute(self.annualize(amount, frequency))
    }
}

/// Value to show for an entity in `bucket`.
///
/// When the entity's own frequency is the bucket being shown, the raw stored
/// amount is used so that no rounding drift creeps in; otherwise the derived
/// bucket value is shown.
pub fn display_for_period(native_frequency: &str, bucket: Bucket, raw: Amount, derived: Amount) -> f64 {
    let native_bucket = Frequency::from_token(native_frequency).and_then(|f| f.bucket());
    if native_bucket == Some(bucket) {
        raw.value()
    } else {
        derived.value()
    }
}

/// The stream's precomputed value in the bucket matching `frequency`.
///
/// Quarterly has no bucket; it and unrecognized tokens give `0`.
pub fn get_period_value(stream: &IncomeStream, net: bool, frequency: &str) -> f64 {
    match Frequency::from_token(frequency).and_then(|f| f.bucket()) {
        Some(bucket) => stream.totals(net).get(bucket),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeStreamId;
    use approx::assert_relative_eq;

    fn stream() -> IncomeStream {
        serde_json::from_value(serde_json::json!({
            "Id": 1,
            "Label": "Salary",
            "NetAmount": 1000,
            "GrossAmount": 1300,
            "Frequency": "Monthly",
            "NetPerDay": 32.88,
            "NetPerWeek": 230.77,
            "NetPerFortnight": 461.54,
            "NetPerMonth": 1000.004,
            "NetPerYear": 12000,
            "GrossPerFortnight": 600,
        }))
        .unwrap()
    }

    #[test]
    fn test_annualize() {
        let converter = PeriodConverter::new(365);
        assert_eq!(converter.annualize(1000.0, "Monthly"), 12000.0);
        assert_eq!(converter.annualize(100.0, "fortnightly"), 2600.0);
        assert_eq!(converter.annualize(10.0, "DAILY"), 3650.0);
        assert_eq!(converter.annualize(10.0, "quarterly"), 40.0);
        assert_eq!(converter.annualize(10.0, "sometimes"), 0.0);
    }

    #[test]
    fn test_monthly_example() {
        let converter = PeriodConverter::new(365);
        let totals = converter.breakdown(1000.0, "Monthly");
        assert_eq!(totals.per_year, 12000.0);
        assert_relative_eq!(totals.per_fortnight, 461.538_461_5, epsilon = 1e-6);
        assert_relative_eq!(totals.per_week, 230.769_230_7, epsilon = 1e-6);
        assert_relative_eq!(totals.per_month, 1000.0);
        assert_relative_eq!(totals.per_day, 12000.0 / 365.0);
    }

    #[test]
    fn test_distribute_reannualizes_for_every_frequency() {
        for days in [365, 366] {
            let converter = PeriodConverter::new(days);
            for freq in Frequency::ALL {
                for amount in [0.01, 1.0, 123.45, 98_765.43] {
                    let annual = converter.annualize(amount, freq.canonical());
                    let totals = converter.distribute(annual);
                    assert_eq!(totals.per_year, annual);
                    for bucket in Bucket::ALL {
                        assert_relative_eq!(
                            totals.get(bucket) * bucket.per_year(days),
                            annual,
                            max_relative = 1e-9
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_distribute_with_zero_days_does_not_divide_by_zero() {
        let totals = PeriodConverter::new(0).distribute(1000.0);
        assert_eq!(totals.per_day, 0.0);
        assert!(totals.per_week.is_finite());
    }

    #[test]
    fn test_for_date_uses_settings() {
        let settings = Settings::default();
        let leap_year = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(PeriodConverter::for_date(leap_year, &settings).days_in_year(), 366);
        let plain = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(PeriodConverter::for_date(plain, &settings).days_in_year(), 365);
    }

    #[test]
    fn test_display_for_period_prefers_raw_on_native_bucket() {
        let s = stream();
        assert_eq!(
            display_for_period(&s.frequency, Bucket::Month, s.net_amount, s.net_per_month),
            1000.0
        );
        assert_eq!(
            display_for_period(&s.frequency, Bucket::Week, s.net_amount, s.net_per_week),
            230.77
        );
        assert_eq!(
            display_for_period("bogus", Bucket::Month, s.net_amount, s.net_per_month),
            1000.004
        );
    }

    #[test]
    fn test_get_period_value() {
        let s = stream();
        assert_eq!(s.id, IncomeStreamId::new(1));
        assert_eq!(get_period_value(&s, true, "fortnightly"), 461.54);
        assert_eq!(get_period_value(&s, false, "Fortnightly"), 600.0);
        assert_eq!(get_period_value(&s, true, "Yearly"), 12000.0);
        assert_eq!(get_period_value(&s, true, "Quarterly"), 0.0);
        assert_eq!(get_period_value(&s, true, "hourly"), 0.0);
    }
}
