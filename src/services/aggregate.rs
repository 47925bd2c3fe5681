//! Aggregation of bucketed values across collections
//!
//! Totals are always summed bucket by bucket from the backend's precomputed
//! values; nothing here re-derives a bucket from a stored amount.

use serde::Serialize;
use tracing::debug;

use crate::models::{Amount, Expense, IncomeStream, IncomeStreamId, PeriodTotals};

/// Sum the bucket values of every item that passes `include`
pub fn sum_totals<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    select: impl Fn(&T) -> PeriodTotals,
    include: impl Fn(&T) -> bool,
) -> PeriodTotals {
    items
        .into_iter()
        .filter(|item| include(item))
        .map(|item| select(item))
        .sum()
}

/// Totals across every income stream for one basis
pub fn income_totals(streams: &[IncomeStream], net: bool) -> PeriodTotals {
    sum_totals(streams, |s| s.totals(net), |_| true)
}

/// Totals across the selected subset of income streams
pub fn selected_income_totals(
    streams: &[IncomeStream],
    selected: &[IncomeStreamId],
    net: bool,
) -> PeriodTotals {
    sum_totals(streams, |s| s.totals(net), |s| selected.contains(&s.id))
}

/// Totals across enabled expenses; disabled expenses never count
pub fn expense_totals(expenses: &[Expense]) -> PeriodTotals {
    sum_totals(expenses, Expense::totals, |e| e.enabled)
}

/// Whole-collection income totals with both bases side by side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IncomeTotals {
    pub net_amount: Amount,
    pub gross_amount: Amount,
    pub net: PeriodTotals,
    pub gross: PeriodTotals,
}

pub fn income_overview(streams: &[IncomeStream]) -> IncomeTotals {
    IncomeTotals {
        net_amount: streams.iter().map(|s| s.net_amount).sum(),
        gross_amount: streams.iter().map(|s| s.gross_amount).sum(),
        net: income_totals(streams, true),
        gross: income_totals(streams, false),
    }
}

/// Net income against enabled expenses
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CashFlowSummary {
    pub income: PeriodTotals,
    pub expenses: PeriodTotals,
    pub difference: PeriodTotals,
}

pub fn cash_flow_summary(streams: &[IncomeStream], expenses: &[Expense]) -> CashFlowSummary {
    let income = income_totals(streams, true);
    let expenses = expense_totals(expenses);
    debug!(
        income_fortnight = income.per_fortnight,
        expenses_fortnight = expenses.per_fortnight,
        "computed cash flow summary"
    );
    CashFlowSummary {
        income,
        expenses,
        difference: income - expenses,
    }
}

/// Search and enabled-state filter applied to expenses before totalling
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub search: Option<String>,
    /// `Some(true)` keeps only enabled, `Some(false)` only disabled
    pub enabled: Option<bool>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(enabled) = self.enabled {
            if expense.enabled != enabled {
                return false;
            }
        }
        match &self.search {
            Some(query) => expense.matches_search(query),
            None => true,
        }
    }

    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expense(id: i64, label: &str, per_fortnight: f64, enabled: bool) -> Expense {
        serde_json::from_value(json!({
            "Id": id,
            "Label": label,
            "Amount": per_fortnight,
            "Frequency": "Fortnightly",
            "Enabled": enabled,
            "PerDay": per_fortnight / 14.0,
            "PerWeek": per_fortnight / 2.0,
            "PerFortnight": per_fortnight,
            "PerMonth": per_fortnight * 26.0 / 12.0,
            "PerYear": per_fortnight * 26.0,
        }))
        .unwrap()
    }

    fn stream(id: i64, net_fortnight: f64, gross_fortnight: f64) -> IncomeStream {
        serde_json::from_value(json!({
            "Id": id,
            "Label": format!("Stream {}", id),
            "NetAmount": net_fortnight,
            "GrossAmount": gross_fortnight,
            "Frequency": "Fortnightly",
            "NetPerFortnight": net_fortnight,
            "NetPerYear": net_fortnight * 26.0,
            "GrossPerFortnight": gross_fortnight,
            "GrossPerYear": gross_fortnight * 26.0,
        }))
        .unwrap()
    }

    #[test]
    fn test_disabled_expenses_excluded() {
        let expenses = vec![
            expense(1, "Rent", 100.0, true),
            expense(2, "Gym", 50.0, false),
        ];
        let totals = expense_totals(&expenses);
        assert_eq!(totals.per_fortnight, 100.0);
        assert_eq!(totals.per_year, 2600.0);
    }

    #[test]
    fn test_malformed_bucket_values_count_as_zero() {
        let mut broken = expense(3, "Broken", 0.0, true);
        broken.per_fortnight = Amount::parse_lenient("n/a");
        let expenses = vec![expense(1, "Rent", 100.0, true), broken];
        assert_eq!(expense_totals(&expenses).per_fortnight, 100.0);
    }

    #[test]
    fn test_income_totals_by_basis() {
        let streams = vec![stream(1, 2000.0, 2600.0), stream(2, 500.0, 550.0)];
        assert_eq!(income_totals(&streams, true).per_fortnight, 2500.0);
        assert_eq!(income_totals(&streams, false).per_fortnight, 3150.0);
    }

    #[test]
    fn test_selected_income_totals() {
        let streams = vec![stream(1, 2000.0, 2600.0), stream(2, 500.0, 550.0)];
        let selected = [IncomeStreamId::new(2), IncomeStreamId::new(99)];
        let totals = selected_income_totals(&streams, &selected, false);
        assert_eq!(totals.per_fortnight, 550.0);
        assert!(selected_income_totals(&streams, &[], true).is_zero());
    }

    #[test]
    fn test_income_overview() {
        let streams = vec![stream(1, 2000.0, 2600.0), stream(2, 500.0, 550.0)];
        let overview = income_overview(&streams);
        assert_eq!(overview.net_amount.value(), 2500.0);
        assert_eq!(overview.gross_amount.value(), 3150.0);
        assert_eq!(overview.gross.per_year, 3150.0 * 26.0);
    }

    #[test]
    fn test_cash_flow_difference() {
        let streams = vec![stream(1, 2000.0, 2600.0)];
        let expenses = vec![
            expense(1, "Rent", 800.0, true),
            expense(2, "Boat", 400.0, false),
        ];
        let summary = cash_flow_summary(&streams, &expenses);
        assert_eq!(summary.difference.per_fortnight, 1200.0);
        assert_eq!(summary.expenses.per_fortnight, 800.0);
    }

    #[test]
    fn test_expense_filter() {
        let expenses = vec![
            expense(1, "Rent", 800.0, true),
            expense(2, "Rental car", 100.0, false),
            expense(3, "Groceries", 300.0, true),
        ];

        let filter = ExpenseFilter {
            search: Some("rent".into()),
            enabled: None,
        };
        assert_eq!(filter.apply(&expenses).len(), 2);

        let filter = ExpenseFilter {
            search: Some("rent".into()),
            enabled: Some(true),
        };
        let matched = filter.apply(&expenses);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].label, "Rent");

        assert_eq!(ExpenseFilter::default().apply(&expenses).len(), 3);
    }
}
