//! Allocation table view

use crate::models::{format_currency, AllocationBucket};
use crate::services::{AllocationReport, AllocationRow};

use super::income::format_cash_flow;
use super::table::{format_percent, BucketTable};

fn row_columns(row: &AllocationRow, symbol: &str) -> Vec<String> {
    vec![
        format_percent(row.percent),
        format_currency(row.rounded_fortnight, symbol),
        format_percent(row.percent_to_100),
    ]
}

pub fn format_allocation_report(report: &AllocationReport, symbol: &str) -> String {
    let summary = &report.summary;

    let mut output = format_cash_flow(&report.cash_flow, symbol);
    output.push('\n');

    let mut table = BucketTable::new("Allocation", symbol)
        .with_column("Share")
        .with_column("Rounded/fn")
        .with_column("Of income");
    for row in &summary.rows {
        table.row(row.name.clone(), row_columns(row, symbol), row.totals);
    }
    table.footer(
        summary.total_row.name.clone(),
        vec![
            format_percent(summary.total_row.percent),
            format_currency(summary.total_rounded, symbol),
            format_percent(summary.total_rounded_percent),
        ],
        summary.total_row.totals,
    );
    output.push_str(&table.render());

    output.push_str(&format!(
        "\nTotal allocated {}, leftover {}\n",
        format_percent(summary.total_allocated),
        format_percent(summary.leftover)
    ));
    if summary.total_allocated > 1.0 {
        output.push_str("Allocations exceed income.\n");
    }
    output
}

pub fn format_bucket_list(buckets: &[AllocationBucket]) -> String {
    if buckets.is_empty() {
        return "No allocation buckets.".to_string();
    }
    buckets
        .iter()
        .map(|b| format!("  {:<24} {:>8.2}%\n", b.name, b.percent_share))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodTotals;
    use crate::services::{summarize, CashFlowSummary};

    fn report(buckets: &[AllocationBucket]) -> AllocationReport {
        let income = PeriodTotals {
            per_fortnight: 2000.0,
            per_year: 52000.0,
            ..PeriodTotals::zero()
        };
        let expenses = PeriodTotals {
            per_fortnight: 800.0,
            per_year: 20800.0,
            ..PeriodTotals::zero()
        };
        AllocationReport {
            cash_flow: CashFlowSummary {
                income,
                expenses,
                difference: income - expenses,
            },
            summary: summarize(&income, &expenses, buckets),
        }
    }

    #[test]
    fn test_allocation_report() {
        let output = format_allocation_report(&report(&[AllocationBucket::new("Smile", 20.0)]), "$");
        assert!(output.contains("Daily Expenses"));
        assert!(output.contains("Smile"));
        assert!(output.contains("40.00%"));
        assert!(output.contains("Total allocated 60.00%, leftover 40.00%"));
        assert!(!output.contains("exceed"));
    }

    #[test]
    fn test_over_allocation_is_flagged() {
        let output = format_allocation_report(&report(&[AllocationBucket::new("Smile", 70.0)]), "$");
        assert!(output.contains("leftover 0.00%"));
        assert!(output.contains("Allocations exceed income."));
    }

    #[test]
    fn test_bucket_list() {
        let output = format_bucket_list(&[AllocationBucket::new("Smile", 12.5)]);
        assert!(output.contains("Smile"));
        assert!(output.contains("12.50%"));
    }
}
