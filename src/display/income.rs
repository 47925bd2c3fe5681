//! Income and expense views

use crate::models::{Amount, Expense, IncomeStream, PeriodTotals};
use crate::services::aggregate::sum_totals;
use crate::services::{display_for_period, CashFlowSummary, IncomeTotals};

use super::table::BucketTable;

/// Bucket values for display: the raw amount in the native bucket, derived
/// values everywhere else
fn display_totals(frequency: &str, raw: Amount, derived: PeriodTotals) -> PeriodTotals {
    PeriodTotals::from_fn(|bucket| {
        display_for_period(frequency, bucket, raw, derived.get(bucket).into())
    })
}

pub fn format_income_list(streams: &[IncomeStream], net: bool, symbol: &str) -> String {
    if streams.is_empty() {
        return "No income streams found.".to_string();
    }

    let mut table = BucketTable::new(if net { "Stream (net)" } else { "Stream (gross)" }, symbol)
        .with_column("ID")
        .with_column("Frequency")
        .with_column("Ends");

    for stream in streams {
        let ends = stream
            .end_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        table.row(
            stream.label.clone(),
            vec![stream.id.to_string(), stream.frequency.clone(), ends],
            display_totals(&stream.frequency, stream.amount(net), stream.totals(net)),
        );
    }

    let total: PeriodTotals = streams.iter().map(|s| s.totals(net)).sum();
    table.footer("Total", Vec::new(), total);
    table.render()
}

pub fn format_income_totals(totals: &IncomeTotals, symbol: &str) -> String {
    let mut table = BucketTable::new("Basis", symbol).with_column("Stored amount");
    table.row("Net", vec![totals.net_amount.format_with_symbol(symbol)], totals.net);
    table.row("Gross", vec![totals.gross_amount.format_with_symbol(symbol)], totals.gross);
    table.render()
}

pub fn format_expense_list(expenses: &[&Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut table = BucketTable::new("Expense", symbol)
        .with_column("ID")
        .with_column("Frequency")
        .with_column("Account")
        .with_column("Status");

    for expense in expenses {
        table.row(
            expense.label.clone(),
            vec![
                expense.id.to_string(),
                expense.frequency.clone(),
                expense.account.clone().unwrap_or_default(),
                if expense.enabled { "" } else { "Disabled" }.to_string(),
            ],
            display_totals(&expense.frequency, expense.amount, expense.totals()),
        );
    }

    let total = sum_totals(expenses.iter().copied(), Expense::totals, |e| e.enabled);
    table.footer("Total (enabled)", Vec::new(), total);
    table.render()
}

pub fn format_cash_flow(summary: &CashFlowSummary, symbol: &str) -> String {
    let mut table = BucketTable::new("Cash flow", symbol);
    table.row("Income (net)", Vec::new(), summary.income);
    table.row("Expenses", Vec::new(), summary.expenses);
    table.footer("Difference", Vec::new(), summary.difference);
    table.render()
}
