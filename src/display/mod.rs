//! Display formatting for terminal output
//!
//! Every amount is shown across the five buckets, so most views are built on
//! the shared bucket table in [`table`].

pub mod allocation;
pub mod income;
pub mod scenario;
pub mod table;

pub use allocation::{format_allocation_report, format_bucket_list};
pub use income::{format_cash_flow, format_expense_list, format_income_list, format_income_totals};
pub use scenario::{format_comparison, format_scenario_details, format_scenario_list, format_whatif_rows};
pub use table::{format_percent, BucketTable};

/// Truncate to `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
