//! Service layer for CashflowCLI
//!
//! `period`, `aggregate`, `scenario`, `allocation` and `calculator` hold the
//! pure cash-flow arithmetic. The storage-backed services on top of them
//! validate input, persist locally owned records and write the audit trail.

pub mod aggregate;
pub mod allocation;
pub mod calculator;
pub mod period;
pub mod scenario;

pub use aggregate::{
    cash_flow_summary, expense_totals, income_overview, income_totals, selected_income_totals,
    CashFlowSummary, ExpenseFilter, IncomeTotals,
};
pub use allocation::{
    allocation_base, summarize, AllocationBase, AllocationReport, AllocationRow,
    AllocationService, AllocationSummary, LeftoverSplit,
};
pub use calculator::{apply_estimate_to_whatif, calculator_period_amount, income_draft, IncomeDraft};
pub use period::{display_for_period, get_period_value, PeriodConverter};
pub use scenario::{
    compare, compare_selection, stream_delta, whatif_rows, ScenarioComparison, ScenarioService,
    WhatIfRow,
};
