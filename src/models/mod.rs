//! Core data models for CashflowCLI
//!
//! This module contains the records handed over by the household backend
//! (income streams, expenses, tax estimates), the normalized period types
//! every amount is expressed in, and the locally owned what-if scenarios and
//! allocation plan.

pub mod allocation;
pub mod amount;
pub mod expense;
pub mod frequency;
pub mod ids;
pub mod income;
pub mod period;
pub mod scenario;
pub mod tax;

pub use allocation::{AllocationBucket, AllocationPlan, AllocationValidationError};
pub use amount::{format_currency, parse_number, to_number, Amount};
pub use expense::Expense;
pub use frequency::{Frequency, FrequencyParseError};
pub use ids::{ExpenseId, IdParseError, IncomeStreamId, ScenarioId};
pub use income::IncomeStream;
pub use period::{days_in_financial_year, Bucket, FinancialYear, PeriodTotals};
pub use scenario::{
    SavedAdjustment, Scenario, ScenarioAdjustment, ScenarioType, ScenarioValidationError,
    WhatIfState,
};
pub use tax::{EstimateField, TaxEstimateResult, TaxPeriodAmounts};
