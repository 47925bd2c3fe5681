//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod allocation;
pub mod audit;
pub mod calculator;
pub mod export;
pub mod income;
pub mod scenario;
pub mod whatif;

pub use allocation::{handle_allocation_command, AllocationCommands};
pub use audit::handle_audit_command;
pub use calculator::{handle_calculator_command, CalculatorCommands};
pub use export::{handle_export_command, ExportCommands};
pub use income::{handle_expense_command, handle_income_command, ExpenseCommands, IncomeCommands};
pub use scenario::{handle_scenario_command, ScenarioCommands};
pub use whatif::{handle_whatif_command, WhatIfArgs};
