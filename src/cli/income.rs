//! Income and expense CLI commands
//!
//! Read-only views over the backend snapshot.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_income_list, format_income_totals, BucketTable};
use crate::error::CashflowResult;
use crate::services::{expense_totals, income_overview, ExpenseFilter};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List income streams across every period
    List {
        /// Show gross instead of net amounts
        #[arg(short, long)]
        gross: bool,
    },
    /// Net and gross totals over all streams
    Totals,
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses across every period
    List {
        /// Case-insensitive search over label, account, type, cadence and notes
        #[arg(short, long)]
        search: Option<String>,
        /// Only enabled expenses
        #[arg(long, conflicts_with = "disabled")]
        enabled: bool,
        /// Only disabled expenses
        #[arg(long)]
        disabled: bool,
    },
    /// Totals over enabled expenses
    Totals,
}

pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> CashflowResult<()> {
    let symbol = &settings.currency_symbol;

    match cmd {
        IncomeCommands::List { gross } => {
            print!("{}", format_income_list(storage.income_streams(), !gross, symbol));
        }
        IncomeCommands::Totals => {
            let totals = income_overview(storage.income_streams());
            print!("{}", format_income_totals(&totals, symbol));
        }
    }

    Ok(())
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> CashflowResult<()> {
    let symbol = &settings.currency_symbol;

    match cmd {
        ExpenseCommands::List {
            search,
            enabled,
            disabled,
        } => {
            let filter = ExpenseFilter {
                search,
                enabled: match (enabled, disabled) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            let expenses = filter.apply(storage.expenses());
            print!("{}", format_expense_list(&expenses, symbol));
        }
        ExpenseCommands::Totals => {
            let enabled = storage.expenses().iter().filter(|e| e.enabled).count();
            let mut table = BucketTable::new("Expenses", symbol.as_str());
            table.row(
                format!("Enabled ({})", enabled),
                Vec::new(),
                expense_totals(storage.expenses()),
            );
            print!("{}", table.render());
        }
    }

    Ok(())
}
