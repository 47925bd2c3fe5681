//! Saved scenario CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_scenario_details, format_scenario_list};
use crate::error::{CashflowError, CashflowResult};
use crate::models::WhatIfState;
use crate::services::ScenarioService;
use crate::storage::Storage;

use super::whatif::print_whatif;

/// Scenario subcommands
#[derive(Subcommand)]
pub enum ScenarioCommands {
    /// List saved scenarios, newest first
    List {
        /// Filter by name
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a saved scenario and its comparison
    Show {
        /// Scenario name or ID
        scenario: String,
    },
    /// Delete a saved scenario
    Delete {
        /// Scenario name or ID
        scenario: String,
    },
}

pub fn handle_scenario_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ScenarioCommands,
) -> CashflowResult<()> {
    let service = ScenarioService::new(storage);

    match cmd {
        ScenarioCommands::List { search } => {
            let scenarios = service.list(search.as_deref())?;
            print!("{}", format_scenario_list(&scenarios));
        }

        ScenarioCommands::Show { scenario } => {
            let found = service
                .find(&scenario)?
                .ok_or_else(|| CashflowError::scenario_not_found(&scenario))?;

            print!("{}", format_scenario_details(&found, &settings.currency_symbol));
            println!();
            print_whatif(storage, settings, &WhatIfState::from_scenario(&found));
        }

        ScenarioCommands::Delete { scenario } => {
            let deleted = service.delete(&scenario)?;
            println!("Deleted scenario: {} ({})", deleted.name, deleted.id);
        }
    }

    Ok(())
}
