//! Calculator CLI command
//!
//! Reads a tax estimate saved as JSON and either prints the income amounts it
//! implies at a frequency, or feeds it into a what-if run for one stream.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{
    format_currency, EstimateField, IncomeStreamId, ScenarioType, TaxEstimateResult,
};
use crate::services::{
    apply_estimate_to_whatif, calculator_period_amount, income_draft, PeriodConverter,
    ScenarioService,
};
use crate::storage::Storage;

use super::whatif::{print_whatif, WhatIfArgs};

/// Calculator subcommands
#[derive(Subcommand)]
pub enum CalculatorCommands {
    /// Apply a tax estimate at a frequency
    Apply {
        /// Tax estimate result (JSON)
        #[arg(short, long, value_name = "FILE")]
        estimate: PathBuf,
        /// Frequency to read the estimate at
        #[arg(short, long)]
        frequency: String,
        /// Estimate component to read
        #[arg(long, default_value = "net")]
        field: EstimateField,
        /// Use the estimate as a what-if amount for this stream
        #[arg(short, long, value_name = "ID")]
        stream: Option<IncomeStreamId>,
        /// Save the resulting what-if scenario
        #[arg(long, value_name = "NAME", requires = "stream")]
        save: Option<String>,
    },
}

fn read_estimate(path: &Path) -> CashflowResult<TaxEstimateResult> {
    let file = File::open(path).map_err(|e| {
        CashflowError::Io(format!("Failed to open estimate {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn handle_calculator_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CalculatorCommands,
) -> CashflowResult<()> {
    match cmd {
        CalculatorCommands::Apply {
            estimate,
            frequency,
            field,
            stream,
            save,
        } => {
            let result = read_estimate(&estimate)?;
            let days = PeriodConverter::current(settings).days_in_year();
            let symbol = &settings.currency_symbol;

            let Some(stream_id) = stream else {
                let draft = income_draft(&result, &frequency, days);
                let value = calculator_period_amount(&result, field, &frequency, days);
                println!("Estimate {} at {}", result.tax_year, draft.frequency);
                println!("  Net:   {}", draft.net_amount.format_with_symbol(symbol));
                println!("  Gross: {}", draft.gross_amount.format_with_symbol(symbol));
                if !matches!(field, EstimateField::Net | EstimateField::Gross) {
                    println!("  {}: {}", field, format_currency(value, symbol));
                }
                return Ok(());
            };

            let scenario_type = match field {
                EstimateField::Net => ScenarioType::Net,
                EstimateField::Gross => ScenarioType::Gross,
                other => {
                    return Err(CashflowError::Validation(format!(
                        "Only net or gross estimates can be applied to a stream, not {}",
                        other
                    )))
                }
            };

            let mut state = WhatIfArgs::default().build_state(storage, settings)?;
            let amount = apply_estimate_to_whatif(
                &mut state,
                storage.income_streams(),
                stream_id,
                &result,
                scenario_type,
                &frequency,
                days,
            )?;

            println!(
                "Applied {} {} to {}",
                amount.format_with_symbol(symbol),
                frequency,
                stream_id
            );
            println!();
            print_whatif(storage, settings, &state);

            if let Some(name) = save {
                let scenario = ScenarioService::new(storage).save(&state, &name)?;
                println!();
                println!("Saved scenario: {} ({})", scenario.name, scenario.id);
            }
        }
    }

    Ok(())
}
