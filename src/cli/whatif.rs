//! What-if CLI command
//!
//! The editing state is rebuilt from flags on every run: optionally seeded
//! from a saved scenario, then selections and adjustments are layered on top.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_comparison, format_whatif_rows};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{
    parse_number, Amount, IncomeStreamId, ScenarioAdjustment, ScenarioType, WhatIfState,
};
use crate::services::{compare, whatif_rows, PeriodConverter, ScenarioService};
use crate::storage::Storage;

/// Flags that describe a what-if state
#[derive(Args, Debug, Clone, Default)]
pub struct WhatIfArgs {
    /// Compare net or gross amounts
    #[arg(short = 't', long = "type")]
    pub scenario_type: Option<ScenarioType>,

    /// Include a stream without changing its amount
    #[arg(short, long = "select", value_name = "ID")]
    pub select: Vec<IncomeStreamId>,

    /// Hypothetical amount for a stream, optionally at another frequency
    #[arg(
        short,
        long = "adjust",
        value_name = "ID=AMOUNT[@FREQ]",
        value_parser = parse_adjustment
    )]
    pub adjust: Vec<(IncomeStreamId, ScenarioAdjustment)>,

    /// Start from a saved scenario (name or ID)
    #[arg(short, long, value_name = "SCENARIO")]
    pub load: Option<String>,
}

impl WhatIfArgs {
    /// Build the editing state these flags describe
    pub fn build_state(&self, storage: &Storage, settings: &Settings) -> CashflowResult<WhatIfState> {
        let mut state = match &self.load {
            Some(reference) => ScenarioService::new(storage).load(reference)?,
            None => WhatIfState::new(settings.default_scenario_type),
        };
        if let Some(scenario_type) = self.scenario_type {
            state.scenario_type = scenario_type;
        }

        for id in &self.select {
            ensure_stream(storage, *id)?;
            state.select(*id);
        }
        for (id, adjustment) in &self.adjust {
            ensure_stream(storage, *id)?;
            state.set_adjustment(*id, adjustment.clone());
        }

        Ok(state)
    }
}

fn ensure_stream(storage: &Storage, id: IncomeStreamId) -> CashflowResult<()> {
    if storage.income_streams().iter().any(|s| s.id == id) {
        Ok(())
    } else {
        Err(CashflowError::income_stream_not_found(id.to_string()))
    }
}

/// Parse `ID=AMOUNT[@FREQ]`, e.g. `inc-3=2500@Fortnightly`
pub fn parse_adjustment(s: &str) -> Result<(IncomeStreamId, ScenarioAdjustment), String> {
    let (id, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected ID=AMOUNT[@FREQ], got '{}'", s))?;
    let id: IncomeStreamId = id.parse().map_err(|e| format!("{}", e))?;

    let (amount, frequency) = match rest.split_once('@') {
        Some((amount, frequency)) => (amount, frequency.trim()),
        None => (rest, ""),
    };
    let amount = parse_number(amount).ok_or_else(|| format!("Invalid amount '{}'", amount.trim()))?;

    Ok((id, ScenarioAdjustment::new(Amount::new(amount), frequency)))
}

/// Print the per-stream table and the comparison for a state
pub fn print_whatif(storage: &Storage, settings: &Settings, state: &WhatIfState) {
    let converter = PeriodConverter::current(settings);
    let symbol = &settings.currency_symbol;
    let streams = storage.income_streams();

    println!("What-if ({}), {} day year", state.scenario_type, converter.days_in_year());
    println!();
    print!("{}", format_whatif_rows(&whatif_rows(streams, state, &converter), symbol));
    println!();
    print!("{}", format_comparison(&compare(streams, state, &converter), symbol));
}

pub fn handle_whatif_command(
    storage: &Storage,
    settings: &Settings,
    args: WhatIfArgs,
    save: Option<String>,
) -> CashflowResult<()> {
    let state = args.build_state(storage, settings)?;
    print_whatif(storage, settings, &state);

    if let Some(name) = save {
        let scenario = ScenarioService::new(storage).save(&state, &name)?;
        println!();
        println!("Saved scenario: {} ({})", scenario.name, scenario.id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::to_number;

    #[test]
    fn test_parse_adjustment() {
        let (id, adj) = parse_adjustment("inc-3=2,500.50@Fortnightly").unwrap();
        assert_eq!(id, IncomeStreamId::new(3));
        assert_eq!(adj.amount.value(), 2500.5);
        assert_eq!(adj.frequency, "Fortnightly");

        let (id, adj) = parse_adjustment("4=$100").unwrap();
        assert_eq!(id, IncomeStreamId::new(4));
        assert_eq!(adj.amount.value(), 100.0);
        assert!(adj.frequency.is_empty());
    }

    #[test]
    fn test_parse_adjustment_rejects_bad_input() {
        assert!(parse_adjustment("inc-3").is_err());
        assert!(parse_adjustment("salary=100").is_err());
        assert!(parse_adjustment("inc-3=lots").is_err());
        assert!(parse_adjustment("inc-3=inf").is_err());
    }

    #[test]
    fn test_parse_adjustment_reads_amounts_like_stored_values() {
        for text in ["2 500", "2_500", "$2,500"] {
            let (_, adj) = parse_adjustment(&format!("inc-3={}", text)).unwrap();
            assert_eq!(adj.amount.value(), to_number(text));
            assert_eq!(adj.amount.value(), 2500.0);
        }
    }
}
