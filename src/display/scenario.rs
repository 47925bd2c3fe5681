//! What-if and saved scenario views

use crate::models::{format_currency, Scenario};
use crate::services::{ScenarioComparison, WhatIfRow};

use super::table::BucketTable;

/// One line per stream: whether it is in the scenario, what it pays now at
/// the row frequency and what was proposed
pub fn format_whatif_rows(rows: &[WhatIfRow], symbol: &str) -> String {
    if rows.is_empty() {
        return "No income streams found.".to_string();
    }

    let mut table = BucketTable::new("Stream", symbol)
        .with_column("ID")
        .with_column("In")
        .with_column("Frequency")
        .with_column("Current")
        .with_column("Proposed");

    for row in rows {
        table.row(
            row.label.clone(),
            vec![
                row.stream_id.to_string(),
                if row.included { "x" } else { "" }.to_string(),
                row.frequency.clone(),
                format_currency(row.current_value, symbol),
                row.proposed
                    .map(|p| format_currency(p, symbol))
                    .unwrap_or_default(),
            ],
            row.delta.unwrap_or_default(),
        );
    }

    format!("Change per stream\n{}", table.render())
}

pub fn format_comparison(comparison: &ScenarioComparison, symbol: &str) -> String {
    let mut table = BucketTable::new("Selected streams", symbol);
    table.row("Current", Vec::new(), comparison.selected_totals);
    table.row("Change", Vec::new(), comparison.delta_totals);
    table.footer("Scenario", Vec::new(), comparison.scenario_totals);
    table.render()
}

pub fn format_scenario_list(scenarios: &[Scenario]) -> String {
    if scenarios.is_empty() {
        return "No saved scenarios.".to_string();
    }

    let name_width = scenarios
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = format!(
        "{:<12}  {:<name_width$}  {:<5}  {:>7}  {}\n",
        "ID", "Name", "Type", "Streams", "Saved"
    );
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<5}  {:->7}  {:-<16}\n",
        "", "", "", "", ""
    ));
    for scenario in scenarios {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<5}  {:>7}  {}\n",
            scenario.id.to_string(),
            scenario.name,
            scenario.scenario_type.to_string(),
            scenario.included_count(),
            scenario.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    output
}

pub fn format_scenario_details(scenario: &Scenario, symbol: &str) -> String {
    let mut output = format!("Scenario: {}\n", scenario.name);
    output.push_str(&format!("  ID:      {}\n", scenario.id));
    output.push_str(&format!("  Type:    {}\n", scenario.scenario_type));
    output.push_str(&format!(
        "  Saved:   {}\n",
        scenario.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if scenario.adjustments.is_empty() {
        output.push_str("\n  No adjustments.\n");
        return output;
    }

    output.push_str("\n  Adjustments:\n");
    for adj in &scenario.adjustments {
        let frequency = if adj.frequency.is_empty() {
            "(stream frequency)"
        } else {
            adj.frequency.as_str()
        };
        output.push_str(&format!(
            "    {:<10} {:>14}  {}{}\n",
            adj.stream_id.to_string(),
            adj.amount.format_with_symbol(symbol),
            frequency,
            if adj.included { "" } else { "  (excluded)" },
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, IncomeStreamId, SavedAdjustment, ScenarioType};

    fn scenario() -> Scenario {
        Scenario::new(
            "Pay rise",
            ScenarioType::Gross,
            vec![SavedAdjustment {
                stream_id: IncomeStreamId::new(3),
                amount: Amount::new(3500.0),
                frequency: String::new(),
                included: true,
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_list() {
        let output = format_scenario_list(&[scenario()]);
        let row = output.lines().nth(2).unwrap();
        assert!(row.starts_with("scn-"));
        assert!(row.contains("Pay rise"));
        assert!(row.contains("gross"));
        assert_eq!(format_scenario_list(&[]), "No saved scenarios.");
    }

    #[test]
    fn test_scenario_details() {
        let output = format_scenario_details(&scenario(), "$");
        assert!(output.contains("inc-3"));
        assert!(output.contains("$3,500.00"));
        assert!(output.contains("(stream frequency)"));
    }

    #[test]
    fn test_comparison_rows() {
        let output = format_comparison(&ScenarioComparison::default(), "$");
        assert!(output.contains("Current"));
        assert!(output.lines().last().unwrap().starts_with("Scenario"));
    }
}
