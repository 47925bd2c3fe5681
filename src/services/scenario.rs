//! What-if scenario engine and saved-scenario service
//!
//! The engine compares the selected income streams as stored against the
//! same streams under hypothetical adjustments. Each adjustment is turned into
//! a delta at its own frequency, annualized, and spread across the buckets;
//! deltas are added onto the stored totals of the selection.

use serde::Serialize;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{
    IncomeStream, IncomeStreamId, PeriodTotals, Scenario, ScenarioAdjustment, WhatIfState,
};
use crate::storage::Storage;

use super::aggregate::selected_income_totals;
use super::period::{get_period_value, PeriodConverter};

/// Stored, delta and hypothetical totals for a selection of streams
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScenarioComparison {
    pub selected_totals: PeriodTotals,
    pub delta_totals: PeriodTotals,
    pub scenario_totals: PeriodTotals,
}

/// The bucketed delta one adjustment makes to one stream.
///
/// `None` when there is nothing to add: no adjustment, an amount of zero
/// (indistinguishable from "not entered"), or an amount equal to the
/// stream's current value at the adjustment's frequency.
pub fn stream_delta(
    stream: &IncomeStream,
    adjustment: Option<&ScenarioAdjustment>,
    net: bool,
    converter: &PeriodConverter,
) -> Option<PeriodTotals> {
    let adjustment = adjustment?;
    if adjustment.amount.is_zero() {
        return None;
    }

    let row_frequency = adjustment.row_frequency(&stream.frequency);
    let current_value = get_period_value(stream, net, row_frequency);
    let delta_amount = adjustment.amount.value() - current_value;
    if delta_amount == 0.0 {
        return None;
    }

    Some(converter.breakdown(delta_amount, row_frequency))
}

/// Compare a selection of streams against their adjustments
pub fn compare_selection(
    streams: &[IncomeStream],
    selected: &[IncomeStreamId],
    net: bool,
    adjustment_for: impl Fn(IncomeStreamId) -> Option<ScenarioAdjustment>,
    converter: &PeriodConverter,
) -> ScenarioComparison {
    let selected_totals = selected_income_totals(streams, selected, net);

    let delta_totals: PeriodTotals = streams
        .iter()
        .filter(|s| selected.contains(&s.id))
        .filter_map(|s| stream_delta(s, adjustment_for(s.id).as_ref(), net, converter))
        .sum();

    debug!(
        selected = selected.len(),
        delta_fortnight = delta_totals.per_fortnight,
        "compared what-if selection"
    );

    ScenarioComparison {
        selected_totals,
        delta_totals,
        scenario_totals: selected_totals + delta_totals,
    }
}

/// Compare the current what-if editing state
pub fn compare(
    streams: &[IncomeStream],
    state: &WhatIfState,
    converter: &PeriodConverter,
) -> ScenarioComparison {
    compare_selection(
        streams,
        state.selected(),
        state.scenario_type.is_net(),
        |id| state.adjustment(id).cloned(),
        converter,
    )
}

/// One line of the what-if table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WhatIfRow {
    pub stream_id: IncomeStreamId,
    pub label: String,
    pub included: bool,
    /// Frequency the row is compared at
    pub frequency: String,
    /// Stream's stored value at that frequency
    pub current_value: f64,
    /// Hypothetical amount, if one was entered
    pub proposed: Option<f64>,
    pub delta: Option<PeriodTotals>,
}

/// Build the what-if table: one row per stream, selected or not
pub fn whatif_rows(
    streams: &[IncomeStream],
    state: &WhatIfState,
    converter: &PeriodConverter,
) -> Vec<WhatIfRow> {
    let net = state.scenario_type.is_net();
    streams
        .iter()
        .map(|stream| {
            let adjustment = state.adjustment(stream.id);
            let frequency = adjustment
                .map(|a| a.row_frequency(&stream.frequency))
                .unwrap_or(&stream.frequency)
                .to_string();
            let included = state.is_selected(stream.id);

            WhatIfRow {
                stream_id: stream.id,
                label: stream.label.clone(),
                included,
                current_value: get_period_value(stream, net, &frequency),
                frequency,
                proposed: adjustment.map(|a| a.amount.value()),
                delta: if included {
                    stream_delta(stream, adjustment, net, converter)
                } else {
                    None
                },
            }
        })
        .collect()
}

/// Service for saved scenarios
pub struct ScenarioService<'a> {
    storage: &'a Storage,
}

impl<'a> ScenarioService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Persist the current editing state under `name`
    pub fn save(&self, state: &WhatIfState, name: &str) -> CashflowResult<Scenario> {
        let scenario = state
            .to_scenario(name)
            .map_err(|e| CashflowError::Validation(e.to_string()))?;

        if self.storage.scenarios.find_by_name(&scenario.name)?.is_some() {
            return Err(CashflowError::Duplicate {
                entity_type: "Scenario",
                identifier: scenario.name,
            });
        }

        self.storage.scenarios.insert(scenario.clone())?;
        self.storage.scenarios.save()?;

        self.storage.log_create(
            EntityType::Scenario,
            scenario.id.to_string(),
            Some(scenario.name.clone()),
            &scenario,
        )?;

        info!(id = %scenario.id, name = %scenario.name, "saved scenario");
        Ok(scenario)
    }

    /// Saved scenarios newest first, optionally filtered by name
    pub fn list(&self, search: Option<&str>) -> CashflowResult<Vec<Scenario>> {
        let scenarios = self.storage.scenarios.get_all()?;
        let query = search.map(|q| q.trim().to_lowercase()).unwrap_or_default();
        if query.is_empty() {
            return Ok(scenarios);
        }
        Ok(scenarios
            .into_iter()
            .filter(|s| s.name.to_lowercase().contains(&query))
            .collect())
    }

    /// Find a scenario by id (full or short) or by exact name
    pub fn find(&self, reference: &str) -> CashflowResult<Option<Scenario>> {
        if let Some(found) = self.storage.scenarios.find_by_id_reference(reference)? {
            return Ok(Some(found));
        }
        self.storage.scenarios.find_by_name(reference)
    }

    /// Load a saved scenario into a fresh editing state
    pub fn load(&self, reference: &str) -> CashflowResult<WhatIfState> {
        let scenario = self
            .find(reference)?
            .ok_or_else(|| CashflowError::scenario_not_found(reference))?;
        Ok(WhatIfState::from_scenario(&scenario))
    }

    pub fn delete(&self, reference: &str) -> CashflowResult<Scenario> {
        let scenario = self
            .find(reference)?
            .ok_or_else(|| CashflowError::scenario_not_found(reference))?;

        self.storage.scenarios.delete(scenario.id)?;
        self.storage.scenarios.save()?;

        self.storage.log_delete(
            EntityType::Scenario,
            scenario.id.to_string(),
            Some(scenario.name.clone()),
            &scenario,
        )?;

        info!(id = %scenario.id, "deleted scenario");
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashflowPaths;
    use crate::models::{Amount, ScenarioType};
    use approx::assert_relative_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn converter() -> PeriodConverter {
        PeriodConverter::new(365)
    }

    /// A stream whose stored buckets are consistent with `amount` at `frequency`
    fn stream(id: i64, net: f64, gross: f64, frequency: &str) -> IncomeStream {
        let c = converter();
        let n = c.breakdown(net, frequency);
        let g = c.breakdown(gross, frequency);
        serde_json::from_value(json!({
            "Id": id,
            "Label": format!("Stream {}", id),
            "NetAmount": net,
            "GrossAmount": gross,
            "Frequency": frequency,
            "NetPerDay": n.per_day,
            "NetPerWeek": n.per_week,
            "NetPerFortnight": n.per_fortnight,
            "NetPerMonth": n.per_month,
            "NetPerYear": n.per_year,
            "GrossPerDay": g.per_day,
            "GrossPerWeek": g.per_week,
            "GrossPerFortnight": g.per_fortnight,
            "GrossPerMonth": g.per_month,
            "GrossPerYear": g.per_year,
        }))
        .unwrap()
    }

    fn id(n: i64) -> IncomeStreamId {
        IncomeStreamId::new(n)
    }

    #[test]
    fn test_no_adjustment_means_no_delta() {
        let streams = vec![stream(1, 1000.0, 1300.0, "Monthly")];
        let mut state = WhatIfState::new(ScenarioType::Net);
        state.select(id(1));

        let result = compare(&streams, &state, &converter());
        assert!(result.delta_totals.is_zero());
        assert_eq!(result.scenario_totals, result.selected_totals);
        assert_eq!(result.selected_totals.per_year, 12000.0);
    }

    #[test]
    fn test_zero_amount_is_treated_as_unset() {
        let streams = vec![stream(1, 1000.0, 1300.0, "Monthly")];
        let mut state = WhatIfState::new(ScenarioType::Net);
        state.set_amount(id(1), Amount::zero());

        let result = compare(&streams, &state, &converter());
        assert!(result.delta_totals.is_zero());
    }

    #[test]
    fn test_equal_amount_gives_zero_delta_for_every_frequency() {
        let c = converter();
        for freq in ["Daily", "Weekly", "Fortnightly", "Monthly", "Yearly"] {
            let streams = vec![stream(1, 1000.0, 1300.0, "Monthly")];
            let current = get_period_value(&streams[0], true, freq);
            let mut state = WhatIfState::new(ScenarioType::Net);
            state.set_adjustment(id(1), ScenarioAdjustment::new(Amount::new(current), freq));

            let result = compare(&streams, &state, &c);
            assert!(result.delta_totals.is_zero(), "non-zero delta at {}", freq);
        }
    }

    #[test]
    fn test_raise_at_native_frequency() {
        let streams = vec![stream(1, 1000.0, 1300.0, "Monthly")];
        let mut state = WhatIfState::new(ScenarioType::Net);
        state.set_amount(id(1), Amount::new(1100.0));

        let result = compare(&streams, &state, &converter());
        assert_relative_eq!(result.delta_totals.per_year, 1200.0, epsilon = 1e-9);
        assert_relative_eq!(result.delta_totals.per_month, 100.0, epsilon = 1e-9);
        assert_relative_eq!(result.scenario_totals.per_year, 13200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_adjustment_at_other_frequency_uses_that_bucket() {
        let streams = vec![stream(1, 1000.0, 1300.0, "Monthly")];
        let mut state = WhatIfState::new(ScenarioType::Gross);
        // 1300 monthly gross is 600 per fortnight; propose 700 per fortnight
        state.set_adjustment(id(1), ScenarioAdjustment::new(Amount::new(700.0), "Fortnightly"));

        let result = compare(&streams, &state, &converter());
        assert_relative_eq!(result.delta_totals.per_fortnight, 100.0, epsilon = 1e-9);
        assert_relative_eq!(result.delta_totals.per_year, 2600.0, epsilon = 1e-9);
        assert_relative_eq!(result.scenario_totals.per_fortnight, 700.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unselected_streams_are_ignored() {
        let streams = vec![
            stream(1, 1000.0, 1300.0, "Monthly"),
            stream(2, 500.0, 600.0, "Weekly"),
        ];
        let mut state = WhatIfState::new(ScenarioType::Net);
        state.set_amount(id(2), Amount::new(900.0));
        state.deselect(id(2));
        state.select(id(1));

        let result = compare(&streams, &state, &converter());
        assert!(result.delta_totals.is_zero());
        assert_eq!(result.selected_totals.per_year, 12000.0);
    }

    #[test]
    fn test_deltas_accumulate_across_streams() {
        let streams = vec![
            stream(1, 1000.0, 1300.0, "Monthly"),
            stream(2, 500.0, 600.0, "Weekly"),
        ];
        let mut state = WhatIfState::new(ScenarioType::Net);
        state.set_amount(id(1), Amount::new(900.0)); // -1200 a year
        state.set_amount(id(2), Amount::new(550.0)); // +2600 a year

        let result = compare(&streams, &state, &converter());
        assert_relative_eq!(result.delta_totals.per_year, 1400.0, epsilon = 1e-9);
        assert_relative_eq!(
            result.scenario_totals.per_year,
            12000.0 + 26000.0 + 1400.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_quarterly_adjustment_compares_against_zero() {
        let streams = vec![stream(1, 1000.0, 1300.0, "Monthly")];
        let mut state = WhatIfState::new(ScenarioType::Net);
        state.set_adjustment(id(1), ScenarioAdjustment::new(Amount::new(3000.0), "Quarterly"));

        let result = compare(&streams, &state, &converter());
        assert_relative_eq!(result.delta_totals.per_year, 12000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_whatif_rows() {
        let streams = vec![
            stream(1, 1000.0, 1300.0, "Monthly"),
            stream(2, 500.0, 600.0, "Weekly"),
        ];
        let mut state = WhatIfState::new(ScenarioType::Net);
        state.set_amount(id(1), Amount::new(1100.0));

        let rows = whatif_rows(&streams, &state, &converter());
        assert_eq!(rows.len(), 2);
        assert!(rows[0].included);
        assert_eq!(rows[0].frequency, "Monthly");
        assert_eq!(rows[0].proposed, Some(1100.0));
        assert!(rows[0].delta.is_some());
        assert!(!rows[1].included);
        assert_eq!(rows[1].frequency, "Weekly");
        assert_relative_eq!(rows[1].current_value, 500.0, epsilon = 1e-9);
        assert!(rows[1].delta.is_none());
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, true).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_save_list_load_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ScenarioService::new(&storage);

        let mut state = WhatIfState::new(ScenarioType::Gross);
        state.set_adjustment(id(1), ScenarioAdjustment::new(Amount::new(700.0), "Fortnightly"));
        let saved = service.save(&state, "Promotion").unwrap();

        assert_eq!(service.list(None).unwrap().len(), 1);
        assert_eq!(service.list(Some("PROMO")).unwrap().len(), 1);
        assert!(service.list(Some("redundancy")).unwrap().is_empty());

        let loaded = service.load(&saved.id.to_string()).unwrap();
        assert_eq!(loaded, state);
        let by_name = service.load("Promotion").unwrap();
        assert_eq!(by_name, state);

        service.delete("Promotion").unwrap();
        assert!(service.list(None).unwrap().is_empty());
        assert!(service.delete("Promotion").unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_rejects_duplicate_and_blank_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ScenarioService::new(&storage);
        let state = WhatIfState::default();

        service.save(&state, "Baseline").unwrap();
        assert!(matches!(
            service.save(&state, "baseline"),
            Err(CashflowError::Duplicate { .. })
        ));
        assert!(service.save(&state, "  ").unwrap_err().is_validation());
    }
}
