//! Tax-estimate application
//!
//! Reads a bucket value out of a tax estimate and feeds it either into an
//! income draft or into the what-if editing state.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CashflowError, CashflowResult};
use crate::models::{
    Amount, EstimateField, Frequency, IncomeStream, IncomeStreamId, ScenarioAdjustment,
    ScenarioType, TaxEstimateResult, WhatIfState,
};

/// The estimate's value for `field` at `frequency`.
///
/// The estimate carries no daily figure, so Daily is the annual figure over
/// the days in the financial year. Quarterly and unrecognized tokens read the
/// Fortnightly figure.
pub fn calculator_period_amount(
    result: &TaxEstimateResult,
    field: EstimateField,
    frequency: &str,
    days_in_year: u32,
) -> f64 {
    let periods = field.periods(result);
    match Frequency::from_token(frequency) {
        Some(Frequency::Daily) => {
            if days_in_year == 0 {
                0.0
            } else {
                field.annual(result).value() / f64::from(days_in_year)
            }
        }
        Some(Frequency::Weekly) => periods.weekly.value(),
        Some(Frequency::Fortnightly) => periods.fortnightly.value(),
        Some(Frequency::Monthly) => periods.monthly.value(),
        Some(Frequency::Yearly) => periods.yearly.value(),
        Some(Frequency::Quarterly) | None => {
            warn!(frequency, "no estimate figure for frequency, using fortnightly");
            periods.fortnightly.value()
        }
    }
}

/// Net and gross amounts for a new or edited income stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IncomeDraft {
    pub net_amount: Amount,
    pub gross_amount: Amount,
    pub frequency: String,
}

pub fn income_draft(result: &TaxEstimateResult, frequency: &str, days_in_year: u32) -> IncomeDraft {
    let amount = |field| {
        Amount::new(calculator_period_amount(result, field, frequency, days_in_year)).round_cents()
    };
    IncomeDraft {
        net_amount: amount(EstimateField::Net),
        gross_amount: amount(EstimateField::Gross),
        frequency: frequency.to_string(),
    }
}

/// Write the estimate into the what-if state as an adjustment for `stream_id`.
///
/// The scenario type switches to match the estimate basis, the stream is
/// selected, and the adjustment amount is rounded to cents.
pub fn apply_estimate_to_whatif(
    state: &mut WhatIfState,
    streams: &[IncomeStream],
    stream_id: IncomeStreamId,
    result: &TaxEstimateResult,
    scenario_type: ScenarioType,
    frequency: &str,
    days_in_year: u32,
) -> CashflowResult<Amount> {
    if !streams.iter().any(|s| s.id == stream_id) {
        return Err(CashflowError::income_stream_not_found(stream_id.to_string()));
    }

    let field = if scenario_type.is_net() {
        EstimateField::Net
    } else {
        EstimateField::Gross
    };
    let amount = Amount::new(calculator_period_amount(result, field, frequency, days_in_year))
        .round_cents();

    state.scenario_type = scenario_type;
    state.set_adjustment(stream_id, ScenarioAdjustment::new(amount, frequency));

    debug!(stream = %stream_id, amount = amount.value(), frequency, "applied estimate to what-if");
    Ok(amount)
}
