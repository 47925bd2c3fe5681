//! What-if scenario models
//!
//! A what-if adjustment says "if this stream instead paid `amount` at
//! `frequency`". Adjustments are edited in memory as a [`WhatIfState`] and only
//! become a persisted [`Scenario`] on an explicit save. Loading a scenario
//! replaces the in-memory selection and adjustments wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;
use super::ids::{IncomeStreamId, ScenarioId};

/// Maximum length of a scenario name
pub const MAX_SCENARIO_NAME_LEN: usize = 200;

/// Whether a scenario compares net or gross amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioType {
    #[default]
    Net,
    Gross,
}

impl ScenarioType {
    pub fn is_net(&self) -> bool {
        matches!(self, Self::Net)
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Net => write!(f, "net"),
            Self::Gross => write!(f, "gross"),
        }
    }
}

impl FromStr for ScenarioType {
    type Err = ScenarioValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "net" => Ok(Self::Net),
            "gross" => Ok(Self::Gross),
            _ => Err(ScenarioValidationError::InvalidType(s.to_string())),
        }
    }
}

/// A hypothetical replacement amount for one income stream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScenarioAdjustment {
    pub amount: Amount,
    /// Raw frequency token; empty means "use the stream's own frequency"
    #[serde(default)]
    pub frequency: String,
}

impl ScenarioAdjustment {
    pub fn new(amount: Amount, frequency: impl Into<String>) -> Self {
        Self {
            amount,
            frequency: frequency.into(),
        }
    }

    /// The frequency the adjustment is expressed at, given the stream's own
    pub fn row_frequency<'a>(&'a self, stream_frequency: &'a str) -> &'a str {
        if self.frequency.trim().is_empty() {
            stream_frequency
        } else {
            &self.frequency
        }
    }
}

/// One adjustment as persisted inside a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SavedAdjustment {
    pub stream_id: IncomeStreamId,
    pub amount: Amount,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub included: bool,
}

/// A named, saved what-if scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub scenario_type: ScenarioType,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub adjustments: Vec<SavedAdjustment>,
}

impl Scenario {
    /// Create a scenario with a trimmed, validated name
    pub fn new(
        name: &str,
        scenario_type: ScenarioType,
        adjustments: Vec<SavedAdjustment>,
    ) -> Result<Self, ScenarioValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScenarioValidationError::EmptyName);
        }
        if name.chars().count() > MAX_SCENARIO_NAME_LEN {
            return Err(ScenarioValidationError::NameTooLong);
        }

        Ok(Self {
            id: ScenarioId::new(),
            name: name.to_string(),
            scenario_type,
            created_at: Utc::now(),
            adjustments,
        })
    }

    pub fn included_count(&self) -> usize {
        self.adjustments.iter().filter(|a| a.included).count()
    }
}

/// Validation errors for scenarios
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioValidationError {
    EmptyName,
    NameTooLong,
    InvalidType(String),
}

impl fmt::Display for ScenarioValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Scenario name is required"),
            Self::NameTooLong => write!(
                f,
                "Scenario name cannot exceed {} characters",
                MAX_SCENARIO_NAME_LEN
            ),
            Self::InvalidType(s) => {
                write!(f, "Scenario type must be 'net' or 'gross', got '{}'", s)
            }
        }
    }
}

impl std::error::Error for ScenarioValidationError {}

/// In-memory what-if editing state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhatIfState {
    pub scenario_type: ScenarioType,
    selected: Vec<IncomeStreamId>,
    adjustments: HashMap<IncomeStreamId, ScenarioAdjustment>,
}

impl WhatIfState {
    pub fn new(scenario_type: ScenarioType) -> Self {
        Self {
            scenario_type,
            ..Self::default()
        }
    }

    /// Selected stream ids in the order they were selected
    pub fn selected(&self) -> &[IncomeStreamId] {
        &self.selected
    }

    pub fn is_selected(&self, id: IncomeStreamId) -> bool {
        self.selected.contains(&id)
    }

    pub fn adjustments(&self) -> &HashMap<IncomeStreamId, ScenarioAdjustment> {
        &self.adjustments
    }

    pub fn adjustment(&self, id: IncomeStreamId) -> Option<&ScenarioAdjustment> {
        self.adjustments.get(&id)
    }

    pub fn select(&mut self, id: IncomeStreamId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn deselect(&mut self, id: IncomeStreamId) {
        self.selected.retain(|s| *s != id);
    }

    /// Set the hypothetical amount; editing an amount selects the stream
    pub fn set_amount(&mut self, id: IncomeStreamId, amount: Amount) {
        self.adjustments.entry(id).or_default().amount = amount;
        self.select(id);
    }

    /// Set the frequency the hypothetical amount is expressed at
    pub fn set_frequency(&mut self, id: IncomeStreamId, frequency: impl Into<String>) {
        self.adjustments.entry(id).or_default().frequency = frequency.into();
    }

    /// Replace the whole adjustment for a stream and select it
    pub fn set_adjustment(&mut self, id: IncomeStreamId, adjustment: ScenarioAdjustment) {
        self.adjustments.insert(id, adjustment);
        self.select(id);
    }

    /// Build a persisted scenario from the selected, adjusted streams
    pub fn to_scenario(&self, name: &str) -> Result<Scenario, ScenarioValidationError> {
        let adjustments = self
            .selected
            .iter()
            .filter_map(|id| {
                self.adjustments.get(id).map(|adj| SavedAdjustment {
                    stream_id: *id,
                    amount: adj.amount,
                    frequency: adj.frequency.clone(),
                    included: true,
                })
            })
            .collect();

        Scenario::new(name, self.scenario_type, adjustments)
    }

    /// Replace type, selection and adjustments with a saved scenario's
    pub fn load(&mut self, scenario: &Scenario) {
        self.scenario_type = scenario.scenario_type;
        self.selected = Vec::new();
        for adj in scenario.adjustments.iter().filter(|a| a.included) {
            self.select(adj.stream_id);
        }
        self.adjustments = scenario
            .adjustments
            .iter()
            .map(|adj| {
                (
                    adj.stream_id,
                    ScenarioAdjustment::new(adj.amount, adj.frequency.clone()),
                )
            })
            .collect();
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut state = Self::default();
        state.load(scenario);
        state
    }
}
