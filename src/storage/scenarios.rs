//! Saved scenario repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{CashflowError, CashflowResult};
use crate::models::{Scenario, ScenarioId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScenarioData {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

pub struct ScenarioRepository {
    path: PathBuf,
    scenarios: RwLock<HashMap<ScenarioId, Scenario>>,
}

impl ScenarioRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            scenarios: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> CashflowResult<()> {
        let file_data: ScenarioData = read_json(&self.path)?;

        let mut scenarios = self
            .scenarios
            .write()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        scenarios.clear();
        scenarios.extend(file_data.scenarios.into_iter().map(|s| (s.id, s)));
        Ok(())
    }

    pub fn save(&self) -> CashflowResult<()> {
        let mut list = self.get_all()?;
        list.reverse();
        write_json_atomic(&self.path, &ScenarioData { scenarios: list })
    }

    /// Every saved scenario, newest first
    pub fn get_all(&self) -> CashflowResult<Vec<Scenario>> {
        let scenarios = self
            .scenarios
            .read()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = scenarios.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// Find by full id, `scn-` id or short id prefix
    pub fn find_by_id_reference(&self, reference: &str) -> CashflowResult<Option<Scenario>> {
        let scenarios = self
            .scenarios
            .read()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matches = scenarios.values().filter(|s| s.id.matches_short(reference));
        let found = matches.next().cloned();
        if matches.next().is_some() {
            return Err(CashflowError::Validation(format!(
                "Scenario reference '{}' is ambiguous",
                reference
            )));
        }
        Ok(found)
    }

    /// Find by name, ignoring case and surrounding whitespace
    pub fn find_by_name(&self, name: &str) -> CashflowResult<Option<Scenario>> {
        let scenarios = self
            .scenarios
            .read()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name = name.trim().to_lowercase();
        Ok(scenarios
            .values()
            .find(|s| s.name.to_lowercase() == name)
            .cloned())
    }

    pub fn insert(&self, scenario: Scenario) -> CashflowResult<()> {
        let mut scenarios = self
            .scenarios
            .write()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        scenarios.insert(scenario.id, scenario);
        Ok(())
    }

    pub fn delete(&self, id: ScenarioId) -> CashflowResult<bool> {
        let mut scenarios = self
            .scenarios
            .write()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(scenarios.remove(&id).is_some())
    }
}
