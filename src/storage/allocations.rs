//! Allocation plan repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{CashflowError, CashflowResult};
use crate::models::AllocationPlan;

use super::file_io::{read_json, write_json_atomic};

pub struct AllocationRepository {
    path: PathBuf,
    plan: RwLock<AllocationPlan>,
}

impl AllocationRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            plan: RwLock::new(AllocationPlan::default()),
        }
    }

    pub fn load(&self) -> CashflowResult<()> {
        let loaded: AllocationPlan = read_json(&self.path)?;
        let mut plan = self
            .plan
            .write()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *plan = loaded;
        Ok(())
    }

    pub fn save(&self) -> CashflowResult<()> {
        write_json_atomic(&self.path, &self.get()?)
    }

    pub fn get(&self) -> CashflowResult<AllocationPlan> {
        let plan = self
            .plan
            .read()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(plan.clone())
    }

    pub fn set(&self, new_plan: AllocationPlan) -> CashflowResult<()> {
        let mut plan = self
            .plan
            .write()
            .map_err(|e| CashflowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *plan = new_plan;
        Ok(())
    }
}
