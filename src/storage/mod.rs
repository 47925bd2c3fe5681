//! Storage layer for CashflowCLI
//!
//! Backend records (income streams, expenses) are read from a snapshot and
//! never written. Saved scenarios and the allocation plan are owned locally
//! and persisted as JSON with atomic writes; changes to them go to the audit
//! log through the `log_*` helpers.

pub mod allocations;
pub mod file_io;
pub mod init;
pub mod scenarios;
pub mod snapshot;

pub use allocations::AllocationRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use scenarios::ScenarioRepository;
pub use snapshot::Snapshot;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::CashflowPaths;
use crate::error::CashflowResult;
use crate::models::{Expense, IncomeStream};

/// Main storage coordinator
pub struct Storage {
    paths: CashflowPaths,
    snapshot: Snapshot,
    pub scenarios: ScenarioRepository,
    pub allocations: AllocationRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create storage rooted at `paths`; `audit_enabled` switches the audit log
    pub fn new(paths: CashflowPaths, audit_enabled: bool) -> CashflowResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            snapshot: Snapshot::default(),
            scenarios: ScenarioRepository::new(paths.scenarios_file()),
            allocations: AllocationRepository::new(paths.allocations_file()),
            audit: audit_enabled.then(|| AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    pub fn paths(&self) -> &CashflowPaths {
        &self.paths
    }

    pub fn load_all(&mut self) -> CashflowResult<()> {
        self.snapshot = Snapshot::load(&self.paths)?;
        self.scenarios.load()?;
        self.allocations.load()?;
        Ok(())
    }

    pub fn income_streams(&self) -> &[IncomeStream] {
        &self.snapshot.income_streams
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.snapshot.expenses
    }

    /// Logger for reading the audit trail, whether or not writing is enabled
    pub fn audit_reader(&self) -> AuditLogger {
        AuditLogger::new(self.paths.audit_log())
    }

    fn log(&self, entry: AuditEntry) -> CashflowResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> CashflowResult<()> {
        self.log(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> CashflowResult<()> {
        self.log(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> CashflowResult<()> {
        self.log(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, true).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.income_streams().is_empty());
        assert!(storage.scenarios.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_audit_respects_switch() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());

        let silent = Storage::new(paths.clone(), false).unwrap();
        silent
            .log_create(EntityType::Scenario, "scn-1", None, &json!({}))
            .unwrap();
        assert!(silent.audit_reader().read_all().unwrap().is_empty());

        let audited = Storage::new(paths, true).unwrap();
        audited
            .log_create(EntityType::Scenario, "scn-1", None, &json!({}))
            .unwrap();
        assert_eq!(audited.audit_reader().read_all().unwrap().len(), 1);
    }
}
