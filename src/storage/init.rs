//! First-run setup of the data directory

use tracing::info;

use crate::config::paths::CashflowPaths;
use crate::config::settings::Settings;
use crate::error::CashflowResult;
use crate::models::{AllocationPlan, Expense, IncomeStream};

use super::file_io::write_json_atomic;

/// Create directories, default settings and empty data files.
///
/// Existing files are left alone, so running this twice is harmless.
pub fn initialize_storage(paths: &CashflowPaths) -> CashflowResult<Settings> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if !paths.income_streams_file().exists() {
        write_json_atomic(paths.income_streams_file(), &Vec::<IncomeStream>::new())?;
    }
    if !paths.expenses_file().exists() {
        write_json_atomic(paths.expenses_file(), &Vec::<Expense>::new())?;
    }
    if !paths.scenarios_file().exists() {
        write_json_atomic(paths.scenarios_file(), &serde_json::json!({ "scenarios": [] }))?;
    }
    if !paths.allocations_file().exists() {
        write_json_atomic(paths.allocations_file(), &AllocationPlan::default())?;
    }

    info!(base_dir = %paths.base_dir().display(), "initialized data directory");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file_io::read_json;
    use crate::models::AllocationBucket;
    use tempfile::TempDir;

    #[test]
    fn test_creates_every_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        assert!(paths.is_initialized());
        assert!(paths.income_streams_file().exists());
        assert!(paths.expenses_file().exists());
        assert!(paths.scenarios_file().exists());
        assert!(paths.allocations_file().exists());
    }

    #[test]
    fn test_does_not_overwrite_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let plan = AllocationPlan::new(vec![AllocationBucket::new("Smile", 10.0)]);
        write_json_atomic(paths.allocations_file(), &plan).unwrap();

        initialize_storage(&paths).unwrap();

        let loaded: AllocationPlan = read_json(paths.allocations_file()).unwrap();
        assert_eq!(loaded.buckets.len(), 1);
    }
}
