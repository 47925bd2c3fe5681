//! Path management for CashflowCLI
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `CASHFLOW_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cashflow-cli` or `~/.config/cashflow-cli`
//! 3. Windows: `%APPDATA%\cashflow-cli`

use std::path::PathBuf;

use crate::error::CashflowError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CASHFLOW_CLI_DATA_DIR";

/// Manages all paths used by CashflowCLI
#[derive(Debug, Clone)]
pub struct CashflowPaths {
    base_dir: PathBuf,
}

impl CashflowPaths {
    /// Create a new CashflowPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CashflowError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CashflowPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/cashflow-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Income streams as handed over by the household backend
    pub fn income_streams_file(&self) -> PathBuf {
        self.data_dir().join("income_streams.json")
    }

    /// Expenses as handed over by the household backend
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn scenarios_file(&self) -> PathBuf {
        self.data_dir().join("scenarios.json")
    }

    pub fn allocations_file(&self) -> PathBuf {
        self.data_dir().join("allocations.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CashflowError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CashflowError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CashflowError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if CashflowCLI has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CashflowError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                CashflowError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("cashflow-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CashflowError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CashflowError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("cashflow-cli"))
}
