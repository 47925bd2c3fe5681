//! User settings for CashflowCLI
//!
//! Manages the financial-year definition, display preferences and logging
//! verbosity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::CashflowPaths;
use crate::error::CashflowError;
use crate::models::ScenarioType;

/// User settings for CashflowCLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Calendar month the financial year starts in (1-12)
    #[serde(default = "default_fy_start_month")]
    pub financial_year_start_month: u32,

    /// Day of month the financial year starts on
    #[serde(default = "default_fy_start_day")]
    pub financial_year_start_day: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Scenario type used when `whatif` is run without `--type`
    #[serde(default)]
    pub default_scenario_type: ScenarioType,

    /// Fallback tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether saved scenario and allocation changes are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_fy_start_month() -> u32 {
    7
}

fn default_fy_start_day() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            financial_year_start_month: default_fy_start_month(),
            financial_year_start_day: default_fy_start_day(),
            currency_symbol: default_currency(),
            default_scenario_type: ScenarioType::default(),
            log_level: default_log_level(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CashflowPaths) -> Result<Self, CashflowError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| CashflowError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| CashflowError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashflowPaths) -> Result<(), CashflowError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CashflowError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CashflowError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check the financial-year start is a real calendar day.
    ///
    /// A leap year is used so that 29 February is accepted.
    pub fn validate(&self) -> Result<(), CashflowError> {
        if NaiveDate::from_ymd_opt(
            2024,
            self.financial_year_start_month,
            self.financial_year_start_day,
        )
        .is_none()
        {
            return Err(CashflowError::Config(format!(
                "Invalid financial year start: month {} day {}",
                self.financial_year_start_month, self.financial_year_start_day
            )));
        }
        Ok(())
    }
}
