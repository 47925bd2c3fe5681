//! Configuration module for CashflowCLI
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (financial year, currency, logging)

pub mod paths;
pub mod settings;

pub use paths::CashflowPaths;
pub use settings::Settings;
