//! CashflowCLI - household cash-flow normalization
//!
//! Income streams and expenses arrive from a household backend with amounts
//! at their own frequencies. This crate expresses them across five period
//! buckets, compares hypothetical pay changes against current income, and
//! splits net income across allocation buckets.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Backend records, period types, scenarios and allocation buckets
//! - `storage`: Backend snapshot and JSON persistence of local records
//! - `services`: Period conversion, aggregation, what-if and allocation logic
//! - `audit`: Audit logging of scenario and allocation changes
//! - `display`: Terminal tables
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use cashflow_cli::config::{paths::CashflowPaths, settings::Settings};
//! use cashflow_cli::services::PeriodConverter;
//!
//! let paths = CashflowPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let converter = PeriodConverter::current(&settings);
//! let totals = converter.breakdown(1000.0, "Monthly");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CashflowError, CashflowResult};
