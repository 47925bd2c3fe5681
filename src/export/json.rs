//! JSON export
//!
//! Exports are wrapped in a small document carrying the schema version, the
//! time of export and the financial-year length the figures were computed
//! with, so a file can be read back without guessing its context.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CashflowResult;
use crate::models::ScenarioType;
use crate::services::{ScenarioComparison, WhatIfRow};

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportDocument<T> {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub days_in_year: u32,
    pub data: T,
}

impl<T: Serialize> ExportDocument<T> {
    pub fn new(days_in_year: u32, data: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            days_in_year,
            data,
        }
    }
}

/// What-if comparison with its per-stream rows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScenarioExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub scenario_type: ScenarioType,
    #[serde(flatten)]
    pub comparison: ScenarioComparison,
    pub streams: Vec<WhatIfRow>,
}

pub fn export_json<W, T>(document: &ExportDocument<T>, writer: &mut W) -> CashflowResult<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut *writer, document)?;
    writeln!(writer)?;
    Ok(())
}
