//! Read-only snapshot of backend records
//!
//! Income streams and expenses are owned by the household backend and land
//! on disk as plain JSON arrays. They are loaded once per run and never
//! written back.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::paths::CashflowPaths;
use crate::error::CashflowResult;
use crate::models::{Expense, IncomeStream};

use super::file_io::read_json;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub income_streams: Vec<IncomeStream>,
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    pub fn load(paths: &CashflowPaths) -> CashflowResult<Self> {
        let snapshot = Self {
            income_streams: read_records(paths.income_streams_file())?,
            expenses: read_records(paths.expenses_file())?,
        };
        debug!(
            income_streams = snapshot.income_streams.len(),
            expenses = snapshot.expenses.len(),
            "loaded backend snapshot"
        );
        Ok(snapshot)
    }
}

fn read_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> CashflowResult<Vec<T>> {
    read_json::<Vec<T>, _>(path)
}
