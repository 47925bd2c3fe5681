//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::export::{
    export_allocation_csv, export_json, export_scenario_csv, export_yaml, ExportDocument,
    ExportFormat, ScenarioExport,
};
use crate::services::{compare, whatif_rows, AllocationService, PeriodConverter, ScenarioService};
use crate::storage::Storage;

use super::whatif::WhatIfArgs;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export the allocation table
    Allocation {
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a what-if comparison
    Scenario {
        #[command(flatten)]
        whatif: WhatIfArgs,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&PathBuf>) -> CashflowResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CashflowError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn report_written(output: Option<&PathBuf>, what: &str) {
    if let Some(path) = output {
        println!("Exported {} to: {}", what, path.display());
    }
}

pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> CashflowResult<()> {
    let converter = PeriodConverter::current(settings);

    match cmd {
        ExportCommands::Allocation { format, output } => {
            let report = AllocationService::new(storage).report()?;
            let mut writer = open_output(output.as_ref())?;

            match format {
                ExportFormat::Csv => export_allocation_csv(&report, &mut writer)?,
                ExportFormat::Json => export_json(
                    &ExportDocument::new(converter.days_in_year(), &report),
                    &mut writer,
                )?,
                ExportFormat::Yaml => export_yaml(
                    &ExportDocument::new(converter.days_in_year(), &report),
                    &mut writer,
                )?,
            }
            writer.flush()?;
            drop(writer);
            report_written(output.as_ref(), "allocation table");
        }

        ExportCommands::Scenario {
            whatif,
            format,
            output,
        } => {
            let name = match &whatif.load {
                Some(reference) => ScenarioService::new(storage)
                    .find(reference)?
                    .map(|s| s.name),
                None => None,
            };
            let state = whatif.build_state(storage, settings)?;
            let streams = storage.income_streams();
            let comparison = compare(streams, &state, &converter);
            let rows = whatif_rows(streams, &state, &converter);

            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Csv => export_scenario_csv(&comparison, &rows, &mut writer)?,
                ExportFormat::Json | ExportFormat::Yaml => {
                    let document = ExportDocument::new(
                        converter.days_in_year(),
                        ScenarioExport {
                            name,
                            scenario_type: state.scenario_type,
                            comparison,
                            streams: rows,
                        },
                    );
                    if format == ExportFormat::Json {
                        export_json(&document, &mut writer)?;
                    } else {
                        export_yaml(&document, &mut writer)?;
                    }
                }
            }
            writer.flush()?;
            drop(writer);
            report_written(output.as_ref(), "scenario comparison");
        }
    }

    Ok(())
}
