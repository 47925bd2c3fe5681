//! Allocation CLI commands
//!
//! Buckets are edited one at a time; `split` previews spreading the leftover
//! share across chosen buckets and only saves it with `--apply`.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_allocation_report, format_bucket_list};
use crate::error::CashflowResult;
use crate::services::AllocationService;
use crate::storage::Storage;

/// Allocation subcommands
#[derive(Subcommand)]
pub enum AllocationCommands {
    /// Show the allocation table against current cash flow
    Show,
    /// List the saved buckets and their shares
    List,
    /// Add a bucket or change its share
    Set {
        /// Bucket name
        name: String,
        /// Share of income in percent (e.g. 12.5)
        #[arg(allow_negative_numbers = true)]
        percent: f64,
    },
    /// Remove a bucket
    Remove {
        /// Bucket name
        name: String,
    },
    /// Rename a bucket
    Rename {
        /// Current bucket name
        name: String,
        /// New bucket name
        new_name: String,
    },
    /// Split the leftover share evenly across buckets
    Split {
        /// Buckets that receive the leftover
        #[arg(required = true)]
        names: Vec<String>,
        /// Save the split instead of previewing it
        #[arg(long)]
        apply: bool,
    },
}

pub fn handle_allocation_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AllocationCommands,
) -> CashflowResult<()> {
    let service = AllocationService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        AllocationCommands::Show => {
            print!("{}", format_allocation_report(&service.report()?, symbol));
        }

        AllocationCommands::List => {
            print!("{}", format_bucket_list(&service.plan()?.buckets));
        }

        AllocationCommands::Set { name, percent } => {
            let bucket = service.set_bucket(&name, percent)?;
            println!("Set {} to {:.2}%", bucket.name, bucket.percent_share);
        }

        AllocationCommands::Remove { name } => {
            let removed = service.remove_bucket(&name)?;
            println!("Removed bucket: {}", removed.name);
        }

        AllocationCommands::Rename { name, new_name } => {
            let renamed = service.rename_bucket(&name, &new_name)?;
            println!("Renamed {} to {}", name, renamed.name);
        }

        AllocationCommands::Split { names, apply } => {
            let report = service.split_leftover(names, apply)?;
            if apply {
                println!("Leftover split applied.");
            } else {
                println!("Preview only. Re-run with --apply to save.");
            }
            println!();
            print!("{}", format_allocation_report(&report, symbol));
        }
    }

    Ok(())
}
