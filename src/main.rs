use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cashflow_cli::cli::{
    handle_allocation_command, handle_audit_command, handle_calculator_command,
    handle_expense_command, handle_export_command, handle_income_command,
    handle_scenario_command, handle_whatif_command, AllocationCommands, CalculatorCommands,
    ExpenseCommands, ExportCommands, IncomeCommands, ScenarioCommands, WhatIfArgs,
};
use cashflow_cli::config::{paths::CashflowPaths, settings::Settings};
use cashflow_cli::models::FinancialYear;
use cashflow_cli::services::PeriodConverter;
use cashflow_cli::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "cashflow",
    author = "Kaylee Beyene",
    version,
    about = "Household cash-flow normalizer",
    long_about = "CashflowCLI expresses every income stream and expense per day, week, \
                  fortnight, month and year, compares what-if pay changes against \
                  current income, and splits net income across allocation buckets."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income stream views
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Expense views
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Compare hypothetical income against current income
    Whatif {
        #[command(flatten)]
        args: WhatIfArgs,
        /// Save the scenario under this name
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },

    /// Saved what-if scenarios
    #[command(subcommand)]
    Scenario(ScenarioCommands),

    /// Allocation buckets
    #[command(subcommand, alias = "alloc")]
    Allocation(AllocationCommands),

    /// Apply a tax estimate
    #[command(subcommand, alias = "calc")]
    Calculator(CalculatorCommands),

    /// Export allocation or scenario views
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(fallback_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CashflowPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    // Initialize storage
    let mut storage = Storage::new(paths.clone(), settings.audit_enabled)?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Whatif { args, save }) => {
            handle_whatif_command(&storage, &settings, args, save)?
        }
        Some(Commands::Scenario(cmd)) => handle_scenario_command(&storage, &settings, cmd)?,
        Some(Commands::Allocation(cmd)) => handle_allocation_command(&storage, &settings, cmd)?,
        Some(Commands::Calculator(cmd)) => handle_calculator_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing CashflowCLI at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Place the backend's income streams and expenses in:");
            println!("  {}", paths.income_streams_file().display());
            println!("  {}", paths.expenses_file().display());
        }
        Some(Commands::Config) => {
            let converter = PeriodConverter::current(&settings);
            let year = FinancialYear::containing(
                chrono::Local::now().date_naive(),
                settings.financial_year_start_month,
                settings.financial_year_start_day,
            );

            println!("CashflowCLI Configuration");
            println!("=========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!(
                "  Financial year start: {:02}-{:02}",
                settings.financial_year_start_month, settings.financial_year_start_day
            );
            if let Some(year) = year {
                println!(
                    "  Current year:         {} ({} to {})",
                    year.label(),
                    year.start(),
                    year.end_inclusive()
                );
            }
            println!("  Days in year:         {}", converter.days_in_year());
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Default scenario:     {}", settings.default_scenario_type);
            println!("  Log level:            {}", settings.log_level);
            println!("  Audit enabled:        {}", settings.audit_enabled);
        }
        None => {
            println!("CashflowCLI - household cash-flow normalizer");
            println!();
            println!("Run 'cashflow --help' for usage information.");
        }
    }

    Ok(())
}
