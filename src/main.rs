use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use finance_tracker::cli::{
    handle_entry_command, handle_export_command, handle_import_command, handle_report_command,
    EntryCommands, FormatArg, ReportCommands,
};
use finance_tracker::config::{paths::DATA_DIR_ENV, Settings, TrackerPaths};
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker",
    long_about = "Keeps savings, pending income, loans and pending payments in a \
                  plain CSV file, with totals, monthly cash flow and charts."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Entry management commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Summary reports and charts
    #[command(subcommand)]
    Report(ReportCommands),

    /// Import entries from a file
    Import {
        /// File to import
        file: PathBuf,

        /// File format, detected from the extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Discard existing entries first
        #[arg(long)]
        replace: bool,
    },

    /// Export all entries to a file
    Export {
        /// Output file path
        output: PathBuf,

        /// File format, detected from the extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Write JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Create the settings and data files
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    // Initialize storage
    let mut storage = Storage::open(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Entry(cmd)) => {
            handle_entry_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import {
            file,
            format,
            replace,
        }) => {
            handle_import_command(&mut storage, &file, format, replace)?;
        }
        Some(Commands::Export {
            output,
            format,
            pretty,
            compact,
        }) => {
            handle_export_command(&storage, &settings, &output, format, pretty, compact)?;
        }
        Some(Commands::Init) => {
            println!("Initializing finance tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            if !storage.data_file().exists() {
                storage.flush()?;
            }
            println!("Initialization complete!");
            println!();
            println!("Data file: {}", storage.data_file().display());
            println!("Run 'fintrack entry add Savings \"Rainy day\" 100' to add a first entry.");
        }
        Some(Commands::Config) => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data file:       {}", storage.data_file().display());
            println!("Chart directory: {}", paths.chart_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Default chart:   {:?}", settings.default_chart);
            println!("  Pretty exports:  {}", settings.export_pretty);
            println!();
            println!("Set {} to use another base directory.", DATA_DIR_ENV);
        }
        None => {
            println!("Finance tracker - savings, income, loans and payments");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
