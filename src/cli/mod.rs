//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod entry;
pub mod export;
pub mod import;
pub mod report;

pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, FormatArg};
pub use import::handle_import_command;
pub use report::{handle_report_command, ChartArg, ReportCommands};
