//! CLI commands for reports
//!
//! Totals by section, monthly cash flow, and SVG charts of both.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::reports::{
    monthly_cash_flow, render_bar_chart, render_pie_chart, totals_by_category, ChartKind,
};
use crate::storage::Storage;

/// Chart kind options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChartArg {
    /// Monthly cash flow bars
    Bar,
    /// Share of each section
    Pie,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Bar => ChartKind::Bar,
            ChartArg::Pie => ChartKind::Pie,
        }
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Sum of amounts per section
    Totals {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Net amount per calendar month
    #[command(alias = "cashflow")]
    CashFlow {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a chart as SVG
    Chart {
        /// Output file, defaults to `<kind>.svg` in the charts directory
        output: Option<PathBuf>,

        /// Chart kind, defaults to the configured one
        #[arg(short, long, value_enum)]
        kind: Option<ChartArg>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let store = storage.store();
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Totals { output } => {
            let report = totals_by_category(store);
            match output {
                Some(path) => {
                    write_csv(&path, |w| report.export_csv(w))?;
                    println!("Totals report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::CashFlow { output } => {
            let report = monthly_cash_flow(store);
            match output {
                Some(path) => {
                    write_csv(&path, |w| report.export_csv(w))?;
                    println!("Cash flow report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Chart { output, kind } => {
            let kind = kind.map(ChartKind::from).unwrap_or(settings.default_chart);
            let path = output.unwrap_or_else(|| {
                let name = match kind {
                    ChartKind::Bar => "cash_flow.svg",
                    ChartKind::Pie => "totals.svg",
                };
                storage.paths().chart_dir().join(name)
            });

            match kind {
                ChartKind::Bar => render_bar_chart(&monthly_cash_flow(store), &path)?,
                ChartKind::Pie => render_pie_chart(&totals_by_category(store), &path)?,
            }
            println!("Chart written to: {}", path.display());
        }
    }

    Ok(())
}

fn write_csv<F>(path: &Path, export: F) -> TrackerResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> TrackerResult<()>,
{
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))
}
