//! CLI command for data export
//!
//! Writes every entry to a CSV, XLSX, JSON or YAML file.

use std::path::Path;

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::services::{export_to, ExchangeFormat};
use crate::storage::Storage;

/// File format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Comma-separated table, same layout as the data file
    Csv,
    /// Spreadsheet workbook
    Xlsx,
    /// JSON snapshot with totals
    Json,
    /// YAML snapshot with totals
    Yaml,
}

impl From<FormatArg> for ExchangeFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExchangeFormat::Csv,
            FormatArg::Xlsx => ExchangeFormat::Xlsx,
            FormatArg::Json => ExchangeFormat::Json,
            FormatArg::Yaml => ExchangeFormat::Yaml,
        }
    }
}

/// Whether JSON output is pretty-printed: `--pretty`/`--compact` override
/// the configured default
pub fn pretty_output(pretty: bool, compact: bool, settings: &Settings) -> bool {
    if compact {
        false
    } else {
        pretty || settings.export_pretty
    }
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    output: &Path,
    format: Option<FormatArg>,
    pretty: bool,
    compact: bool,
) -> TrackerResult<()> {
    let format = ExchangeFormat::resolve(format.map(Into::into), output)?;
    let count = export_to(
        storage,
        output,
        format,
        pretty_output(pretty, compact, settings),
    )?;

    println!(
        "Exported {} entries as {} to: {}",
        count,
        format,
        output.display()
    );
    if matches!(format, ExchangeFormat::Json | ExchangeFormat::Yaml) {
        println!("Snapshot includes totals by section.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_configured_layout() {
        let mut settings = Settings::default();
        assert!(pretty_output(false, false, &settings));
        assert!(!pretty_output(false, true, &settings));

        settings.export_pretty = false;
        assert!(!pretty_output(false, false, &settings));
        assert!(pretty_output(true, false, &settings));
    }
}
