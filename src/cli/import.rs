//! CLI command for data import
//!
//! Adds the entries of a CSV, XLSX, JSON or YAML file to the store. Rows
//! that cannot be imported are listed, not fatal.

use std::path::Path;

use crate::error::TrackerResult;
use crate::services::{import_from, ExchangeFormat, ImportMode};
use crate::storage::Storage;

use super::export::FormatArg;

/// Number of skipped rows listed before summarising the rest
const SKIPPED_SHOWN: usize = 10;

/// Handle the import command
pub fn handle_import_command(
    storage: &mut Storage,
    file: &Path,
    format: Option<FormatArg>,
    replace: bool,
) -> TrackerResult<()> {
    let format = ExchangeFormat::resolve(format.map(Into::into), file)?;
    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Append
    };

    let summary = import_from(storage, file, format, mode)?;

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    if mode == ImportMode::Replace {
        println!("  Replaced entries:  {}", summary.replaced);
    }
    println!("  Imported entries:  {}", summary.imported);
    println!("  Skipped rows:      {}", summary.skipped.len());

    if !summary.skipped.is_empty() {
        println!();
        println!("Skipped:");
        for skipped in summary.skipped.iter().take(SKIPPED_SHOWN) {
            println!("  row {}: {}", skipped.row, skipped.reason);
        }
        if summary.skipped.len() > SKIPPED_SHOWN {
            println!("  ... and {} more", summary.skipped.len() - SKIPPED_SHOWN);
        }
    }

    Ok(())
}
