//! Import and export of the whole store
//!
//! CSV and spreadsheet files go through the same persistence adapters as the
//! data file; JSON and YAML use the snapshot format.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{
    export_snapshot_json, export_snapshot_yaml, import_snapshot_json, import_snapshot_yaml,
};
use crate::storage::{
    write_atomic, CsvFile, LoadReport, Persistence, SkippedRow, Storage, WorkbookFile,
};

/// File formats the store can be exchanged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeFormat {
    Csv,
    Xlsx,
    Json,
    Yaml,
}

impl ExchangeFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Use `explicit` if given, otherwise guess from the extension
    pub fn resolve(explicit: Option<Self>, path: &Path) -> TrackerResult<Self> {
        explicit.or_else(|| Self::from_path(path)).ok_or_else(|| {
            TrackerError::Validation(format!(
                "Cannot tell the format of '{}'. Use a .csv, .xlsx, .json or .yaml file or pass --format",
                path.display()
            ))
        })
    }
}

impl FromStr for ExchangeFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(TrackerError::Validation(format!(
                "Unknown format '{}'. Expected csv, xlsx, json or yaml",
                other
            ))),
        }
    }
}

impl fmt::Display for ExchangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "CSV",
            Self::Xlsx => "XLSX",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        };
        f.pad(name)
    }
}

/// What to do with the existing entries on import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Keep existing entries and add the imported ones after them
    #[default]
    Append,
    /// Discard existing entries first
    Replace,
}

/// Result of an import
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
    pub replaced: usize,
}

fn read_source(path: &Path, format: ExchangeFormat) -> TrackerResult<LoadReport> {
    if !path.exists() {
        return Err(TrackerError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let import_err = |e: TrackerError| TrackerError::Import(e.to_string());
    match format {
        ExchangeFormat::Csv => CsvFile::new(path).read().map_err(import_err),
        ExchangeFormat::Xlsx => WorkbookFile::new(path).read().map_err(import_err),
        ExchangeFormat::Json | ExchangeFormat::Yaml => {
            let text = fs::read_to_string(path)
                .map_err(|e| TrackerError::Import(format!("Failed to read {}: {}", path.display(), e)))?;
            let snapshot = if format == ExchangeFormat::Json {
                import_snapshot_json(&text)?
            } else {
                import_snapshot_yaml(&text)?
            };
            Ok(snapshot.into_report())
        }
    }
}

/// Import entries from a file into the store and flush it
///
/// Rows with an unknown section or invalid values are skipped and reported.
/// A file that cannot be read as a table at all is an import error and
/// leaves the store unchanged.
pub fn import_from(
    storage: &mut Storage,
    path: &Path,
    format: ExchangeFormat,
    mode: ImportMode,
) -> TrackerResult<ImportSummary> {
    let report = read_source(path, format)?;

    let store = storage.store_mut();
    let replaced = match mode {
        ImportMode::Append => 0,
        ImportMode::Replace => {
            let count = store.len();
            store.clear();
            count
        }
    };
    let imported = store.extend(report.drafts);
    storage.flush()?;

    info!(
        path = %path.display(),
        %format,
        imported,
        skipped = report.skipped.len(),
        replaced,
        "import finished"
    );

    Ok(ImportSummary {
        imported,
        skipped: report.skipped,
        replaced,
    })
}

/// Write the whole store to a file, returning the number of entries written
pub fn export_to(
    storage: &Storage,
    path: &Path,
    format: ExchangeFormat,
    pretty: bool,
) -> TrackerResult<usize> {
    let store = storage.store();
    let export_err = |e: TrackerError| TrackerError::Export(e.to_string());

    match format {
        ExchangeFormat::Csv => CsvFile::new(path).save(store).map_err(export_err)?,
        ExchangeFormat::Xlsx => WorkbookFile::new(path).save(store).map_err(export_err)?,
        ExchangeFormat::Json => {
            write_atomic(path, |writer| export_snapshot_json(store, writer, pretty))?
        }
        ExchangeFormat::Yaml => write_atomic(path, |writer| export_snapshot_yaml(store, writer))?,
    }

    info!(path = %path.display(), %format, entries = store.len(), "export finished");
    Ok(store.len())
}
