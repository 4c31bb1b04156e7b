//! Storage layer for the finance tracker
//!
//! The in-memory [`RecordStore`] is loaded from, and written back to, a
//! persisted file through a [`Persistence`] adapter. Two adapters share the
//! same four-column schema: the flat delimited-text [`CsvFile`] (the primary
//! data file) and the spreadsheet [`WorkbookFile`].

pub mod csv_file;
pub mod file_io;
pub mod record_store;
pub mod workbook;

pub use csv_file::CsvFile;
pub use file_io::{replace_atomic, write_atomic};
pub use record_store::RecordStore;
pub use workbook::WorkbookFile;

use std::path::Path;

use tracing::{info, warn};

use crate::config::{Settings, TrackerPaths};
use crate::error::{TrackerError, TrackerResult};
use crate::models::EntryDraft;

/// Column titles of every persisted table, in order
pub const HEADER: [&str; 4] = ["Section", "Name", "Amount", "Date"];

/// A data row that was read but not turned into an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based row number in the source, counting the header as row 1
    pub row: usize,
    pub reason: String,
}

/// Outcome of reading a persisted table
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub drafts: Vec<EntryDraft>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    /// Record the result of converting one row
    pub fn accept(&mut self, row: usize, result: TrackerResult<EntryDraft>) {
        match result {
            Ok(draft) => self.drafts.push(draft),
            Err(e) => {
                let reason = match e {
                    TrackerError::Validation(msg) => msg,
                    other => other.to_string(),
                };
                warn!(row, %reason, "skipping row");
                self.skipped.push(SkippedRow { row, reason });
            }
        }
    }

    /// Build a record store from the accepted rows
    pub fn into_store(self) -> RecordStore {
        RecordStore::from_drafts(self.drafts)
    }
}

/// Check a header row against [`HEADER`], ignoring surrounding whitespace
pub fn check_header<I, S>(cells: I) -> TrackerResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let found: Vec<String> = cells
        .into_iter()
        .map(|c| c.as_ref().trim().to_string())
        .collect();

    if found.len() != HEADER.len() || found.iter().zip(HEADER).any(|(a, b)| a != b) {
        return Err(TrackerError::Storage(format!(
            "Unexpected header [{}], expected [{}]",
            found.join(", "),
            HEADER.join(", ")
        )));
    }
    Ok(())
}

/// A file format the record store can be loaded from and saved to
pub trait Persistence {
    /// Path of the persisted file
    fn location(&self) -> &Path;

    /// Read the persisted table
    ///
    /// A missing file yields an empty report. A malformed file (bad header,
    /// unreadable structure) is an error. Rows with an unknown section or an
    /// invalid value are skipped and recorded in the report.
    fn read(&self) -> TrackerResult<LoadReport>;

    /// Write the full store, replacing any previous content
    fn save(&self, store: &RecordStore) -> TrackerResult<()>;

    /// Read the persisted table into a store, falling back to an empty
    /// store when the file is unreadable
    fn load(&self) -> RecordStore {
        match self.read() {
            Ok(report) => {
                info!(
                    path = %self.location().display(),
                    entries = report.drafts.len(),
                    skipped = report.skipped.len(),
                    "loaded data file"
                );
                report.into_store()
            }
            Err(e) => {
                warn!(
                    path = %self.location().display(),
                    error = %e,
                    "data file unreadable, starting with an empty store"
                );
                RecordStore::new()
            }
        }
    }
}

/// Main storage coordinator: the record store plus the adapter it is
/// flushed to after every change
pub struct Storage {
    paths: TrackerPaths,
    backend: Box<dyn Persistence>,
    store: RecordStore,
}

impl Storage {
    /// Open the primary data file named in the settings and load it
    pub fn open(paths: TrackerPaths, settings: &Settings) -> TrackerResult<Self> {
        paths.ensure_directories()?;
        let backend = CsvFile::new(paths.data_file(&settings.data_file));
        Ok(Self::with_backend(paths, Box::new(backend)))
    }

    /// Load the store from an explicit adapter
    pub fn with_backend(paths: TrackerPaths, backend: Box<dyn Persistence>) -> Self {
        let store = backend.load();
        Self {
            paths,
            backend,
            store,
        }
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Path of the primary data file
    pub fn data_file(&self) -> &Path {
        self.backend.location()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    /// Write the whole store to the data file
    pub fn flush(&self) -> TrackerResult<()> {
        self.backend.save(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.store().is_empty());
        assert_eq!(
            storage.data_file(),
            temp_dir.path().join("data").join("finance_data.csv")
        );
    }

    #[test]
    fn test_check_header() {
        assert!(check_header(["Section", "Name", "Amount", "Date"]).is_ok());
        assert!(check_header(["Section", " Name", " Amount", " Date"]).is_ok());
        assert!(check_header(["Name", "Amount", "Date"]).is_err());
        assert!(check_header(["Section", "Name", "Date", "Amount"]).is_err());
    }

    #[test]
    fn test_load_report_records_skips() {
        let mut report = LoadReport::default();
        report.accept(2, EntryDraft::parse(Section::Savings, "A", "1", "2024-01-01"));
        report.accept(3, Section::parse("Crypto").and_then(|s| EntryDraft::parse(s, "B", "1", "2024-01-01")));

        assert_eq!(report.drafts.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 3);
        assert!(report.skipped[0].reason.contains("Crypto"));
    }

    #[test]
    fn test_flush_writes_data_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths.clone(), &Settings::default()).unwrap();

        storage
            .store_mut()
            .add(EntryDraft::parse(Section::Loans, "Car", "-100", "2024-05-01").unwrap());
        storage.flush().unwrap();

        let reopened = Storage::open(paths, &Settings::default()).unwrap();
        assert_eq!(reopened.store().len(), 1);
    }
}
