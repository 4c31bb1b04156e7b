//! Flat delimited-text adapter
//!
//! The primary data file is a comma-separated table with the header
//! `Section,Name,Amount,Date`, one row per entry, written section by section.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, Writer};
use tracing::debug;

use super::file_io::write_atomic;
use super::{check_header, LoadReport, Persistence, RecordStore, HEADER};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{EntryDraft, Section, DATE_FORMAT};

/// CSV persistence adapter
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read a table from any reader
    pub fn read_from<R: Read>(reader: R) -> TrackerResult<LoadReport> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut report = LoadReport::default();

        // An empty file carries no header at all
        if headers.is_empty() {
            return Ok(report);
        }
        check_header(headers.iter())?;

        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = index + 2;
            let field = |i: usize| record.get(i).unwrap_or("");

            let draft = Section::parse(field(0))
                .and_then(|section| EntryDraft::parse(section, field(1), field(2), field(3)));
            report.accept(row, draft);
        }

        Ok(report)
    }

    /// Write the store to any writer, section-major
    pub fn write_to<W: Write>(store: &RecordStore, writer: W) -> TrackerResult<usize> {
        let mut csv_writer = Writer::from_writer(writer);
        csv_writer.write_record(HEADER)?;

        let mut rows = 0;
        for entry in store.iter_section_major() {
            csv_writer.write_record([
                entry.section.name(),
                entry.name.as_str(),
                entry.amount.to_plain_string().as_str(),
                entry.date.format(DATE_FORMAT).to_string().as_str(),
            ])?;
            rows += 1;
        }

        csv_writer
            .flush()
            .map_err(|e| TrackerError::Storage(format!("Failed to flush CSV data: {}", e)))?;
        Ok(rows)
    }
}

impl Persistence for CsvFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> TrackerResult<LoadReport> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "data file does not exist yet");
            return Ok(LoadReport::default());
        }

        let file = File::open(&self.path).map_err(|e| {
            TrackerError::Io(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        Self::read_from(BufReader::new(file))
    }

    fn save(&self, store: &RecordStore) -> TrackerResult<()> {
        write_atomic(&self.path, |writer| {
            Self::write_to(store, writer)?;
            Ok(())
        })?;
        debug!(path = %self.path.display(), entries = store.len(), "data file written");
        Ok(())
    }
}
