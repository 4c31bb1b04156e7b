//! Spreadsheet workbook adapter
//!
//! Stores the same four-column table as the CSV file in the first worksheet
//! of an `.xlsx` workbook. Amounts are written as numeric cells so the sheet
//! stays usable for arithmetic in a spreadsheet program; dates are written as
//! text so they survive a round trip unchanged.

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::debug;

use super::file_io::replace_atomic;
use super::{check_header, LoadReport, Persistence, RecordStore, HEADER};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_amount, parse_date, validate_name, EntryDraft, Money, Section};
use crate::models::DATE_FORMAT;

/// Name of the worksheet written by [`WorkbookFile::save`]
pub const SHEET_NAME: &str = "Entries";

/// `.xlsx` persistence adapter
#[derive(Debug, Clone)]
pub struct WorkbookFile {
    path: PathBuf,
}

impl WorkbookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn xlsx_error(e: XlsxError) -> TrackerError {
    TrackerError::Storage(format!("Failed to write workbook: {}", e))
}

/// Text content of a cell, for section and name columns
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn cell_amount(cell: &Data) -> TrackerResult<Money> {
    match cell {
        Data::Float(f) => Money::from_f64(*f)
            .map_err(|e| TrackerError::Validation(e.to_string())),
        Data::Int(i) => parse_amount(&i.to_string()),
        Data::String(s) => parse_amount(s),
        Data::Empty => Err(TrackerError::Validation("Amount is empty".into())),
        other => Err(TrackerError::Validation(format!(
            "Amount cell is not a number: {:?}",
            other
        ))),
    }
}

fn cell_date(cell: &Data) -> TrackerResult<chrono::NaiveDate> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => parse_date(s),
        Data::Empty => Err(TrackerError::Validation("Date is empty".into())),
        other => Err(TrackerError::Validation(format!(
            "Date cell must be YYYY-MM-DD text, found {:?}",
            other
        ))),
    }
}

fn row_to_draft(cells: &[Data]) -> TrackerResult<EntryDraft> {
    let cell = |i: usize| cells.get(i).unwrap_or(&Data::Empty);

    let section = Section::parse(&cell_text(cell(0)))?;
    let name = validate_name(&cell_text(cell(1)))?;
    let amount = cell_amount(cell(2))?;
    let date = cell_date(cell(3))?;
    EntryDraft::new(section, name, amount, date)
}

impl Persistence for WorkbookFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> TrackerResult<LoadReport> {
        if !self.path.exists() {
            return Ok(LoadReport::default());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to open workbook {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| TrackerError::Storage("Workbook has no worksheets".into()))?
            .map_err(|e| TrackerError::Storage(format!("Failed to read worksheet: {}", e)))?;

        // Skipped rows are numbered as the sheet shows them, not from the used range
        let first_row = range.start().map_or(0, |(row, _)| row as usize);

        let mut report = LoadReport::default();
        let mut rows = range.rows();

        let Some(header) = rows.next() else {
            return Ok(report);
        };
        check_header(header.iter().take(HEADER.len()).map(cell_text))?;

        for (index, cells) in rows.enumerate() {
            if cells.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            report.accept(first_row + index + 2, row_to_draft(cells));
        }

        debug!(
            path = %self.path.display(),
            entries = report.drafts.len(),
            "workbook read"
        );
        Ok(report)
    }

    fn save(&self, store: &RecordStore) -> TrackerResult<()> {
        let mut workbook = Workbook::new();
        {
            let header_format = Format::new().set_bold();
            let amount_format = Format::new().set_num_format("0.00");

            let sheet = workbook.add_worksheet();
            sheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

            for (col, title) in HEADER.iter().enumerate() {
                sheet
                    .write_string_with_format(0, col as u16, *title, &header_format)
                    .map_err(xlsx_error)?;
            }

            for (index, entry) in store.iter_section_major().enumerate() {
                let row = (index + 1) as u32;
                sheet
                    .write_string(row, 0, entry.section.name())
                    .map_err(xlsx_error)?;
                sheet
                    .write_string(row, 1, entry.name.as_str())
                    .map_err(xlsx_error)?;
                sheet
                    .write_number_with_format(row, 2, entry.amount.as_f64(), &amount_format)
                    .map_err(xlsx_error)?;
                sheet
                    .write_string(row, 3, entry.date.format(DATE_FORMAT).to_string())
                    .map_err(xlsx_error)?;
            }
        }

        replace_atomic(&self.path, |temp_path| {
            workbook.save(temp_path).map_err(xlsx_error)
        })?;
        debug!(path = %self.path.display(), entries = store.len(), "workbook written");
        Ok(())
    }
}
