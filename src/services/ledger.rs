//! Ledger service
//!
//! Validated, write-through mutations of the record store. Every successful
//! change is flushed to the data file before the call returns.

use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_amount, parse_date, validate_name, Entry, EntryDraft, EntryId, Money, Section};
use crate::storage::Storage;

/// Service for entry management
pub struct LedgerService<'a> {
    storage: &'a mut Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Add an entry to a section
    ///
    /// Fails with a validation error, leaving the store untouched, if the
    /// name is empty, the amount is not a number or the date is not a valid
    /// `YYYY-MM-DD` date.
    pub fn add(
        &mut self,
        section: Section,
        name: &str,
        amount: &str,
        date: &str,
    ) -> TrackerResult<Entry> {
        let draft = EntryDraft::parse(section, name, amount, date)?;
        let entry = self.storage.store_mut().add(draft);
        self.storage.flush()?;
        debug!(id = %entry.id, section = %section, "entry added and flushed");
        Ok(entry)
    }

    /// Overwrite the name, amount and date of an entry
    pub fn update(
        &mut self,
        id: EntryId,
        name: &str,
        amount: &str,
        date: &str,
    ) -> TrackerResult<Entry> {
        if self.storage.store().get(id).is_none() {
            return Err(TrackerError::entry_not_found(id.to_string()));
        }

        let name = validate_name(name)?;
        let amount: Money = parse_amount(amount)?;
        let date = parse_date(date)?;

        let entry = self.storage.store_mut().update(id, name, amount, date)?;
        self.storage.flush()?;
        debug!(id = %id, "entry updated and flushed");
        Ok(entry)
    }

    /// Delete an entry
    pub fn remove(&mut self, id: EntryId) -> TrackerResult<Entry> {
        let entry = self.storage.store_mut().remove(id)?;
        self.storage.flush()?;
        debug!(id = %id, "entry removed and flushed");
        Ok(entry)
    }

    /// Resolve a 1-based row number within a section to an entry
    pub fn find_by_position(&self, section: Section, row: usize) -> TrackerResult<&Entry> {
        self.storage
            .store()
            .locate(section, row)
            .and_then(|id| self.storage.store().get(id))
            .ok_or_else(|| TrackerError::entry_not_found(format!("{} row {}", section, row)))
    }

    /// Entries of one section, in insertion order
    pub fn entries_for(&self, section: Section) -> Vec<&Entry> {
        self.storage.store().entries_for(section)
    }
}
