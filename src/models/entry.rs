//! Entry model
//!
//! An entry is a single line item (name, amount, date) in one budget section.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::EntryId;
use super::money::Money;
use super::section::Section;
use crate::error::{TrackerError, TrackerResult};

/// The fixed date format used for input and persistence
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A line item in one of the budget sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, assigned by the record store
    pub id: EntryId,

    /// The section this entry belongs to
    pub section: Section,

    /// Item name (trimmed, never empty)
    pub name: String,

    /// Signed amount
    pub amount: Money,

    /// Calendar date of the item
    pub date: NaiveDate,
}

impl Entry {
    /// Build an entry from a validated draft and an id
    pub fn from_draft(id: EntryId, draft: EntryDraft) -> Self {
        Self {
            id,
            section: draft.section,
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
        }
    }

    /// Compare section, name, amount and date, ignoring the id
    pub fn same_values(&self, other: &Entry) -> bool {
        self.section == other.section
            && self.name == other.name
            && self.amount == other.amount
            && self.date == other.date
    }

    /// The content of this entry without its id
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            section: self.section,
            name: self.name.clone(),
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Validated entry content that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub section: Section,
    pub name: String,
    pub amount: Money,
    pub date: NaiveDate,
}

impl EntryDraft {
    /// Create a draft from already-typed values, validating the name
    pub fn new(
        section: Section,
        name: impl AsRef<str>,
        amount: Money,
        date: NaiveDate,
    ) -> TrackerResult<Self> {
        Ok(Self {
            section,
            name: validate_name(name.as_ref())?,
            amount,
            date,
        })
    }

    /// Parse a draft from user-supplied text fields
    pub fn parse(section: Section, name: &str, amount: &str, date: &str) -> TrackerResult<Self> {
        Ok(Self {
            section,
            name: validate_name(name)?,
            amount: parse_amount(amount)?,
            date: parse_date(date)?,
        })
    }
}

/// Trim a name and reject it if nothing is left
pub fn validate_name(name: &str) -> TrackerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation("Name cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Parse an amount, mapping failures to a validation error
pub fn parse_amount(amount: &str) -> TrackerResult<Money> {
    Money::parse(amount).map_err(|e| {
        TrackerError::Validation(format!(
            "{}. Amount must be a number like '-50.00' or '100'",
            e
        ))
    })
}

/// Parse a date in the fixed `YYYY-MM-DD` format
pub fn parse_date(date: &str) -> TrackerResult<NaiveDate> {
    let date = date.trim();
    let invalid = || {
        TrackerError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", date))
    };

    // chrono accepts unpadded fields; the data file format does not
    if date.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())
}
