//! Core data models for the finance tracker
//!
//! This module contains the data structures of the tracking domain: entries,
//! the sections they belong to, amounts and months.

pub mod entry;
pub mod ids;
pub mod money;
pub mod month;
pub mod section;

pub use entry::{parse_amount, parse_date, validate_name, Entry, EntryDraft, DATE_FORMAT};
pub use ids::EntryId;
pub use money::{Money, MoneyParseError};
pub use month::YearMonth;
pub use section::Section;
