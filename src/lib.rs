//! Finance tracker - a personal finance record keeper
//!
//! Entries (name, amount, date) are kept in four fixed sections: Savings,
//! Income Pending, Loans and Payments Pending. Every change is written
//! through to a flat CSV data file; the same table can be exchanged as a
//! spreadsheet, and summarised as totals per section or monthly cash flow.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Entries, sections, money and months
//! - `storage`: Record store and its CSV and spreadsheet adapters
//! - `services`: Validated write-through mutations, import and export
//! - `reports`: Totals by section, monthly cash flow, SVG charts
//! - `export`: JSON and YAML snapshots
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{Settings, TrackerPaths};
//! use finance_tracker::models::Section;
//! use finance_tracker::services::LedgerService;
//! use finance_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::open(paths, &settings)?;
//! LedgerService::new(&mut storage).add(Section::Savings, "Rainy day", "100", "2024-01-15")?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::TrackerError;
