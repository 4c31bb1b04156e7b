//! Service layer for the finance tracker
//!
//! Services sit on top of the storage layer and own validation and the
//! write-through rule: every successful mutation is flushed before returning.

pub mod exchange;
pub mod ledger;

pub use exchange::{export_to, import_from, ExchangeFormat, ImportMode, ImportSummary};
pub use ledger::LedgerService;
