//! Snapshot export for the finance tracker
//!
//! Full-store snapshots in two formats:
//! - JSON: machine-readable
//! - YAML: human-readable
//!
//! Table-shaped exchange (CSV and spreadsheet) goes through the storage
//! adapters instead, see `services::exchange`.

pub mod json;
pub mod yaml;

pub use json::{
    export_snapshot_json, import_snapshot_json, Snapshot, SnapshotEntry, SNAPSHOT_SCHEMA_VERSION,
};
pub use yaml::{export_snapshot_yaml, import_snapshot_yaml};
