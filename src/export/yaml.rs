//! YAML snapshot export
//!
//! Same snapshot as the JSON export, in a human-readable form.

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::Snapshot;
use crate::storage::RecordStore;
use std::io::Write;

/// Export the store as a YAML snapshot
pub fn export_snapshot_yaml<W: Write>(store: &RecordStore, writer: &mut W) -> TrackerResult<()> {
    let snapshot = Snapshot::from_store(store);
    let export_err = |e: std::io::Error| TrackerError::Export(e.to_string());

    writeln!(writer, "# Finance tracker export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", snapshot.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", snapshot.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &snapshot).map_err(|e| TrackerError::Export(e.to_string()))
}

/// Parse and validate a YAML snapshot
pub fn import_snapshot_yaml(yaml_str: &str) -> TrackerResult<Snapshot> {
    let snapshot: Snapshot =
        serde_yaml::from_str(yaml_str).map_err(|e| TrackerError::Import(e.to_string()))?;
    snapshot.validate().map_err(TrackerError::Import)?;
    Ok(snapshot)
}
