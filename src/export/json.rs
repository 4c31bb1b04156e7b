//! JSON snapshot export
//!
//! Exports every entry plus per-section totals with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{EntryDraft, Section, DATE_FORMAT};
use crate::storage::{LoadReport, RecordStore};

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";

/// One entry as it appears in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub section: String,
    pub name: String,
    /// Two-decimal amount, e.g. "-12.50"
    pub amount: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Total of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTotal {
    pub section: String,
    pub total: String,
    pub entry_count: usize,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub entry_count: usize,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
}

/// Full snapshot of the record store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Entries in section-major order
    pub entries: Vec<SnapshotEntry>,

    pub totals: Vec<SnapshotTotal>,

    pub metadata: SnapshotMetadata,
}

impl Snapshot {
    /// Capture the current contents of a store
    pub fn from_store(store: &RecordStore) -> Self {
        let entries = store
            .iter_section_major()
            .map(|e| SnapshotEntry {
                section: e.section.name().to_string(),
                name: e.name.clone(),
                amount: e.amount.to_plain_string(),
                date: e.date.format(DATE_FORMAT).to_string(),
            })
            .collect();

        let totals = store
            .totals_by_category()
            .into_iter()
            .map(|(section, total)| SnapshotTotal {
                section: section.name().to_string(),
                total: total.to_plain_string(),
                entry_count: store.entries_for(section).len(),
            })
            .collect();

        let metadata = SnapshotMetadata {
            entry_count: store.len(),
            earliest_date: store.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_date: store.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries,
            totals,
            metadata,
        }
    }

    /// Check the schema version
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                SNAPSHOT_SCHEMA_VERSION, self.schema_version
            ));
        }
        Ok(())
    }

    /// Convert the snapshot entries back into drafts; invalid entries are
    /// skipped like invalid rows of a data file
    pub fn into_report(self) -> LoadReport {
        let mut report = LoadReport::default();
        for (index, entry) in self.entries.into_iter().enumerate() {
            let draft = Section::parse(&entry.section).and_then(|section| {
                EntryDraft::parse(section, &entry.name, &entry.amount, &entry.date)
            });
            report.accept(index + 1, draft);
        }
        report
    }
}

/// Export the store as a JSON snapshot
pub fn export_snapshot_json<W: Write>(
    store: &RecordStore,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    let snapshot = Snapshot::from_store(store);

    if pretty {
        serde_json::to_writer_pretty(writer, &snapshot)
    } else {
        serde_json::to_writer(writer, &snapshot)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))
}

/// Parse and validate a JSON snapshot
pub fn import_snapshot_json(json_str: &str) -> TrackerResult<Snapshot> {
    let snapshot: Snapshot =
        serde_json::from_str(json_str).map_err(|e| TrackerError::Import(e.to_string()))?;
    snapshot.validate().map_err(TrackerError::Import)?;
    Ok(snapshot)
}
