//! Strongly-typed entry identifier
//!
//! Entry ids are assigned when an entry enters a record store. They are never
//! derived from the entry's content and are not written to the data file, so
//! two entries with identical values stay distinguishable for the lifetime of
//! the process.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "ent-";

/// Opaque identifier of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let display = EntryId::new().to_string();
        assert!(display.starts_with("ent-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(EntryId::new(), EntryId::new());
    }
}
