//! In-memory record store
//!
//! Holds every entry in insertion order. Entries are addressed by their
//! `EntryId`; the position of an entry within its section is only used to
//! translate a user's row selection into an id.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Entry, EntryDraft, EntryId, Money, Section};

/// Insertion-ordered collection of entries
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    entries: Vec<Entry>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from drafts, assigning fresh ids in order
    pub fn from_drafts(drafts: impl IntoIterator<Item = EntryDraft>) -> Self {
        let mut store = Self::new();
        store.extend(drafts);
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a new entry and return a copy of it
    pub fn add(&mut self, draft: EntryDraft) -> Entry {
        let entry = Entry::from_draft(EntryId::new(), draft);
        debug!(id = %entry.id, section = %entry.section, "entry added");
        self.entries.push(entry.clone());
        entry
    }

    /// Append several entries, returning how many were added
    pub fn extend(&mut self, drafts: impl IntoIterator<Item = EntryDraft>) -> usize {
        let before = self.entries.len();
        self.entries.extend(
            drafts
                .into_iter()
                .map(|draft| Entry::from_draft(EntryId::new(), draft)),
        );
        self.entries.len() - before
    }

    /// Overwrite the mutable fields of an entry
    pub fn update(
        &mut self,
        id: EntryId,
        name: String,
        amount: Money,
        date: chrono::NaiveDate,
    ) -> TrackerResult<Entry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| TrackerError::entry_not_found(id.to_string()))?;

        entry.name = name;
        entry.amount = amount;
        entry.date = date;
        debug!(id = %id, "entry updated");
        Ok(entry.clone())
    }

    /// Remove an entry and return it
    pub fn remove(&mut self, id: EntryId) -> TrackerResult<Entry> {
        let index = self
            .position(id)
            .ok_or_else(|| TrackerError::entry_not_found(id.to_string()))?;
        let entry = self.entries.remove(index);
        debug!(id = %id, "entry removed");
        Ok(entry)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Resolve a 1-based row number within a section to an entry id
    pub fn locate(&self, section: Section, row: usize) -> Option<EntryId> {
        row.checked_sub(1)
            .and_then(|index| self.section_iter(section).nth(index))
            .map(|e| e.id)
    }

    /// Entries of one section, in insertion order
    pub fn entries_for(&self, section: Section) -> Vec<&Entry> {
        self.section_iter(section).collect()
    }

    fn section_iter(&self, section: Section) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.section == section)
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// All entries, grouped by section in canonical order
    pub fn iter_section_major(&self) -> impl Iterator<Item = &Entry> {
        Section::ALL
            .into_iter()
            .flat_map(move |section| self.section_iter(section))
    }

    /// Sum of amounts per section; every section is present
    pub fn totals_by_category(&self) -> BTreeMap<Section, Money> {
        let mut totals: BTreeMap<Section, Money> =
            Section::ALL.into_iter().map(|s| (s, Money::zero())).collect();
        for entry in &self.entries {
            *totals.entry(entry.section).or_default() += entry.amount;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(section: Section, name: &str, amount: &str, date: &str) -> EntryDraft {
        EntryDraft::parse(section, name, amount, date).unwrap()
    }

    #[test]
    fn test_add_appends_to_section() {
        let mut store = RecordStore::new();
        store.add(draft(Section::Loans, "Car", "-200", "2024-01-01"));
        let before = store.entries_for(Section::Savings).len();

        let input = draft(Section::Savings, "Rainy day", "100", "2024-01-15");
        let added = store.add(input.clone());

        let entries = store.entries_for(Section::Savings);
        assert_eq!(entries.len(), before + 1);
        assert_eq!(entries.iter().filter(|e| e.to_draft() == input).count(), 1);
        assert_eq!(entries.last().unwrap().id, added.id);
    }

    #[test]
    fn test_entries_for_keeps_insertion_order() {
        let mut store = RecordStore::new();
        store.add(draft(Section::Savings, "first", "1", "2024-03-01"));
        store.add(draft(Section::Loans, "loan", "1", "2024-01-01"));
        store.add(draft(Section::Savings, "second", "1", "2024-01-01"));

        let names: Vec<_> = store
            .entries_for(Section::Savings)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_remove_just_added_restores_store() {
        let mut store = RecordStore::new();
        store.add(draft(Section::Savings, "A", "1", "2024-01-01"));
        let before: Vec<_> = store.iter().map(Entry::to_draft).collect();

        let added = store.add(draft(Section::Savings, "B", "2", "2024-01-02"));
        store.remove(added.id).unwrap();

        let after: Vec<_> = store.iter().map(Entry::to_draft).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_duplicates_are_addressed_by_id() {
        let mut store = RecordStore::new();
        let first = store.add(draft(Section::Loans, "Bike", "50", "2024-01-01"));
        let second = store.add(draft(Section::Loans, "Bike", "50", "2024-01-01"));
        assert!(first.same_values(&second));

        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        store
            .update(second.id, "Bike repaid".into(), Money::zero(), date)
            .unwrap();

        assert_eq!(store.get(first.id).unwrap().name, "Bike");
        assert_eq!(store.get(second.id).unwrap().name, "Bike repaid");

        store.remove(first.id).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(second.id).is_some());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = RecordStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(store.remove(EntryId::new()).unwrap_err().is_not_found());
        assert!(store
            .update(EntryId::new(), "x".into(), Money::zero(), date)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_locate_by_row() {
        let mut store = RecordStore::new();
        let a = store.add(draft(Section::Savings, "A", "1", "2024-01-01"));
        store.add(draft(Section::Loans, "L", "1", "2024-01-01"));
        let b = store.add(draft(Section::Savings, "B", "1", "2024-01-01"));

        assert_eq!(store.locate(Section::Savings, 1), Some(a.id));
        assert_eq!(store.locate(Section::Savings, 2), Some(b.id));
        assert_eq!(store.locate(Section::Savings, 3), None);
        assert_eq!(store.locate(Section::Savings, 0), None);
        assert_eq!(store.locate(Section::PaymentsPending, 1), None);
    }

    #[test]
    fn test_section_major_iteration() {
        let mut store = RecordStore::new();
        store.add(draft(Section::PaymentsPending, "P", "1", "2024-01-01"));
        store.add(draft(Section::Savings, "S1", "1", "2024-01-01"));
        store.add(draft(Section::Loans, "L", "1", "2024-01-01"));
        store.add(draft(Section::Savings, "S2", "1", "2024-01-01"));

        let names: Vec<_> = store.iter_section_major().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["S1", "S2", "L", "P"]);
    }

    #[test]
    fn test_totals_include_empty_sections() {
        let mut store = RecordStore::new();
        store.add(draft(Section::Savings, "A", "100", "2024-01-01"));
        store.add(draft(Section::Savings, "B", "-25.50", "2024-01-01"));

        let totals = store.totals_by_category();
        assert_eq!(totals.len(), 4);
        assert_eq!(totals[&Section::Savings], Money::from_cents(7450));
        assert_eq!(totals[&Section::Loans], Money::zero());
        assert_eq!(totals[&Section::IncomePending], Money::zero());
    }

    #[test]
    fn test_largest_amounts_sum_without_overflow() {
        let mut store = RecordStore::new();
        store.add(draft(Section::Savings, "A", "10000000000000", "2024-01-01"));
        store.add(draft(Section::Savings, "B", "10000000000000", "2024-01-02"));

        let totals = store.totals_by_category();
        assert_eq!(totals[&Section::Savings].cents(), 2 * crate::models::money::MAX_CENTS);
        assert!(EntryDraft::parse(Section::Savings, "C", "90000000000000000", "2024-01-03")
            .unwrap_err()
            .is_validation());
    }
}
