//! Totals by section
//!
//! One row per section in canonical order, with the entry count and the sum
//! of amounts. Sections without entries still appear with a zero total.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Section};
use crate::storage::RecordStore;

/// Total of a single section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTotal {
    pub section: Section,
    pub total: Money,
    pub entry_count: usize,
}

/// Totals by section report
#[derive(Debug, Clone)]
pub struct SectionTotalsReport {
    /// Rows in canonical section order
    pub rows: Vec<SectionTotal>,
    /// Sum over all sections
    pub grand_total: Money,
    /// Number of entries across all sections
    pub entry_count: usize,
}

impl SectionTotalsReport {
    /// Generate the report from a store
    pub fn generate(store: &RecordStore) -> Self {
        let rows: Vec<SectionTotal> = store
            .totals_by_category()
            .into_iter()
            .map(|(section, total)| SectionTotal {
                section,
                total,
                entry_count: store.entries_for(section).len(),
            })
            .collect();

        Self {
            grand_total: rows.iter().map(|r| r.total).sum(),
            entry_count: store.len(),
            rows,
        }
    }

    /// Total of one section
    pub fn total_for(&self, section: Section) -> Money {
        self.rows
            .iter()
            .find(|r| r.section == section)
            .map(|r| r.total)
            .unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Totals by Section\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!("{:<25} {:>15} {:>8}\n", "Section", "Total", "Count"));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<25} {:>15} {:>8}\n",
                row.section.name(),
                row.total.format_with_symbol(currency_symbol),
                row.entry_count
            ));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>15} {:>8}\n",
            "TOTAL",
            self.grand_total.format_with_symbol(currency_symbol),
            self.entry_count
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Section", "Total", "Entry Count"])?;

        for row in &self.rows {
            csv_writer.write_record([
                row.section.name().to_string(),
                row.total.to_plain_string(),
                row.entry_count.to_string(),
            ])?;
        }
        csv_writer.write_record([
            "TOTAL".to_string(),
            self.grand_total.to_plain_string(),
            self.entry_count.to_string(),
        ])?;

        csv_writer
            .flush()
            .map_err(|e| TrackerError::Export(e.to_string()))
    }
}

/// Sum of amounts per section
pub fn totals_by_category(store: &RecordStore) -> SectionTotalsReport {
    SectionTotalsReport::generate(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDraft;

    fn sample_store() -> RecordStore {
        RecordStore::from_drafts([
            EntryDraft::parse(Section::Savings, "A", "100", "2024-01-15").unwrap(),
            EntryDraft::parse(Section::Savings, "B", "50.25", "2024-02-01").unwrap(),
            EntryDraft::parse(Section::Loans, "Car", "-2000", "2024-02-10").unwrap(),
        ])
    }

    #[test]
    fn test_totals_per_section() {
        let report = totals_by_category(&sample_store());

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.total_for(Section::Savings), Money::from_cents(15025));
        assert_eq!(report.total_for(Section::Loans), Money::from_cents(-200000));
        assert_eq!(report.rows[0].entry_count, 2);
        assert_eq!(report.grand_total, Money::from_cents(-184975));
        assert_eq!(report.entry_count, 3);
    }

    #[test]
    fn test_empty_section_reports_zero() {
        let report = totals_by_category(&sample_store());
        assert_eq!(report.total_for(Section::IncomePending), Money::zero());
        assert_eq!(report.total_for(Section::PaymentsPending), Money::zero());

        let empty = totals_by_category(&RecordStore::new());
        assert!(empty.rows.iter().all(|r| r.total.is_zero() && r.entry_count == 0));
    }

    #[test]
    fn test_format_terminal() {
        let output = totals_by_category(&sample_store()).format_terminal("$");
        assert!(output.contains("Totals by Section"));
        assert!(output.contains("$150.25"));
        assert!(output.contains("-$2000.00"));
        assert!(output.contains("Payments Pending"));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        totals_by_category(&sample_store())
            .export_csv(&mut buffer)
            .unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Section,Total,Entry Count");
        assert_eq!(lines[1], "Savings,150.25,2");
        assert_eq!(lines[2], "Income Pending,0.00,0");
        assert_eq!(lines[5], "TOTAL,-1849.75,3");
    }
}
