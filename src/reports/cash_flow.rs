//! Monthly cash flow
//!
//! Sums entry amounts per calendar month, across all sections, in
//! chronological order. Months without entries are not listed.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, YearMonth};
use crate::storage::RecordStore;

/// Net amount of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFlow {
    pub month: YearMonth,
    pub net: Money,
    /// Sum of positive amounts
    pub inflow: Money,
    /// Sum of negative amounts
    pub outflow: Money,
    pub entry_count: usize,
}

/// Monthly cash flow report
#[derive(Debug, Clone)]
pub struct MonthlyCashFlowReport {
    /// Months in chronological order
    pub months: Vec<MonthFlow>,
    pub total: Money,
}

impl MonthlyCashFlowReport {
    /// Generate the report from a store
    pub fn generate(store: &RecordStore) -> Self {
        let mut by_month: BTreeMap<YearMonth, MonthFlow> = BTreeMap::new();

        for entry in store.iter() {
            let month = YearMonth::of(entry.date);
            let flow = by_month.entry(month).or_insert(MonthFlow {
                month,
                net: Money::zero(),
                inflow: Money::zero(),
                outflow: Money::zero(),
                entry_count: 0,
            });
            flow.net += entry.amount;
            if entry.amount.is_negative() {
                flow.outflow += entry.amount;
            } else {
                flow.inflow += entry.amount;
            }
            flow.entry_count += 1;
        }

        let months: Vec<MonthFlow> = by_month.into_values().collect();
        Self {
            total: months.iter().map(|m| m.net).sum(),
            months,
        }
    }

    /// `(month, net)` pairs in chronological order
    pub fn series(&self) -> Vec<(YearMonth, Money)> {
        self.months.iter().map(|m| (m.month, m.net)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Monthly Cash Flow\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No entries.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "Month", "In", "Out", "Net"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for flow in &self.months {
            output.push_str(&format!(
                "{:<10} {:>15} {:>15} {:>15}\n",
                flow.month.to_string(),
                flow.inflow.format_with_symbol(currency_symbol),
                flow.outflow.format_with_symbol(currency_symbol),
                flow.net.format_with_symbol(currency_symbol)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>47}\n",
            "TOTAL",
            self.total.format_with_symbol(currency_symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Month", "Inflow", "Outflow", "Net", "Entry Count"])?;

        for flow in &self.months {
            csv_writer.write_record([
                flow.month.to_string(),
                flow.inflow.to_plain_string(),
                flow.outflow.to_plain_string(),
                flow.net.to_plain_string(),
                flow.entry_count.to_string(),
            ])?;
        }

        csv_writer
            .flush()
            .map_err(|e| TrackerError::Export(e.to_string()))
    }
}

/// Net amount per calendar month
pub fn monthly_cash_flow(store: &RecordStore) -> MonthlyCashFlowReport {
    MonthlyCashFlowReport::generate(store)
}
