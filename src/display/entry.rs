//! Entry display formatting
//!
//! Row-numbered entry lists per section and single-entry details. The row
//! numbers shown here are the ones `entry show/edit/delete` accept.

use crate::models::{Entry, Money, Section, DATE_FORMAT};

const NAME_WIDTH: usize = 30;

/// Format one entry as a list row
pub fn format_entry_row(row: usize, entry: &Entry, currency_symbol: &str) -> String {
    format!(
        "{:>4}  {:<width$} {:>14}  {}",
        row,
        truncate(&entry.name, NAME_WIDTH),
        entry.amount.format_with_symbol(currency_symbol),
        entry.date.format(DATE_FORMAT),
        width = NAME_WIDTH
    )
}

/// Format the entries of one section as a numbered list
pub fn format_entry_list(section: Section, entries: &[&Entry], currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} ({})\n", section, entries.len()));

    if entries.is_empty() {
        output.push_str("  No entries.\n");
        return output;
    }

    output.push_str(&format!(
        "{:>4}  {:<width$} {:>14}  {}\n",
        "Row",
        "Name",
        "Amount",
        "Date",
        width = NAME_WIDTH
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for (i, entry) in entries.iter().enumerate() {
        output.push_str(&format_entry_row(i + 1, entry, currency_symbol));
        output.push('\n');
    }

    let total: Money = entries.iter().map(|e| e.amount).sum();
    output.push_str(&"-".repeat(64));
    output.push('\n');
    output.push_str(&format!(
        "{:>4}  {:<width$} {:>14}\n",
        "",
        "Total",
        total.format_with_symbol(currency_symbol),
        width = NAME_WIDTH
    ));

    output
}

/// Format entry details for display
pub fn format_entry_details(row: usize, entry: &Entry, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:   {} row {}\n", entry.section, row));
    output.push_str(&format!("Name:    {}\n", entry.name));
    output.push_str(&format!(
        "Amount:  {}\n",
        entry.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Date:    {}\n", entry.date.format(DATE_FORMAT)));
    output.push_str(&format!("ID:      {}\n", entry.id));

    output
}

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryDraft, EntryId};

    fn entry(name: &str, amount: &str) -> Entry {
        Entry::from_draft(
            EntryId::new(),
            EntryDraft::parse(Section::Savings, name, amount, "2024-01-15").unwrap(),
        )
    }

    #[test]
    fn test_entry_list_numbers_rows() {
        let first = entry("Emergency fund", "100");
        let second = entry("Holiday", "-20.5");
        let output = format_entry_list(Section::Savings, &[&first, &second], "$");

        assert!(output.starts_with("Savings (2)"));
        assert!(output.contains("   1  Emergency fund"));
        assert!(output.contains("   2  Holiday"));
        assert!(output.contains("-$20.50"));
        assert!(output.contains("$79.50"));
    }

    #[test]
    fn test_empty_list() {
        let output = format_entry_list(Section::Loans, &[], "$");
        assert!(output.contains("Loans (0)"));
        assert!(output.contains("No entries."));
    }

    #[test]
    fn test_entry_details() {
        let e = entry("Rent", "10");
        let output = format_entry_details(3, &e, "€");

        assert!(output.contains("Savings row 3"));
        assert!(output.contains("Amount:  €10.00"));
        assert!(output.contains("Date:    2024-01-15"));
    }

    #[test]
    fn test_truncate_long_names() {
        let long = "x".repeat(40);
        assert_eq!(truncate(&long, 10), "xxxxxxx...");
        assert_eq!(truncate("café", 10), "café");
    }
}
