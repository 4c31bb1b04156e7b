//! Entry CLI commands
//!
//! Entries are addressed by section and the 1-based row number printed by
//! `entry list`.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_entry_details, format_entry_list};
use crate::error::TrackerResult;
use crate::models::{Section, DATE_FORMAT};
use crate::services::LedgerService;
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Add an entry to a section
    Add {
        /// Section: "Savings", "Income Pending", "Loans" or "Payments Pending"
        section: Section,
        /// Entry name
        name: String,
        /// Amount (e.g. "1200", "-45.99")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List entries, optionally of a single section
    List {
        /// Section to list
        section: Option<Section>,
    },

    /// Show an entry
    Show {
        section: Section,
        /// Row number as shown by `entry list`
        row: usize,
    },

    /// Edit an entry
    Edit {
        section: Section,
        /// Row number as shown by `entry list`
        row: usize,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an entry
    Delete {
        section: Section,
        /// Row number as shown by `entry list`
        row: usize,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let mut service = LedgerService::new(storage);

    match cmd {
        EntryCommands::Add {
            section,
            name,
            amount,
            date,
        } => {
            let date =
                date.unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());
            let entry = service.add(section, &name, &amount, &date)?;
            let row = service.entries_for(section).len();

            println!("Added entry to {}: {}", section, entry.name);
            println!("  Amount: {}", entry.amount.format_with_symbol(symbol));
            println!("  Date:   {}", entry.date.format(DATE_FORMAT));
            println!("  Row:    {}", row);
        }

        EntryCommands::List { section } => {
            let sections = match section {
                Some(section) => vec![section],
                None => Section::ALL.to_vec(),
            };
            for (i, section) in sections.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!(
                    "{}",
                    format_entry_list(section, &service.entries_for(section), symbol)
                );
            }
        }

        EntryCommands::Show { section, row } => {
            let entry = service.find_by_position(section, row)?;
            print!("{}", format_entry_details(row, entry, symbol));
        }

        EntryCommands::Edit {
            section,
            row,
            name,
            amount,
            date,
        } => {
            if name.is_none() && amount.is_none() && date.is_none() {
                println!("Nothing to change. Use --name, --amount or --date.");
                return Ok(());
            }

            let current = service.find_by_position(section, row)?.clone();
            let name = name.unwrap_or(current.name);
            let amount = amount.unwrap_or_else(|| current.amount.to_plain_string());
            let date = date.unwrap_or_else(|| current.date.format(DATE_FORMAT).to_string());

            let entry = service.update(current.id, &name, &amount, &date)?;
            println!("Updated {} row {}", section, row);
            print!("{}", format_entry_details(row, &entry, symbol));
        }

        EntryCommands::Delete { section, row } => {
            let id = service.find_by_position(section, row)?.id;
            let entry = service.remove(id)?;
            println!(
                "Deleted {} row {}: {} ({})",
                section,
                row,
                entry.name,
                entry.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
