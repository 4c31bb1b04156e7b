//! Budget sections
//!
//! Every entry belongs to exactly one of four fixed sections. The display
//! name doubles as the persisted form in data files and spreadsheets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// One of the four fixed budget sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Savings")]
    Savings,
    #[serde(rename = "Income Pending")]
    IncomePending,
    #[serde(rename = "Loans")]
    Loans,
    #[serde(rename = "Payments Pending")]
    PaymentsPending,
}

impl Section {
    /// All sections in canonical order (the order they are persisted and reported in)
    pub const ALL: [Section; 4] = [
        Section::Savings,
        Section::IncomePending,
        Section::Loans,
        Section::PaymentsPending,
    ];

    /// Name as written to data files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::IncomePending => "Income Pending",
            Self::Loans => "Loans",
            Self::PaymentsPending => "Payments Pending",
        }
    }

    /// Kebab-case form used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Savings => "savings",
            Self::IncomePending => "income-pending",
            Self::Loans => "loans",
            Self::PaymentsPending => "payments-pending",
        }
    }

    /// Parse a section from its display name or slug, ignoring case
    pub fn parse(s: &str) -> Result<Self, TrackerError> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| {
                section.name().eq_ignore_ascii_case(needle)
                    || section.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                TrackerError::Validation(format!(
                    "Unknown section '{}'. Expected one of: {}",
                    s,
                    Self::ALL.map(|section| section.name()).join(", ")
                ))
            })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Section {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_names() {
        for section in Section::ALL {
            assert_eq!(Section::parse(section.name()).unwrap(), section);
        }
    }

    #[test]
    fn test_parse_slugs_and_case() {
        assert_eq!(Section::parse("income-pending").unwrap(), Section::IncomePending);
        assert_eq!(Section::parse("PAYMENTS PENDING").unwrap(), Section::PaymentsPending);
        assert_eq!(Section::parse(" loans ").unwrap(), Section::Loans);
    }

    #[test]
    fn test_parse_unknown() {
        let err = Section::parse("Investments").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Income Pending"));
    }

    #[test]
    fn test_canonical_order() {
        let mut sorted = Section::ALL;
        sorted.sort();
        assert_eq!(sorted, Section::ALL);
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Section::IncomePending).unwrap();
        assert_eq!(json, "\"Income Pending\"");
    }
}
