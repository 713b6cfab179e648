//! Diagnostic codes: a category prefix plus a number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The family a diagnostic belongs to, which fixes its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Generic errors, prefixed with `E`.
    Error,
    /// Generic warnings, prefixed with `W`.
    Warning,
    /// Malformed records skipped by a parser, prefixed with `P`.
    Parse,
    /// File discovery and batch assembly, prefixed with `I`.
    Ingest,
    /// Legalization outcomes, prefixed with `L`.
    Legality,
}

impl Category {
    /// Returns the prefix letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Parse => 'P',
            Category::Ingest => 'I',
            Category::Legality => 'L',
        }
    }
}

/// A category and a number, displayed as e.g. `P003`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The code's category.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
