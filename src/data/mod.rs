//! Loading per-ledger block-production data.
//!
//! The core operates on fully materialized [`CountTable`]s; this module is
//! the ingestion glue that builds them from the daily CSV files the data
//! collection pipeline produces.
//!
//! [`CountTable`]: crate::CountTable

mod csv;

pub use csv::load_daily_csv;

use crate::table::TableError;

/// Errors that can occur loading count data.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading the file.
    Io(std::io::Error),

    /// Malformed CSV structure at a specific line.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// A header cell is not a calendar date.
    InvalidDate {
        /// Header column index (1-indexed, excluding the entity column).
        column: usize,
        /// The offending cell content.
        value: String,
    },

    /// A count cell is not a non-negative integer.
    InvalidCount {
        /// Line number where the invalid value was found (1-indexed).
        line: usize,
        /// The offending cell content.
        value: String,
    },

    /// The parsed data violates a table invariant.
    Table(TableError),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse { line, message } => {
                write!(f, "parse error at line {}: {}", line, message)
            }
            DataError::InvalidDate { column, value } => {
                write!(f, "header column {} is not a date: '{}'", column, value)
            }
            DataError::InvalidCount { line, value } => {
                write!(f, "invalid count '{}' at line {}", value, line)
            }
            DataError::Table(e) => write!(f, "invalid table: {}", e),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<TableError> for DataError {
    fn from(e: TableError) -> Self {
        DataError::Table(e)
    }
}
