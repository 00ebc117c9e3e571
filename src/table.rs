//! Block-production count table.
//!
//! The core data model: a date-indexed table of block counts per producing
//! entity (mining pool, validator, ...). Tables are validated on construction
//! and immutable afterwards; every analysis step derives new values from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A date-indexed table of block counts per producing entity.
///
/// Rows are dates (strictly increasing, one per observed day), columns are
/// distinct entity identifiers (order-stable, unique). Each cell is the
/// number of blocks that entity produced on that date. A row summing to zero
/// is a valid no-activity day, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    dates: Vec<NaiveDate>,
    entities: Vec<String>,
    rows: Vec<Vec<u64>>,
}

impl CountTable {
    /// Create a validated count table.
    ///
    /// # Errors
    ///
    /// Returns `TableError` if row and date counts differ, any row's width
    /// does not match the entity count, dates are not strictly increasing,
    /// or an entity identifier appears twice.
    pub fn new(
        dates: Vec<NaiveDate>,
        entities: Vec<String>,
        rows: Vec<Vec<u64>>,
    ) -> Result<Self, TableError> {
        if dates.len() != rows.len() {
            return Err(TableError::LengthMismatch {
                dates: dates.len(),
                rows: rows.len(),
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != entities.len() {
                return Err(TableError::RowShape {
                    row: i,
                    expected: entities.len(),
                    got: row.len(),
                });
            }
        }
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(TableError::DatesNotIncreasing { index: i + 1 });
            }
        }
        let mut seen = HashSet::new();
        for entity in &entities {
            if !seen.insert(entity.as_str()) {
                return Err(TableError::DuplicateEntity {
                    name: entity.clone(),
                });
            }
        }
        Ok(Self {
            dates,
            entities,
            rows,
        })
    }

    /// Build a table from parts already known to uphold the invariants.
    ///
    /// Used internally when deriving a table from a validated one (same
    /// dates, same entities, recomputed rows).
    pub(crate) fn from_validated_parts(
        dates: Vec<NaiveDate>,
        entities: Vec<String>,
        rows: Vec<Vec<u64>>,
    ) -> Self {
        debug_assert_eq!(dates.len(), rows.len());
        debug_assert!(rows.iter().all(|r| r.len() == entities.len()));
        Self {
            dates,
            entities,
            rows,
        }
    }

    /// The ordered dates of the table.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The entity identifiers, in column order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// All rows, one per date, in date order.
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    /// The counts for the date at `index`.
    pub fn row(&self, index: usize) -> &[u64] {
        &self.rows[index]
    }

    /// Number of dates in the table.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the table has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Total blocks produced on the date at `index`.
    pub fn total(&self, index: usize) -> u64 {
        self.rows[index].iter().sum()
    }

    /// Per-date totals, in date order.
    pub fn totals(&self) -> Vec<u64> {
        (0..self.len()).map(|i| self.total(i)).collect()
    }

    /// The date's counts sorted descending, ties broken by entity
    /// identifier ascending.
    ///
    /// The explicit tie-break makes the ranking deterministic; the
    /// coefficient and top-N sums are unaffected by the order among equal
    /// counts, but which entities occupy the top N is.
    pub fn ranked_counts(&self, index: usize) -> Vec<u64> {
        let row = &self.rows[index];
        let mut order: Vec<usize> = (0..row.len()).collect();
        order.sort_by(|&a, &b| {
            row[b]
                .cmp(&row[a])
                .then_with(|| self.entities[a].cmp(&self.entities[b]))
        });
        order.into_iter().map(|i| row[i]).collect()
    }

    /// Restrict the table to dates at or before `cutoff`.
    ///
    /// Lifecycle filtering for ledgers whose consensus mechanism changed
    /// (e.g. keeping only Ethereum's proof-of-work era).
    pub fn truncate_after(&self, cutoff: NaiveDate) -> CountTable {
        let keep = self.dates.iter().take_while(|d| **d <= cutoff).count();
        CountTable::from_validated_parts(
            self.dates[..keep].to_vec(),
            self.entities.clone(),
            self.rows[..keep].to_vec(),
        )
    }
}

/// Errors that can occur constructing a count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Number of rows does not match number of dates.
    LengthMismatch {
        /// Number of dates supplied.
        dates: usize,
        /// Number of rows supplied.
        rows: usize,
    },
    /// A row's width does not match the entity count.
    RowShape {
        /// Index of the offending row (0-based).
        row: usize,
        /// Expected width (number of entities).
        expected: usize,
        /// Actual width of the row.
        got: usize,
    },
    /// Dates are not strictly increasing.
    DatesNotIncreasing {
        /// Index of the first date that is not greater than its predecessor.
        index: usize,
    },
    /// An entity identifier appears more than once.
    DuplicateEntity {
        /// The duplicated identifier.
        name: String,
    },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::LengthMismatch { dates, rows } => {
                write!(f, "{} dates but {} rows", dates, rows)
            }
            TableError::RowShape { row, expected, got } => {
                write!(f, "row {} has {} cells, expected {}", row, got, expected)
            }
            TableError::DatesNotIncreasing { index } => {
                write!(f, "dates not strictly increasing at index {}", index)
            }
            TableError::DuplicateEntity { name } => {
                write!(f, "duplicate entity identifier '{}'", name)
            }
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn small_table() -> CountTable {
        CountTable::new(
            vec![date("2024-01-01"), date("2024-01-02"), date("2024-01-03")],
            vec!["a".into(), "b".into()],
            vec![vec![3, 1], vec![0, 0], vec![2, 5]],
        )
        .unwrap()
    }

    #[test]
    fn test_totals() {
        let table = small_table();
        assert_eq!(table.totals(), vec![4, 0, 7]);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_rejects_row_shape_mismatch() {
        let err = CountTable::new(
            vec![date("2024-01-01")],
            vec!["a".into(), "b".into()],
            vec![vec![1]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RowShape {
                row: 0,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_rejects_unsorted_dates() {
        let err = CountTable::new(
            vec![date("2024-01-02"), date("2024-01-02")],
            vec!["a".into()],
            vec![vec![1], vec![2]],
        )
        .unwrap_err();
        assert_eq!(err, TableError::DatesNotIncreasing { index: 1 });
    }

    #[test]
    fn test_rejects_duplicate_entity() {
        let err = CountTable::new(
            vec![date("2024-01-01")],
            vec!["a".into(), "a".into()],
            vec![vec![1, 2]],
        )
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateEntity { name: "a".into() });
    }

    #[test]
    fn test_ranked_counts_sorts_descending() {
        let table = small_table();
        assert_eq!(table.ranked_counts(0), vec![3, 1]);
        assert_eq!(table.ranked_counts(2), vec![5, 2]);
    }

    #[test]
    fn test_ranked_counts_breaks_ties_by_entity() {
        let table = CountTable::new(
            vec![date("2024-01-01")],
            vec!["zeta".into(), "alpha".into(), "mid".into()],
            vec![vec![7, 7, 7]],
        )
        .unwrap();
        // Equal counts: ranking is still deterministic (alpha, mid, zeta).
        assert_eq!(table.ranked_counts(0), vec![7, 7, 7]);
    }

    #[test]
    fn test_truncate_after() {
        let table = small_table();
        let truncated = table.truncate_after(date("2024-01-02"));
        assert_eq!(truncated.len(), 2);
        assert_eq!(truncated.dates().last(), Some(&date("2024-01-02")));
        assert_eq!(truncated.entities(), table.entities());

        // Cutoff before the first date empties the table.
        let empty = table.truncate_after(date("2023-12-31"));
        assert!(empty.is_empty());
    }
}
