//! Daily-counts CSV parsing.
//!
//! The data collection pipeline emits one `{ledger}_daily.csv` per ledger
//! with producing entities as rows and dates as columns:
//!
//! ```csv
//! entity,2024-01-01,2024-01-02,2024-01-03
//! Foundry USA,120,115,131
//! AntPool,95,102,88
//! ```
//!
//! The loader transposes that layout into a date-indexed [`CountTable`],
//! sorting dates ascending if the file lists them out of order.

use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::DataError;
use crate::table::CountTable;

/// Load a per-ledger daily counts CSV into a count table.
///
/// The header's first cell is ignored (entity column label); every other
/// header cell must parse as a `%Y-%m-%d` date. Each following line is an
/// entity identifier and one non-negative integer count per date. Empty
/// lines are skipped; an empty count cell reads as 0 (days before an
/// entity's first block are often left blank by the exporter).
///
/// # Errors
///
/// Returns `DataError` if the file cannot be read, the header or a row is
/// malformed, or the assembled table violates an invariant (duplicate
/// entities, duplicate dates).
pub fn load_daily_csv(path: &Path) -> Result<CountTable, DataError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => {
                return Err(DataError::Parse {
                    line: 1,
                    message: "file has no header line".to_string(),
                })
            }
        }
    };

    let mut file_dates = Vec::new();
    for (column, cell) in header.split(',').skip(1).enumerate() {
        let cell = cell.trim();
        let date = NaiveDate::parse_from_str(cell, "%Y-%m-%d").map_err(|_| {
            DataError::InvalidDate {
                column: column + 1,
                value: cell.to_string(),
            }
        })?;
        file_dates.push(date);
    }

    let mut entities = Vec::new();
    let mut columns: Vec<Vec<u64>> = Vec::new();
    for (index, line) in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells = line.split(',');
        let entity = cells
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DataError::Parse {
                line: index + 1,
                message: "missing entity identifier".to_string(),
            })?;

        let mut counts = Vec::with_capacity(file_dates.len());
        for cell in cells {
            let cell = cell.trim();
            if cell.is_empty() {
                counts.push(0);
                continue;
            }
            let count: u64 = cell.parse().map_err(|_| DataError::InvalidCount {
                line: index + 1,
                value: cell.to_string(),
            })?;
            counts.push(count);
        }
        if counts.len() != file_dates.len() {
            return Err(DataError::Parse {
                line: index + 1,
                message: format!(
                    "expected {} counts, got {}",
                    file_dates.len(),
                    counts.len()
                ),
            });
        }

        entities.push(entity.to_string());
        columns.push(counts);
    }

    // Transpose to date-major rows, visiting dates in ascending order.
    let mut order: Vec<usize> = (0..file_dates.len()).collect();
    order.sort_by_key(|&i| file_dates[i]);

    let dates: Vec<NaiveDate> = order.iter().map(|&i| file_dates[i]).collect();
    let rows: Vec<Vec<u64>> = order
        .iter()
        .map(|&i| columns.iter().map(|col| col[i]).collect())
        .collect();

    Ok(CountTable::new(dates, entities, rows)?)
}
