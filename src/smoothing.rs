//! Temporal smoothing of daily count tables.
//!
//! Converts a daily count table into a sliding-window-summed table of the
//! same shape: for each date, the output row is the element-wise sum of the
//! rows inside a window of adjacent dates. Smoothing damps single-day noise
//! before the coefficient estimation and hypothesis tests run.

use crate::config::WindowPolicy;
use crate::table::CountTable;

/// Smooth a count table with a sliding window of `window` days.
///
/// The window covers `window / 2` days before each date (integer floor) and
/// the remainder at/after it, so `window = 3` sums the previous, current,
/// and next day. The output has the same dates, entities, and row count as
/// the input; `window = 1` returns the table unchanged.
///
/// `policy` decides what happens where the window would reach before the
/// first date: [`WindowPolicy::Truncate`] clamps it, [`WindowPolicy::Wrap`]
/// reproduces the historical wrap-around semantics.
pub fn smooth(table: &CountTable, window: usize, policy: WindowPolicy) -> CountTable {
    debug_assert!(window >= 1, "window size must be at least 1");

    let len = table.len();
    let width = table.entities().len();
    let step = window / 2;
    let ahead = window - step;

    let mut rows = Vec::with_capacity(len);
    for i in 0..len {
        let end = (i + ahead).min(len);
        let start = window_start(i, step, len, policy);

        let mut combined = vec![0u64; width];
        // An empty resolved window (wrap landing past the end) sums to zeros.
        for r in start..end {
            for (cell, count) in combined.iter_mut().zip(table.row(r)) {
                *cell += count;
            }
        }
        rows.push(combined);
    }

    CountTable::from_validated_parts(table.dates().to_vec(), table.entities().to_vec(), rows)
}

/// Resolve the window start index for date index `i`.
fn window_start(i: usize, step: usize, len: usize, policy: WindowPolicy) -> usize {
    if i >= step {
        return i - step;
    }
    match policy {
        WindowPolicy::Truncate => 0,
        // Negative start counts from the end of the series, clamped at 0
        // when it would underflow past the front (slice semantics).
        WindowPolicy::Wrap => (len as i64 + i as i64 - step as i64).max(0) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(rows: Vec<Vec<u64>>) -> CountTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..rows.len() as u64)
            .map(|i| start + chrono::Days::new(i))
            .collect();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let entities = (0..width).map(|i| format!("e{}", i)).collect();
        CountTable::new(dates, entities, rows).unwrap()
    }

    #[test]
    fn test_window_one_is_identity() {
        let input = table(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        for policy in [WindowPolicy::Truncate, WindowPolicy::Wrap] {
            assert_eq!(smooth(&input, 1, policy), input);
        }
    }

    #[test]
    fn test_shape_preserved() {
        let input = table(vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]]);
        for window in 1..=6 {
            let output = smooth(&input, window, WindowPolicy::Truncate);
            assert_eq!(output.dates(), input.dates());
            assert_eq!(output.entities(), input.entities());
            assert_eq!(output.len(), input.len());
        }
    }

    #[test]
    fn test_three_day_window_truncate() {
        let input = table(vec![vec![1, 0], vec![2, 10], vec![4, 20], vec![8, 40]]);
        let output = smooth(&input, 3, WindowPolicy::Truncate);
        // Row i sums rows [i-1, i+2), clamped at the boundaries.
        assert_eq!(output.row(0), &[3, 10]);
        assert_eq!(output.row(1), &[7, 30]);
        assert_eq!(output.row(2), &[14, 70]);
        assert_eq!(output.row(3), &[12, 60]);
    }

    #[test]
    fn test_three_day_window_wrap_empty_slice_is_zero() {
        // With 4 rows and window 3, row 0 wraps its start to index 3, which
        // lies past the window end (2): the slice is empty and sums to zero.
        let input = table(vec![vec![1, 0], vec![2, 10], vec![4, 20], vec![8, 40]]);
        let output = smooth(&input, 3, WindowPolicy::Wrap);
        assert_eq!(output.row(0), &[0, 0]);
        // Interior rows are unaffected by the policy.
        assert_eq!(output.row(1), &[7, 30]);
        assert_eq!(output.row(2), &[14, 70]);
        assert_eq!(output.row(3), &[12, 60]);
    }

    #[test]
    fn test_wrap_picks_up_tail_on_short_series() {
        // With 2 rows, row 0's window start wraps to index 1, end is 2:
        // the window is just the last row.
        let input = table(vec![vec![1, 2], vec![10, 20]]);
        let output = smooth(&input, 3, WindowPolicy::Wrap);
        assert_eq!(output.row(0), &[10, 20]);
        assert_eq!(output.row(1), &[11, 22]);
    }

    #[test]
    fn test_even_window_splits_floor_behind() {
        // window = 4: step = 2 behind, 2 at/after.
        let input = table(vec![vec![1], vec![2], vec![4], vec![8], vec![16]]);
        let output = smooth(&input, 4, WindowPolicy::Truncate);
        assert_eq!(output.row(2), &[15]); // rows 0..4
        assert_eq!(output.row(4), &[28]); // rows 2..5
    }

    #[test]
    fn test_window_larger_than_series() {
        let input = table(vec![vec![1], vec![2], vec![4]]);
        let output = smooth(&input, 10, WindowPolicy::Truncate);
        for i in 0..3 {
            assert_eq!(output.row(i), &[7]);
        }
    }

    #[test]
    fn test_zero_rows_stay_zero() {
        let input = table(vec![vec![0, 0], vec![0, 0], vec![0, 0]]);
        let output = smooth(&input, 3, WindowPolicy::Truncate);
        assert!(output.totals().iter().all(|t| *t == 0));
    }
}
