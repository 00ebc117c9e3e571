//! Aggregate significance of the majority claim across dates.

use crate::analysis::range::top_sum;
use crate::statistics::{one_sided_pvalue, Tail};
use crate::table::CountTable;

/// Percentage of dates whose point-estimate majority claim is significant.
///
/// For each date with a nonzero total, the top `coeff` entities' block count
/// is tested against the null "at most 50% of production" (one-sided
/// `Greater` test at `p = 0.5`); the date passes when the p-value is
/// strictly below `alpha`. Zero-total dates are excluded from both the
/// numerator and the denominator.
///
/// Returns `None` when no date has any activity at all, so an all-zero
/// dataset yields an explicit "undefined" instead of a division by zero.
/// A returned rate is always within [0, 100].
pub fn pass_rate(table: &CountTable, coeffs: &[usize], alpha: f64) -> Option<f64> {
    debug_assert_eq!(table.len(), coeffs.len());

    let mut tested = 0u64;
    let mut passes = 0u64;
    for (i, &coeff) in coeffs.iter().enumerate() {
        let total = table.total(i);
        if total == 0 {
            continue;
        }
        tested += 1;
        let successes = top_sum(&table.ranked_counts(i), coeff);
        if one_sided_pvalue(successes, total, 0.5, Tail::Greater) < alpha {
            passes += 1;
        }
    }
    if tested == 0 {
        None
    } else {
        Some(100.0 * passes as f64 / tested as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::coefficients;
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
    fn test_all_zero_dataset_is_undefined() {
        let table = table(vec![vec![0, 0], vec![0, 0]]);
        let coeffs = coefficients(&table);
        assert_eq!(pass_rate(&table, &coeffs, 0.05), None);
    }

    #[test]
    fn test_monopoly_passes() {
        let table = table(vec![vec![100, 0]]);
        let coeffs = coefficients(&table);
        assert_eq!(pass_rate(&table, &coeffs, 0.05), Some(100.0));
    }

    #[test]
    fn test_uniform_distribution_fails() {
        // 30 of 50 gives p ~ 0.101, not below 0.05.
        let table = table(vec![vec![10, 10, 10, 10, 10]]);
        let coeffs = coefficients(&table);
        assert_eq!(pass_rate(&table, &coeffs, 0.05), Some(0.0));
    }

    #[test]
    fn test_zero_dates_excluded_from_denominator() {
        // One passing date, one zero date: rate is 100, not 50.
        let table = table(vec![vec![100, 0], vec![0, 0]]);
        let coeffs = coefficients(&table);
        assert_eq!(pass_rate(&table, &coeffs, 0.05), Some(100.0));
    }

    #[test]
    fn test_mixed_dates() {
        let table = table(vec![
            vec![100, 0, 0, 0, 0],      // passes
            vec![10, 10, 10, 10, 10],   // fails
            vec![0, 0, 0, 0, 0],        // excluded
            vec![200, 100, 50, 25, 25], // passes (300 of 400)
        ]);
        let coeffs = coefficients(&table);
        let rate = pass_rate(&table, &coeffs, 0.05).unwrap();
        assert!((rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_is_bounded() {
        let table = table(vec![vec![55, 45], vec![90, 10], vec![51, 49]]);
        let coeffs = coefficients(&table);
        let rate = pass_rate(&table, &coeffs, 0.05).unwrap();
        assert!((0.0..=100.0).contains(&rate));
    }
}
