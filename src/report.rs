//! Analysis output model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::CoefficientRange;

/// Summary counts describing the analyzed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Number of dates in the table.
    pub num_dates: usize,
    /// Dates with nonzero production (the tested population).
    pub active_dates: usize,
    /// Number of distinct producing entities.
    pub num_entities: usize,
}

/// Complete result of a decentralization analysis run.
///
/// All series are parallel to `dates` and derived from the smoothed table:
/// one coefficient and one range per date, plus the aggregate pass rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The analyzed dates, in order.
    pub dates: Vec<NaiveDate>,
    /// Per-date Nakamoto coefficient point estimates.
    pub coefficients: Vec<usize>,
    /// Per-date coefficient ranges.
    pub ranges: Vec<CoefficientRange>,
    /// Percentage of active dates whose majority claim is significant,
    /// or `None` if no date had any activity.
    pub pass_rate: Option<f64>,
    /// Significance level the tests ran at.
    pub alpha: f64,
    /// Smoothing window size used.
    pub window: usize,
    /// Summary counts.
    pub diagnostics: Diagnostics,
}

impl Report {
    /// Number of dates covered by the report.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the report covers no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Smallest coefficient over dates with activity, if any.
    pub fn min_coefficient(&self) -> Option<usize> {
        self.coefficients.iter().copied().filter(|c| *c > 0).min()
    }

    /// Largest coefficient over dates with activity, if any.
    pub fn max_coefficient(&self) -> Option<usize> {
        self.coefficients.iter().copied().filter(|c| *c > 0).max()
    }

    /// Iterate over per-date results as (date, coefficient, range).
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, usize, CoefficientRange)> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.coefficients.iter().copied())
            .zip(self.ranges.iter().copied())
            .map(|((date, coeff), range)| (date, coeff, range))
    }

    /// Get a human-readable summary line.
    pub fn summary(&self) -> String {
        match self.pass_rate {
            Some(rate) => {
                let span = match (self.min_coefficient(), self.max_coefficient()) {
                    (Some(min), Some(max)) if min != max => {
                        format!(", coefficient between {} and {}", min, max)
                    }
                    (Some(min), _) => format!(", coefficient {}", min),
                    _ => String::new(),
                };
                format!(
                    "{:.2}% of majority tests significant over {} active days{}",
                    rate, self.diagnostics.active_dates, span
                )
            }
            None => "no active dates; pass rate undefined".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Report {
            dates: vec![start, start + chrono::Days::new(1), start + chrono::Days::new(2)],
            coefficients: vec![1, 0, 3],
            ranges: vec![
                CoefficientRange::exact(1),
                CoefficientRange::exact(0),
                CoefficientRange { lower: 2, upper: 3 },
            ],
            pass_rate: Some(50.0),
            alpha: 0.05,
            window: 3,
            diagnostics: Diagnostics {
                num_dates: 3,
                active_dates: 2,
                num_entities: 5,
            },
        }
    }

    #[test]
    fn test_coefficient_extremes_skip_inactive_dates() {
        let report = sample_report();
        assert_eq!(report.min_coefficient(), Some(1));
        assert_eq!(report.max_coefficient(), Some(3));
    }

    #[test]
    fn test_iter_yields_parallel_series() {
        let report = sample_report();
        let rows: Vec<_> = report.iter().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].1, 3);
        assert_eq!(rows[2].2, CoefficientRange { lower: 2, upper: 3 });
    }

    #[test]
    fn test_summary_mentions_rate_and_span() {
        let summary = sample_report().summary();
        assert!(summary.contains("50.00%"));
        assert!(summary.contains("between 1 and 3"));
    }

    #[test]
    fn test_summary_undefined_rate() {
        let mut report = sample_report();
        report.pass_rate = None;
        assert!(report.summary().contains("undefined"));
    }

    #[test]
    fn test_report_serializes() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
