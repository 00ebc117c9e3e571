//! Decentralization analysis pipeline.
//!
//! Three numeric procedures run over a smoothed count table:
//!
//! 1. **Coefficient estimation** ([`nakamoto_coefficient`]): the per-date
//!    Nakamoto coefficient point estimate.
//! 2. **Range search** ([`coefficient_ranges`]): the widest coefficient
//!    interval still consistent with the data under one-sided binomial
//!    tests.
//! 3. **Pass rate** ([`fn@pass_rate`]): the fraction of dates whose
//!    majority claim is statistically significant.
//!
//! [`analyze`] wires them together behind a single entry point.

mod coefficient;
mod pass_rate;
mod range;

pub use coefficient::{coefficients, nakamoto_coefficient};
pub use pass_rate::pass_rate;
pub use range::{coefficient_ranges, CoefficientRange, RangeError};

use crate::config::{Config, ConfigError};
use crate::report::{Diagnostics, Report};
use crate::smoothing::smooth;
use crate::table::CountTable;

/// Errors from a full analysis run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A coefficient range search diverged.
    Range(RangeError),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Config(e) => write!(f, "invalid configuration: {}", e),
            AnalysisError::Range(e) => write!(f, "range search failed: {}", e),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Config(e) => Some(e),
            AnalysisError::Range(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(e: ConfigError) -> Self {
        AnalysisError::Config(e)
    }
}

impl From<RangeError> for AnalysisError {
    fn from(e: RangeError) -> Self {
        AnalysisError::Range(e)
    }
}

/// Run the full decentralization analysis for one ledger's count table.
///
/// Smooths the table with the configured window, estimates the per-date
/// Nakamoto coefficients, searches their confidence ranges, and evaluates
/// the aggregate pass rate.
///
/// # Errors
///
/// Returns `AnalysisError` if the config is invalid or a range search
/// exhausts its bound on a degenerate date.
///
/// # Example
///
/// ```ignore
/// use nakamoto::{analyze, Config, CountTable};
///
/// let table = CountTable::new(dates, entities, rows)?;
/// let report = analyze(&table, &Config::default())?;
/// println!("{}", report.summary());
/// ```
pub fn analyze(table: &CountTable, config: &Config) -> Result<Report, AnalysisError> {
    config.validate()?;

    let smoothed = smooth(table, config.window, config.policy);
    let coefficients = coefficients(&smoothed);
    let ranges = coefficient_ranges(&smoothed, &coefficients, config.alpha)?;
    let pass_rate = pass_rate(&smoothed, &coefficients, config.alpha);

    let active_dates = (0..smoothed.len()).filter(|i| smoothed.total(*i) > 0).count();
    let diagnostics = Diagnostics {
        num_dates: smoothed.len(),
        active_dates,
        num_entities: smoothed.entities().len(),
    };

    Ok(Report {
        dates: smoothed.dates().to_vec(),
        coefficients,
        ranges,
        pass_rate,
        alpha: config.alpha,
        window: config.window,
        diagnostics,
    })
}
