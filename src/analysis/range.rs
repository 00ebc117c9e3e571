//! Confidence range search for the Nakamoto coefficient.
//!
//! The point-estimate coefficient is a sample statistic. For each date this
//! module finds the widest interval `[lower, upper]` around it that remains
//! statistically indistinguishable from "exactly majority" under one-sided
//! binomial tests at significance level alpha.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::statistics::{one_sided_pvalue, Tail};
use crate::table::CountTable;

/// Bounds on the Nakamoto coefficient for one date.
///
/// Invariant: `lower <= upper`, and both bracket the point estimate the
/// range was searched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoefficientRange {
    /// Smallest coefficient still consistent with the data.
    pub lower: usize,
    /// Largest coefficient still consistent with the data.
    pub upper: usize,
}

impl CoefficientRange {
    /// A range collapsed to a single value.
    pub fn exact(value: usize) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Check whether the range is a single value.
    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }

    /// Check whether `value` lies inside the range.
    pub fn contains(&self, value: usize) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl std::fmt::Display for CoefficientRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.lower)
        } else {
            write!(f, "[{}, {}]", self.lower, self.upper)
        }
    }
}

/// Errors from the bounded range search.
///
/// Both variants mean the search walked to its hard bound without the test
/// ever crossing the significance threshold. This only happens on degenerate
/// dates (a handful of blocks in the whole window), where no coefficient can
/// be statistically distinguished from a coin flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The upper search exhausted every entity without reaching significance.
    UpperSearchExhausted {
        /// The date whose search diverged.
        date: NaiveDate,
        /// Number of entities the candidate was capped at.
        entities: usize,
    },
    /// The lower search reached zero entities without reaching significance.
    LowerSearchExhausted {
        /// The date whose search diverged.
        date: NaiveDate,
    },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeError::UpperSearchExhausted { date, entities } => write!(
                f,
                "upper-bound search for {} exhausted all {} entities without reaching significance",
                date, entities
            ),
            RangeError::LowerSearchExhausted { date } => write!(
                f,
                "lower-bound search for {} reached zero entities without reaching significance",
                date
            ),
        }
    }
}

impl std::error::Error for RangeError {}

/// Direction a per-date search ran out of room in.
enum Exhausted {
    Upper,
    Lower,
}

/// Search the coefficient range for every date of a table.
///
/// `coeffs` are the per-date point estimates (from
/// [`coefficients`](crate::analysis::coefficients)) for the same table.
/// Zero-total dates get the collapsed range (0, 0) with no tests run.
///
/// # Errors
///
/// Returns `RangeError` naming the date if a search reaches its bound
/// (candidate coefficients are confined to `[0, number of entities]`)
/// without the p-value ever crossing alpha.
pub fn coefficient_ranges(
    table: &CountTable,
    coeffs: &[usize],
    alpha: f64,
) -> Result<Vec<CoefficientRange>, RangeError> {
    debug_assert_eq!(table.len(), coeffs.len());

    let mut ranges = Vec::with_capacity(table.len());
    for (i, &coeff) in coeffs.iter().enumerate() {
        let total = table.total(i);
        if total == 0 {
            ranges.push(CoefficientRange::exact(0));
            continue;
        }
        let ranked = table.ranked_counts(i);
        let range = search_range(&ranked, total, coeff, alpha).map_err(|e| match e {
            Exhausted::Upper => RangeError::UpperSearchExhausted {
                date: table.dates()[i],
                entities: ranked.len(),
            },
            Exhausted::Lower => RangeError::LowerSearchExhausted {
                date: table.dates()[i],
            },
        })?;
        ranges.push(range);
    }
    Ok(ranges)
}

/// Range search for a single date with nonzero total.
///
/// Starting from the point estimate's success count:
/// - upper: while the `Greater` test is not significant, add one entity at a
///   time; the upper bound is one below the first significant candidate.
/// - lower: while the `Less` test is not significant, drop one entity at a
///   time; the lower bound is one above the first significant candidate.
fn search_range(
    ranked: &[u64],
    total: u64,
    coeff: usize,
    alpha: f64,
) -> Result<CoefficientRange, Exhausted> {
    let successes = top_sum(ranked, coeff);

    let p = one_sided_pvalue(successes, total, 0.5, Tail::Greater);
    let upper = if p <= alpha {
        coeff
    } else {
        let mut found = None;
        for candidate in coeff + 1..=ranked.len() {
            let s = top_sum(ranked, candidate);
            if one_sided_pvalue(s, total, 0.5, Tail::Greater) <= alpha {
                found = Some(candidate - 1);
                break;
            }
        }
        found.ok_or(Exhausted::Upper)?
    };

    let q = one_sided_pvalue(successes, total, 0.5, Tail::Less);
    let lower = if q <= alpha {
        coeff
    } else {
        let mut found = None;
        for candidate in (0..coeff).rev() {
            let s = top_sum(ranked, candidate);
            if one_sided_pvalue(s, total, 0.5, Tail::Less) <= alpha {
                found = Some(candidate + 1);
                break;
            }
        }
        found.ok_or(Exhausted::Lower)?
    };

    Ok(CoefficientRange { lower, upper })
}

/// Sum of the top `k` ranked counts.
pub(crate) fn top_sum(ranked: &[u64], k: usize) -> u64 {
    ranked.iter().take(k).sum()
}
