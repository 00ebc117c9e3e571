//! One-sided binomial test p-values.
//!
//! The majority claim behind a Nakamoto coefficient ("the top N entities
//! control more than 50% of production") is tested against a binomial model:
//! `k` blocks from the top N out of `n` total, null success probability 0.5.

use statrs::distribution::{Binomial, DiscreteCDF};

/// Alternative hypothesis for a one-sided binomial test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// Alternative "true success probability is greater than p"
    /// (null: at most p). The p-value is P(X >= k).
    Greater,
    /// Alternative "true success probability is less than p"
    /// (null: at least p). The p-value is P(X <= k).
    Less,
}

/// One-sided binomial test p-value for `k` successes in `n` trials with
/// null success probability `p`.
///
/// # Panics
///
/// Panics if `n == 0`, `k > n`, or `p` is not a probability. Callers test
/// against nonzero block totals with `p = 0.5`, so these are programming
/// errors rather than data conditions.
pub fn one_sided_pvalue(k: u64, n: u64, p: f64, tail: Tail) -> f64 {
    assert!(n > 0, "binomial test needs at least one trial");
    assert!(k <= n, "successes cannot exceed trials ({} > {})", k, n);
    let dist = Binomial::new(p, n).expect("null probability must be in [0, 1]");
    match tail {
        Tail::Greater => {
            if k == 0 {
                1.0
            } else {
                dist.sf(k - 1)
            }
        }
        Tail::Less => dist.cdf(k),
    }
}
