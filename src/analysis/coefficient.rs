//! Nakamoto coefficient point estimation.

use crate::table::CountTable;

/// Compute the Nakamoto coefficient for one date's entity counts.
///
/// The coefficient is the minimal number of top entities whose combined
/// share of the date's total strictly exceeds 50%. A zero-total row yields
/// a coefficient of 0; any nonzero total yields at least 1.
///
/// The comparison runs in exact integer arithmetic (`2 * accumulated >
/// total`), so no floating-point share is ever formed. Tie order among
/// equal counts does not affect the result: the accumulated sum after any
/// fixed number of entities is the same regardless of how ties are broken.
pub fn nakamoto_coefficient(row: &[u64]) -> usize {
    let total: u64 = row.iter().sum();
    if total == 0 {
        return 0;
    }
    let mut sorted = row.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut accumulated = 0u64;
    for (i, count) in sorted.iter().enumerate() {
        accumulated += count;
        if 2 * accumulated > total {
            return i + 1;
        }
    }
    // accumulated == total > total / 2, so the loop always returns.
    unreachable!("running sum reached the total without crossing half of it")
}

/// Per-date Nakamoto coefficients for a whole table, in date order.
pub fn coefficients(table: &CountTable) -> Vec<usize> {
    table.rows().iter().map(|row| nakamoto_coefficient(row)).collect()
}
