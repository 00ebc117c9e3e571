//! Statistical primitives shared by the analysis procedures.

mod binomial;

pub use binomial::{one_sided_pvalue, Tail};
