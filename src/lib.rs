//! # nakamoto
//!
//! Quantify decentralization of block production across blockchain ledgers.
//!
//! Given a per-ledger time series of daily block counts per producing entity
//! (mining pool, validator), this crate computes:
//! - A smoothed count series (sliding-window aggregation)
//! - The per-date Nakamoto coefficient: the minimum number of top entities
//!   whose combined share exceeds 50% of production
//! - A statistically valid (lower, upper) range for that coefficient under
//!   one-sided binomial tests at a configurable significance level
//! - An aggregate pass rate: the fraction of dates whose majority claim is
//!   statistically significant
//!
//! ## Quick Start
//!
//! ```ignore
//! use nakamoto::{analyze, load_daily_csv, Config};
//! use std::path::Path;
//!
//! let table = load_daily_csv(Path::new("data/bitcoin_daily.csv"))?;
//! let report = analyze(&table, &Config::default())?;
//!
//! for (date, coefficient, range) in report.iter() {
//!     println!("{}: {} (range {})", date, coefficient, range);
//! }
//! println!("{}", report.summary());
//! ```
//!
//! The core is a one-shot synchronous batch computation: tables are fully
//! materialized, nothing is persisted, and every date's statistics are
//! independent of the others.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod report;
mod smoothing;
mod table;

// Functional modules
pub mod analysis;
pub mod data;
pub mod statistics;

// Re-exports for public API
pub use analysis::{
    analyze, coefficient_ranges, coefficients, nakamoto_coefficient, pass_rate, AnalysisError,
    CoefficientRange, RangeError,
};
pub use config::{Config, ConfigError, WindowPolicy};
pub use data::{load_daily_csv, DataError};
pub use report::{Diagnostics, Report};
pub use smoothing::smooth;
pub use table::{CountTable, TableError};
