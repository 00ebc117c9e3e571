//! Per-ledger decentralization report over a directory of daily CSV files.
//!
//! Thin glue around the `nakamoto` library: iterates a fixed ledger list,
//! loads `{data_dir}/{ledger}_daily.csv`, applies known lifecycle cutoffs,
//! and prints one summary per ledger.
//!
//! ```text
//! nakamoto-report [data_dir] [--window N] [--alpha X] [--wrap] [--json]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use colored::Colorize;
use log::{info, warn};

use nakamoto::{analyze, load_daily_csv, Config, Report, WindowPolicy};

/// Ledgers covered by the data collection pipeline.
const LEDGERS: &[&str] = &["bitcoin", "bitcoin_cash", "ethereum", "litecoin", "zcash"];

/// Last proof-of-work date for Ethereum (the merge happened 2022-09-15).
const ETHEREUM_POW_CUTOFF: &str = "2022-09-14";

struct Args {
    data_dir: PathBuf,
    config: Config,
    json: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut data_dir = PathBuf::from("data");
    let mut config = Config::default();
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--window" => {
                let value = args.next().ok_or("--window needs a value")?;
                config.window = value
                    .parse()
                    .map_err(|_| format!("invalid window '{}'", value))?;
            }
            "--alpha" => {
                let value = args.next().ok_or("--alpha needs a value")?;
                config.alpha = value
                    .parse()
                    .map_err(|_| format!("invalid alpha '{}'", value))?;
            }
            "--wrap" => config.policy = WindowPolicy::Wrap,
            "--json" => json = true,
            "--help" | "-h" => {
                return Err(
                    "usage: nakamoto-report [data_dir] [--window N] [--alpha X] [--wrap] [--json]"
                        .to_string(),
                )
            }
            flag if flag.starts_with('-') => return Err(format!("unknown flag '{}'", flag)),
            dir => data_dir = PathBuf::from(dir),
        }
    }
    config.validate().map_err(|e| e.to_string())?;

    Ok(Args {
        data_dir,
        config,
        json,
    })
}

fn run_ledger(ledger: &str, data_dir: &Path, config: &Config) -> Option<Report> {
    let path = data_dir.join(format!("{}_daily.csv", ledger));
    if !path.exists() {
        warn!("no data found for {}, so it will be ignored", ledger);
        return None;
    }

    let mut table = match load_daily_csv(&path) {
        Ok(table) => table,
        Err(e) => {
            warn!("failed to load {}: {}", path.display(), e);
            return None;
        }
    };

    // Only the proof-of-work era is comparable for Ethereum.
    if ledger == "ethereum" {
        let cutoff = NaiveDate::parse_from_str(ETHEREUM_POW_CUTOFF, "%Y-%m-%d")
            .expect("cutoff constant is a valid date");
        table = table.truncate_after(cutoff);
    }

    info!("computing Nakamoto coefficients for {}", ledger);
    match analyze(&table, config) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("analysis failed for {}: {}", ledger, e);
            None
        }
    }
}

fn print_summary(ledger: &str, report: &Report) {
    let rate_line = match report.pass_rate {
        Some(rate) if rate >= 50.0 => format!("{:.2}% of p-tests passed", rate).green(),
        Some(rate) => format!("{:.2}% of p-tests passed", rate).red(),
        None => "pass rate undefined (no active dates)".yellow(),
    };
    println!("{}: {}", ledger.bold(), rate_line);
    println!("  {}", report.summary());
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let mut reports: BTreeMap<String, Report> = BTreeMap::new();
    for ledger in LEDGERS {
        if let Some(report) = run_ledger(ledger, &args.data_dir, &args.config) {
            reports.insert((*ledger).to_string(), report);
        }
    }

    if reports.is_empty() {
        eprintln!("no ledger data found under {}", args.data_dir.display());
        return ExitCode::FAILURE;
    }

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to serialize reports: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for (ledger, report) in &reports {
            print_summary(ledger, report);
        }
    }

    ExitCode::SUCCESS
}
