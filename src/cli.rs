//! CLI argument parsing for TimeGuard

use crate::dst::{HourWindowPolicy, ResolutionPolicy, TransitionWindowPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How `dst-check` decides whether a time is inside the gap/overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyChoice {
    /// Local hour heuristic (gap 02-03h, overlap 01-02h); best effort
    HourWindow,
    /// Use the zone database's own resolution of the local time
    Resolution,
}

impl PolicyChoice {
    pub fn policy(&self) -> Box<dyn TransitionWindowPolicy> {
        match self {
            PolicyChoice::HourWindow => Box::new(HourWindowPolicy::default()),
            PolicyChoice::Resolution => Box::new(ResolutionPolicy),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "timeguard")]
#[command(version)]
#[command(about = "TimeGuard: advanced timezone & temporal edge-case toolkit")]
#[command(
    long_about = "TimeGuard is a CLI to convert, validate, and simulate complex time behaviors (DST, leap seconds, smear)."
)]
pub struct Cli {
    /// Enable debug tracing on stderr (filter with RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a datetime between IANA time zones
    Convert(ConvertArgs),
    /// Check if a local datetime is during a DST transition (gap or overlap)
    DstCheck(DstCheckArgs),
    /// Check if a UTC timestamp is a leap second entry
    LeapCheck(LeapCheckArgs),
    /// Show current time in a given timezone with DST status
    Now(NowArgs),
    /// Simulate leap second smear adjustments across a 24h window
    Smear(SmearArgs),
    /// Validate log file timestamps for common temporal issues
    ValidateLogs(ValidateLogsArgs),
    /// Print version information
    Version,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Local datetime (YYYY-MM-DD HH:MM or YYYY-MM-DDTHH:MM)
    pub datetime: String,

    /// Source IANA timezone
    #[arg(long)]
    pub from: String,

    /// Target IANA timezone
    #[arg(long)]
    pub to: String,
}

#[derive(Args, Debug)]
pub struct DstCheckArgs {
    /// Local datetime (YYYY-MM-DD HH:MM or YYYY-MM-DDTHH:MM)
    pub datetime: String,

    /// IANA timezone
    #[arg(long)]
    pub zone: String,

    /// Transition-window policy for the ambiguous/nonexistent flags
    #[arg(long, value_enum, default_value = "hour-window")]
    pub policy: PolicyChoice,
}

#[derive(Args, Debug)]
pub struct LeapCheckArgs {
    /// Timestamp exactly as written in the dataset (e.g. 2016-12-31T23:59:60Z)
    pub timestamp: String,

    /// Path to leapdata.json (defaults to data/leapdata.json, then the bundled dataset)
    #[arg(long = "data", value_name = "PATH")]
    pub data: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NowArgs {
    /// IANA timezone
    #[arg(long)]
    pub zone: String,
}

#[derive(Args, Debug)]
pub struct SmearArgs {
    /// UTC calendar date (YYYY-MM-DD)
    pub date: String,

    /// Smear method (google)
    #[arg(long, default_value = "google")]
    pub method: String,
}

#[derive(Args, Debug)]
pub struct ValidateLogsArgs {
    /// Log file to validate ("-" for stdin)
    pub file: PathBuf,

    /// Emit JSON summary instead of line-by-line output
    #[arg(long)]
    pub json: bool,

    /// Number of sample lines to include per issue category in JSON output
    #[arg(long, value_name = "N", default_value = "5")]
    pub samples: usize,

    /// Longest accepted line in bytes
    #[arg(long = "max-line-bytes", value_name = "BYTES", default_value = "1048576")]
    pub max_line_bytes: usize,
}

/// `timeguard <version>` plus build metadata when it was provided at compile time
pub fn version_line() -> String {
    let mut line = format!("timeguard {}", env!("CARGO_PKG_VERSION"));
    if let Some(commit) = option_env!("TIMEGUARD_COMMIT") {
        line.push_str(&format!(" commit={}", commit));
    }
    if let Some(date) = option_env!("TIMEGUARD_BUILD_DATE") {
        line.push_str(&format!(" date={}", date));
    }
    line.push_str(&format!(
        " os={} arch={}",
        std::env::consts::OS,
        std::env::consts::ARCH
    ));
    line
}
