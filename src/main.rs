use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use timeguard::cli::{
    self, Cli, Command, ConvertArgs, DstCheckArgs, LeapCheckArgs, NowArgs, SmearArgs,
    ValidateLogsArgs,
};
use timeguard::validate::{self, ValidatorConfig};
use timeguard::{convert, dst, leap, smear};
use tracing_subscriber::EnvFilter;

/// Filter for `--debug`: everything down to TRACE, with RUST_LOG target directives kept
fn debug_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
}

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(debug_filter())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let conversion = convert::convert(&args.datetime, &args.from, &args.to)?;
    println!("{}", conversion);
    Ok(())
}

fn run_dst_check(args: DstCheckArgs) -> Result<()> {
    let policy = args.policy.policy();
    let info = dst::analyze_dst_with_policy(&args.datetime, &args.zone, policy.as_ref())?;

    println!("{}", info.describe());
    println!("  parsed:  {}", info.parsed.to_rfc3339());
    println!(
        "  offsets: pre={}s at={}s post={}s",
        info.pre_offset, info.offset, info.post_offset
    );
    println!(
        "  type={} ambiguous={} nonexistent={}",
        info.transition, info.ambiguous, info.nonexistent
    );
    Ok(())
}

fn run_leap_check(args: LeapCheckArgs) -> Result<()> {
    let registry = leap::LeapSecondRegistry::load_or_builtin(args.data.as_deref())
        .context("Failed to load leap-second dataset")?;

    if registry.contains(&args.timestamp) {
        println!("true: {} is a defined leap second", args.timestamp);
    } else {
        println!("false: {} is not a leap second entry", args.timestamp);
    }
    Ok(())
}

fn run_now(args: NowArgs) -> Result<()> {
    let snapshot = convert::now_in(&args.zone)?;
    println!("{}", snapshot);
    Ok(())
}

fn run_smear(args: SmearArgs) -> Result<()> {
    let points = smear::generate_smear(&args.date, &args.method)?;

    println!("Method: {} (total 1 leap second spread ±12h)", args.method);
    println!("Hour, SmearOffsetSeconds, AdjustedUTC");
    for p in &points {
        println!(
            "{:02}, {:.6}, {}",
            p.hour,
            p.offset_seconds,
            p.adjusted
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        );
    }
    Ok(())
}

fn run_validate_logs(args: ValidateLogsArgs) -> Result<()> {
    let config = ValidatorConfig::default()
        .with_sample_limit(args.samples)
        .with_max_line_bytes(args.max_line_bytes);
    config.validate().map_err(anyhow::Error::msg)?;

    let source = args.file.display().to_string();
    let json = args.json;
    let print_finding = |finding: &validate::Finding| {
        if !json {
            println!("{}", finding);
        }
    };

    let summary = if source == "-" {
        validate::validate_reader_with(io::stdin().lock(), &source, &config, print_finding)?
    } else {
        let file = File::open(&args.file)
            .with_context(|| format!("Failed to open log file: {}", source))?;
        validate::validate_reader_with(BufReader::new(file), &source, &config, print_finding)?
    };

    if json {
        println!("{}", summary.to_json_pretty()?);
    } else {
        println!("Validation complete: {} issues", summary.issues_total);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::Convert(a) => run_convert(a),
        Command::DstCheck(a) => run_dst_check(a),
        Command::LeapCheck(a) => run_leap_check(a),
        Command::Now(a) => run_now(a),
        Command::Smear(a) => run_smear(a),
        Command::ValidateLogs(a) => run_validate_logs(a),
        Command::Version => {
            println!("{}", cli::version_line());
            Ok(())
        }
    }
}
