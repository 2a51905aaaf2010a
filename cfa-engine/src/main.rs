//! cfa-engine - Client feedback analysis command-line tool
//!
//! Reads a CSV export of client reviews, applies the account tier's analysis
//! cap, runs the analysis engine, and prints the report payload as JSON on
//! stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cfa_common::config::{ConfigResolver, ConfigSource, TomlConfig};
use cfa_engine::ingest::{ingest_file, InputOrder};
use cfa_engine::report::{Report, ReportSettings};
use cfa_engine::themes::THEME_TABLE;
use cfa_engine::{analyze, AccountStatus, AccountUsage, SubscriptionPlan, TierPolicy};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for cfa-engine
#[derive(Parser, Debug)]
#[command(name = "cfa-engine")]
#[command(about = "Client feedback analysis: themes, ratings and excerpts from review exports")]
#[command(version)]
struct Cli {
    /// Path to TOML config file (overrides CFA_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a CSV export and print the report as JSON
    Analyze(AnalyzeArgs),
    /// Print the theme keyword table
    Themes,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// CSV file with date, rating and review_text columns
    #[arg(short, long)]
    input: PathBuf,

    /// Account tier the report is generated under
    #[arg(long, value_enum, default_value_t = TierArg::Trial)]
    tier: TierArg,

    /// Trial reports already generated
    #[arg(long, default_value_t = 0)]
    trial_used: u32,

    /// One-time reports still available
    #[arg(long, default_value_t = 1)]
    onetime_remaining: u32,

    /// Explicit analysis cap, overriding the tier policy
    #[arg(long)]
    cap: Option<usize>,

    /// Row order of the input file
    #[arg(long, value_enum, default_value_t = OrderArg::OldestFirst)]
    order: OrderArg,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TierArg {
    Trial,
    Onetime,
    Monthly,
    Annual,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OrderArg {
    OldestFirst,
    NewestFirst,
}

impl From<OrderArg> for InputOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::OldestFirst => InputOrder::OldestFirst,
            OrderArg::NewestFirst => InputOrder::NewestFirst,
        }
    }
}

impl AnalyzeArgs {
    fn account_usage(&self, free_trial_limit: u32) -> AccountUsage {
        let subscription = match self.tier {
            TierArg::Monthly => Some(SubscriptionPlan::Monthly),
            TierArg::Annual => Some(SubscriptionPlan::Annual),
            TierArg::Trial | TierArg::Onetime => None,
        };
        let one_time_reports_purchased = if self.tier == TierArg::Onetime {
            self.onetime_remaining
        } else {
            0
        };

        AccountUsage {
            subscription,
            one_time_reports_purchased,
            one_time_reports_used: 0,
            trial_reports_used: self.trial_used,
            trial_limit: free_trial_limit,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = ConfigResolver::new(cli.config.clone())
        .load()
        .context("Failed to load configuration")?;

    init_tracing(&loaded.config.logging.level);

    info!(
        "Starting CFA analysis engine (cfa-engine) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &loaded.source {
        ConfigSource::File(path) => info!("Configuration loaded from {}", path.display()),
        ConfigSource::Missing(path) => {
            warn!("Config file {} not found, using defaults", path.display())
        }
        ConfigSource::Defaults => info!("No config file found, using compiled defaults"),
    }

    match cli.command {
        Command::Analyze(args) => run_analyze(&loaded.config, &args),
        Command::Themes => {
            print_themes();
            Ok(())
        }
    }
}

/// RUST_LOG wins; otherwise the configured level applies
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(config: &TomlConfig, args: &AnalyzeArgs) -> Result<()> {
    let report = build_report(config, args, chrono::Local::now().date_naive())?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;

    println!("{}", json);
    Ok(())
}

/// Resolve the account tier and the analysis cap it allows
///
/// Fails when the account has no report credits left. An explicit `--cap`
/// replaces the tier policy's cap.
fn resolve_access(
    config: &TomlConfig,
    args: &AnalyzeArgs,
) -> Result<(AccountStatus, Option<usize>)> {
    let status = AccountStatus::resolve(&args.account_usage(config.tiers.free_trial_limit));
    info!("Account status: {}", status);

    if !status.can_generate_report() {
        bail!(
            "No remaining report credits ({}). Select a plan or purchase an additional report.",
            status
        );
    }

    let cap = args
        .cap
        .or_else(|| TierPolicy::from(&config.tiers).analysis_cap(&status));
    Ok((status, cap))
}

/// Ingest the input file and build the report payload
fn build_report(
    config: &TomlConfig,
    args: &AnalyzeArgs,
    generated_on: NaiveDate,
) -> Result<Report> {
    let (status, cap) = resolve_access(config, args)?;

    let ingested = ingest_file(&args.input, config.ingest.max_upload_bytes)
        .with_context(|| format!("Failed to ingest {}", args.input.display()))?;

    if ingested.skipped_rows() > 0 {
        warn!(
            "Skipped {} invalid row(s) in {}",
            ingested.skipped_rows(),
            args.input.display()
        );
    }
    info!(
        "Imported {} reviews using {} access",
        ingested.imported(),
        status.kind()
    );

    let feed = ingested.into_feed(args.order.into());
    let analysis = analyze(&feed, cap);

    if analysis.is_capped() {
        info!(
            "Analyzed the {} most recent of {} reviews",
            analysis.total_reviews,
            analysis.available_reviews()
        );
    }

    Ok(Report::build(
        &analysis,
        &status,
        &ReportSettings::from(config),
        generated_on,
    ))
}

fn print_themes() {
    for theme in THEME_TABLE {
        println!("{}: {}", theme.name, theme.triggers.join(", "));
    }
}
