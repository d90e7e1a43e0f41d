//! Hyperliquid API probe
//!
//! Command-line tool for exploring the Hyperliquid info and leaderboard HTTP
//! APIs. Each subcommand sends a few requests one after another, prints what
//! came back, and exits. Failed requests are reported and skipped.

mod api;
mod config;
mod format;
mod models;
mod probe;
mod report;
mod whales;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::api::{ApiError, InfoClient, StatsClient, INFO_API_BASE, STATS_API_BASE};
use crate::config::ProbeConfig;
use crate::format::{short_address, truncate, usd, usd_compact};
use crate::models::{AccountState, LeaderboardRow};
use crate::probe::{
    custom_info_case, ProbeCase, ProbeRunner, Suite, SuiteSummary, DEFAULT_PROBE_USER,
    ERROR_PREVIEW,
};
use crate::whales::{filter_whales, open_positions, reconcile_account_value};

/// Hyperliquid API probe CLI.
#[derive(Parser)]
#[command(name = "hlprobe")]
#[command(about = "Probe and inspect the Hyperliquid info and leaderboard APIs", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Base URL of the info API
    #[arg(long, env = "HLPROBE_INFO_URL", default_value = INFO_API_BASE)]
    info_url: String,

    /// Base URL of the stats host serving the leaderboard
    #[arg(long, env = "HLPROBE_STATS_URL", default_value = STATS_API_BASE)]
    stats_url: String,

    /// Timeout for inspection requests, in seconds
    #[arg(long, env = "HLPROBE_TIMEOUT_SECS", default_value = "10")]
    timeout: u64,

    /// Timeout for endpoint discovery probes, in seconds
    #[arg(long, env = "HLPROBE_PROBE_TIMEOUT_SECS", default_value = "5")]
    probe_timeout: u64,

    /// Minimum account value for an account to count as a whale
    #[arg(long, env = "HLPROBE_MIN_ACCOUNT_VALUE", default_value = "2500000")]
    min_value: Decimal,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run built-in probe suites, or one custom info request with --type
    Probe {
        /// Suite to run (repeatable); all suites when omitted
        #[arg(short, long, value_enum, conflicts_with = "kind")]
        suite: Vec<Suite>,

        /// Info request kind for a single custom probe, e.g. userFills
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Address used by user-scoped requests
        #[arg(short, long, default_value = DEFAULT_PROBE_USER)]
        user: String,

        /// Extra key=value fields for the custom probe
        #[arg(requires = "kind")]
        fields: Vec<String>,
    },

    /// Inspect the shape and first rows of the leaderboard
    Leaderboard {
        /// Time window query, e.g. allTime
        #[arg(short, long)]
        window: Option<String>,

        /// Number of rows to print in full
        #[arg(short, long, default_value = "2")]
        rows: usize,
    },

    /// Inspect a clearinghouse state (defaults to the top whale)
    State {
        /// Account address
        address: Option<String>,

        /// Number of open positions to print in full
        #[arg(short, long, default_value = "2")]
        positions: usize,
    },

    /// Walk the whale flow: leaderboard, filter, top whale, its positions
    Whales {
        /// Number of whales to list
        #[arg(short, long, default_value = "5")]
        top: usize,

        /// Number of open positions to show for the top whale
        #[arg(short, long, default_value = "3")]
        positions: usize,
    },

    /// List the perpetuals universe (size decimals, max leverage)
    Meta,

    /// Show current configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ProbeConfig {
        info_base_url: cli.info_url.clone(),
        stats_base_url: cli.stats_url.clone(),
        request_timeout_secs: cli.timeout,
        probe_timeout_secs: cli.probe_timeout,
        min_account_value: cli.min_value,
    };

    let started = Utc::now();

    match cli.command {
        Commands::Probe {
            suite,
            kind,
            user,
            fields,
        } => {
            run_probe(&config, suite, kind, &user, &fields).await?;
        }

        Commands::Leaderboard { window, rows } => {
            run_leaderboard(&config, window.as_deref(), rows).await?;
        }

        Commands::State { address, positions } => {
            run_state(&config, address, positions).await?;
        }

        Commands::Whales { top, positions } => {
            run_whales(&config, top, positions).await?;
        }

        Commands::Meta => {
            run_meta(&config).await?;
        }

        Commands::Config => {
            println!("\n=== Probe Configuration ===\n");
            println!("Endpoints:");
            println!("  Info API:             {}/info", config.info_base_url);
            println!("  Leaderboard:          {}/Mainnet/leaderboard", config.stats_base_url);
            println!("\nTimeouts:");
            println!("  Inspection requests:  {}s", config.request_timeout_secs);
            println!("  Endpoint probes:      {}s", config.probe_timeout_secs);
            println!("\nWhales:");
            println!("  Min Account Value:    {}", usd(config.min_account_value, 0));
            println!("\nSuites:");
            for suite in Suite::all() {
                println!(
                    "  {:<22}{} cases",
                    suite.name(),
                    suite.cases(&config.suite_context(DEFAULT_PROBE_USER)).len()
                );
            }
            return Ok(());
        }
    }

    let elapsed = Utc::now() - started;
    info!(elapsed_ms = elapsed.num_milliseconds(), "Finished");

    Ok(())
}

async fn run_probe(
    config: &ProbeConfig,
    suites: Vec<Suite>,
    kind: Option<String>,
    user: &str,
    fields: &[String],
) -> Result<()> {
    let ctx = config.suite_context(user);

    let plan: Vec<(String, Vec<ProbeCase>)> = match kind {
        Some(kind) => vec![(
            format!("custom {}", kind),
            vec![custom_info_case(&ctx, &kind, fields)?],
        )],
        None => {
            let suites = if suites.is_empty() {
                Suite::all().to_vec()
            } else {
                suites
            };
            suites
                .iter()
                .map(|s| (s.name().to_string(), s.cases(&ctx)))
                .collect()
        }
    };

    let runner = ProbeRunner::new()?;
    let mut overall = SuiteSummary::default();

    for (name, cases) in plan {
        info!(suite = %name, cases = cases.len(), "Running probe suite");
        println!("\n=== {} ===", name);

        let reports = runner
            .run_suite(cases, |report| {
                println!("{}", report.line());
                println!("{}", "-".repeat(20));
            })
            .await;

        let summary = SuiteSummary::from_reports(&reports);
        println!("{}", summary);
        overall.merge(summary);
    }

    println!("\nTotal: {}", overall);
    Ok(())
}

async fn run_leaderboard(config: &ProbeConfig, window: Option<&str>, rows: usize) -> Result<()> {
    let stats = StatsClient::with_base_url(config.stats_base_url.clone(), config.request_timeout())?;

    println!("Fetching {}", stats.leaderboard_url(window));
    let (status, data) = match stats.get_leaderboard_raw(window).await {
        Ok(fetched) => fetched,
        Err(e) => {
            print_failure("Leaderboard", &e);
            return Ok(());
        }
    };
    println!("Status: {}", status.as_u16());

    for line in report::describe_fields(&data) {
        println!("\n{}", line);
    }

    let all_rows = report::leaderboard_rows(&data);
    println!("\nTotal rows: {}", all_rows.len());
    for (i, row) in all_rows.iter().take(rows).enumerate() {
        println!("\nRow {}:\n{}", i + 1, report::pretty(row));
    }

    Ok(())
}

async fn run_state(config: &ProbeConfig, address: Option<String>, positions: usize) -> Result<()> {
    let address = match address {
        Some(address) => address,
        None => match top_whale(config).await? {
            Some(row) => row.address,
            None => return Ok(()),
        },
    };
    println!("Testing address: {}", address);

    let info_client = InfoClient::with_base_url(config.info_base_url.clone(), config.request_timeout())?;
    let state = match info_client.clearinghouse_state_raw(&address).await {
        Ok(state) => state,
        Err(e) => {
            print_failure("clearinghouseState", &e);
            return Ok(());
        }
    };

    let empty = Value::Object(Default::default());
    for section in ["marginSummary", "crossMarginSummary"] {
        println!("\n=== {} ===", section);
        println!("{}", report::pretty(state.get(section).unwrap_or(&empty)));
    }

    let open = report::open_raw_positions(&state);
    println!("\nOpen positions: {}", open.len());
    for (i, position) in open.iter().take(positions).enumerate() {
        println!("\n=== Position {} (full) ===", i + 1);
        println!("{}", report::pretty(position));
    }

    Ok(())
}

async fn run_whales(config: &ProbeConfig, top: usize, positions: usize) -> Result<()> {
    println!("=== Whale Scan ===\n");

    let stats = StatsClient::with_base_url(config.stats_base_url.clone(), config.request_timeout())?;
    println!("1. Fetching leaderboard from {}...", stats.leaderboard_url(None));
    let rows = match stats.get_leaderboard(None).await {
        Ok(rows) => rows,
        Err(e) => {
            print_failure("   Leaderboard", &e);
            return Ok(());
        }
    };
    println!("   Total rows: {}", rows.len());

    let whales = filter_whales(&rows, config.min_account_value);
    println!(
        "\n2. Whales with account value >= {}: {}",
        usd(config.min_account_value, 0),
        whales.len()
    );

    if !whales.is_empty() && top > 0 {
        println!(
            "\n   {:<4}{:<44} {:<20} {:>16} {:>12}",
            "#", "ADDRESS", "NAME", "ACCOUNT VALUE", "ALL-TIME PNL"
        );
        println!("   {}", "-".repeat(99));
        for (i, whale) in whales.iter().take(top).enumerate() {
            let all_time = whale
                .performance("allTime")
                .map(|p| usd_compact(p.pnl))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "   {:<4}{:<44} {:<20} {:>16} {:>12}",
                i + 1,
                whale.address,
                truncate(&whale.display_name(), 18),
                usd(whale.account_value, 0),
                all_time
            );
        }
    }

    let Some(top_whale) = whales.first() else {
        println!("\nNo whales found.");
        return Ok(());
    };

    println!("\n   Top whale:");
    println!("   Address: {}", top_whale.address);
    println!("   Account Value: {}", usd(top_whale.account_value, 0));
    println!(
        "   Display Name: {}",
        top_whale.display_name.as_deref().unwrap_or("None")
    );
    if !top_whale.window_performances.is_empty() {
        println!("   Window Performances:");
        for line in report::window_lines(top_whale) {
            println!("     {}", line);
        }
    }

    println!(
        "\n3. Fetching positions for top whale ({})...",
        short_address(&top_whale.address)
    );
    let info_client = InfoClient::with_base_url(config.info_base_url.clone(), config.request_timeout())?;
    let state: AccountState = match info_client.clearinghouse_state(&top_whale.address).await {
        Ok(state) => state.into(),
        Err(e) => {
            print_failure("   clearinghouseState", &e);
            return Ok(());
        }
    };

    let mids: HashMap<String, Decimal> = match info_client.all_mids().await {
        Ok(mids) => mids,
        Err(e) => {
            warn!(error = %e, "allMids unavailable, using entry prices as marks");
            HashMap::new()
        }
    };

    let account_value = reconcile_account_value(top_whale, &state);
    if account_value != top_whale.account_value {
        println!("   Account Value (clearinghouse): {}", usd(account_value, 0));
    }
    if let Some(summary) = &state.margin_summary {
        println!("   {}", report::margin_line(summary));
    }
    if let Some(withdrawable) = state.withdrawable {
        println!("   Withdrawable: {}", usd(withdrawable, 0));
    }

    let open = open_positions(&state);
    println!("   Open positions: {}", open.len());
    for position in open.iter().take(positions) {
        println!(
            "   - {}",
            report::position_line(position, mids.get(&position.coin).copied())
        );
    }

    Ok(())
}

async fn run_meta(config: &ProbeConfig) -> Result<()> {
    let info_client = InfoClient::with_base_url(config.info_base_url.clone(), config.request_timeout())?;

    println!("Fetching {} (meta)", info_client.info_url());
    let meta = match info_client.meta().await {
        Ok(meta) => meta,
        Err(e) => {
            print_failure("meta", &e);
            return Ok(());
        }
    };

    println!("\nPerp assets: {}\n", meta.universe.len());
    println!("{:<12} {:>8} {:>13}  FLAGS", "ASSET", "SZ DEC", "MAX LEVERAGE");
    println!("{}", "-".repeat(50));
    for asset in &meta.universe {
        let mut flags = Vec::new();
        if asset.only_isolated {
            flags.push("isolated-only");
        }
        if asset.is_delisted {
            flags.push("delisted");
        }
        println!(
            "{:<12} {:>8} {:>12}x  {}",
            asset.name,
            asset.sz_decimals,
            asset.max_leverage,
            flags.join(", ")
        );
    }

    Ok(())
}

/// Highest-value whale on the leaderboard, printing why when there is none.
async fn top_whale(config: &ProbeConfig) -> Result<Option<LeaderboardRow>> {
    let stats = StatsClient::with_base_url(config.stats_base_url.clone(), config.request_timeout())?;

    let rows = match stats.get_leaderboard(None).await {
        Ok(rows) => rows,
        Err(e) => {
            print_failure("Leaderboard", &e);
            return Ok(None);
        }
    };

    let whale = filter_whales(&rows, config.min_account_value).into_iter().next();
    if whale.is_none() {
        println!(
            "No account on the leaderboard reaches {}",
            usd(config.min_account_value, 0)
        );
    }
    Ok(whale)
}

/// Print a failed request the way the probe runner does, and move on.
fn print_failure(what: &str, err: &ApiError) {
    match err {
        ApiError::Status { status, body } => {
            println!("{} failed: {} {}", what, status.as_u16(), body);
        }
        other => {
            println!(
                "{} error ({}): {}",
                what,
                other.kind(),
                truncate(&other.to_string(), ERROR_PREVIEW)
            );
        }
    }
}
