//! SPINLAB — roulette betting-progression simulator
//!
//! Entry point. Loads configuration, initialises structured logging,
//! resolves the spin sequence (file or seeded wheel) and dispatches to
//! the requested subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use spinlab::backtest::{render_comparison, render_limit_sweeps, Backtester};
use spinlab::config::{AppConfig, SimulationConfig};
use spinlab::data::wheel::{Wheel, WheelGenerator};
use spinlab::data::{save_spins, SpinFile, SpinRecord, SpinSource};
use spinlab::strategy::wager_rng;
use spinlab::platforms::{self, HttpFetcher, ScrapeReport};
use spinlab::types::SpinOutcome;

const BANNER: &str = r#"
 ____  ____ ___ _   _ _        _    ____
/ ___||  _ \_ _| \ | | |      / \  | __ )
\___ \| |_) | ||  \| | |     / _ \ |  _ \
 ___) |  __/| || |\  | |___ / ___ \| |_) |
|____/|_|  |___|_| \_|_____/_/   \_\____/

  Roulette progression simulator v0.1.0
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = "Roulette betting-progression simulator")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Where the spins come from and how much to bet.
#[derive(clap::Args, Debug)]
struct SpinArgs {
    /// JSON spin file (overrides `data.spins_path`)
    #[arg(long)]
    spins: Option<PathBuf>,

    /// Initial bet (overrides `simulation.initial_bet`)
    #[arg(long)]
    initial_bet: Option<i64>,

    /// RNG seed for generated spins and random wagers
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare no-strategy, Martingale, Fibonacci and D'Alembert.
    Simulate {
        #[command(flatten)]
        input: SpinArgs,
    },
    /// Sweep Martingale and Fibonacci across table limits.
    Limits {
        #[command(flatten)]
        input: SpinArgs,

        /// Comma-separated limits (overrides `simulation.table_limits`)
        #[arg(long, value_delimiter = ',')]
        limits: Vec<i64>,

        /// Use limits scraped from the public limit pages
        #[arg(long, conflicts_with = "limits")]
        scrape: bool,
    },
    /// Write a spin file drawn from a seeded wheel.
    Generate {
        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        count: Option<usize>,

        #[arg(long, value_enum)]
        wheel: Option<Wheel>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Scrape published roulette table limits.
    Scrape,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging();
    eprintln!("{BANNER}");

    let cfg = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Simulate { input } => {
            let sim = simulation_settings(&cfg, &input);
            let spins = resolve_spins(&cfg, &input)?;
            let backtester = Backtester::from_config(&sim)?;
            let mut rng = wager_rng(sim.seed);

            let runs = backtester.compare_strategies(&spins, &mut rng)?;
            print!("{}", render_comparison(&runs));
        }
        Command::Limits { input, limits, scrape } => {
            let sim = simulation_settings(&cfg, &input);
            let spins = resolve_spins(&cfg, &input)?;
            let backtester = Backtester::from_config(&sim)?;

            let limits = if scrape {
                let scraped = platforms::parse_limits(&scrape_limits(&cfg).await?);
                if scraped.is_empty() {
                    anyhow::bail!("No usable table limits could be scraped");
                }
                scraped
            } else if !limits.is_empty() {
                limits
            } else {
                sim.table_limits.clone()
            };
            info!(limits = ?limits, "Sweeping table limits");

            let runs = backtester.compare_table_limits(&spins, &limits)?;
            print!("{}", render_limit_sweeps(&runs));
        }
        Command::Generate { out, count, wheel, seed } => {
            let mut generator = WheelGenerator::new(
                wheel.unwrap_or(cfg.data.wheel),
                count.unwrap_or(cfg.data.generate_spins),
                seed.or(cfg.simulation.seed),
            );
            let records: Vec<SpinRecord> = generator
                .pockets()
                .into_iter()
                .map(SpinRecord::from_pocket)
                .collect();
            save_spins(&out, &records)?;
            println!("Wrote {} spins to {}", records.len(), out.display());
        }
        Command::Scrape => {
            let reports = scrape_limits(&cfg).await?;
            for report in &reports {
                match &report.result {
                    Ok(limits) => println!(
                        "{} ({}) @ {}: {}",
                        report.source,
                        report.url,
                        report.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        limits.join(", ")
                    ),
                    Err(e) => println!("{}: {e}", report.source),
                }
            }
            println!("Parsed limits: {:?}", platforms::parse_limits(&reports));
        }
    }

    Ok(())
}

/// Apply CLI overrides on top of the configured simulation settings.
fn simulation_settings(cfg: &AppConfig, input: &SpinArgs) -> SimulationConfig {
    let mut sim = cfg.simulation.clone();
    if let Some(bet) = input.initial_bet {
        sim.initial_bet = bet;
    }
    if let Some(seed) = input.seed {
        sim.seed = Some(seed);
    }
    sim
}

/// Spin file if one is given, otherwise a generated sequence.
fn resolve_spins(cfg: &AppConfig, input: &SpinArgs) -> Result<Vec<SpinOutcome>> {
    let mut source: Box<dyn SpinSource> = match input.spins.as_ref().or(cfg.data.spins_path.as_ref()) {
        Some(path) => Box::new(SpinFile::new(path)),
        None => Box::new(WheelGenerator::new(
            cfg.data.wheel,
            cfg.data.generate_spins,
            input.seed.or(cfg.simulation.seed),
        )),
    };

    let spins = source.spins()?;
    if spins.is_empty() {
        warn!(source = %source.name(), "Spin sequence is empty");
    }
    info!(source = %source.name(), spins = spins.len(), "Spin sequence ready");
    Ok(spins)
}

async fn scrape_limits(cfg: &AppConfig) -> Result<Vec<ScrapeReport>> {
    let fetcher = HttpFetcher::new(&cfg.scraper)?;
    let sources = platforms::default_sources();
    Ok(platforms::scrape_all(&fetcher, &sources).await)
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("spinlab=info"));

    let json_logging = std::env::var("SPINLAB_LOG_JSON").is_ok();

    // Logs and banner go to stderr so the result tables on stdout stay clean.
    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
