//! Canopy CLI — run and validate commands.
//!
//! Commands:
//! - `run` — execute a backtest from explicit paths or a TOML run spec
//! - `validate` — parse and validate a strategy document without running

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use canopy_core::strategy::{extract_indicators, validate_strategy};
use canopy_runner::{load_candles, load_strategy, run, BacktestResult, RunFingerprint, RunSpec};

#[derive(Parser)]
#[command(name = "canopy", about = "Canopy — strategy-tree backtest engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest and write the result document as JSON.
    Run {
        /// Path to a TOML run spec (mutually exclusive with --strategy/--data).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Path to the strategy JSON document.
        #[arg(long)]
        strategy: Option<PathBuf>,

        /// Path to the candle CSV file.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Initial capital.
        #[arg(long, default_value_t = 100_000.0)]
        capital: f64,

        /// Where to write the result JSON; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Parse and validate a strategy document without running it.
    Validate {
        /// Path to the strategy JSON document.
        #[arg(long)]
        strategy: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            strategy,
            data,
            capital,
            output,
        } => run_cmd(config, strategy, data, capital, output),
        Commands::Validate { strategy } => validate_cmd(&strategy),
    }
}

fn run_cmd(
    config: Option<PathBuf>,
    strategy: Option<PathBuf>,
    data: Option<PathBuf>,
    capital: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    if config.is_some() && (strategy.is_some() || data.is_some()) {
        bail!("--config is mutually exclusive with --strategy/--data");
    }

    let (strategy_path, data_path, capital, output) = if let Some(path) = config {
        let spec = RunSpec::load(&path)?;
        (spec.strategy, spec.data, spec.initial_capital, spec.output)
    } else {
        let strategy = strategy.context("--strategy is required without --config")?;
        let data = data.context("--data is required without --config")?;
        (strategy, data, capital, output)
    };

    let strategy = load_strategy(&strategy_path)?;
    let candles = load_candles(&data_path)?;
    let fingerprint = RunFingerprint::compute(&strategy, &candles, capital);
    eprintln!("run {} ({} bars)", fingerprint.short(), candles.len());

    let result = run(&strategy, &candles, capital)?;
    print_summary(&result);

    let json = serde_json::to_string_pretty(&result)?;
    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("result written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn validate_cmd(path: &PathBuf) -> Result<()> {
    let strategy = load_strategy(path)?;
    validate_strategy(&strategy)?;

    let refs = extract_indicators(&strategy);
    println!("strategy for {} is valid", strategy.asset);
    println!("  indicators ({}):", refs.len());
    for r in &refs {
        println!("    {}", r.key().column());
    }
    Ok(())
}

fn print_summary(result: &BacktestResult) {
    let m = &result.metrics;
    eprintln!("trades:       {}", m.trades_count);
    eprintln!("total return: {:.2}%", m.total_return * 100.0);
    eprintln!("win rate:     {:.1}%", m.win_rate * 100.0);
    eprintln!("max drawdown: {:.2}%", m.max_drawdown * 100.0);
    eprintln!("sharpe:       {:.2}", m.sharpe_ratio);
    eprintln!(
        "equity:       {:.2} -> {:.2}",
        result.initial_equity, result.final_equity
    );
}
