//! CLI definition and dispatch.

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn, Level};

use crate::adapters::csv_adapter::CsvPriceLoader;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::SimulationConfig;
use crate::domain::error::CrossoverError;
use crate::domain::simulator::{CrossoverSimulator, SimulationReport};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PriceSource;

#[derive(Parser, Debug)]
#[command(
    name = "crossover",
    version,
    about = "Simple moving average crossover backtester"
)]
pub struct Cli {
    /// CSV file with a header row and a closing-price column
    pub csvfile: PathBuf,
    /// INI file with [simulation] and [data] overrides
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Log to stderr: -v for pipeline stages, -vv for every trade
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // Keeps an already-installed global subscriber.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn run(cli: Cli) -> ExitCode {
    match run_simulation(&cli.csvfile, cli.config.as_deref()) {
        Ok(report) => {
            println!("{}", format_final_value(report.final_value));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn format_final_value(value: f64) -> String {
    format!("Final portfolio value: {value:.2}")
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, CrossoverError> {
    FileConfigAdapter::from_file(path)
}

/// Each key is parsed once; absent keys keep their defaults and the merged
/// result is range-checked.
pub fn build_simulation_config(
    adapter: &dyn ConfigPort,
) -> Result<SimulationConfig, CrossoverError> {
    let defaults = SimulationConfig::default();
    let config = SimulationConfig {
        short_window: adapter
            .get_count("simulation", "short_window")?
            .unwrap_or(defaults.short_window),
        long_window: adapter
            .get_count("simulation", "long_window")?
            .unwrap_or(defaults.long_window),
        initial_balance: adapter
            .get_amount("simulation", "initial_balance")?
            .unwrap_or(defaults.initial_balance),
        price_column: adapter
            .get_string("data", "price_column")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.price_column),
    };
    config.validate()?;
    Ok(config)
}

/// Defaults, overridden by the INI file at `path` when given.
pub fn resolve_config(path: Option<&Path>) -> Result<SimulationConfig, CrossoverError> {
    match path {
        Some(path) => {
            let adapter = load_config(path)?;
            info!("Loading config from {}", adapter.source());
            build_simulation_config(&adapter)
        }
        None => Ok(SimulationConfig::default()),
    }
}

pub fn run_simulation(
    csv_path: &Path,
    config_path: Option<&Path>,
) -> Result<SimulationReport, CrossoverError> {
    let config = resolve_config(config_path)?;
    info!("Loading prices from {}", csv_path.display());
    let loader = CsvPriceLoader::new(csv_path.to_path_buf());
    run_with_source(&loader, &config)
}

pub fn run_with_source(
    source: &dyn PriceSource,
    config: &SimulationConfig,
) -> Result<SimulationReport, CrossoverError> {
    let prices = source.load_prices(&config.price_column)?;
    info!(
        "Loaded {} prices; windows {}/{}, initial balance {:.2}",
        prices.len(),
        config.short_window,
        config.long_window,
        config.initial_balance,
    );
    if !prices.is_empty() && prices.len() < config.warmup_len() {
        warn!(
            "only {} prices, need {} before any signal; no trades will execute",
            prices.len(),
            config.warmup_len(),
        );
    }

    let report = CrossoverSimulator::run(config, &prices)?;
    info!(
        "Processed {} observations, {} trades",
        report.observations,
        report.trades.len()
    );
    Ok(report)
}
