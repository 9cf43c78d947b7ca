//! coinfall: command-line front end for the payout layout engine.
//!
//! Loads a payout configuration, seeds the generator, plans layouts and
//! prints them with their validation report.

mod render;
mod settings;
mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use coinfall_core::config::PayoutConfig;
use coinfall_core::traits::LayoutPlanner;
use coinfall_layout::engine::LayoutEngine;
use coinfall_layout::estimator::prize_ratio;
use coinfall_layout::validator::validate;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

/// Coinfall payout layout planner.
#[derive(Parser, Debug)]
#[command(name = "coinfall", version, about = "Split a payout into spins, combinations and board cells")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file (JSON, TOML or YAML). Built-in defaults when absent.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured wager.
    #[arg(long, global = true)]
    wager: Option<u64>,

    /// Override the configured base prize.
    #[arg(long, global = true)]
    prize: Option<f64>,

    /// Generator seed. Drawn from entropy and printed when absent.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan one layout and print it with its validation report.
    Plan {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Plan many layouts from consecutive seeds and summarise them.
    Simulate {
        #[arg(short, long, default_value_t = 1000)]
        runs: u32,
    },
    /// Print the spin count for the configured wager and prize.
    Estimate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl CommonArgs {
    /// Load the configuration record and apply command-line overrides.
    fn payout_config(&self) -> Result<PayoutConfig> {
        let mut cfg = settings::load(self.config.as_deref(), settings::environment())?;
        if let Some(wager) = self.wager {
            cfg.wager = wager;
        }
        if let Some(prize) = self.prize {
            cfg.base_prize = prize;
        }
        cfg.validate().context("configuration rejected after overrides")?;
        Ok(cfg)
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| StdRng::from_entropy().next_u64())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.common.log_level, &cli.common.log_format);

    let config = cli.common.payout_config()?;
    let engine = LayoutEngine::new();

    match cli.command {
        Commands::Plan { output } => plan(&engine, &config, cli.common.seed(), output),
        Commands::Simulate { runs } => {
            let seed = cli.common.seed();
            info!(seed, runs, "starting simulation");
            println!("first seed {seed}");
            print!("{}", simulate::run(&engine, &config, seed, runs));
            Ok(())
        }
        Commands::Estimate => estimate(&engine, &config),
    }
}

fn plan(engine: &LayoutEngine, config: &PayoutConfig, seed: u64, output: OutputFormat) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let layout = engine
        .plan(config, &mut rng)
        .with_context(|| format!("failed to plan layout with seed {seed}"))?;
    let report = validate(&layout);

    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({ "seed": seed, "layout": layout, "validation": report });
            let text = serde_json::to_string_pretty(&doc).context("failed to serialize layout")?;
            println!("{text}");
        }
        OutputFormat::Text => {
            print!("{}", render::layout(&layout, seed));
            println!();
            print!("{}", render::report(&report));
        }
    }
    Ok(())
}

fn estimate(engine: &LayoutEngine, config: &PayoutConfig) -> Result<()> {
    let ratio = prize_ratio(config.wager, config.base_prize)?;
    let spins = engine.spin_count(config)?;
    println!(
        "wager {}  prize {}  ratio {ratio:.3}  spins {spins}",
        config.wager, config.base_prize
    );
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. `RUST_LOG` takes precedence over `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init();
    }
}
