//! Pulseboard CLI - Command-line access to the metric generators.
//!
//! # Usage
//!
//! ```bash
//! # Weekly snapshot for one funnel, reproducible with a seed
//! pb-cli funnel --timeframe weekly --funnel "Webinar Funnel" --seed 42
//!
//! # Human-readable metric summary
//! pb-cli funnel --summary
//!
//! # Trend series rising 12% over 20 points
//! pb-cli trend --trend 12 --points 20 --base 100
//!
//! # List selectable funnels
//! pb-cli funnels
//! ```
//!
//! # Commands
//!
//! - `funnel` - Funnel snapshot and derived metrics
//! - `engagement` - Engagement snapshot
//! - `trend` - Trend series
//! - `funnels` - Funnel catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use pulseboard_core::{DEFAULT_TREND_BASE, DEFAULT_TREND_POINTS, Funnel, Timeframe};

mod commands;

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(author, version, about = "Pulseboard metric generators")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a funnel snapshot with derived metrics
    Funnel {
        /// `daily`, `weekly` or `monthly`
        #[arg(short, long, default_value = "daily")]
        timeframe: Timeframe,

        /// Funnel identifier (see `funnels`)
        #[arg(short, long, default_value = "all-funnels")]
        funnel: Funnel,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print a metric table instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Generate an engagement snapshot
    Engagement {
        #[arg(short, long, default_value = "daily")]
        timeframe: Timeframe,

        #[arg(short, long, default_value = "all-funnels")]
        funnel: Funnel,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a trend series
    Trend {
        /// Signed change in percent over the series
        #[arg(long, allow_negative_numbers = true)]
        trend: f64,

        #[arg(long, default_value_t = DEFAULT_TREND_POINTS)]
        points: usize,

        #[arg(long, default_value_t = DEFAULT_TREND_BASE)]
        base: f64,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// List selectable funnels
    Funnels,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = match cli.command {
        Commands::Funnel {
            timeframe,
            funnel,
            seed,
            summary,
        } => {
            let mut rng = commands::rng(seed);
            if summary {
                commands::generate::funnel_summary(&mut rng, timeframe, &funnel)
            } else {
                let value = commands::generate::funnel(&mut rng, timeframe, &funnel);
                serde_json::to_string_pretty(&value)?
            }
        }
        Commands::Engagement {
            timeframe,
            funnel,
            seed,
        } => {
            let value = commands::generate::engagement(&mut commands::rng(seed), timeframe, &funnel);
            serde_json::to_string_pretty(&value)?
        }
        Commands::Trend {
            trend,
            points,
            base,
            seed,
        } => {
            let value = commands::generate::trend(&mut commands::rng(seed), trend, points, base)?;
            serde_json::to_string_pretty(&value)?
        }
        Commands::Funnels => serde_json::to_string_pretty(&commands::generate::funnels())?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}
