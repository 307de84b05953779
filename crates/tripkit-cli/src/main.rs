mod io;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use tripkit_normalize::{
    calculate_budget_with, normalize_trip_with, try_parse_trip_text, BudgetSettings,
    NormalizeOptions,
};

use crate::io::{print_json, read_input};

#[derive(Debug, Parser)]
#[command(name = "tripkit")]
#[command(about = "Normalize LLM trip plans and estimate their budgets")]
struct Cli {
    /// Input file; stdin when omitted.
    #[arg(long, global = true, env = "TRIPKIT_INPUT")]
    input: Option<PathBuf>,

    /// Print single-line JSON instead of pretty output.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a trip record.
    Normalize,
    /// Estimate the budget of a trip record.
    Budget {
        /// Estimate from the record as given, without normalizing it first.
        #[arg(long)]
        raw: bool,
    },
    /// Extract JSON from raw model output.
    Parse,
    /// Normalized trip and its budget together.
    Report,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = tripkit_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let options = NormalizeOptions::from(&config);
    let text = read_input(cli.input.as_deref())?;
    tracing::debug!(env = %config.env, bytes = text.len(), "read input");

    let output = match cli.command {
        Commands::Parse => try_parse_trip_text(&text)?,
        Commands::Normalize => normalize_trip_with(&io::parse_record(&text)?, options),
        Commands::Budget { raw } => {
            let settings = BudgetSettings::from_config(&config)?;
            let record = io::parse_record(&text)?;
            let trip = if raw {
                record
            } else {
                normalize_trip_with(&record, options)
            };
            serde_json::to_value(calculate_budget_with(&trip, &settings))?
        }
        Commands::Report => {
            let settings = BudgetSettings::from_config(&config)?;
            let trip = normalize_trip_with(&io::parse_record(&text)?, options);
            let budget = calculate_budget_with(&trip, &settings);
            json!({ "trip": trip, "budget": budget })
        }
    };

    print_json(&output, cli.compact)
}
