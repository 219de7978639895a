//! Headless Supply Phase Runner
//!
//! Runs supply phases over a scenario file or a seeded random scenario and
//! prints per-turn results.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use supply_lines::core::config::SupplyConfig;
use supply_lines::core::error::Result;
use supply_lines::core::types::MapBounds;
use supply_lines::supply::{simulate_turns, Scenario, SupplyModifiers, TurnResult};
use tracing_subscriber::EnvFilter;

/// Headless Supply Phase Runner
#[derive(Parser, Debug)]
#[command(name = "supply_phase")]
#[command(about = "Resolve supply phases for a scenario and print the transitions")]
struct Args {
    /// Scenario file (.json or .toml); a random scenario is generated if omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Supply config TOML (defaults used if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of turns to resolve
    #[arg(long, default_value_t = 1)]
    turns: u32,

    /// Random seed for generated scenarios
    #[arg(long)]
    seed: Option<u64>,

    /// Map width for generated scenarios
    #[arg(long, default_value_t = 20)]
    map_width: u32,

    /// Map height for generated scenarios
    #[arg(long, default_value_t = 20)]
    map_height: u32,

    /// Unit count for generated scenarios
    #[arg(long, default_value_t = 8)]
    units: usize,

    /// Supply source count for generated scenarios
    #[arg(long, default_value_t = 2)]
    sources: usize,

    /// Enemy count for generated scenarios
    #[arg(long, default_value_t = 6)]
    enemies: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

/// JSON output structure
#[derive(Serialize)]
struct TurnOutput<'a> {
    turn: u32,
    results: Vec<UnitOutput<'a>>,
}

#[derive(Serialize)]
struct UnitOutput<'a> {
    #[serde(flatten)]
    result: &'a TurnResult,
    modifiers: &'static SupplyModifiers,
    #[serde(skip_serializing_if = "Option::is_none")]
    attrition_damage: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supply_lines=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SupplyConfig::load(path)?,
        None => SupplyConfig::default(),
    };

    let mut scenario = match &args.scenario {
        Some(path) => {
            tracing::info!("Loading scenario {:?}", path);
            Scenario::load(path)?
        }
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            tracing::info!("Generating scenario with seed {}", seed);
            Scenario::generate(
                seed,
                MapBounds::new(args.map_width, args.map_height),
                args.units,
                args.sources,
                args.enemies,
            )
        }
    };

    let history = simulate_turns(
        &mut scenario.units,
        scenario.network.sources(),
        &scenario.enemies,
        scenario.bounds,
        args.turns,
        &config,
    );

    match args.format {
        OutputFormat::Text => print_text(&history),
        OutputFormat::Json => print_json(&history)?,
    }

    Ok(())
}

fn print_json(history: &[Vec<TurnResult>]) -> Result<()> {
    let output: Vec<TurnOutput> = history
        .iter()
        .enumerate()
        .map(|(i, results)| TurnOutput {
            turn: i as u32 + 1,
            results: results
                .iter()
                .map(|result| UnitOutput {
                    result,
                    modifiers: SupplyModifiers::for_status(result.status),
                    attrition_damage: result.attrition_damage(),
                })
                .collect(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(history: &[Vec<TurnResult>]) {
    for (i, results) in history.iter().enumerate() {
        println!("=== Turn {} ===", i + 1);
        for r in results {
            let damage = r
                .attrition_damage()
                .map(|d| format!("  -{} HP", d))
                .unwrap_or_default();
            println!(
                "{:<12} {:>3} -> {:>3}  {:<9} {:<10} {:?}{}",
                r.unit_id.0,
                r.previous_supply,
                r.new_supply,
                r.status,
                if r.in_supply { "in supply" } else { "cut off" },
                r.event,
                damage
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults_to_json() {
        let args = Args::try_parse_from(["supply_phase"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_text_format_accepted() {
        let args = Args::try_parse_from(["supply_phase", "--format", "text"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["supply_phase", "--format", "xml"]).is_err());
    }
}
