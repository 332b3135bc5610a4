//! ServiceWatch CLI - vehicle failure-risk predictions from telemetry

#![deny(warnings)]

// Global invariants enforced:
// - Output order matches input record order
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use servicewatch_core::config::{self, ResolvedConfig};
use servicewatch_core::report::{build_entries, render_explanation};
use servicewatch_core::{batch, render_json, render_jsonl, render_text};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit status when at least one record failed validation
const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Parser)]
#[command(name = "servicewatch")]
#[command(about = "Failure-risk predictions for vehicle telemetry")]
#[command(version = env!("SERVICEWATCH_VERSION"))]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict failure risk for one or more telemetry records
    Predict {
        /// Path to a JSON object, JSON array, or JSON Lines file (`-` for stdin)
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show the per-feature score breakdown (text format only)
        #[arg(long)]
        explain: bool,
    },
    /// Print the shipped weight and range tables
    Tables,
    /// Validate a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running predictions
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Jsonl,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Predict {
            input,
            format,
            config: config_path,
            explain,
        } => {
            if explain && format != OutputFormat::Text {
                anyhow::bail!("--explain flag is only valid with --format text");
            }

            let project_root = std::env::current_dir()?;
            let resolved = config::load_and_resolve(&project_root, config_path.as_deref())
                .context("failed to load configuration")?;

            if let Some(config_path) = &resolved.config_path {
                eprintln!("Using config: {}", config_path.display());
            }

            let records = batch::load_batch(&input)?;
            if records.is_empty() {
                anyhow::bail!("no telemetry records found in {}", input.display());
            }
            tracing::info!(records = records.len(), "loaded telemetry");

            let results = batch::predict_batch(&records, &resolved.model);
            let entries = build_entries(results);
            let failed = entries.iter().filter(|e| e.is_error()).count();

            match format {
                OutputFormat::Text => {
                    print!("{}", render_text(&entries));
                    if explain {
                        for (index, record) in records.iter().enumerate() {
                            if let Ok(telemetry) = record {
                                println!();
                                println!("Score breakdown for record {}", index);
                                println!("{}", "=".repeat(72));
                                let breakdown = resolved.model.explain(telemetry);
                                print!("{}", render_explanation(&breakdown));
                            }
                        }
                    }
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&entries)?);
                }
                OutputFormat::Jsonl => {
                    print!("{}", render_jsonl(&entries)?);
                }
            }

            if failed > 0 {
                eprintln!("{} of {} record(s) failed validation", failed, entries.len());
                std::process::exit(EXIT_INVALID_INPUT);
            }
        }
        Commands::Tables => {
            print_tables(&ResolvedConfig::defaults());
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path, json } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;

                if json {
                    println!("{}", resolved.to_json_pretty());
                    return Ok(());
                }

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                print_tables(&resolved);
            }
        },
    }

    Ok(())
}

/// Print weights and ranges as an aligned table
fn print_tables(resolved: &ResolvedConfig) {
    let model = &resolved.model;
    println!(
        "{:<26} {:>7} {:>12} {:>12} {:>12} {:>12}",
        "FEATURE", "WEIGHT", "CRIT_LOW", "OPT_MIN", "OPT_MAX", "CRIT_HIGH"
    );
    println!("{}", "-".repeat(86));
    for ((feature, weight), (_, range)) in model.weights.iter().zip(model.ranges.iter()) {
        println!(
            "{:<26} {:>7.2} {:>12} {:>12} {:>12} {:>12}",
            feature.as_str(),
            weight,
            range.critical_low,
            range.optimal_min,
            range.optimal_max,
            range.critical_high
        );
    }
    println!("{}", "-".repeat(86));
    println!("{:<26} {:>7.2}", "total", model.weights.total());
}
