//! floodcast CLI - flood likelihood assessments from the command line

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
// - All validation is delegated to floodcast-core; nothing is clamped here

mod logger;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use floodcast_core::config::{self, ResolvedConfig};
use floodcast_core::predisposition::region_tier;
use floodcast_core::{
    assess, assess_all, load_scenarios, render_batch_json, render_batch_text, render_json,
    render_text, BatchOptions, RainfallIntensity, Region, Scenario, Soil, Terrain,
    WindowLength,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "floodcast")]
#[command(about = "Rainfall-driven flood likelihood assessments")]
#[command(version = env!("FLOODCAST_VERSION"))]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single scenario
    Assess {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Date shown in the summary (YYYY-MM-DD); not used in computation
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Assess every scenario in a JSON file
    Batch {
        /// JSON array of scenarios
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Show only top N results (overrides config file)
        #[arg(long)]
        top: Option<usize>,

        /// Minimum likelihood in percent (overrides config file)
        #[arg(long)]
        min_likelihood: Option<f64>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List supported regions and their baseline tiers
    Regions,
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Scenario inputs; anything omitted falls back to the configured defaults
#[derive(clap::Args, Debug, Default)]
struct ScenarioArgs {
    /// Region name, e.g. "West Bengal"
    #[arg(long)]
    region: Option<String>,

    /// Terrain class: flat-plain, undulating, hilly-steep
    #[arg(long)]
    terrain: Option<String>,

    /// Soil class: clayey, loamy, sandy
    #[arg(long)]
    soil: Option<String>,

    /// Rainfall intensity in mm/day (0-300)
    #[arg(long, allow_negative_numbers = true)]
    intensity: Option<f64>,

    /// Observation window in days (1-14)
    #[arg(long)]
    window: Option<u32>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running an assessment
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
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match cli.command {
        Commands::Assess {
            scenario,
            date,
            format,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let scenario = resolve_scenario(&scenario, date, &resolved)?;
            tracing::debug!(?scenario, "resolved scenario");

            let assessment = assess(&scenario, &resolved.thresholds);

            match format {
                OutputFormat::Text => print!("{}", render_text(&assessment)),
                OutputFormat::Json => println!("{}", render_json(&assessment)),
            }
        }
        Commands::Batch {
            file,
            format,
            top,
            min_likelihood,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;

            if let Some(min) = min_likelihood {
                if !(0.0..=100.0).contains(&min) {
                    anyhow::bail!("--min-likelihood must be between 0 and 100 (got {})", min);
                }
            }

            let inputs = load_scenarios(&file)?;
            tracing::info!(count = inputs.len(), "loaded scenarios");

            // CLI flags override config file values
            let options = BatchOptions {
                min_likelihood: min_likelihood.or(resolved.min_likelihood),
                top_n: top.or(resolved.top_n),
            };
            let assessments = assess_all(&inputs, &options, &resolved.thresholds)
                .with_context(|| format!("invalid scenarios in {}", file.display()))?;

            match format {
                OutputFormat::Text => print!("{}", render_batch_text(&assessments)),
                OutputFormat::Json => println!("{}", render_batch_json(&assessments)),
            }
        }
        Commands::Regions => {
            println!("{:<16} {:<9} {}", "REGION", "TIER", "BASELINE");
            for region in Region::ALL {
                let tier = region_tier(region);
                println!(
                    "{:<16} {:<9} {:.2}",
                    region.display_name(),
                    tier.as_str(),
                    tier.baseline()
                );
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let cwd = std::env::current_dir()?;
                match config::load_and_resolve(&cwd, path.as_deref()) {
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
            ConfigAction::Show { path } => {
                let cwd = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&cwd, path.as_deref())
                    .context("failed to load configuration")?;
                print!("{}", describe_config(&resolved));
            }
        },
    }

    Ok(())
}

/// Load config from an explicit path or the working directory
fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir()?;
    let resolved =
        config::load_and_resolve(&cwd, config_path).context("failed to load configuration")?;
    if let Some(path) = &resolved.config_path {
        tracing::info!("using config: {}", path.display());
    }
    Ok(resolved)
}

/// Merge CLI flags over configured defaults; the core validates every value
fn resolve_scenario(
    args: &ScenarioArgs,
    date: Option<NaiveDate>,
    resolved: &ResolvedConfig,
) -> anyhow::Result<Scenario> {
    let defaults = &resolved.defaults;

    let region = match args.region.as_deref() {
        Some(s) => s.parse::<Region>()?,
        None => defaults.region,
    };
    let terrain = match args.terrain.as_deref() {
        Some(s) => s.parse::<Terrain>()?,
        None => defaults.terrain,
    };
    let soil = match args.soil.as_deref() {
        Some(s) => s.parse::<Soil>()?,
        None => defaults.soil,
    };
    let intensity = match args.intensity {
        Some(v) => RainfallIntensity::new(v)?,
        None => defaults.intensity,
    };
    let window = match args.window {
        Some(d) => WindowLength::new(d)?,
        None => defaults.window_days,
    };

    Ok(Scenario {
        region,
        terrain,
        soil,
        intensity,
        window,
        date,
    })
}

fn describe_config(resolved: &ResolvedConfig) -> String {
    let mut out = String::new();
    out.push_str("Configuration:\n");
    match resolved.config_path {
        Some(ref p) => out.push_str(&format!("  Source: {}\n", p.display())),
        None => out.push_str("  Source: defaults (no config file found)\n"),
    }
    out.push('\n');

    let d = &resolved.defaults;
    out.push_str("Defaults:\n");
    out.push_str(&format!("  region: {}\n", d.region));
    out.push_str(&format!("  terrain: {}\n", d.terrain));
    out.push_str(&format!("  soil: {}\n", d.soil));
    out.push_str(&format!("  intensity: {} mm/day\n", d.intensity.mm_per_day()));
    out.push_str(&format!("  window_days: {}\n", d.window_days.days()));
    out.push('\n');

    let t = &resolved.thresholds;
    out.push_str("Thresholds:\n");
    out.push_str(&format!("  moderate: {}\n", t.moderate));
    out.push_str(&format!("  high: {}\n", t.high));
    out.push_str(&format!("  severe: {}\n", t.severe));
    out.push('\n');

    out.push_str("Filters:\n");
    out.push_str(&format!(
        "  min_likelihood: {}\n",
        resolved
            .min_likelihood
            .map(|v| v.to_string())
            .unwrap_or_else(|| "none".to_string())
    ));
    out.push_str(&format!(
        "  top: {}\n",
        resolved
            .top_n
            .map(|v| v.to_string())
            .unwrap_or_else(|| "none".to_string())
    ));
    out
}
