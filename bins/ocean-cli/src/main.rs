//! ocean — launch-planning and strategy analytics from the command line.
//!
//! Every subcommand reads one JSON config, computes one report and writes it
//! under the reports directory, recording it in the artifact manifest so that
//! downstream subcommands (the launch budget, the value innovation index) can
//! find and verify it.

mod growth;
mod strategy;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ocean_core::artifact::ArtifactStore;
use ocean_core::date::report_date;
use ocean_core::Settings;
use tracing::debug;

/// Launch-planning and blue-ocean strategy reports.
#[derive(Parser, Debug)]
#[command(name = "ocean", version, about = "Launch-planning and strategy analytics")]
struct Cli {
    /// Settings file (replaces ocean.toml lookup)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate seed creators needed to reach the stream target.
    Seed(growth::SeedArgs),
    /// Project the launch budget from the latest seed estimate.
    Budget(growth::BudgetArgs),
    /// Summarize experiment variants from an event log.
    Experiment(growth::ExperimentArgs),
    /// Compute the price corridor of the mass.
    PriceCorridor(strategy::PriceCorridorArgs),
    /// Compute target cost and the gap to it.
    TargetCost(strategy::TargetCostArgs),
    /// Sum ERRC cost-driver impacts.
    CostDrivers(strategy::CostDriverArgs),
    /// List buyer utility map gaps.
    BuyerUtility(strategy::BuyerUtilityArgs),
    /// Strategy canvas snapshot and differentiation diagnostics.
    Canvas(strategy::CanvasArgs),
    /// Value innovation index from the utility, canvas and cost reports.
    ValueInnovation(strategy::ValueInnovationArgs),
    /// Check required adoption-hurdle mitigations per feature.
    AdoptionHurdles(strategy::AdoptionHurdlesArgs),
    /// Check strategic sequence thresholds per feature.
    StrategicSequence(strategy::StrategicSequenceArgs),
}

/// Date and output options shared by dated reports.
#[derive(Args, Debug, Clone)]
pub(crate) struct ReportArgs {
    /// Report date, YYYY-MM-DD (default: today, UTC)
    #[arg(long)]
    date: Option<String>,

    /// Output JSON path (default: reports/<name>_<date>.json)
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ReportArgs {
    pub(crate) fn date(&self) -> Result<String> {
        Ok(report_date(self.date.as_deref())?)
    }
}

/// Settings and the artifact store, shared by every subcommand.
pub(crate) struct App {
    pub settings: Settings,
    pub store: ArtifactStore,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let settings = Settings::load(cli.settings.as_deref()).context("failed to load settings")?;
    debug!(?settings, "settings loaded");
    let app = App {
        store: ArtifactStore::from_settings(&settings),
        settings,
    };

    match cli.command {
        Commands::Seed(args) => growth::seed(&app, args),
        Commands::Budget(args) => growth::budget(&app, args),
        Commands::Experiment(args) => growth::experiment(&app, args),
        Commands::PriceCorridor(args) => strategy::price_corridor(&app, args),
        Commands::TargetCost(args) => strategy::target_cost(&app, args),
        Commands::CostDrivers(args) => strategy::cost_drivers(&app, args),
        Commands::BuyerUtility(args) => strategy::buyer_utility(&app, args),
        Commands::Canvas(args) => strategy::canvas(&app, args),
        Commands::ValueInnovation(args) => strategy::value_innovation(&app, args),
        Commands::AdoptionHurdles(args) => strategy::adoption_hurdles(&app, args),
        Commands::StrategicSequence(args) => strategy::strategic_sequence(&app, args),
    }
}

/// Print the path of a written report.
pub(crate) fn wrote(path: &std::path::Path) {
    println!("Wrote {}", path.display());
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides `level_str`.
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
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_seed_with_globals() {
        let cli = Cli::try_parse_from([
            "ocean",
            "--log-format",
            "json",
            "seed",
            "--date",
            "2026-03-01",
            "--sensitivity",
            "0.1",
        ])
        .unwrap();
        assert_eq!(cli.log_format, "json");
        match cli.command {
            Commands::Seed(args) => {
                assert_eq!(args.report.date.as_deref(), Some("2026-03-01"));
                assert_eq!(args.sensitivity, Some(0.1));
                assert_eq!(args.config, PathBuf::from("config/viral_model_inputs.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn checks_require_features() {
        assert!(Cli::try_parse_from(["ocean", "adoption-hurdles"]).is_err());
        assert!(
            Cli::try_parse_from(["ocean", "strategic-sequence", "--features", "f.json"]).is_ok()
        );
    }

    #[test]
    fn invalid_report_date_rejected() {
        let args = ReportArgs {
            date: Some("2026-02-30".into()),
            out: None,
        };
        assert!(args.date().is_err());
    }
}
