//! Strategy subcommands.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use ocean_core::input;
use ocean_strategy::canvas::analyze as analyze_canvas;
use ocean_strategy::readiness::FeatureList;
use ocean_strategy::{
    AdoptionHurdlesConfig, AdoptionHurdlesReport, BuyerUtilityConfig, BuyerUtilityReport,
    CostDriverMap, CostDriverReport, MitigatedFeature, PriceCorridorConfig, PriceCorridorReport,
    SequencedFeature, StrategicSequenceConfig, StrategicSequenceReport, StrategyCanvasConfig,
    TargetCostConfig, TargetCostReport, Upstream, UpstreamPaths, ValueInnovationConfig,
    ValueInnovationReport,
};
use tracing::{info, warn};

use crate::{wrote, App, ReportArgs};

// ---------------------------------------------------------------------------
// Pricing and costing
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub(crate) struct PriceCorridorArgs {
    /// Price corridor config
    #[arg(long, default_value = "config/price_corridor.json")]
    pub(crate) config: PathBuf,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn price_corridor(app: &App, args: PriceCorridorArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let config: PriceCorridorConfig = input::load_json(&args.config)?;
    let report = PriceCorridorReport::build(&date, config)
        .with_context(|| format!("no usable prices in {}", args.config.display()))?;
    info!(
        low = report.corridor.low,
        mid = report.corridor.mid,
        high = report.corridor.high,
        "price corridor computed"
    );
    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

#[derive(Args, Debug)]
pub(crate) struct TargetCostArgs {
    /// Target costing config
    #[arg(long, default_value = "config/target_costing.json")]
    pub(crate) config: PathBuf,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn target_cost(app: &App, args: TargetCostArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let config: TargetCostConfig = input::load_json(&args.config)?;
    let report = TargetCostReport::build(&date, config);
    info!(gap = report.gap_to_target, "target cost computed");
    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

#[derive(Args, Debug)]
pub(crate) struct CostDriverArgs {
    /// ERRC cost-driver map
    #[arg(long, default_value = "config/cost_driver_map.json")]
    pub(crate) config: PathBuf,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn cost_drivers(app: &App, args: CostDriverArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let map: CostDriverMap = input::load_json(&args.config)?;
    let report = CostDriverReport::build(&date, map);
    info!(total = report.total_cost_delta, factors = report.factors.len(), "cost drivers summed");
    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Utility, canvas and value innovation
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub(crate) struct BuyerUtilityArgs {
    /// Buyer utility map config
    #[arg(long, default_value = "config/buyer_utility_map.json")]
    pub(crate) config: PathBuf,

    /// Gap threshold, inclusive (default: from settings)
    #[arg(long)]
    pub(crate) threshold: Option<i64>,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn buyer_utility(app: &App, args: BuyerUtilityArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let config: BuyerUtilityConfig = input::load_json(&args.config)?;
    let threshold = args.threshold.unwrap_or(app.settings.utility_gap_threshold);
    let report = BuyerUtilityReport::build(&date, &config, threshold)
        .with_context(|| format!("invalid buyer utility scores in {}", args.config.display()))?;
    info!(total_gaps = report.total_gaps, threshold, "buyer utility gaps found");
    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

#[derive(Args, Debug)]
pub(crate) struct CanvasArgs {
    /// Strategy canvas config
    #[arg(long, default_value = "config/strategy_canvas.json")]
    pub(crate) config: PathBuf,

    /// Report date, YYYY-MM-DD (default: today, UTC)
    #[arg(long)]
    pub(crate) date: Option<String>,

    /// Canvas snapshot output
    #[arg(long)]
    pub(crate) out_snapshot: Option<PathBuf>,

    /// Differentiation report output
    #[arg(long)]
    pub(crate) out_diff: Option<PathBuf>,
}

pub(crate) fn canvas(app: &App, args: CanvasArgs) -> Result<ExitCode> {
    let date = ocean_core::date::report_date(args.date.as_deref())?;
    let config: StrategyCanvasConfig = input::load_json(&args.config)?;
    let (snapshot, differentiation) = analyze_canvas(&date, config, &app.settings.focal_profile)
        .with_context(|| format!("invalid strategy canvas in {}", args.config.display()))?;
    if differentiation.tagline_candidate.is_none() {
        warn!("no tagline candidate is short enough");
    }

    let written = app.store.write_report(&snapshot, args.out_snapshot.as_deref())?;
    wrote(&written.path);
    let written = app.store.write_report(&differentiation, args.out_diff.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

#[derive(Args, Debug)]
pub(crate) struct ValueInnovationArgs {
    /// Index weights config (missing file: default weights)
    #[arg(long, default_value = "config/value_innovation_index.json")]
    pub(crate) config: PathBuf,

    /// Buyer utility report (default: from the manifest)
    #[arg(long)]
    pub(crate) buyer_utility: Option<PathBuf>,

    /// Differentiation report (default: from the manifest)
    #[arg(long)]
    pub(crate) differentiation: Option<PathBuf>,

    /// Target cost report (default: from the manifest)
    #[arg(long)]
    pub(crate) target_cost: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn value_innovation(app: &App, args: ValueInnovationArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let config = ValueInnovationConfig::load(&args.config)?;
    let paths = UpstreamPaths {
        buyer_utility: args.buyer_utility,
        differentiation: args.differentiation,
        target_cost: args.target_cost,
    };
    let upstream = Upstream::load(&app.store, &paths).context("failed to read upstream reports")?;

    let report = ValueInnovationReport::build(&date, config.weights(), &upstream);
    info!(index = report.value_innovation_index, "value innovation index computed");
    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Readiness checks
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub(crate) struct AdoptionHurdlesArgs {
    /// Adoption hurdles config
    #[arg(long, default_value = "config/adoption_hurdles.json")]
    pub(crate) config: PathBuf,

    /// Features with their mitigations
    #[arg(long)]
    pub(crate) features: PathBuf,

    /// Output JSON path (default: reports/adoption_hurdles_check.json)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn adoption_hurdles(app: &App, args: AdoptionHurdlesArgs) -> Result<ExitCode> {
    let config: AdoptionHurdlesConfig = input::load_json(&args.config)?;
    let features: FeatureList<MitigatedFeature> = input::load_json(&args.features)?;
    let report = AdoptionHurdlesReport::build(&config, &features.into_features());

    let written = app.store.write_report(&report, args.out.as_deref())?;
    wrote(&written.path);
    Ok(check_status("adoption hurdles", report.fail_count))
}

#[derive(Args, Debug)]
pub(crate) struct StrategicSequenceArgs {
    /// Strategic sequence thresholds
    #[arg(long, default_value = "config/strategic_sequence.json")]
    pub(crate) config: PathBuf,

    /// Features with their sequence scores
    #[arg(long)]
    pub(crate) features: PathBuf,

    /// Output JSON path (default: reports/strategic_sequence_check.json)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn strategic_sequence(app: &App, args: StrategicSequenceArgs) -> Result<ExitCode> {
    let config: StrategicSequenceConfig = input::load_json(&args.config)?;
    let features: FeatureList<SequencedFeature> = input::load_json(&args.features)?;
    let report = StrategicSequenceReport::build(&config, &features.into_features());

    let written = app.store.write_report(&report, args.out.as_deref())?;
    wrote(&written.path);
    Ok(check_status("strategic sequence", report.fail_count))
}

fn check_status(check: &str, fail_count: usize) -> ExitCode {
    if fail_count == 0 {
        info!(check, "all features pass");
        ExitCode::SUCCESS
    } else {
        warn!(check, fail_count, "features failing");
        ExitCode::FAILURE
    }
}
