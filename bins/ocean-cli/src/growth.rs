//! Growth subcommands: seed estimate, launch budget, experiment summary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use ocean_core::artifact::ArtifactKind;
use ocean_core::input;
use ocean_growth::budget::base_seed_creators;
use ocean_growth::experiment::EventLog;
use ocean_growth::{BudgetInputs, ExperimentReport, ModelInputs, SeedReport};
use tracing::info;

use crate::{wrote, App, ReportArgs};

#[derive(Args, Debug)]
pub(crate) struct SeedArgs {
    /// Viral model inputs
    #[arg(long, default_value = "config/viral_model_inputs.json")]
    pub(crate) config: PathBuf,

    /// Sensitivity as a fraction, e.g. 0.2 for +/-20% (default: from settings)
    #[arg(long)]
    pub(crate) sensitivity: Option<f64>,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn seed(app: &App, args: SeedArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let inputs: ModelInputs = input::load_json(&args.config)?;
    let sensitivity = args.sensitivity.unwrap_or(app.settings.default_sensitivity);

    let report = SeedReport::build(&date, inputs, sensitivity)
        .with_context(|| format!("invalid viral model inputs in {}", args.config.display()))?;
    info!(
        base = report.base().seed_creators_required,
        r0 = report.base().r0,
        "seed estimate computed"
    );

    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

#[derive(Args, Debug)]
pub(crate) struct BudgetArgs {
    /// Budget inputs
    #[arg(long, default_value = "config/launch_budget_inputs.json")]
    pub(crate) config: PathBuf,

    /// Seed estimate report (default: the one recorded in the manifest)
    #[arg(long)]
    pub(crate) seed_report: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn budget(app: &App, args: BudgetArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let inputs: BudgetInputs = input::load_json(&args.config)?;

    let source = app
        .store
        .resolve(ArtifactKind::SeedEstimate, args.seed_report.as_deref())
        .context("no seed estimate to budget from; run `ocean seed` first")?;
    let seed = app.store.read(&source)?;
    let seed_creators = base_seed_creators(&seed, &source)?;
    info!(seed_creators, source = %source.path.display(), "seed estimate loaded");

    let report = ocean_growth::BudgetReport::build(&date, inputs, &source, seed_creators)
        .with_context(|| format!("invalid budget inputs in {}", args.config.display()))?;

    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}

#[derive(Args, Debug)]
pub(crate) struct ExperimentArgs {
    /// Experiment event log
    #[arg(long)]
    pub(crate) events: PathBuf,

    /// Only count events from this cohort date
    #[arg(long)]
    pub(crate) cohort_date: Option<String>,

    #[command(flatten)]
    pub(crate) report: ReportArgs,
}

pub(crate) fn experiment(app: &App, args: ExperimentArgs) -> Result<ExitCode> {
    let date = args.report.date()?;
    let log: EventLog = input::load_json(&args.events)?;
    let events = log.into_events();

    let report = ExperimentReport::build(&date, &events, args.cohort_date);
    info!(
        events = events.len(),
        variants = report.variants.len(),
        "experiment summarized"
    );

    let written = app.store.write_report(&report, args.report.out.as_deref())?;
    wrote(&written.path);
    Ok(ExitCode::SUCCESS)
}
