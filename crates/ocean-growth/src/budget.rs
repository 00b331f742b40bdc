//! Launch budget projection.
//!
//! Converts the base-case seed creator requirement into a PJM token budget
//! and its USD equivalent. Each seed creator receives a starter reward plus a
//! boost, capped per creator; the total is then scaled by a contingency
//! multiplier per scenario. The projector refuses to run without a usable seed
//! estimate: a wrong budget is worse than none.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use ocean_core::artifact::{ArtifactKind, ArtifactRef};
use ocean_core::constants::MONEY_DECIMALS;
use ocean_core::error::{ConfigError, DependencyError};
use ocean_core::input::{lenient, require_non_negative};
use ocean_core::numeric::round_to;
use ocean_core::traits::Report;

use crate::scenario::Scenarios;

/// Reward and exchange-rate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInputs {
    #[serde(deserialize_with = "lenient::f64")]
    pub pjm_usd_rate: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub starter_reward_pjm: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub boost_reward_pjm_equivalent: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub max_pjm_per_creator: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BudgetInputs {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("pjm_usd_rate", self.pjm_usd_rate)?;
        require_non_negative("starter_reward_pjm", self.starter_reward_pjm)?;
        require_non_negative("boost_reward_pjm_equivalent", self.boost_reward_pjm_equivalent)?;
        require_non_negative("max_pjm_per_creator", self.max_pjm_per_creator)?;
        Ok(())
    }

    /// Reward paid to one seed creator: starter plus boost, never above the cap.
    pub fn per_creator_pjm(&self) -> f64 {
        self.max_pjm_per_creator
            .min(self.starter_reward_pjm + self.boost_reward_pjm_equivalent)
    }
}

/// Budget under one contingency multiplier. Monetary totals are rounded to
/// cents; `total_usd` is derived from the unrounded PJM total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetScenario {
    pub seed_creators: u64,
    pub per_creator_pjm: f64,
    pub total_pjm: f64,
    pub total_usd: f64,
    pub multiplier: f64,
}

/// Project low/base/high budgets for `seed_creators` seed creators.
pub fn project(inputs: &BudgetInputs, seed_creators: u64) -> Scenarios<BudgetScenario> {
    let per_creator_pjm = inputs.per_creator_pjm();
    Scenarios::from_fn(|case| {
        let multiplier = case.budget_multiplier();
        let total_pjm = seed_creators as f64 * per_creator_pjm * multiplier;
        let total_usd = total_pjm * inputs.pjm_usd_rate;
        debug!(case = case.as_str(), total_pjm, total_usd, "budget scenario");
        BudgetScenario {
            seed_creators,
            per_creator_pjm,
            total_pjm: round_to(total_pjm, MONEY_DECIMALS),
            total_usd: round_to(total_usd, MONEY_DECIMALS),
            multiplier,
        }
    })
}

/// Pull `estimates.base.seed_creators_required` out of a seed report.
///
/// The value must be present and positive. Integral floats (`143.0`) are
/// accepted; fractional ones are rounded up.
pub fn base_seed_creators(seed_report: &Value, source: &ArtifactRef) -> Result<u64, DependencyError> {
    let missing = || DependencyError::MissingField {
        path: source.path.display().to_string(),
        field: "estimates.base.seed_creators_required".to_string(),
    };

    let raw = seed_report
        .get("estimates")
        .and_then(|e| e.get("base"))
        .and_then(|b| b.get("seed_creators_required"))
        .ok_or_else(missing)?;

    if let Some(n) = raw.as_u64() {
        return if n > 0 { Ok(n) } else { Err(missing()) };
    }
    match raw.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => Ok(f.ceil() as u64),
        _ => Err(missing()),
    }
}

/// The launch budget report artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub date: String,
    pub inputs: BudgetInputs,
    pub seed_report: String,
    pub seed_digest: Option<String>,
    pub scenarios: Scenarios<BudgetScenario>,
}

impl BudgetReport {
    pub fn build(
        date: impl Into<String>,
        inputs: BudgetInputs,
        seed_source: &ArtifactRef,
        seed_creators: u64,
    ) -> Result<Self, ConfigError> {
        inputs.validate()?;
        let scenarios = project(&inputs, seed_creators);
        Ok(Self {
            date: date.into(),
            inputs,
            seed_report: seed_source.path.display().to_string(),
            seed_digest: seed_source.digest.clone(),
            scenarios,
        })
    }
}

impl Report for BudgetReport {
    const KIND: ArtifactKind = ArtifactKind::LaunchBudget;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}
