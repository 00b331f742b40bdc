//! Value innovation index.
//!
//! Combines three upstream reports into one weighted score in `[0, 1]`:
//! how much buyer utility is left on the table (buyer utility gaps), how far
//! the value curve diverges from competitors (differentiation), and how close
//! costs are to target (target cost). An upstream report that was never
//! written contributes zero and shows up as a `null` source.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use ocean_core::artifact::{ArtifactKind, ArtifactStore};
use ocean_core::constants::{
    DEFAULT_WEIGHT_COST_REDUCTION, DEFAULT_WEIGHT_DIFFERENTIATION, DEFAULT_WEIGHT_UTILITY_GAIN,
    SCORE_SCALE_MAX,
};
use ocean_core::error::{ConfigError, OceanError};
use ocean_core::input::{self, lenient};
use ocean_core::numeric::{clamp_unit, mean, round_to};
use ocean_core::traits::Report;

const INDEX_DECIMALS: u32 = 3;

/// Component weights. When a config gives `weights`, any weight it leaves
/// out counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default, deserialize_with = "lenient::f64")]
    pub utility_gain: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub cost_reduction: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub differentiation: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            utility_gain: DEFAULT_WEIGHT_UTILITY_GAIN,
            cost_reduction: DEFAULT_WEIGHT_COST_REDUCTION,
            differentiation: DEFAULT_WEIGHT_DIFFERENTIATION,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValueInnovationConfig {
    #[serde(default)]
    pub weights: Option<Weights>,
}

impl ValueInnovationConfig {
    /// Load the config; a missing file means default weights.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(path = %path.display(), "value innovation config not found, using default weights");
            return Ok(Self::default());
        }
        input::load_json(path)
    }

    pub fn weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }
}

/// Explicit upstream report paths. Unset entries fall back to the manifest.
#[derive(Debug, Clone, Default)]
pub struct UpstreamPaths {
    pub buyer_utility: Option<PathBuf>,
    pub differentiation: Option<PathBuf>,
    pub target_cost: Option<PathBuf>,
}

/// A resolved upstream report and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub path: PathBuf,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Upstream {
    pub buyer_utility: Option<Loaded>,
    pub differentiation: Option<Loaded>,
    pub target_cost: Option<Loaded>,
}

impl Upstream {
    /// Resolve and read all three upstream reports. A report with no
    /// manifest entry and no explicit path is `None`; a recorded report that
    /// can't be read or fails its digest check is an error.
    pub fn load(store: &ArtifactStore, paths: &UpstreamPaths) -> Result<Self, OceanError> {
        Ok(Self {
            buyer_utility: load_one(store, ArtifactKind::BuyerUtility, paths.buyer_utility.as_deref())?,
            differentiation: load_one(
                store,
                ArtifactKind::Differentiation,
                paths.differentiation.as_deref(),
            )?,
            target_cost: load_one(store, ArtifactKind::TargetCost, paths.target_cost.as_deref())?,
        })
    }
}

fn load_one(
    store: &ArtifactStore,
    kind: ArtifactKind,
    explicit: Option<&Path>,
) -> Result<Option<Loaded>, OceanError> {
    let Some(artifact) = store.resolve_optional(kind, explicit)? else {
        debug!(%kind, "no upstream report");
        return Ok(None);
    };
    let value = store.read(&artifact)?;
    Ok(Some(Loaded {
        path: artifact.path,
        value,
    }))
}

fn number(report: &Value, field: &str) -> f64 {
    match report.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// `1 - mean gap score / 5`, or 1.0 when the report lists no gaps.
pub fn utility_gain(buyer_utility: Option<&Value>) -> f64 {
    let Some(report) = buyer_utility else {
        return 0.0;
    };
    let scores: Vec<f64> = report
        .get("gaps")
        .and_then(Value::as_array)
        .map(|gaps| gaps.iter().map(|g| number(g, "score")).collect())
        .unwrap_or_default();
    match mean(&scores) {
        Some(avg) => clamp_unit(1.0 - avg / SCORE_SCALE_MAX),
        None => 1.0,
    }
}

pub fn differentiation(report: Option<&Value>) -> f64 {
    report
        .map(|r| clamp_unit(number(r, "divergence_score") / SCORE_SCALE_MAX))
        .unwrap_or(0.0)
}

/// `1 - gap / current cost`; zero when there is no current cost.
pub fn cost_reduction(target_cost: Option<&Value>) -> f64 {
    let Some(report) = target_cost else {
        return 0.0;
    };
    let current = number(report, "current_cost");
    if current > 0.0 {
        clamp_unit(1.0 - number(report, "gap_to_target") / current)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexInputs {
    pub utility_gain: f64,
    pub cost_reduction: f64,
    pub differentiation: f64,
}

impl IndexInputs {
    pub fn from_upstream(upstream: &Upstream) -> Self {
        fn value(loaded: &Option<Loaded>) -> Option<&Value> {
            loaded.as_ref().map(|l| &l.value)
        }
        Self {
            utility_gain: utility_gain(value(&upstream.buyer_utility)),
            cost_reduction: cost_reduction(value(&upstream.target_cost)),
            differentiation: differentiation(value(&upstream.differentiation)),
        }
    }

    pub fn weighted(&self, w: &Weights) -> f64 {
        w.utility_gain * self.utility_gain
            + w.cost_reduction * self.cost_reduction
            + w.differentiation * self.differentiation
    }

    fn rounded(&self) -> Self {
        Self {
            utility_gain: round_to(self.utility_gain, INDEX_DECIMALS),
            cost_reduction: round_to(self.cost_reduction, INDEX_DECIMALS),
            differentiation: round_to(self.differentiation, INDEX_DECIMALS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sources {
    pub buyer_utility: Option<String>,
    pub differentiation: Option<String>,
    pub target_cost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueInnovationReport {
    pub date: String,
    pub inputs: IndexInputs,
    pub weights: Weights,
    pub value_innovation_index: f64,
    pub sources: Sources,
}

impl ValueInnovationReport {
    pub fn build(date: impl Into<String>, weights: Weights, upstream: &Upstream) -> Self {
        let inputs = IndexInputs::from_upstream(upstream);
        let index = inputs.weighted(&weights);
        let source = |l: &Option<Loaded>| l.as_ref().map(|l| l.path.display().to_string());
        Self {
            date: date.into(),
            inputs: inputs.rounded(),
            weights,
            value_innovation_index: round_to(index, INDEX_DECIMALS),
            sources: Sources {
                buyer_utility: source(&upstream.buyer_utility),
                differentiation: source(&upstream.differentiation),
                target_cost: source(&upstream.target_cost),
            },
        }
    }
}

impl Report for ValueInnovationReport {
    const KIND: ArtifactKind = ArtifactKind::ValueInnovation;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}
