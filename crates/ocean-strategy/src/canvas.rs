//! Strategy canvas diagnostics.
//!
//! A canvas scores every profile (our offering and its competitors) on the
//! same list of competing factors. Two diagnostics come out of it: focus, the
//! share of factors where we invest heavily, and divergence, how far our
//! value curve sits from the average competitor curve.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use ocean_core::artifact::ArtifactKind;
use ocean_core::constants::{HIGH_SCORE_THRESHOLD, MAX_TAGLINE_WORDS};
use ocean_core::error::ConfigError;
use ocean_core::numeric::{mean, round_to};
use ocean_core::traits::Report;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub scores: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrategyCanvasConfig {
    #[serde(default)]
    pub factors: Vec<Value>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub tagline_candidates: Vec<String>,
}

impl StrategyCanvasConfig {
    /// Require at least one factor and one profile, and exactly one score per
    /// factor in every profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.factors.is_empty() {
            return Err(ConfigError::Empty("strategy canvas factors".into()));
        }
        if self.profiles.is_empty() {
            return Err(ConfigError::Empty("strategy canvas profiles".into()));
        }
        let expected = self.factors.len();
        for (i, profile) in self.profiles.iter().enumerate() {
            if profile.scores.len() != expected {
                let name = profile.id.clone().unwrap_or_else(|| format!("#{i}"));
                return Err(ConfigError::InvalidValue {
                    field: format!("profiles[{name}].scores"),
                    reason: format!("has {} scores, expected {expected}", profile.scores.len()),
                });
            }
        }
        Ok(())
    }

    /// The profile with id `focal_id`, falling back to the first profile.
    pub fn focal_profile(&self, focal_id: &str) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.id.as_deref() == Some(focal_id))
            .or_else(|| self.profiles.first())
    }
}

/// Share of scores at or above the high-investment threshold (2 dp).
pub fn focus_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let high = scores.iter().filter(|&&s| s >= HIGH_SCORE_THRESHOLD).count();
    round_to(high as f64 / scores.len() as f64, 2)
}

/// Mean absolute distance between `ours` and the per-factor competitor mean
/// (2 dp). Zero without competitors.
pub fn divergence_score(ours: &[f64], competitors: &[&[f64]]) -> f64 {
    if ours.is_empty() || competitors.is_empty() {
        return 0.0;
    }
    let factors = competitors.iter().map(|c| c.len()).min().unwrap_or(0).min(ours.len());
    let diffs: Vec<f64> = (0..factors)
        .map(|i| {
            let column: Vec<f64> = competitors.iter().map(|c| c[i]).collect();
            let avg = mean(&column).unwrap_or(0.0);
            (ours[i] - avg).abs()
        })
        .collect();
    mean(&diffs).map(|d| round_to(d, 2)).unwrap_or(0.0)
}

/// First candidate short enough to be a tagline.
pub fn select_tagline(candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .find(|c| c.split_whitespace().count() <= MAX_TAGLINE_WORDS)
        .cloned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSummary {
    pub focus_score: f64,
    pub divergence_score: f64,
    pub tagline_candidate: Option<String>,
}

/// Full canvas snapshot with its diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasSnapshot {
    pub date: String,
    pub factors: Vec<Value>,
    pub profiles: Vec<Profile>,
    pub summary: CanvasSummary,
}

/// Diagnostics only; consumed by the value innovation index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferentiationReport {
    pub date: String,
    pub focus_score: f64,
    pub divergence_score: f64,
    pub tagline_candidate: Option<String>,
    pub focal_profile: Option<String>,
}

/// Validate the canvas and compute both reports.
pub fn analyze(
    date: &str,
    config: StrategyCanvasConfig,
    focal_id: &str,
) -> Result<(CanvasSnapshot, DifferentiationReport), ConfigError> {
    config.validate()?;
    let focal = config
        .focal_profile(focal_id)
        .ok_or_else(|| ConfigError::Empty("strategy canvas profiles".into()))?;

    let competitors: Vec<&[f64]> = config
        .profiles
        .iter()
        .filter(|p| p.id != focal.id)
        .map(|p| p.scores.as_slice())
        .collect();

    let summary = CanvasSummary {
        focus_score: focus_score(&focal.scores),
        divergence_score: divergence_score(&focal.scores, &competitors),
        tagline_candidate: select_tagline(&config.tagline_candidates),
    };
    debug!(
        focal = focal.id.as_deref().unwrap_or("-"),
        competitors = competitors.len(),
        focus = summary.focus_score,
        divergence = summary.divergence_score,
        "canvas analyzed"
    );

    let differentiation = DifferentiationReport {
        date: date.to_string(),
        focus_score: summary.focus_score,
        divergence_score: summary.divergence_score,
        tagline_candidate: summary.tagline_candidate.clone(),
        focal_profile: focal.label.clone(),
    };
    let snapshot = CanvasSnapshot {
        date: date.to_string(),
        factors: config.factors,
        profiles: config.profiles,
        summary,
    };
    Ok((snapshot, differentiation))
}

impl Report for CanvasSnapshot {
    const KIND: ArtifactKind = ArtifactKind::StrategyCanvas;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

impl Report for DifferentiationReport {
    const KIND: ArtifactKind = ArtifactKind::Differentiation;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}
