//! Buyer utility map gaps.
//!
//! The buyer utility map scores each utility lever (simplicity, fun, risk, ...)
//! at each stage of the buyer experience cycle. Low scores are the gaps a
//! value innovation should close.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ocean_core::artifact::ArtifactKind;
use ocean_core::constants::MAX_REPORTED_UTILITY_GAPS;
use ocean_core::error::ConfigError;
use ocean_core::traits::Report;

/// `scores[stage][lever]`, in file order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuyerUtilityConfig {
    #[serde(default)]
    pub scores: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityGap {
    pub stage: String,
    pub lever: String,
    pub score: f64,
    pub name: String,
}

/// Every stage/lever scored at or below `threshold`, lowest first. Ties keep
/// file order. Scores may be any JSON number.
pub fn score_gaps(scores: &Map<String, Value>, threshold: i64) -> Result<Vec<UtilityGap>, ConfigError> {
    let mut gaps = Vec::new();
    for (stage, levers) in scores {
        let levers = levers.as_object().ok_or_else(|| ConfigError::InvalidValue {
            field: format!("scores.{stage}"),
            reason: "expected an object of lever scores".into(),
        })?;
        for (lever, value) in levers {
            let score = value.as_f64().ok_or_else(|| ConfigError::InvalidValue {
                field: format!("scores.{stage}.{lever}"),
                reason: format!("{value} is not a numeric score"),
            })?;
            if score <= threshold as f64 {
                gaps.push(UtilityGap {
                    stage: stage.clone(),
                    lever: lever.clone(),
                    score,
                    name: format!("{stage}:{lever}"),
                });
            }
        }
    }
    gaps.sort_by(|a, b| a.score.total_cmp(&b.score));
    Ok(gaps)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyerUtilityReport {
    pub date: String,
    pub threshold: i64,
    /// The lowest-scoring gaps, at most ten.
    pub gaps: Vec<UtilityGap>,
    pub total_gaps: usize,
}

impl BuyerUtilityReport {
    pub fn build(
        date: impl Into<String>,
        config: &BuyerUtilityConfig,
        threshold: i64,
    ) -> Result<Self, ConfigError> {
        let mut gaps = score_gaps(&config.scores, threshold)?;
        let total_gaps = gaps.len();
        gaps.truncate(MAX_REPORTED_UTILITY_GAPS);
        Ok(Self {
            date: date.into(),
            threshold,
            gaps,
            total_gaps,
        })
    }
}

impl Report for BuyerUtilityReport {
    const KIND: ArtifactKind = ArtifactKind::BuyerUtility;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(v: Value) -> BuyerUtilityConfig {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn gaps_sorted_by_score_with_stable_ties() {
        let cfg = config(json!({"scores": {
            "purchase": {"simplicity": 2, "fun": 4, "risk": 1},
            "use": {"convenience": 2, "fun": 5}
        }}));
        let gaps = score_gaps(&cfg.scores, 2).unwrap();
        let names: Vec<&str> = gaps.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["purchase:risk", "purchase:simplicity", "use:convenience"]);
    }

    #[test]
    fn report_caps_listed_gaps() {
        let levers: Map<String, Value> = (0..15).map(|i| (format!("l{i:02}"), json!(1))).collect();
        let cfg = BuyerUtilityConfig {
            scores: [("use".to_string(), Value::Object(levers))].into_iter().collect(),
        };
        let r = BuyerUtilityReport::build("2026-01-12", &cfg, 2).unwrap();
        assert_eq!(r.total_gaps, 15);
        assert_eq!(r.gaps.len(), 10);
        assert_eq!(r.gaps[0].name, "use:l00");
    }

    #[test]
    fn threshold_is_inclusive() {
        let cfg = config(json!({"scores": {"use": {"fun": 3}}}));
        assert_eq!(score_gaps(&cfg.scores, 3).unwrap().len(), 1);
        assert_eq!(score_gaps(&cfg.scores, 2).unwrap().len(), 0);
    }

    #[test]
    fn fractional_scores_are_compared_numerically() {
        let cfg = config(json!({"scores": {"use": {"fun": 2.0, "risk": 1.5, "ease": 2.5}}}));
        let gaps = score_gaps(&cfg.scores, 2).unwrap();
        let found: Vec<(&str, f64)> = gaps.iter().map(|g| (g.lever.as_str(), g.score)).collect();
        assert_eq!(found, vec![("risk", 1.5), ("fun", 2.0)]);
    }

    #[test]
    fn non_numeric_score_rejected() {
        let cfg = config(json!({"scores": {"use": {"fun": "high"}}}));
        assert!(matches!(
            score_gaps(&cfg.scores, 2),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "scores.use.fun"
        ));
    }

    #[test]
    fn empty_map_has_no_gaps() {
        let r = BuyerUtilityReport::build("2026-01-12", &config(json!({})), 2).unwrap();
        assert_eq!(r.total_gaps, 0);
        assert!(r.gaps.is_empty());
    }
}
