//! Launch readiness checks over a feature list.
//!
//! Both checks read a features file (`{"features": [...]}` or a bare array)
//! and report the features that fail. A failing feature makes the check fail
//! as a whole.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ocean_core::artifact::ArtifactKind;
use ocean_core::input::lenient;
use ocean_core::traits::Report;

/// Features file contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeatureList<T> {
    Wrapped { features: Vec<T> },
    Bare(Vec<T>),
}

impl<T> FeatureList<T> {
    pub fn into_features(self) -> Vec<T> {
        match self {
            Self::Wrapped { features } => features,
            Self::Bare(features) => features,
        }
    }
}

// ---------------------------------------------------------------------------
// Adoption hurdles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdoptionHurdlesConfig {
    #[serde(default)]
    pub mitigations_required: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MitigatedFeature {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub mitigations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingMitigations {
    pub id: Value,
    pub missing_mitigations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionHurdlesReport {
    pub total_features: usize,
    pub fail_count: usize,
    pub failing_features: Vec<MissingMitigations>,
    pub required_mitigations: Vec<String>,
}

impl AdoptionHurdlesReport {
    pub fn build(config: &AdoptionHurdlesConfig, features: &[MitigatedFeature]) -> Self {
        let required: BTreeSet<&str> = config.mitigations_required.iter().map(String::as_str).collect();
        let failing_features: Vec<MissingMitigations> = features
            .iter()
            .filter_map(|f| {
                let have: BTreeSet<&str> = f.mitigations.iter().map(String::as_str).collect();
                let missing: Vec<String> =
                    required.difference(&have).map(|m| m.to_string()).collect();
                (!missing.is_empty()).then(|| MissingMitigations {
                    id: f.id.clone(),
                    missing_mitigations: missing,
                })
            })
            .collect();
        Self {
            total_features: features.len(),
            fail_count: failing_features.len(),
            failing_features,
            required_mitigations: required.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn passed(&self) -> bool {
        self.fail_count == 0
    }
}

impl Report for AdoptionHurdlesReport {
    const KIND: ArtifactKind = ArtifactKind::AdoptionHurdles;

    fn date(&self) -> Option<&str> {
        None
    }
}

// ---------------------------------------------------------------------------
// Strategic sequence
// ---------------------------------------------------------------------------

/// Minimum score per sequence step. Unset minima are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceThresholds {
    #[serde(default, deserialize_with = "lenient::f64")]
    pub utility_score_min: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price_score_min: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub cost_score_min: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub adoption_readiness_min: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StrategicSequenceConfig {
    #[serde(default)]
    pub thresholds: SequenceThresholds,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SequencedFeature {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub utility_score: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price_score: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub cost_score: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub adoption_readiness: f64,
}

/// Which sequence steps a feature clears: utility, then price, cost and
/// adoption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceChecks {
    pub utility: bool,
    pub price: bool,
    pub cost: bool,
    pub adoption: bool,
}

impl SequenceChecks {
    pub fn evaluate(feature: &SequencedFeature, t: &SequenceThresholds) -> Self {
        Self {
            utility: feature.utility_score >= t.utility_score_min,
            price: feature.price_score >= t.price_score_min,
            cost: feature.cost_score >= t.cost_score_min,
            adoption: feature.adoption_readiness >= t.adoption_readiness_min,
        }
    }

    pub fn all(&self) -> bool {
        self.utility && self.price && self.cost && self.adoption
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceFailure {
    pub id: Value,
    pub checks: SequenceChecks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategicSequenceReport {
    pub total_features: usize,
    pub failing_features: Vec<SequenceFailure>,
    pub fail_count: usize,
}

impl StrategicSequenceReport {
    pub fn build(config: &StrategicSequenceConfig, features: &[SequencedFeature]) -> Self {
        let failing_features: Vec<SequenceFailure> = features
            .iter()
            .filter_map(|f| {
                let checks = SequenceChecks::evaluate(f, &config.thresholds);
                (!checks.all()).then(|| SequenceFailure {
                    id: f.id.clone(),
                    checks,
                })
            })
            .collect();
        Self {
            total_features: features.len(),
            fail_count: failing_features.len(),
            failing_features,
        }
    }

    pub fn passed(&self) -> bool {
        self.fail_count == 0
    }
}

impl Report for StrategicSequenceReport {
    const KIND: ArtifactKind = ArtifactKind::StrategicSequence;

    fn date(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_list_shapes() {
        let wrapped: FeatureList<MitigatedFeature> =
            serde_json::from_value(json!({"features": [{"id": "a"}, {"id": "b"}]})).unwrap();
        let bare: FeatureList<MitigatedFeature> = serde_json::from_value(json!([{"id": 1}])).unwrap();
        assert_eq!(wrapped.into_features().len(), 2);
        assert_eq!(bare.into_features()[0].id, json!(1));
    }

    // --- adoption hurdles ---

    fn hurdles() -> AdoptionHurdlesConfig {
        serde_json::from_value(json!({
            "mitigations_required": ["tutorial", "free_trial", "refund"]
        }))
        .unwrap()
    }

    #[test]
    fn missing_mitigations_are_sorted() {
        let features: Vec<MitigatedFeature> = serde_json::from_value(json!([
            {"id": "duet", "mitigations": ["tutorial", "free_trial", "refund", "faq"]},
            {"id": "stage", "mitigations": ["tutorial"]},
            {"mitigations": []}
        ]))
        .unwrap();
        let r = AdoptionHurdlesReport::build(&hurdles(), &features);
        assert_eq!(r.total_features, 3);
        assert_eq!(r.fail_count, 2);
        assert!(!r.passed());
        assert_eq!(r.failing_features[0].id, json!("stage"));
        assert_eq!(r.failing_features[0].missing_mitigations, vec!["free_trial", "refund"]);
        assert_eq!(r.failing_features[1].id, Value::Null);
        assert_eq!(r.failing_features[1].missing_mitigations.len(), 3);
        assert_eq!(r.required_mitigations, vec!["free_trial", "refund", "tutorial"]);
    }

    #[test]
    fn nothing_required_always_passes() {
        let features = vec![MitigatedFeature::default()];
        let r = AdoptionHurdlesReport::build(&AdoptionHurdlesConfig::default(), &features);
        assert!(r.passed());
        assert!(r.required_mitigations.is_empty());
    }

    #[test]
    fn hurdles_report_is_undated() {
        let r = AdoptionHurdlesReport::build(&hurdles(), &[]);
        assert_eq!(r.date(), None);
        assert!(r.passed());
    }

    // --- strategic sequence ---

    fn sequence() -> StrategicSequenceConfig {
        serde_json::from_value(json!({"thresholds": {
            "utility_score_min": 3,
            "price_score_min": "2.5",
            "cost_score_min": 2
        }}))
        .unwrap()
    }

    #[test]
    fn failing_steps_are_reported() {
        let features: Vec<SequencedFeature> = serde_json::from_value(json!([
            {"id": "duet", "utility_score": 4, "price_score": 3, "cost_score": 2, "adoption_readiness": 0},
            {"id": "stage", "utility_score": 2, "price_score": 3, "cost_score": 1}
        ]))
        .unwrap();
        let r = StrategicSequenceReport::build(&sequence(), &features);
        assert_eq!(r.total_features, 2);
        assert_eq!(r.fail_count, 1);
        assert_eq!(r.failing_features[0].id, json!("stage"));
        assert_eq!(
            r.failing_features[0].checks,
            SequenceChecks {
                utility: false,
                price: true,
                cost: false,
                adoption: true
            }
        );
    }

    #[test]
    fn default_thresholds_pass_missing_scores() {
        let r = StrategicSequenceReport::build(
            &StrategicSequenceConfig::default(),
            &[SequencedFeature::default()],
        );
        assert!(r.passed());
    }

    #[test]
    fn sequence_report_serializes_check_map() {
        let features = vec![SequencedFeature {
            id: json!("x"),
            ..Default::default()
        }];
        let r = StrategicSequenceReport::build(&sequence(), &features);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v["failing_features"][0]["checks"],
            json!({"utility": false, "price": false, "cost": false, "adoption": true})
        );
    }
}
