//! Viral seed estimation.
//!
//! Creators stream; viewers of a stream become creators themselves at a fixed
//! rate. One creator therefore yields `R0` new creators per generation
//! (24 hours), and after `cycles` generations a single seed creator has grown
//! into `1 + R0 + R0^2 + ... + R0^cycles` creators. Inverting that against a
//! stream target gives the number of seed creators a launch needs.
//!
//! Generations may be fractional (a 36-hour window is 1.5 cycles); the closed
//! form of the geometric sum is evaluated at the fractional exponent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use ocean_core::artifact::ArtifactKind;
use ocean_core::constants::{GENERATION_CYCLE_HOURS, UNIT_GROWTH_EPSILON};
use ocean_core::error::ConfigError;
use ocean_core::input::{lenient, require_non_negative};
use ocean_core::traits::Report;

use crate::scenario::{ScenarioCase, Scenarios};

/// Adoption funnel parameters. Loaded once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInputs {
    #[serde(deserialize_with = "lenient::f64")]
    pub time_window_hours: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub streams_per_creator_per_day: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub target_streams: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub avg_viewers_per_stream: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub view_to_creator_rate: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub creator_activation_rate: f64,
    /// Any other keys in the input file, echoed back in the report.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelInputs {
    /// Reject negative or non-finite parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("time_window_hours", self.time_window_hours)?;
        require_non_negative("streams_per_creator_per_day", self.streams_per_creator_per_day)?;
        require_non_negative("target_streams", self.target_streams)?;
        require_non_negative("avg_viewers_per_stream", self.avg_viewers_per_stream)?;
        require_non_negative("view_to_creator_rate", self.view_to_creator_rate)?;
        require_non_negative("creator_activation_rate", self.creator_activation_rate)?;
        Ok(())
    }

    /// Base reproduction rate: new creators per creator per generation.
    pub fn reproduction_rate(&self) -> f64 {
        self.avg_viewers_per_stream * self.view_to_creator_rate * self.creator_activation_rate
    }

    /// Generations elapsed in the time window, never negative.
    pub fn cycles(&self) -> f64 {
        generation_cycles(self.time_window_hours)
    }

    /// Streams one creator produces over the whole window.
    pub fn streams_per_creator_window(&self) -> f64 {
        self.streams_per_creator_per_day * (self.time_window_hours / GENERATION_CYCLE_HOURS)
    }
}

/// Fractional generations in `hours`, floored at zero.
pub fn generation_cycles(hours: f64) -> f64 {
    (hours / GENERATION_CYCLE_HOURS).max(0.0)
}

/// `1 + r0 + r0^2 + ... + r0^cycles`.
///
/// - `cycles <= 0`: only the seed generation counts, so exactly `1.0`.
/// - `|r0 - 1| < 1e-9`: every generation is the same size, `cycles + 1`.
/// - otherwise the closed form `(r0^(cycles+1) - 1) / (r0 - 1)`.
pub fn geometric_sum(r0: f64, cycles: f64) -> f64 {
    if cycles <= 0.0 {
        return 1.0;
    }
    if (r0 - 1.0).abs() < UNIT_GROWTH_EPSILON {
        return cycles + 1.0;
    }
    (r0.powf(cycles + 1.0) - 1.0) / (r0 - 1.0)
}

/// Seed requirement under one reproduction rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEstimate {
    pub r0: f64,
    pub creator_multiplier: f64,
    pub expected_streams_per_seed: f64,
    pub seed_creators_required: u64,
}

/// Estimate the seed creators needed to reach `inputs.target_streams` when
/// each creator reproduces at `r0`.
///
/// When a seed produces no streams at all the target is unreachable and the
/// requirement is reported as 0 rather than dividing by zero.
pub fn estimate_seed_creators(inputs: &ModelInputs, r0: f64) -> SeedEstimate {
    let creator_multiplier = geometric_sum(r0, inputs.cycles());
    let expected_streams_per_seed = creator_multiplier * inputs.streams_per_creator_window();

    let seed_creators_required = if expected_streams_per_seed <= 0.0 {
        0
    } else {
        // f64 -> u64 saturates.
        (inputs.target_streams / expected_streams_per_seed).ceil().max(0.0) as u64
    };

    SeedEstimate {
        r0,
        creator_multiplier,
        expected_streams_per_seed,
        seed_creators_required,
    }
}

/// Clamp a requested sensitivity to a non-negative fraction.
pub fn clamp_sensitivity(sensitivity: f64) -> f64 {
    if sensitivity.is_nan() {
        return 0.0;
    }
    sensitivity.max(0.0)
}

/// Low/base/high estimates with R0 perturbed by `±sensitivity`.
pub fn estimate_scenarios(inputs: &ModelInputs, sensitivity: f64) -> Scenarios<SeedEstimate> {
    let sensitivity = clamp_sensitivity(sensitivity);
    let r0_base = inputs.reproduction_rate();
    Scenarios::from_fn(|case| {
        let r0 = r0_base * case.r0_multiplier(sensitivity);
        let estimate = estimate_seed_creators(inputs, r0);
        debug!(
            case = case.as_str(),
            r0,
            multiplier = estimate.creator_multiplier,
            seeds = estimate.seed_creators_required,
            "seed scenario"
        );
        estimate
    })
}

/// Assumptions recorded alongside the estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedAssumptions {
    pub generation_cycle_hours: u32,
    pub sensitivity_pct: f64,
}

/// The seed estimate report artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub date: String,
    pub inputs: ModelInputs,
    pub assumptions: SeedAssumptions,
    pub estimates: Scenarios<SeedEstimate>,
}

impl SeedReport {
    /// Validate `inputs` and compute all three scenarios.
    ///
    /// Negative sensitivity is clamped to 0. Sensitivity above 1 is rejected:
    /// the low case would reproduce at a negative rate.
    pub fn build(
        date: impl Into<String>,
        inputs: ModelInputs,
        sensitivity: f64,
    ) -> Result<Self, ConfigError> {
        inputs.validate()?;
        let sensitivity = clamp_sensitivity(sensitivity);
        if sensitivity > 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "sensitivity".to_string(),
                reason: format!("{sensitivity} is above 1.0"),
            });
        }
        let estimates = estimate_scenarios(&inputs, sensitivity);
        Ok(Self {
            date: date.into(),
            inputs,
            assumptions: SeedAssumptions {
                generation_cycle_hours: GENERATION_CYCLE_HOURS as u32,
                sensitivity_pct: sensitivity,
            },
            estimates,
        })
    }

    /// The base-case seed estimate the budget projector consumes.
    pub fn base(&self) -> &SeedEstimate {
        self.estimates.get(ScenarioCase::Base)
    }
}

impl Report for SeedReport {
    const KIND: ArtifactKind = ArtifactKind::SeedEstimate;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inputs() -> ModelInputs {
        ModelInputs {
            time_window_hours: 48.0,
            streams_per_creator_per_day: 2.0,
            target_streams: 1000.0,
            avg_viewers_per_stream: 50.0,
            view_to_creator_rate: 0.02,
            creator_activation_rate: 0.5,
            extra: Map::new(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    // ------------------------------------------------------------------
    // geometric_sum
    // ------------------------------------------------------------------

    #[test]
    fn zero_cycles_is_one() {
        for r0 in [0.0, 0.5, 1.0, 3.0, 100.0] {
            assert_eq!(geometric_sum(r0, 0.0), 1.0);
        }
    }

    #[test]
    fn negative_cycles_is_one() {
        assert_eq!(geometric_sum(2.0, -3.0), 1.0);
    }

    #[test]
    fn unit_rate_is_linear() {
        assert_eq!(geometric_sum(1.0, 2.0), 3.0);
        assert_eq!(geometric_sum(1.0, 2.5), 3.5);
    }

    #[test]
    fn near_unit_rate_uses_linear_branch() {
        assert_eq!(geometric_sum(1.0 + 1e-10, 4.0), 5.0);
        assert_eq!(geometric_sum(1.0 - 1e-10, 4.0), 5.0);
    }

    #[test]
    fn half_rate_two_cycles() {
        assert!(close(geometric_sum(0.5, 2.0), 1.75));
    }

    #[test]
    fn zero_rate_counts_only_the_seed() {
        assert_eq!(geometric_sum(0.0, 5.0), 1.0);
    }

    // ------------------------------------------------------------------
    // estimates
    // ------------------------------------------------------------------

    #[test]
    fn reproduction_rate_is_product() {
        assert!(close(inputs().reproduction_rate(), 0.5));
    }

    #[test]
    fn worked_scenario_needs_143_seeds() {
        let est = estimate_seed_creators(&inputs(), 0.5);
        assert!(close(est.creator_multiplier, 1.75));
        assert!(close(est.expected_streams_per_seed, 7.0));
        assert_eq!(est.seed_creators_required, 143);
    }

    #[test]
    fn scenarios_scale_r0() {
        let s = estimate_scenarios(&inputs(), 0.2);
        assert!(close(s.low.r0, 0.4));
        assert!(close(s.base.r0, 0.5));
        assert!(close(s.high.r0, 0.6));
        assert_eq!(s.base.seed_creators_required, 143);
        // Faster reproduction never needs more seeds.
        assert!(s.high.seed_creators_required <= s.base.seed_creators_required);
        assert!(s.base.seed_creators_required <= s.low.seed_creators_required);
    }

    #[test]
    fn negative_sensitivity_clamped() {
        let s = estimate_scenarios(&inputs(), -0.5);
        assert_eq!(s.low.r0, s.base.r0);
        assert_eq!(s.high.r0, s.base.r0);
        assert_eq!(s.low, s.high);
    }

    #[test]
    fn no_streams_means_zero_seeds() {
        let mut i = inputs();
        i.streams_per_creator_per_day = 0.0;
        let est = estimate_seed_creators(&i, 0.5);
        assert_eq!(est.expected_streams_per_seed, 0.0);
        assert_eq!(est.seed_creators_required, 0);
    }

    #[test]
    fn zero_window_means_zero_seeds() {
        let mut i = inputs();
        i.time_window_hours = 0.0;
        let est = estimate_seed_creators(&i, 0.5);
        assert_eq!(est.creator_multiplier, 1.0);
        assert_eq!(est.seed_creators_required, 0);
    }

    #[test]
    fn zero_target_needs_no_seeds() {
        let mut i = inputs();
        i.target_streams = 0.0;
        assert_eq!(estimate_seed_creators(&i, 0.5).seed_creators_required, 0);
    }

    #[test]
    fn report_records_assumptions() {
        let report = SeedReport::build("2026-04-01", inputs(), -1.0).unwrap();
        assert_eq!(report.assumptions.generation_cycle_hours, 24);
        assert_eq!(report.assumptions.sensitivity_pct, 0.0);
        assert_eq!(report.base().seed_creators_required, 143);
    }

    #[test]
    fn report_rejects_sensitivity_above_one() {
        let mut i = inputs();
        i.time_window_hours = 36.0;
        let err = SeedReport::build("2026-01-01", i.clone(), 1.5).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "sensitivity"));

        let report = SeedReport::build("2026-01-01", i, 1.0).unwrap();
        assert_eq!(report.estimates.low.r0, 0.0);
        assert!(report.estimates.low.expected_streams_per_seed.is_finite());
    }

    #[test]
    fn report_rejects_negative_inputs() {
        let mut i = inputs();
        i.view_to_creator_rate = -0.02;
        let err = SeedReport::build("2026-04-01", i, 0.2).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "view_to_creator_rate"));
    }

    #[test]
    fn report_json_shape() {
        let report = SeedReport::build("2026-04-01", inputs(), 0.2).unwrap();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["date"], "2026-04-01");
        assert_eq!(v["assumptions"]["generation_cycle_hours"], 24);
        assert_eq!(v["estimates"]["base"]["seed_creators_required"], 143);
        for case in ["low", "base", "high"] {
            for field in ["r0", "creator_multiplier", "expected_streams_per_seed", "seed_creators_required"] {
                assert!(v["estimates"][case].get(field).is_some(), "{case}.{field} missing");
            }
        }
    }

    #[test]
    fn extra_input_keys_are_echoed() {
        let raw = serde_json::json!({
            "time_window_hours": 48,
            "streams_per_creator_per_day": "2",
            "target_streams": 1000,
            "avg_viewers_per_stream": 50,
            "view_to_creator_rate": 0.02,
            "creator_activation_rate": 0.5,
            "market": "bangkok"
        });
        let parsed: ModelInputs = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.streams_per_creator_per_day, 2.0);
        let echoed = serde_json::to_value(&parsed).unwrap();
        assert_eq!(echoed["market"], "bangkok");
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let raw = serde_json::json!({
            "time_window_hours": 48,
            "streams_per_creator_per_day": 2,
            "target_streams": 1000,
            "avg_viewers_per_stream": 50,
            "view_to_creator_rate": 0.02
        });
        assert!(serde_json::from_value::<ModelInputs>(raw).is_err());
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn closed_form_matches_direct_sum(r0 in 0.01f64..3.0, n in 0u32..=10) {
            prop_assume!((r0 - 1.0).abs() > 1e-6);
            let direct: f64 = (0..=n).map(|k| r0.powi(k as i32)).sum();
            let closed = geometric_sum(r0, n as f64);
            prop_assert!((direct - closed).abs() <= 1e-9 * direct.max(1.0),
                "r0={} n={} direct={} closed={}", r0, n, direct, closed);
        }

        #[test]
        fn unit_rate_any_cycles(c in 0.0f64..50.0) {
            prop_assert_eq!(geometric_sum(1.0, c), if c <= 0.0 { 1.0 } else { c + 1.0 });
        }

        #[test]
        fn seeds_zero_iff_no_expected_streams(
            hours in 0.0f64..240.0,
            per_day in 0.0f64..10.0,
            target in 1.0f64..1.0e6,
            r0 in 0.0f64..2.0,
        ) {
            let mut i = inputs();
            i.time_window_hours = hours;
            i.streams_per_creator_per_day = per_day;
            i.target_streams = target;
            let est = estimate_seed_creators(&i, r0);
            prop_assert_eq!(est.seed_creators_required == 0, est.expected_streams_per_seed <= 0.0);
        }

        #[test]
        fn more_target_never_fewer_seeds(
            a in 0.0f64..1.0e6,
            b in 0.0f64..1.0e6,
            r0 in 0.0f64..2.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let mut i = inputs();
            i.target_streams = lo;
            let fewer = estimate_seed_creators(&i, r0).seed_creators_required;
            i.target_streams = hi;
            let more = estimate_seed_creators(&i, r0).seed_creators_required;
            prop_assert!(fewer <= more);
        }
    }
}
