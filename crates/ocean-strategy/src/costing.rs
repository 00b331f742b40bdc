//! Target costing and ERRC cost-driver impact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ocean_core::artifact::ArtifactKind;
use ocean_core::input::lenient;
use ocean_core::numeric::round_to;
use ocean_core::traits::Report;

const COST_DECIMALS: u32 = 4;
const IMPACT_DECIMALS: u32 = 3;

// ---------------------------------------------------------------------------
// Target cost
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    #[serde(default, deserialize_with = "lenient::f64")]
    pub current_cost: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetCostConfig {
    #[serde(default, deserialize_with = "lenient::f64")]
    pub strategic_price: f64,
    /// Required margin as a fraction of the strategic price.
    #[serde(default, deserialize_with = "lenient::f64")]
    pub margin_target_pct: f64,
    #[serde(default)]
    pub cost_components: Vec<CostComponent>,
}

/// The most the offering may cost while keeping the target margin.
pub fn target_cost(strategic_price: f64, margin_target_pct: f64) -> f64 {
    strategic_price * (1.0 - margin_target_pct)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCostReport {
    pub date: String,
    pub strategic_price: f64,
    pub margin_target_pct: f64,
    pub target_cost: f64,
    pub current_cost: f64,
    /// Positive when today's cost is above target.
    pub gap_to_target: f64,
    pub components: Vec<CostComponent>,
}

impl TargetCostReport {
    pub fn build(date: impl Into<String>, config: TargetCostConfig) -> Self {
        let target = target_cost(config.strategic_price, config.margin_target_pct);
        let current: f64 = config.cost_components.iter().map(|c| c.current_cost).sum();
        Self {
            date: date.into(),
            strategic_price: config.strategic_price,
            margin_target_pct: config.margin_target_pct,
            target_cost: round_to(target, COST_DECIMALS),
            current_cost: round_to(current, COST_DECIMALS),
            gap_to_target: round_to(current - target, COST_DECIMALS),
            components: config.cost_components,
        }
    }
}

impl Report for TargetCostReport {
    const KIND: ArtifactKind = ArtifactKind::TargetCost;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

// ---------------------------------------------------------------------------
// Cost-driver impact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDriver {
    #[serde(default, deserialize_with = "lenient::f64")]
    pub impact: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One eliminate/reduce/raise/create factor and the cost drivers it moves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrcFactor {
    #[serde(default)]
    pub factor: Value,
    #[serde(default)]
    pub cost_drivers: Vec<CostDriver>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostDriverMap {
    #[serde(default)]
    pub errc_factors: Vec<ErrcFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorImpact {
    pub factor: Value,
    pub drivers: Vec<CostDriver>,
    pub factor_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostDriverReport {
    pub date: String,
    pub total_cost_delta: f64,
    pub factors: Vec<FactorImpact>,
}

impl CostDriverReport {
    pub fn build(date: impl Into<String>, map: CostDriverMap) -> Self {
        let mut total = 0.0;
        let factors = map
            .errc_factors
            .into_iter()
            .map(|f| {
                let impact: f64 = f.cost_drivers.iter().map(|d| d.impact).sum();
                total += impact;
                FactorImpact {
                    factor: f.factor,
                    drivers: f.cost_drivers,
                    factor_impact: round_to(impact, IMPACT_DECIMALS),
                }
            })
            .collect();
        Self {
            date: date.into(),
            total_cost_delta: round_to(total, IMPACT_DECIMALS),
            factors,
        }
    }
}

impl Report for CostDriverReport {
    const KIND: ArtifactKind = ArtifactKind::CostDriverImpact;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}
