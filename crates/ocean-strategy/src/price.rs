//! Price corridor of the mass.
//!
//! The corridor spans the cheapest to the most expensive alternative buyers
//! already pay for, with the mean as its midpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ocean_core::artifact::ArtifactKind;
use ocean_core::error::ConfigError;
use ocean_core::input::lenient;
use ocean_core::numeric::{mean, round_to};
use ocean_core::traits::Report;

/// An alternative offering.
///
/// `price` is `None` when the key is absent and `Some(None)` for an explicit
/// `null`, so the echo reproduces the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default, deserialize_with = "present_price", skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn present_price<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<f64>>, D::Error> {
    lenient::opt_f64(deserializer).map(Some)
}

impl Alternative {
    /// Price used for the corridor. An absent price counts as free; an
    /// explicit `null` is left out.
    pub fn corridor_price(&self) -> Option<f64> {
        self.price.unwrap_or(Some(0.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CorridorMeta {
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceCorridorConfig {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub meta: CorridorMeta,
    /// Target positioning, echoed as `strategy`.
    #[serde(default)]
    pub target: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// Corridor over the given prices; `None` when there are none.
pub fn corridor(prices: &[f64]) -> Option<Corridor> {
    let mid = mean(prices)?;
    let low = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let high = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(Corridor {
        low,
        mid: round_to(mid, 2),
        high,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCorridorReport {
    pub date: String,
    pub currency: String,
    pub corridor: Corridor,
    pub alternatives: Vec<Alternative>,
    pub strategy: Map<String, Value>,
}

impl PriceCorridorReport {
    pub fn build(date: impl Into<String>, config: PriceCorridorConfig) -> Result<Self, ConfigError> {
        let prices: Vec<f64> = config.alternatives.iter().filter_map(Alternative::corridor_price).collect();
        let corridor = corridor(&prices).ok_or_else(|| ConfigError::Empty("prices".into()))?;
        Ok(Self {
            date: date.into(),
            currency: config.meta.currency.unwrap_or_else(|| "USD".to_string()),
            corridor,
            alternatives: config.alternatives,
            strategy: config.target,
        })
    }
}

impl Report for PriceCorridorReport {
    const KIND: ArtifactKind = ArtifactKind::PriceCorridor;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(v: Value) -> PriceCorridorConfig {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn corridor_min_mean_max() {
        let c = corridor(&[3.0, 9.5, 4.0]).unwrap();
        assert_eq!(c.low, 3.0);
        assert_eq!(c.high, 9.5);
        assert_eq!(c.mid, 5.5);
    }

    #[test]
    fn mid_rounded_to_cents() {
        assert_eq!(corridor(&[1.0, 2.0, 2.0]).unwrap().mid, 1.67);
    }

    #[test]
    fn empty_corridor() {
        assert_eq!(corridor(&[]), None);
    }

    #[test]
    fn null_prices_skipped() {
        let cfg = config(json!({
            "alternatives": [
                {"name": "cinema", "price": 12},
                {"name": "free app", "price": null},
                {"name": "karaoke", "price": "20"}
            ],
            "meta": {"currency": "THB"},
            "target": {"price": 15}
        }));
        let r = PriceCorridorReport::build("2026-01-10", cfg).unwrap();
        assert_eq!(r.currency, "THB");
        assert_eq!(r.corridor, Corridor { low: 12.0, mid: 16.0, high: 20.0 });
        assert_eq!(r.alternatives.len(), 3);
        assert_eq!(r.strategy["price"], json!(15));
    }

    #[test]
    fn absent_price_counts_as_free() {
        let cfg = config(json!({
            "alternatives": [
                {"name": "cinema", "price": 12},
                {"name": "park"},
                {"name": "free app", "price": null}
            ]
        }));
        let r = PriceCorridorReport::build("2026-01-10", cfg).unwrap();
        assert_eq!(r.corridor, Corridor { low: 0.0, mid: 6.0, high: 12.0 });

        let echoed = serde_json::to_value(&r.alternatives).unwrap();
        assert_eq!(echoed[1], json!({"name": "park"}));
        assert_eq!(echoed[2], json!({"name": "free app", "price": null}));
    }

    #[test]
    fn currency_defaults_to_usd() {
        let cfg = config(json!({"alternatives": [{"price": 1}]}));
        assert_eq!(PriceCorridorReport::build("2026-01-10", cfg).unwrap().currency, "USD");
    }

    #[test]
    fn no_prices_is_config_error() {
        let cfg = config(json!({"alternatives": [{"name": "x", "price": null}]}));
        assert_eq!(
            PriceCorridorReport::build("2026-01-10", cfg),
            Err(ConfigError::Empty("prices".into()))
        );
    }
}
