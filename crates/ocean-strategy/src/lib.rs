//! # ocean-strategy — blue-ocean strategy metrics.
//!
//! - [`price`] — price corridor of the mass
//! - [`costing`] — target cost and ERRC cost-driver impact
//! - [`utility`] — buyer utility map gaps
//! - [`canvas`] — strategy canvas focus, divergence and tagline
//! - [`innovation`] — value innovation index over the utility, canvas and
//!   cost reports
//! - [`readiness`] — adoption hurdle and strategic sequence checks

pub mod canvas;
pub mod costing;
pub mod innovation;
pub mod price;
pub mod readiness;
pub mod utility;

pub use canvas::{CanvasSnapshot, DifferentiationReport, StrategyCanvasConfig};
pub use costing::{CostDriverMap, CostDriverReport, TargetCostConfig, TargetCostReport};
pub use innovation::{Upstream, UpstreamPaths, ValueInnovationConfig, ValueInnovationReport, Weights};
pub use price::{PriceCorridorConfig, PriceCorridorReport};
pub use readiness::{
    AdoptionHurdlesConfig, AdoptionHurdlesReport, FeatureList, MitigatedFeature, SequencedFeature,
    StrategicSequenceConfig, StrategicSequenceReport,
};
pub use utility::{BuyerUtilityConfig, BuyerUtilityReport};
