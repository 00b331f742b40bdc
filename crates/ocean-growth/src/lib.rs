//! # ocean-growth — launch growth models.
//!
//! - [`viral`] — seed creators needed to reach a stream target, from a
//!   per-generation reproduction rate compounded over daily cycles
//! - [`budget`] — PJM/USD launch budget from the base seed estimate
//! - [`experiment`] — per-variant activation, retention and k-factor
//! - [`scenario`] — the low/base/high cases shared by the models

pub mod budget;
pub mod experiment;
pub mod scenario;
pub mod viral;

pub use budget::{BudgetInputs, BudgetReport, BudgetScenario};
pub use experiment::{ExperimentEvent, ExperimentReport, UserId, VariantSummary};
pub use scenario::{ScenarioCase, Scenarios};
pub use viral::{geometric_sum, ModelInputs, SeedEstimate, SeedReport};
