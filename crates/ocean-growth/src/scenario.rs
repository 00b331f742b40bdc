//! Low / base / high scenario cases.

use serde::{Deserialize, Serialize};

use ocean_core::constants::{BUDGET_MULTIPLIER_BASE, BUDGET_MULTIPLIER_HIGH, BUDGET_MULTIPLIER_LOW};

/// One of the three sensitivity cases every growth report is computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioCase {
    Low,
    Base,
    High,
}

impl ScenarioCase {
    pub const ALL: [ScenarioCase; 3] = [Self::Low, Self::Base, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Base => "base",
            Self::High => "high",
        }
    }

    /// Factor applied to R0: `1 - s`, `1`, `1 + s`.
    pub fn r0_multiplier(&self, sensitivity: f64) -> f64 {
        match self {
            Self::Low => 1.0 - sensitivity,
            Self::Base => 1.0,
            Self::High => 1.0 + sensitivity,
        }
    }

    /// Contingency factor applied to a total budget.
    pub fn budget_multiplier(&self) -> f64 {
        match self {
            Self::Low => BUDGET_MULTIPLIER_LOW,
            Self::Base => BUDGET_MULTIPLIER_BASE,
            Self::High => BUDGET_MULTIPLIER_HIGH,
        }
    }
}

/// A value per scenario case, serialized as `{ "low": .., "base": .., "high": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenarios<T> {
    pub low: T,
    pub base: T,
    pub high: T,
}

impl<T> Scenarios<T> {
    /// Build by evaluating `f` for low, base, then high.
    pub fn from_fn(mut f: impl FnMut(ScenarioCase) -> T) -> Self {
        let low = f(ScenarioCase::Low);
        let base = f(ScenarioCase::Base);
        let high = f(ScenarioCase::High);
        Self { low, base, high }
    }

    pub fn get(&self, case: ScenarioCase) -> &T {
        match case {
            ScenarioCase::Low => &self.low,
            ScenarioCase::Base => &self.base,
            ScenarioCase::High => &self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r0_multipliers() {
        assert_eq!(ScenarioCase::Low.r0_multiplier(0.2), 0.8);
        assert_eq!(ScenarioCase::Base.r0_multiplier(0.2), 1.0);
        assert_eq!(ScenarioCase::High.r0_multiplier(0.2), 1.2);
    }

    #[test]
    fn budget_multipliers_increase() {
        let m: Vec<f64> = ScenarioCase::ALL.iter().map(|c| c.budget_multiplier()).collect();
        assert_eq!(m, vec![1.0, 1.2, 1.5]);
    }

    #[test]
    fn from_fn_visits_in_order() {
        let mut seen = Vec::new();
        let s = Scenarios::from_fn(|c| {
            seen.push(c);
            c.as_str().len()
        });
        assert_eq!(seen, ScenarioCase::ALL.to_vec());
        assert_eq!(*s.get(ScenarioCase::Base), 4);
    }

    #[test]
    fn serializes_as_named_object() {
        let s = Scenarios { low: 1, base: 2, high: 3 };
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"low":1,"base":2,"high":3}"#
        );
    }
}
