//! Experiment variant metrics.
//!
//! Summarises a flat event log per experiment variant: activation, day-1
//! retention, invite conversion and the viral coefficient (k-factor).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use ocean_core::artifact::ArtifactKind;
use ocean_core::numeric::round_to;
use ocean_core::traits::Report;

const RATE_DECIMALS: u32 = 4;

/// Event types the summary understands. Others still count toward
/// `total_users`.
pub const EVENT_TYPES: [&str; 5] = [
    "exposure",
    "activation",
    "retention_d1",
    "invite_sent",
    "invite_converted",
];

/// One logged event. Events without a variant or user id are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentEvent {
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub cohort_date: Option<String>,
}

/// Event log on disk: either `{"events": [...]}` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventLog {
    Wrapped { events: Vec<ExperimentEvent> },
    Bare(Vec<ExperimentEvent>),
}

/// A logged user id. Exporters write ids as strings or bare numbers; the
/// two never compare equal, so `7` and `"7"` are different users.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserId {
    Text(String),
    /// Canonical text of a JSON number.
    Number(String),
}

impl UserId {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self::Text(s),
            Raw::Number(n) => Self::Number(n.to_string()),
        })
    }
}

impl Serialize for UserId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => n
                .parse::<serde_json::Number>()
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

impl EventLog {
    pub fn into_events(self) -> Vec<ExperimentEvent> {
        match self {
            Self::Wrapped { events } => events,
            Self::Bare(events) => events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub total_users: usize,
    pub activation_rate: f64,
    pub d1_retention_rate: f64,
    pub k_factor: f64,
    pub invites_sent: u64,
    pub invites_converted: u64,
}

#[derive(Default)]
struct Tally<'a> {
    users: BTreeSet<&'a UserId>,
    activated: BTreeSet<&'a UserId>,
    retained: BTreeSet<&'a UserId>,
    sent: u64,
    converted: u64,
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

/// k-factor as `(invites sent / activated users) * invite conversion`.
pub fn k_factor(sent: u64, converted: u64, activated: usize) -> f64 {
    if activated == 0 {
        return 0.0;
    }
    let invite_conversion = ratio(converted as f64, sent as f64);
    (sent as f64 / activated as f64) * invite_conversion
}

/// Per-variant metrics, optionally limited to one cohort date.
pub fn summarize(
    events: &[ExperimentEvent],
    cohort_date: Option<&str>,
) -> BTreeMap<String, VariantSummary> {
    let mut tallies: BTreeMap<&str, Tally<'_>> = BTreeMap::new();

    for event in events {
        if let Some(cohort) = cohort_date {
            if event.cohort_date.as_deref() != Some(cohort) {
                continue;
            }
        }
        let (Some(variant), Some(user)) = (event.variant.as_deref(), event.user_id.as_ref())
        else {
            continue;
        };
        if variant.is_empty() || user.is_empty() {
            continue;
        }

        let tally = tallies.entry(variant).or_default();
        tally.users.insert(user);
        match event.event_type.as_deref() {
            Some("activation") => {
                tally.activated.insert(user);
            }
            Some("retention_d1") | Some("d1_retention") => {
                tally.retained.insert(user);
            }
            Some("invite_sent") => tally.sent += 1,
            Some("invite_converted") => tally.converted += 1,
            _ => {}
        }
    }

    tallies
        .into_iter()
        .map(|(variant, t)| {
            let total = t.users.len();
            let activated = t.activated.len();
            let summary = VariantSummary {
                total_users: total,
                activation_rate: round_to(ratio(activated as f64, total as f64), RATE_DECIMALS),
                d1_retention_rate: round_to(
                    ratio(t.retained.len() as f64, activated as f64),
                    RATE_DECIMALS,
                ),
                k_factor: round_to(k_factor(t.sent, t.converted, activated), RATE_DECIMALS),
                invites_sent: t.sent,
                invites_converted: t.converted,
            };
            (variant.to_string(), summary)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub date: String,
    pub cohort_date: Option<String>,
    pub variants: BTreeMap<String, VariantSummary>,
    pub event_types: Vec<String>,
}

impl ExperimentReport {
    pub fn build(date: impl Into<String>, events: &[ExperimentEvent], cohort_date: Option<String>) -> Self {
        let variants = summarize(events, cohort_date.as_deref());
        Self {
            date: date.into(),
            cohort_date,
            variants,
            event_types: EVENT_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Report for ExperimentReport {
    const KIND: ArtifactKind = ArtifactKind::ExperimentSummary;

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}
