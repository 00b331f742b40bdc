//! Shared test helpers: a throwaway reports workspace and canned configs.

use std::path::{Path, PathBuf};

use ocean_core::ArtifactStore;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A temporary directory with `config/` and `reports/` subdirectories and an
/// artifact store rooted in `reports/`.
pub struct Workspace {
    dir: TempDir,
    pub store: ArtifactStore,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let reports = dir.path().join("reports");
        let store = ArtifactStore::new(&reports, reports.join("manifest.json"));
        Self { dir, store }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.dir.path().join("reports")
    }

    /// Write `value` as pretty JSON under `config/` and return its path.
    pub fn write_config(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.dir.path().join("config").join(name);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir config");
        std::fs::write(&path, serde_json::to_string_pretty(value).expect("json")).expect("write");
        path
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Viral model inputs that need 143 seed creators at base R0 = 0.5.
pub fn viral_inputs() -> Value {
    json!({
        "time_window_hours": 48,
        "streams_per_creator_per_day": 2,
        "target_streams": 1000,
        "avg_viewers_per_stream": 50,
        "view_to_creator_rate": "0.02",
        "creator_activation_rate": 0.5,
        "notes": "bangkok soft launch"
    })
}

/// Budget inputs paying 12 PJM per creator at 0.1 USD per PJM.
pub fn budget_inputs() -> Value {
    json!({
        "pjm_usd_rate": 0.1,
        "starter_reward_pjm": 10,
        "boost_reward_pjm_equivalent": 5,
        "max_pjm_per_creator": 12
    })
}

pub fn buyer_utility_map() -> Value {
    json!({"scores": {
        "purchase": {"simplicity": 1, "convenience": 4},
        "use": {"fun": 5, "simplicity": 2},
        "disposal": {"environmental_friendliness": 3}
    }})
}

pub fn strategy_canvas() -> Value {
    json!({
        "factors": [{"label": "Price"}, {"label": "Setup"}, {"label": "Fun"}, {"label": "Sharing"}],
        "profiles": [
            {"id": "trivia", "label": "Trivia night", "scores": [3, 4, 2, 1]},
            {"id": "pyjam", "label": "PyJam", "scores": [1, 1, 5, 5]},
            {"id": "console", "label": "Console party", "scores": [5, 4, 4, 1]}
        ],
        "tagline_candidates": ["Phones out, party on"]
    })
}

/// Target costing with a current cost of 4.0 and a target of 3.0.
pub fn target_costing() -> Value {
    json!({
        "strategic_price": 5.0,
        "margin_target_pct": 0.4,
        "cost_components": [
            {"name": "hosting", "current_cost": 1.5},
            {"name": "moderation", "current_cost": 2.5}
        ]
    })
}
