//! Report artifacts.
//!
//! Every report is written as pretty-printed JSON (two-space indent, trailing
//! newline) and identified afterwards by an [`ArtifactRef`]: its kind, path,
//! and the BLAKE3 digest of the exact bytes written. The [`ArtifactStore`]
//! records the most recent reference per kind in a manifest inside the
//! reports directory, and dependents resolve their inputs through that
//! manifest rather than by scanning file modification times. A digest that
//! no longer matches the file on disk means the artifact was replaced or
//! edited behind the manifest's back, and the read fails.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::date::today;
use crate::error::{DependencyError, OceanError};
use crate::settings::Settings;
use crate::traits::Report;

/// Every report the tools produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    SeedEstimate,
    LaunchBudget,
    ExperimentSummary,
    PriceCorridor,
    TargetCost,
    CostDriverImpact,
    BuyerUtility,
    StrategyCanvas,
    Differentiation,
    ValueInnovation,
    AdoptionHurdles,
    StrategicSequence,
}

impl ArtifactKind {
    /// Manifest key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeedEstimate => "seed_estimate",
            Self::LaunchBudget => "launch_budget",
            Self::ExperimentSummary => "experiment_summary",
            Self::PriceCorridor => "price_corridor",
            Self::TargetCost => "target_cost",
            Self::CostDriverImpact => "cost_driver_impact",
            Self::BuyerUtility => "buyer_utility",
            Self::StrategyCanvas => "strategy_canvas",
            Self::Differentiation => "differentiation",
            Self::ValueInnovation => "value_innovation",
            Self::AdoptionHurdles => "adoption_hurdles",
            Self::StrategicSequence => "strategic_sequence",
        }
    }

    /// File name prefix of the default output path.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::SeedEstimate => "viral_seed_estimate",
            Self::LaunchBudget => "launch_budget_estimate",
            Self::ExperimentSummary => "experiment_metrics",
            Self::PriceCorridor => "price_corridor",
            Self::TargetCost => "target_cost",
            Self::CostDriverImpact => "cost_driver_impact",
            Self::BuyerUtility => "buyer_utility",
            Self::StrategyCanvas => "strategy_canvas",
            Self::Differentiation => "differentiation",
            Self::ValueInnovation => "value_innovation",
            Self::AdoptionHurdles => "adoption_hurdles_check",
            Self::StrategicSequence => "strategic_sequence_check",
        }
    }

    /// Whether the default file name carries the report date.
    ///
    /// Readiness checks overwrite a single file; everything else keeps one
    /// file per date.
    pub fn is_dated(&self) -> bool {
        !matches!(self, Self::AdoptionHurdles | Self::StrategicSequence)
    }

    /// Default file name, e.g. `viral_seed_estimate_2026-03-01.json`.
    pub fn default_file_name(&self, date: &str) -> String {
        if self.is_dated() {
            format!("{}_{}.json", self.file_stem(), date)
        } else {
            format!("{}.json", self.file_stem())
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pointer to one written report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    /// Hex BLAKE3 digest of the file contents. `None` for references built
    /// from a bare path the manifest knows nothing about.
    pub digest: Option<String>,
}

impl ArtifactRef {
    /// Reference to a file by path only; reads skip digest verification.
    pub fn unverified(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            digest: None,
        }
    }
}

/// Most recent artifact per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub artifacts: BTreeMap<String, ArtifactRef>,
}

impl Manifest {
    pub fn get(&self, kind: ArtifactKind) -> Option<&ArtifactRef> {
        self.artifacts.get(kind.as_str())
    }

    pub fn record(&mut self, artifact: ArtifactRef) {
        self.artifacts.insert(artifact.kind.as_str().to_string(), artifact);
    }
}

/// `path` without `.` components, so `./reports/x.json` and `reports/x.json`
/// compare equal.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Hex BLAKE3 digest of `bytes`.
pub fn digest_bytes(bytes: &[u8]) -> String {
    hex::encode(blake3::hash(bytes).as_bytes())
}

/// Writes reports and resolves them for downstream computations.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    reports_dir: PathBuf,
    manifest_path: PathBuf,
}

impl ArtifactStore {
    pub fn new(reports_dir: impl Into<PathBuf>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            manifest_path: manifest_path.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.reports_dir.clone(), settings.manifest_path())
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Default output path for a report of `kind` dated `date`.
    pub fn default_path(&self, kind: ArtifactKind, date: &str) -> PathBuf {
        self.reports_dir.join(kind.default_file_name(date))
    }

    /// Serialize `report` to `out` (or its default path) and record it in the
    /// manifest.
    pub fn write_report<R: Report>(
        &self,
        report: &R,
        out: Option<&Path>,
    ) -> Result<ArtifactRef, OceanError> {
        let path = match out {
            Some(p) => p.to_path_buf(),
            None => {
                let date = report.date().map(str::to_string).unwrap_or_else(today);
                self.default_path(R::KIND, &date)
            }
        };
        self.write_json(R::KIND, &path, report)
    }

    /// Serialize any value as a `kind` artifact at `path` and record it.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        kind: ArtifactKind,
        path: &Path,
        value: &T,
    ) -> Result<ArtifactRef, OceanError> {
        let mut text = serde_json::to_string_pretty(value)?;
        text.push('\n');

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, text.as_bytes())?;

        let artifact = ArtifactRef {
            kind,
            path: path.to_path_buf(),
            digest: Some(digest_bytes(text.as_bytes())),
        };
        self.record(artifact.clone())?;

        info!(kind = %kind, path = %path.display(), "report written");
        Ok(artifact)
    }

    /// Load the manifest. A missing manifest is empty.
    pub fn manifest(&self) -> Result<Manifest, OceanError> {
        match std::fs::read_to_string(&self.manifest_path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Manifest::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn record(&self, artifact: ArtifactRef) -> Result<(), OceanError> {
        let mut manifest = self.manifest()?;
        manifest.record(artifact);
        let mut text = serde_json::to_string_pretty(&manifest)?;
        text.push('\n');
        if let Some(parent) = self.manifest_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.manifest_path, text)?;
        Ok(())
    }

    /// The most recently recorded artifact of `kind`, if any.
    pub fn latest(&self, kind: ArtifactKind) -> Result<Option<ArtifactRef>, OceanError> {
        Ok(self.manifest()?.get(kind).cloned())
    }

    /// Resolve a dependency: an explicit path wins, otherwise the manifest
    /// entry for `kind`. An explicit path that matches the manifest entry
    /// inherits its digest.
    pub fn resolve(
        &self,
        kind: ArtifactKind,
        explicit: Option<&Path>,
    ) -> Result<ArtifactRef, OceanError> {
        let recorded = self.latest(kind)?;
        match explicit {
            Some(path) => Ok(match recorded {
                Some(r) if normalized(&r.path) == normalized(path) => r,
                _ => ArtifactRef::unverified(kind, path),
            }),
            None => recorded.ok_or_else(|| {
                DependencyError::NotFound {
                    kind: kind.file_stem().to_string(),
                }
                .into()
            }),
        }
    }

    /// Like [`resolve`](Self::resolve), but an absent dependency is `None`
    /// instead of an error.
    pub fn resolve_optional(
        &self,
        kind: ArtifactKind,
        explicit: Option<&Path>,
    ) -> Result<Option<ArtifactRef>, OceanError> {
        match self.resolve(kind, explicit) {
            Ok(r) => Ok(Some(r)),
            Err(OceanError::MissingDependency(DependencyError::NotFound { .. })) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read and parse a referenced artifact, verifying its digest when the
    /// reference carries one.
    pub fn read(&self, artifact: &ArtifactRef) -> Result<Value, OceanError> {
        let shown = artifact.path.display().to_string();
        let bytes = std::fs::read(&artifact.path).map_err(|e| DependencyError::Unreadable {
            path: shown.clone(),
            reason: e.to_string(),
        })?;

        if let Some(expected) = &artifact.digest {
            let actual = digest_bytes(&bytes);
            if &actual != expected {
                return Err(DependencyError::DigestMismatch {
                    path: shown,
                    expected: expected.clone(),
                    actual,
                }
                .into());
            }
        }

        debug!(kind = %artifact.kind, path = %shown, "artifact read");
        serde_json::from_slice(&bytes).map_err(|e| {
            DependencyError::Unreadable {
                path: shown,
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Dummy {
        date: String,
        value: u32,
    }

    impl Report for Dummy {
        const KIND: ArtifactKind = ArtifactKind::TargetCost;
        fn date(&self) -> Option<&str> {
            Some(&self.date)
        }
    }

    fn store(dir: &tempfile::TempDir) -> ArtifactStore {
        let reports = dir.path().join("reports");
        ArtifactStore::new(&reports, reports.join("manifest.json"))
    }

    #[test]
    fn default_file_names() {
        assert_eq!(
            ArtifactKind::SeedEstimate.default_file_name("2026-01-02"),
            "viral_seed_estimate_2026-01-02.json"
        );
        assert_eq!(
            ArtifactKind::AdoptionHurdles.default_file_name("2026-01-02"),
            "adoption_hurdles_check.json"
        );
    }

    #[test]
    fn write_uses_dated_default_path_and_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let report = Dummy {
            date: "2026-05-05".into(),
            value: 7,
        };

        let r = store.write_report(&report, None).unwrap();
        assert_eq!(r.path, dir.path().join("reports/target_cost_2026-05-05.json"));

        let text = std::fs::read_to_string(&r.path).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("  \"value\": 7"));
        assert_eq!(r.digest.as_deref(), Some(digest_bytes(text.as_bytes()).as_str()));
    }

    #[test]
    fn manifest_tracks_latest_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert_eq!(store.latest(ArtifactKind::TargetCost).unwrap(), None);

        let first = store
            .write_report(&Dummy { date: "2026-05-05".into(), value: 1 }, None)
            .unwrap();
        let second = store
            .write_report(&Dummy { date: "2026-05-06".into(), value: 2 }, None)
            .unwrap();
        assert_ne!(first.path, second.path);
        assert_eq!(store.latest(ArtifactKind::TargetCost).unwrap(), Some(second));
    }

    #[test]
    fn resolve_without_manifest_entry_is_missing_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let err = store.resolve(ArtifactKind::SeedEstimate, None).unwrap_err();
        assert!(matches!(
            err,
            OceanError::MissingDependency(DependencyError::NotFound { .. })
        ));
        assert_eq!(
            store.resolve_optional(ArtifactKind::SeedEstimate, None).unwrap(),
            None
        );
    }

    #[test]
    fn explicit_path_inherits_recorded_digest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let written = store
            .write_report(&Dummy { date: "2026-05-05".into(), value: 1 }, None)
            .unwrap();

        let same = store
            .resolve(ArtifactKind::TargetCost, Some(&written.path))
            .unwrap();
        assert_eq!(same, written);

        let other_path = dir.path().join("elsewhere.json");
        let other = store
            .resolve(ArtifactKind::TargetCost, Some(&other_path))
            .unwrap();
        assert_eq!(other.digest, None);
    }

    #[test]
    fn dot_prefixed_explicit_path_keeps_recorded_digest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let recorded = ArtifactRef {
            kind: ArtifactKind::SeedEstimate,
            path: PathBuf::from("reports/viral_seed_estimate_2026-05-05.json"),
            digest: Some("ab".repeat(32)),
        };
        store.record(recorded.clone()).unwrap();

        let resolved = store
            .resolve(
                ArtifactKind::SeedEstimate,
                Some(Path::new("./reports/viral_seed_estimate_2026-05-05.json")),
            )
            .unwrap();
        assert_eq!(resolved, recorded);
    }

    #[test]
    fn edited_artifact_fails_digest_check() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let r = store
            .write_report(&Dummy { date: "2026-05-05".into(), value: 1 }, None)
            .unwrap();
        assert_eq!(store.read(&r).unwrap()["value"], json!(1));

        std::fs::write(&r.path, "{\"value\": 99}\n").unwrap();
        let err = store.read(&r).unwrap_err();
        assert!(matches!(
            err,
            OceanError::MissingDependency(DependencyError::DigestMismatch { .. })
        ));

        // A bare-path reference skips verification.
        let loose = ArtifactRef::unverified(ArtifactKind::TargetCost, &r.path);
        assert_eq!(store.read(&loose).unwrap()["value"], json!(99));
    }

    #[test]
    fn read_missing_file_is_missing_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let r = ArtifactRef::unverified(ArtifactKind::SeedEstimate, dir.path().join("gone.json"));
        assert!(matches!(
            store.read(&r),
            Err(OceanError::MissingDependency(DependencyError::Unreadable { .. }))
        ));
    }

    #[test]
    fn explicit_out_path_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let out = dir.path().join("nested/deeper/report.json");
        let r = store
            .write_report(&Dummy { date: "2026-05-05".into(), value: 3 }, Some(&out))
            .unwrap();
        assert_eq!(r.path, out);
        assert!(out.exists());
        assert_eq!(store.latest(ArtifactKind::TargetCost).unwrap(), Some(r));
    }
}
