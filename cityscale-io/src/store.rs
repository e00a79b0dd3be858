//! Run storage
//!
//! Each run is written as a pretty-printed JSON file named
//! `run_<UTC timestamp>.json`. The stored [`RunRecord`] carries the inputs of the
//! run alongside the [`RunBundle`] exactly as the pipeline produced it.

use crate::errors::IoResult;
use chrono::{DateTime, Utc};
use cityscale_core::drivers::CityProfile;
use cityscale_core::parameters::{ModelConfig, ScenarioParameters, UrbanFormParameters};
use cityscale_core::simulation::{RunBundle, ScenarioComparison};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const RUN_PREFIX: &str = "run_";
const RUN_EXTENSION: &str = "json";

/// A persisted simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub created_at: DateTime<Utc>,
    pub city: CityProfile,
    pub config: ModelConfig,
    pub scenario: ScenarioParameters,
    pub urban_form: UrbanFormParameters,
    pub bundle: RunBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ScenarioComparison>,
}

impl RunRecord {
    pub fn new(
        city: CityProfile,
        config: ModelConfig,
        scenario: ScenarioParameters,
        urban_form: UrbanFormParameters,
        bundle: RunBundle,
    ) -> Self {
        Self {
            created_at: Utc::now(),
            city,
            config,
            scenario,
            urban_form,
            bundle,
            comparison: None,
        }
    }

    pub fn with_comparison(mut self, comparison: ScenarioComparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    fn file_stem(&self) -> String {
        format!(
            "{}{}",
            RUN_PREFIX,
            self.created_at.format("%Y%m%dT%H%M%S%3fZ")
        )
    }
}

fn is_run_file(path: &Path) -> bool {
    let is_json = path.extension().and_then(|ext| ext.to_str()) == Some(RUN_EXTENSION);
    let has_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(RUN_PREFIX));
    is_json && has_prefix
}

/// Write `record` into `run_dir`, creating the directory if needed.
///
/// Returns the path of the new file. An existing file is never overwritten; a clash
/// within the same millisecond gets a zero-padded `_NNNN` suffix so that name order
/// stays creation order.
pub fn save_run(run_dir: impl AsRef<Path>, record: &RunRecord) -> IoResult<PathBuf> {
    let run_dir = run_dir.as_ref();
    fs::create_dir_all(run_dir)?;

    let stem = record.file_stem();
    let mut path = run_dir.join(format!("{}.{}", stem, RUN_EXTENSION));
    let mut suffix = 1;
    while path.exists() {
        path = run_dir.join(format!("{}_{:04}.{}", stem, suffix, RUN_EXTENSION));
        suffix += 1;
    }

    fs::write(&path, serde_json::to_string_pretty(record)?)?;
    log::info!("Stored run for {} at {}", record.city.name, path.display());
    Ok(path)
}

/// Stored runs in `run_dir`, newest first. A missing directory has no runs.
pub fn list_runs(run_dir: impl AsRef<Path>) -> IoResult<Vec<PathBuf>> {
    let run_dir = run_dir.as_ref();
    if !run_dir.exists() {
        return Ok(Vec::new());
    }

    let mut runs = Vec::new();
    for entry in fs::read_dir(run_dir)? {
        let path = entry?.path();
        if path.is_file() && is_run_file(&path) {
            runs.push(path);
        }
    }
    runs.sort_by(|a, b| b.cmp(a));
    Ok(runs)
}

pub fn load_run(path: impl AsRef<Path>) -> IoResult<RunRecord> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let record = serde_json::from_str(&contents)?;
    log::info!("Loaded run {}", path.display());
    Ok(record)
}
