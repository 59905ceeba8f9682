//! History settings, loaded from a JSON settings file.

use crate::history::DEFAULT_MAX_RECORDS;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound applied to `history_max_records`.
pub const MAX_RECORDS_LIMIT: usize = 10_000;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HistorySettings {
    pub history_max_records: usize,
    /// Record the opening state so the first edit can be undone.
    pub record_initial_state: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            history_max_records: DEFAULT_MAX_RECORDS,
            record_initial_state: true,
        }
    }
}

impl HistorySettings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads settings from `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// `<config dir>/canvas_history/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("canvas_history").join("settings.json"))
    }

    /// The configured bound, clamped to `1..=MAX_RECORDS_LIMIT`.
    pub fn max_records(&self) -> usize {
        self.history_max_records.clamp(1, MAX_RECORDS_LIMIT)
    }
}
