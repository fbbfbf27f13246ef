//! Persistent player settings.
//!
//! A single JSON blob under the platform config directory, overwritten
//! wholesale on save. Loading is deliberately forgiving: a missing or
//! malformed file falls back to defaults with a warning, never an error.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quiz_core::QuizConfig;

/// Fixed file name under the config directory.
const SETTINGS_FILE: &str = "settings.json";

/// Player-tunable settings, persisted across runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds allowed per question.
    pub time_limit: u16,
    /// Whether feedback tones play.
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_limit: QuizConfig::DEFAULT_TIME_LIMIT,
            sound_enabled: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io failure")]
    Io(#[from] io::Error),

    #[error("settings file is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("no usable config directory on this platform")]
    NoConfigDir,
}

/// File-backed settings store.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at an explicit path (tests, overrides).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform config directory, creating it if needed.
    pub fn from_project_dirs() -> Result<Self, SettingsError> {
        let dirs = directories::ProjectDirs::from("", "", "drill")
            .ok_or(SettingsError::NoConfigDir)?;
        fs::create_dir_all(dirs.config_dir())?;
        Ok(Self {
            path: dirs.config_dir().join(SETTINGS_FILE),
        })
    }

    /// Loads settings, falling back to defaults if absent or malformed.
    pub fn load(&self) -> Settings {
        match self.load_strict() {
            Ok(settings) => settings,
            Err(SettingsError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                Settings::default()
            }
            Err(err) => {
                tracing::warn!("ignoring unreadable settings ({err}), using defaults");
                Settings::default()
            }
        }
    }

    /// Loads settings, surfacing read or parse failures.
    pub fn load_strict(&self) -> Result<Settings, SettingsError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Overwrites the stored settings wholesale. Temp file + rename so a
    /// crash mid-write cannot corrupt the previous blob.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(settings)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("saved settings to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join(SETTINGS_FILE))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load(), Settings::default());
        assert!(store.load_strict().is_err());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), b"{not json").unwrap();

        assert_eq!(store.load(), Settings::default());
        assert!(matches!(
            store.load_strict(),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn partial_blob_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), br#"{"time_limit": 45}"#).unwrap();

        let settings = store.load();
        assert_eq!(settings.time_limit, 45);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let settings = Settings {
            time_limit: 20,
            sound_enabled: false,
        };

        store.save(&settings).unwrap();

        assert_eq!(store.load(), settings);
        // Wholesale overwrite, not a merge.
        store.save(&Settings::default()).unwrap();
        assert_eq!(store.load(), Settings::default());
    }
}
