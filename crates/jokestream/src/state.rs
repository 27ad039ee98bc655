//! Persistence of the content filter settings and stats between the runs
//! of the CLI.
use crate::filter::{FilterSettings, FilterStats};
use crate::prelude::*;
use crate::{err, err_ctx, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to access the state file")]
    Io { source: io::Error },

    #[error("State file `{path}` is corrupted")]
    Deserialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize the state")]
    Serialize { source: serde_json::Error },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub settings: FilterSettings,
    pub stats: Option<FilterStats>,
}

/// JSON file with the [`AppState`]
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the default state if the file doesn't exist yet
    pub fn load(&self) -> Result<AppState> {
        let json = match fs_err::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "State file doesn't exist, using defaults");
                return Ok(AppState::default());
            }
            Err(source) => return Err(err!(StateError::Io { source })),
        };

        serde_json::from_str(&json).map_err(err_ctx!(StateError::Deserialize {
            path: self.path.clone()
        }))
    }

    /// Overwrites the file atomically, creating the parent directories if needed
    pub fn save(&self, state: &AppState) -> Result {
        let json =
            serde_json::to_string_pretty(state).map_err(err_ctx!(StateError::Serialize))?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs_err::create_dir_all(dir).map_err(err_ctx!(StateError::Io))?;
        }

        let tmp = self.path.with_extension("json.tmp");

        fs_err::write(&tmp, json).map_err(err_ctx!(StateError::Io))?;
        fs_err::rename(&tmp, &self.path).map_err(err_ctx!(StateError::Io))?;

        debug!(path = %self.path.display(), "Saved the state");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterStrength;
    use crate::ErrorKind;
    use assert_matches::assert_matches;
    use chrono::prelude::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        assert_eq!(store.load().unwrap(), AppState::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested").join("state.json"));

        let mut state = AppState::default();
        state.settings.toggle();
        state.settings.set_strength(FilterStrength::Minimal);
        state.settings.add_to_blocklist("broccoli");
        state.stats = Some(FilterStats {
            total_checked: 12,
            total_blocked: 3,
            blocked_by_category: [("fuck".to_owned(), 2), ("racism".to_owned(), 1)].into(),
            last_checked: Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
        });

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);

        // Overwrite
        store.save(&AppState::default()).unwrap();
        assert_eq!(store.load().unwrap(), AppState::default());
    }

    #[test]
    fn corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs_err::write(&path, "{ not json").unwrap();

        let err = StateStore::new(&path).load().unwrap_err();

        assert_matches!(
            err.kind(),
            ErrorKind::State {
                source: StateError::Deserialize { .. }
            }
        );
    }
}
