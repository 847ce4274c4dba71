//! Desktop state saved between sessions as JSON in the platform config dir.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::debug;

use crate::domain::PersistedState;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "FreightCostOptimizer";
const APP_NAME: &str = "FreightCostOptimizer";
const STATE_FILE: &str = "state.json";

fn data_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(STATE_FILE))
}

pub fn load_persisted_state() -> Option<PersistedState> {
    load_from(&data_file()?)
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_to(&path, state)
}

/// A missing or unreadable file yields `None`; the app starts from defaults.
pub fn load_from(path: &Path) -> Option<PersistedState> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(state) => Some(state),
        Err(err) => {
            debug!(path = %path.display(), "ignoring unreadable saved state: {err}");
            None
        }
    }
}

pub fn save_to(path: &Path, state: &PersistedState) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "saved user state");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Goal, ShipmentForm};

    #[test]
    fn saved_state_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join(STATE_FILE);
        let state = PersistedState {
            shipment: ShipmentForm {
                origin: "Hamburg".into(),
                destination: "New York".into(),
                weight_input: "500 lbs".into(),
            },
            goal: Goal::Greenest,
            data_source: Some("https://example.com/rates.csv".into()),
            ..PersistedState::default()
        };
        save_to(&path, &state).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.shipment, state.shipment);
        assert_eq!(loaded.goal, Goal::Greenest);
        assert_eq!(loaded.data_source, state.data_source);
    }

    #[test]
    fn partial_or_corrupt_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);

        fs::write(&path, r#"{"goal":"Fastest"}"#).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.goal, Goal::Fastest);
        assert_eq!(loaded.shipment, ShipmentForm::default());

        fs::write(&path, "not json").unwrap();
        assert!(load_from(&path).is_none());
        assert!(load_from(&dir.path().join("missing.json")).is_none());
    }
}
