use std::fs;
use std::path::{Path, PathBuf};

use entryflow_engine::write_atomically;
use flow_logging::{flow_error, flow_info, flow_warn};
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = "settings.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSettings {
    check_interval_ms: u64,
}

pub(crate) fn default_state_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".entryflow")
}

/// Reads the stored check interval. Any read or parse problem falls back to
/// "nothing stored" so the session starts with the default.
pub(crate) fn load_check_interval(state_dir: &Path) -> Option<u64> {
    let path = state_dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            flow_warn!("Failed to read settings from {:?}: {}", path, err);
            return None;
        }
    };

    let settings: PersistedSettings = match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            flow_warn!("Failed to parse settings from {:?}: {}", path, err);
            return None;
        }
    };

    flow_info!("Loaded stored check interval from {:?}", path);
    Some(settings.check_interval_ms)
}

pub(crate) fn save_check_interval(state_dir: &Path, check_interval_ms: u64) {
    let settings = PersistedSettings { check_interval_ms };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            flow_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomically(state_dir, SETTINGS_FILENAME, &content) {
        flow_error!("Failed to write settings to {:?}: {}", state_dir, err);
    }
}
