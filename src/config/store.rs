use super::{app_data_dir, config_file_path, setup_marker_path, ConfigError, Configuration};
use crate::shared::fs_atomic::atomic_write_file;
use crate::shared::logging::append_app_log_line;
use std::fs;
use std::path::PathBuf;

fn ensure_app_data_dir() -> Result<PathBuf, ConfigError> {
    let dir = app_data_dir()?;
    fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
        path: dir.display().to_string(),
        source,
    })?;
    Ok(dir)
}

pub fn is_setup_completed() -> bool {
    setup_marker_path()
        .map(|path| path.exists())
        .unwrap_or(false)
}

pub fn mark_setup_completed() -> Result<(), ConfigError> {
    ensure_app_data_dir()?;
    let path = setup_marker_path()?;
    fs::write(&path, b"").map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })
}

pub fn reset_setup() -> Result<(), ConfigError> {
    let path = setup_marker_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ConfigError::Remove {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Absent, unreadable, and malformed files all load as `None`: the caller
/// treats "no configuration" as a valid state that routes into the setup
/// wizard. A malformed file is additionally noted in the app log so the
/// two cases can be told apart after the fact.
pub fn load_configuration() -> Option<Configuration> {
    let path = config_file_path().ok()?;
    let raw = fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<Configuration>(&raw) {
        Ok(config) => Some(config),
        Err(err) => {
            if let Ok(root) = app_data_dir() {
                let _ = append_app_log_line(
                    &root,
                    &format!("discarding malformed config at {}: {err}", path.display()),
                );
            }
            None
        }
    }
}

pub fn save_configuration(config: &Configuration) -> Result<PathBuf, ConfigError> {
    ensure_app_data_dir()?;
    let path = config_file_path()?;
    let body = serde_json::to_vec_pretty(config).map_err(|source| ConfigError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    atomic_write_file(&path, &body).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}
