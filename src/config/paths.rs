use crate::config::ConfigError;
use std::path::PathBuf;

pub const APP_STATE_DIR: &str = ".turix";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const SETUP_MARKER_FILE_NAME: &str = "setup_completed";

pub fn app_data_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(APP_STATE_DIR))
}

pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(app_data_dir()?.join(CONFIG_FILE_NAME))
}

pub fn setup_marker_path() -> Result<PathBuf, ConfigError> {
    Ok(app_data_dir()?.join(SETUP_MARKER_FILE_NAME))
}
