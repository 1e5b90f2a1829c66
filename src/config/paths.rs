//! XDG path helpers. `XDG_CONFIG_HOME` / `XDG_DATA_HOME` win when set, otherwise
//! the platform defaults from `directories` are used.

use crate::error::StorageError;
use directories::BaseDirs;
use std::path::PathBuf;

pub const APP_DIR: &str = "kontext";

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `$XDG_CONFIG_HOME` or the platform config directory
pub fn config_home() -> Result<PathBuf, StorageError> {
    if let Some(dir) = env_dir("XDG_CONFIG_HOME") {
        return Ok(dir);
    }
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| StorageError::InvalidPath("Cannot determine config directory".to_string()))
}

/// `$XDG_DATA_HOME` or the platform data directory
pub fn data_home() -> Result<PathBuf, StorageError> {
    if let Some(dir) = env_dir("XDG_DATA_HOME") {
        return Ok(dir);
    }
    BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StorageError::InvalidPath("Cannot determine data directory".to_string()))
}

pub fn app_config_dir() -> Result<PathBuf, StorageError> {
    Ok(config_home()?.join(APP_DIR))
}

pub fn app_data_dir() -> Result<PathBuf, StorageError> {
    Ok(data_home()?.join(APP_DIR))
}

/// Root of the file registry
pub fn contexts_dir() -> Result<PathBuf, StorageError> {
    Ok(app_config_dir()?.join("contexts"))
}

/// Default sled registry location
pub fn contexts_db_dir() -> Result<PathBuf, StorageError> {
    Ok(app_data_dir()?.join("contexts.db"))
}

pub fn default_log_file() -> Result<PathBuf, StorageError> {
    Ok(app_data_dir()?.join("kontext.log"))
}
