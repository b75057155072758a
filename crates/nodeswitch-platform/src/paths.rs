use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "nodeswitch";

/// Relocates settings and logs under a single directory when set.
const HOME_OVERRIDE_VAR: &str = "NODESWITCH_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
}

/// Where nodeswitch reads its settings and writes its debug log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppPaths {
    /// Resolve paths from `$NODESWITCH_HOME`, falling back to the platform's
    /// per-user config and data directories.
    ///
    /// # Errors
    /// Returns an error when no override is set and the user directories
    /// cannot be determined.
    pub fn new() -> Result<Self, AppPathsError> {
        match std::env::var_os(HOME_OVERRIDE_VAR) {
            Some(root) if !root.is_empty() => Ok(Self::under(root)),
            _ => Self::platform_default(),
        }
    }

    /// Keep both settings and logs directly under `root`.
    #[must_use]
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.clone(),
            data_dir: root,
        }
    }

    #[cfg(target_os = "macos")]
    fn platform_default() -> Result<Self, AppPathsError> {
        let home = dirs::home_dir().ok_or(AppPathsError::HomeDirUnavailable)?;
        Ok(Self::under(
            home.join("Library/Application Support").join(APP_DIR_NAME),
        ))
    }

    #[cfg(not(target_os = "macos"))]
    fn platform_default() -> Result<Self, AppPathsError> {
        Ok(Self {
            config_dir: dirs::config_dir()
                .ok_or(AppPathsError::ConfigDirUnavailable)?
                .join(APP_DIR_NAME),
            data_dir: dirs::data_dir()
                .ok_or(AppPathsError::DataDirUnavailable)?
                .join(APP_DIR_NAME),
        })
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("debug.log")
    }

    /// Previous log contents, kept after the active file is rolled over.
    #[must_use]
    pub fn rotated_log_file(&self) -> PathBuf {
        self.data_dir.join("debug.log.1")
    }

    /// Create the data directory the log is written to. The config directory
    /// is only ever read, so it is left for the user to create.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}
