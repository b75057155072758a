use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use nodeswitch_platform::{AppPaths, AppPathsError, PosixInit, RunnerOptions};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Paths(#[from] AppPathsError),

    #[error("Could not read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ignoring malformed settings {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Shell used on macOS/Linux. Falls back to `$SHELL` (bash or zsh), then bash.
    #[serde(default)]
    pub posix_shell: Option<String>,

    /// Source `<nvm_dir>/nvm.sh` directly instead of relying on rc files.
    #[serde(default)]
    pub nvm_dir: Option<PathBuf>,

    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_command_timeout() -> u64 {
    600
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            posix_shell: None,
            nvm_dir: None,
            command_timeout_secs: default_command_timeout(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl AppSettings {
    /// Settings from the user's config directory. A missing file is not an
    /// error; callers fall back to defaults on `Err` once logging is up.
    pub fn load() -> Result<Self, SettingsError> {
        let paths = AppPaths::new()?;
        Self::load_from(&paths.settings_file())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            posix_shell: self.posix_shell.clone(),
            posix_init: self
                .nvm_dir
                .clone()
                .map_or(PosixInit::Interactive, |nvm_dir| PosixInit::NvmScript {
                    nvm_dir,
                }),
            timeout: Duration::from_secs(self.command_timeout_secs.max(1)),
        }
    }
}
