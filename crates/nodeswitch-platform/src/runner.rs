use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace, warn};
use tokio::process::Command;

use crate::commands::HideWindow;
use crate::error::ExecutionError;
use crate::platform::Platform;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

const DEFAULT_POSIX_SHELL: &str = "bash";
const NVM_SCRIPT_PRELUDE: &str = r#"[ -s "$NVM_DIR/nvm.sh" ] && \. "$NVM_DIR/nvm.sh";"#;

/// Runs one shell command to completion and hands back its trimmed stdout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    fn platform(&self) -> Platform;

    async fn execute(&self, command: &str) -> Result<String, ExecutionError>;
}

/// How a POSIX shell gets the `nvm` function defined before running a command.
///
/// nvm installs itself as a shell function rather than an executable, so a
/// plain `sh -c` never sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PosixInit {
    /// `-i` makes the shell read the user's rc files, where the nvm
    /// installer adds its loader.
    #[default]
    Interactive,
    /// Source `$NVM_DIR/nvm.sh` directly, bypassing rc files.
    NvmScript { nvm_dir: PathBuf },
}

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub posix_shell: Option<String>,
    pub posix_init: PosixInit,
    pub timeout: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            posix_shell: None,
            posix_init: PosixInit::default(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

/// [`CommandRunner`] that spawns a platform shell per call.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    platform: Platform,
    shell: String,
    posix_init: PosixInit,
    timeout: Duration,
}

impl ShellRunner {
    #[must_use]
    pub fn new(platform: Platform, options: RunnerOptions) -> Self {
        let shell = if platform.is_windows() {
            windows_shell()
        } else {
            options
                .posix_shell
                .filter(|shell| !shell.trim().is_empty())
                .unwrap_or_else(|| posix_shell_from_env(std::env::var("SHELL").ok()))
        };

        Self {
            platform,
            shell,
            posix_init: options.posix_init,
            timeout: options.timeout,
        }
    }

    #[must_use]
    pub fn shell(&self) -> &str {
        &self.shell
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn shell_args(&self, command: &str) -> Vec<String> {
        match (self.platform, &self.posix_init) {
            (Platform::Windows, _) => vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                command.to_string(),
            ],
            (_, PosixInit::Interactive) => {
                vec!["-i".to_string(), "-c".to_string(), command.to_string()]
            }
            (_, PosixInit::NvmScript { .. }) => vec![
                "-c".to_string(),
                format!("{NVM_SCRIPT_PRELUDE} {command}"),
            ],
        }
    }

    fn build_command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.args(self.shell_args(command));

        if self.platform.is_posix() {
            cmd.env("TERM", "dumb");
            cmd.env("NO_COLOR", "1");
            if let PosixInit::NvmScript { nvm_dir } = &self.posix_init {
                cmd.env("NVM_DIR", nvm_dir);
            }
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd.hide_window();
        cmd
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn execute(&self, command: &str) -> Result<String, ExecutionError> {
        debug!("Executing `{command}` via {}", self.shell);

        let pending = self.build_command(command).output();
        let output = match tokio::time::timeout(self.timeout, pending).await {
            Ok(result) => result.map_err(|error| ExecutionError::spawn(command, &error))?,
            Err(_) => {
                warn!(
                    "`{command}` did not finish within {}s, killing it",
                    self.timeout.as_secs()
                );
                return Err(ExecutionError::TimedOut {
                    command: command.to_string(),
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        trace!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        if !output.stderr.is_empty() {
            trace!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            debug!("`{command}` failed with {:?}", output.status.code());
            Err(ExecutionError::Exited {
                command: command.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

fn windows_shell() -> String {
    if which::which("pwsh").is_ok() {
        "pwsh".to_string()
    } else {
        "powershell".to_string()
    }
}

fn posix_shell_from_env(shell: Option<String>) -> String {
    shell
        .filter(|path| {
            Path::new(path)
                .file_name()
                .and_then(OsStr::to_str)
                .is_some_and(|name| name == "bash" || name == "zsh")
        })
        .unwrap_or_else(|| DEFAULT_POSIX_SHELL.to_string())
}
