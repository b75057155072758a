use thiserror::Error;

/// A shell command that could not be run to a successful exit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Failed to spawn `{command}` ({kind}): {message}")]
    Spawn {
        command: String,
        kind: std::io::ErrorKind,
        message: String,
    },

    #[error("`{command}` exited with {}: {stderr}", exit_label(.code))]
    Exited {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` timed out after {seconds}s")]
    TimedOut { command: String, seconds: u64 },
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |code| format!("code {code}"))
}

impl ExecutionError {
    pub fn spawn(command: impl Into<String>, error: &std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. }
            | Self::Exited { command, .. }
            | Self::TimedOut { command, .. } => command,
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exited { code, .. } => *code,
            Self::Spawn { .. } | Self::TimedOut { .. } => None,
        }
    }

    /// Captured error stream, or the spawn/timeout diagnostic when the
    /// process never produced one.
    #[must_use]
    pub fn stderr(&self) -> String {
        match self {
            Self::Exited { stderr, .. } => stderr.clone(),
            Self::Spawn { message, .. } => message.clone(),
            Self::TimedOut { seconds, .. } => format!("timed out after {seconds}s"),
        }
    }
}
