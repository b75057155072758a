use std::fmt;

use nodeswitch_backend::{ExecutionError, ManagerError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Manager(#[from] ManagerError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Rejected by validation before any nvm command ran.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Manager(error) if error.is_precondition())
    }

    pub fn report(&self) -> UserReport {
        match self {
            Self::Manager(error) => UserReport::from(error),
            Self::Output(error) => UserReport {
                message: format!("Failed to write output: {error}"),
                hint: None,
            },
        }
    }
}

/// What a person sees when an operation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReport {
    pub message: String,
    pub hint: Option<&'static str>,
}

impl From<&ManagerError> for UserReport {
    fn from(error: &ManagerError) -> Self {
        let (message, hint) = match error {
            ManagerError::NotInstalled => (
                "nvm is not installed.".to_string(),
                Some("Run `nodeswitch setup` to install it, then restart your terminal."),
            ),
            ManagerError::InvalidVersionFormat { input } => (
                format!("'{input}' is not a full Node.js version."),
                Some("Use the X.Y.Z form, for example 20.11.0."),
            ),
            ManagerError::VersionNotInstalled { version } => (
                format!("Node {version} is not installed."),
                Some("Install it first with `nodeswitch install <VERSION>`."),
            ),
            ManagerError::VersionAlreadyInstalled { version } => (
                format!("Node {version} is already installed."),
                Some("Switch to it with `nodeswitch use <VERSION>`."),
            ),
            ManagerError::InstallationFailed { source } => (
                format!("The nvm installer failed: {}", source.stderr()),
                Some("Check your network connection and try again."),
            ),
            ManagerError::SwitchFailed { version, source } => (
                format!("Could not switch to Node {version}: {}", source.stderr()),
                None,
            ),
            ManagerError::InstallVersionFailed { version, source } => (
                format!("Could not install Node {version}: {}", source.stderr()),
                Some("Run `nvm ls-remote` to check the version exists."),
            ),
            ManagerError::SetDefaultFailed { version, source } => (
                format!("Could not make Node {version} the default: {}", source.stderr()),
                None,
            ),
            ManagerError::Unsupported { operation } => (
                format!("This version manager does not support {operation}."),
                None,
            ),
        };

        let message = match error.execution_error().and_then(ExecutionError::exit_code) {
            Some(code) => format!("{message} (exit code {code})"),
            None => message,
        };

        Self { message, hint }
    }
}

impl fmt::Display for UserReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)?;
        if let Some(hint) = self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(command: &str) -> ExecutionError {
        ExecutionError::Exited {
            command: command.to_string(),
            code: Some(1),
            stderr: "N/A: version \"v99.0.0\" is not yet installed.".to_string(),
        }
    }

    #[test]
    fn every_variant_has_a_distinct_message() {
        let errors = [
            ManagerError::NotInstalled,
            ManagerError::InvalidVersionFormat {
                input: "20".to_string(),
            },
            ManagerError::VersionNotInstalled {
                version: "16.20.0".to_string(),
            },
            ManagerError::VersionAlreadyInstalled {
                version: "20.11.0".to_string(),
            },
            ManagerError::InstallationFailed {
                source: failed("curl"),
            },
            ManagerError::SwitchFailed {
                version: "18.19.0".to_string(),
                source: failed("nvm use 18.19.0"),
            },
            ManagerError::InstallVersionFailed {
                version: "99.0.0".to_string(),
                source: failed("nvm install 99.0.0"),
            },
            ManagerError::SetDefaultFailed {
                version: "18.19.0".to_string(),
                source: failed("nvm alias default 18.19.0"),
            },
            ManagerError::Unsupported {
                operation: "set_default",
            },
        ];

        let messages: std::collections::HashSet<String> = errors
            .iter()
            .map(|error| UserReport::from(error).message)
            .collect();

        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn not_installed_points_at_setup() {
        let report = AppError::from(ManagerError::NotInstalled).report();

        assert_eq!(report.message, "nvm is not installed.");
        assert!(report.hint.is_some_and(|hint| hint.contains("nodeswitch setup")));
    }

    #[test]
    fn failure_reports_include_captured_stderr() {
        let report = UserReport::from(&ManagerError::SwitchFailed {
            version: "18.19.0".to_string(),
            source: failed("nvm use 18.19.0"),
        });

        assert!(report.message.contains("18.19.0"));
        assert!(report.message.contains("not yet installed"));
        assert!(report.message.ends_with("(exit code 1)"));
    }

    #[test]
    fn timed_out_failure_has_no_exit_code() {
        let report = UserReport::from(&ManagerError::InstallVersionFailed {
            version: "22.1.0".to_string(),
            source: ExecutionError::TimedOut {
                command: "nvm install 22.1.0".to_string(),
                seconds: 600,
            },
        });

        assert_eq!(
            report.message,
            "Could not install Node 22.1.0: timed out after 600s"
        );
    }

    #[test]
    fn validation_errors_are_preconditions() {
        assert!(AppError::from(ManagerError::NotInstalled).is_precondition());
        assert!(
            !AppError::from(ManagerError::SwitchFailed {
                version: "18.19.0".to_string(),
                source: failed("nvm use 18.19.0"),
            })
            .is_precondition()
        );
        assert!(!AppError::from(std::io::Error::other("closed")).is_precondition());
    }

    #[test]
    fn display_puts_hint_on_second_line() {
        let report = UserReport {
            message: "Node 20.11.0 is already installed.".to_string(),
            hint: Some("Switch to it."),
        };

        assert_eq!(
            report.to_string(),
            "error: Node 20.11.0 is already installed.\n  hint: Switch to it."
        );
    }
}
