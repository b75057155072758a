use thiserror::Error;

use nodeswitch_platform::ExecutionError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Version manager is not installed")]
    NotInstalled,

    #[error("Invalid version format: {input} (expected X.Y.Z)")]
    InvalidVersionFormat { input: String },

    #[error("Version not installed: {version}")]
    VersionNotInstalled { version: String },

    #[error("Version already installed: {version}")]
    VersionAlreadyInstalled { version: String },

    #[error("Version manager installation failed: {source}")]
    InstallationFailed {
        #[source]
        source: ExecutionError,
    },

    #[error("Failed to switch to {version}: {source}")]
    SwitchFailed {
        version: String,
        #[source]
        source: ExecutionError,
    },

    #[error("Failed to install {version}: {source}")]
    InstallVersionFailed {
        version: String,
        #[source]
        source: ExecutionError,
    },

    #[error("Failed to set default version to {version}: {source}")]
    SetDefaultFailed {
        version: String,
        #[source]
        source: ExecutionError,
    },

    #[error("Operation not supported by this version manager: {operation}")]
    Unsupported { operation: &'static str },
}

impl ManagerError {
    /// The subprocess failure behind this error, if one was attempted.
    #[must_use]
    pub fn execution_error(&self) -> Option<&ExecutionError> {
        match self {
            Self::InstallationFailed { source }
            | Self::SwitchFailed { source, .. }
            | Self::InstallVersionFailed { source, .. }
            | Self::SetDefaultFailed { source, .. } => Some(source),
            Self::NotInstalled
            | Self::InvalidVersionFormat { .. }
            | Self::VersionNotInstalled { .. }
            | Self::VersionAlreadyInstalled { .. }
            | Self::Unsupported { .. } => None,
        }
    }

    /// Whether the error was raised by validation before any subprocess ran.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotInstalled
                | Self::InvalidVersionFormat { .. }
                | Self::VersionNotInstalled { .. }
                | Self::VersionAlreadyInstalled { .. }
        )
    }
}
