use async_trait::async_trait;

use nodeswitch_platform::Platform;

use crate::error::ManagerError;
use crate::types::{CurrentVersion, SemanticVersion};

/// Operations a UI collaborator may perform against a Node.js version
/// manager.
///
/// Read queries never fail: they degrade to [`CurrentVersion::Unavailable`]
/// or an empty list so a status display can always render. Mutations return
/// a typed [`ManagerError`] and validate their input before any subprocess
/// is spawned.
#[async_trait]
pub trait VersionManager: Send + Sync {
    fn name(&self) -> &'static str;

    fn platform(&self) -> Platform;

    async fn is_installed(&self) -> bool;

    /// Version string reported by the manager itself, if it responds.
    async fn manager_version(&self) -> Option<String>;

    /// Download and run the manager's installer for this platform.
    async fn install(&self) -> Result<(), ManagerError>;

    async fn current_version(&self) -> CurrentVersion;

    /// Installed versions in the order the manager reports them.
    async fn list_versions(&self) -> Vec<SemanticVersion>;

    /// Installed versions other than the active one.
    async fn list_other_versions(&self) -> Vec<SemanticVersion> {
        let current = self.current_version().await;
        let versions = self.list_versions().await;

        match current.as_version() {
            Some(current) => versions
                .into_iter()
                .filter(|version| version != current)
                .collect(),
            None => versions,
        }
    }

    async fn use_version(&self, version: &str) -> Result<(), ManagerError>;

    async fn install_version(&self, version: &str) -> Result<(), ManagerError>;

    /// Make `version` the one new shells resolve to.
    async fn set_default(&self, _version: &str) -> Result<(), ManagerError> {
        Err(ManagerError::Unsupported {
            operation: "set_default",
        })
    }
}
