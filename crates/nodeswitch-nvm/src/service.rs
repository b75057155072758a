use async_trait::async_trait;
use log::{debug, info};

use nodeswitch_backend::{
    CommandRunner, CurrentVersion, ExecutionError, ManagerError, Platform, SemanticVersion,
    VersionManager, strip_version_prefix,
};

use crate::commands::{
    BOOTSTRAP, CommandSpec, INSTALL_VERSION, LIST_INSTALLED, MANAGER_VERSION, RUNTIME_VERSION,
    SET_DEFAULT, USE_VERSION,
};
use crate::version::{last_line, parse_versions};

/// [`VersionManager`] backed by nvm (POSIX) or nvm-windows.
///
/// Holds no state besides the runner: every query re-runs the underlying
/// command, since versions can be installed or switched from other shells.
#[derive(Debug, Clone)]
pub struct NvmService<R> {
    runner: R,
}

impl<R: CommandRunner> NvmService<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn run(&self, spec: &CommandSpec) -> Result<String, ExecutionError> {
        debug!("nvm: running {}", spec.name);
        self.runner.execute(spec.resolve(self.platform())).await
    }

    async fn run_for(
        &self,
        spec: &CommandSpec,
        version: &SemanticVersion,
    ) -> Result<String, ExecutionError> {
        debug!("nvm: running {} for {version}", spec.name);
        self.runner
            .execute(&spec.with_argument(self.platform(), version.as_str()))
            .await
    }

    async fn ensure_installed(&self) -> Result<(), ManagerError> {
        if self.is_installed().await {
            Ok(())
        } else {
            Err(ManagerError::NotInstalled)
        }
    }

    /// Checks shared by `use` and `set_default`: the manager must respond,
    /// the target must already be installed, and it must be a full X.Y.Z.
    async fn installed_target(&self, version: &str) -> Result<SemanticVersion, ManagerError> {
        self.ensure_installed().await?;

        let stripped = strip_version_prefix(version);
        let installed = self.list_versions().await;
        if !installed.iter().any(|candidate| candidate == stripped) {
            return Err(ManagerError::VersionNotInstalled {
                version: stripped.to_string(),
            });
        }

        parse_target(stripped)
    }
}

fn parse_target(stripped: &str) -> Result<SemanticVersion, ManagerError> {
    SemanticVersion::parse(stripped).map_err(|_| ManagerError::InvalidVersionFormat {
        input: stripped.to_string(),
    })
}

#[async_trait]
impl<R: CommandRunner> VersionManager for NvmService<R> {
    fn name(&self) -> &'static str {
        "nvm"
    }

    fn platform(&self) -> Platform {
        self.runner.platform()
    }

    async fn is_installed(&self) -> bool {
        match self.run(&MANAGER_VERSION).await {
            Ok(_) => true,
            Err(error) => {
                debug!("nvm: not available: {error}");
                false
            }
        }
    }

    async fn manager_version(&self) -> Option<String> {
        let output = self.run(&MANAGER_VERSION).await.ok()?;
        let version = strip_version_prefix(last_line(&output));
        (!version.is_empty()).then(|| version.to_string())
    }

    async fn install(&self) -> Result<(), ManagerError> {
        info!("nvm: running installer for {}", self.platform());
        self.run(&BOOTSTRAP)
            .await
            .map(|_| ())
            .map_err(|source| ManagerError::InstallationFailed { source })
    }

    async fn current_version(&self) -> CurrentVersion {
        let output = match self.run(&RUNTIME_VERSION).await {
            Ok(output) => output,
            Err(error) => {
                debug!("nvm: current version unavailable: {error}");
                return CurrentVersion::Unavailable;
            }
        };

        match SemanticVersion::parse(last_line(&output)) {
            Ok(version) => CurrentVersion::Active(version),
            Err(error) => {
                debug!("nvm: unrecognised runtime version output: {error}");
                CurrentVersion::Unavailable
            }
        }
    }

    async fn list_versions(&self) -> Vec<SemanticVersion> {
        match self.run(&LIST_INSTALLED).await {
            Ok(output) => parse_versions(&output),
            Err(error) => {
                debug!("nvm: listing installed versions failed: {error}");
                Vec::new()
            }
        }
    }

    async fn use_version(&self, version: &str) -> Result<(), ManagerError> {
        let target = self.installed_target(version).await?;

        info!("nvm: using version {target}");
        self.run_for(&USE_VERSION, &target)
            .await
            .map(|_| ())
            .map_err(|source| ManagerError::SwitchFailed {
                version: target.to_string(),
                source,
            })
    }

    async fn install_version(&self, version: &str) -> Result<(), ManagerError> {
        self.ensure_installed().await?;

        let target = parse_target(strip_version_prefix(version))?;
        if self.list_versions().await.contains(&target) {
            return Err(ManagerError::VersionAlreadyInstalled {
                version: target.to_string(),
            });
        }

        info!("nvm: installing version {target}");
        self.run_for(&INSTALL_VERSION, &target)
            .await
            .map(|_| ())
            .map_err(|source| ManagerError::InstallVersionFailed {
                version: target.to_string(),
                source,
            })
    }

    async fn set_default(&self, version: &str) -> Result<(), ManagerError> {
        let target = self.installed_target(version).await?;

        info!("nvm: setting default version to {target}");
        self.run_for(&SET_DEFAULT, &target)
            .await
            .map(|_| ())
            .map_err(|source| ManagerError::SetDefaultFailed {
                version: target.to_string(),
                source,
            })
    }
}
