use std::io::Write;

use nodeswitch_backend::{CurrentVersion, SemanticVersion, VersionManager, strip_version_prefix};

use crate::cli::Command;
use crate::error::AppError;

/// Execute one CLI command against `manager`, writing results to `out`.
///
/// # Errors
/// Returns the manager's error for failed mutations, or an I/O error when
/// `out` cannot be written.
pub async fn run(
    command: Command,
    manager: &dyn VersionManager,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match command {
        Command::Status => status(manager, out).await,
        Command::List { others } => list(manager, others, out).await,
        Command::Use { version, default } => use_version(manager, &version, default, out).await,
        Command::Install { version } => install_version(manager, &version, out).await,
        Command::Setup => setup(manager, out).await,
    }
}

async fn status(manager: &dyn VersionManager, out: &mut dyn Write) -> Result<(), AppError> {
    if manager.is_installed().await {
        let version = manager
            .manager_version()
            .await
            .unwrap_or_else(|| "unknown version".to_string());
        writeln!(out, "{}: {version}", manager.name())?;
    } else {
        writeln!(
            out,
            "{}: not installed (run `nodeswitch setup`)",
            manager.name()
        )?;
    }

    writeln!(out, "Node: {}", manager.current_version().await)?;
    Ok(())
}

async fn list(
    manager: &dyn VersionManager,
    others_only: bool,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    if others_only {
        let others = manager.list_other_versions().await;
        if others.is_empty() {
            writeln!(out, "No other Node.js versions installed")?;
        }
        for version in others {
            writeln!(out, "{version}")?;
        }
        return Ok(());
    }

    let current = manager.current_version().await;
    let versions = manager.list_versions().await;
    if versions.is_empty() {
        writeln!(out, "No Node.js versions installed")?;
        return Ok(());
    }

    for version in versions {
        let marker = if is_current(&current, &version) {
            '*'
        } else {
            ' '
        };
        writeln!(out, "{marker} {version}")?;
    }
    Ok(())
}

fn is_current(current: &CurrentVersion, version: &SemanticVersion) -> bool {
    current.as_version() == Some(version)
}

async fn use_version(
    manager: &dyn VersionManager,
    version: &str,
    make_default: bool,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    manager.use_version(version).await?;
    if make_default {
        manager.set_default(version).await?;
    }

    let target = strip_version_prefix(version);
    writeln!(out, "Switched to Node {target}")?;

    let current = manager.current_version().await;
    if current.as_version().is_some_and(|active| active == target) {
        return Ok(());
    }

    writeln!(out, "Node: {current}")?;
    if manager.platform().is_posix() && !make_default {
        writeln!(
            out,
            "note: `nvm use` only lasts for the shell it ran in; pass --default to keep {target} for new shells"
        )?;
    }
    Ok(())
}

async fn install_version(
    manager: &dyn VersionManager,
    version: &str,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let target = strip_version_prefix(version);
    writeln!(out, "Installing Node {target}...")?;
    out.flush()?;

    manager.install_version(version).await?;
    writeln!(out, "Installed Node {target}")?;
    Ok(())
}

async fn setup(manager: &dyn VersionManager, out: &mut dyn Write) -> Result<(), AppError> {
    if manager.is_installed().await {
        match manager.manager_version().await {
            Some(version) => writeln!(out, "{} {version} is already installed", manager.name())?,
            None => writeln!(out, "{} is already installed", manager.name())?,
        }
        return Ok(());
    }

    writeln!(out, "Installing {} for {}...", manager.name(), manager.platform())?;
    out.flush()?;

    manager.install().await?;
    writeln!(
        out,
        "{} installation script executed. Please restart your terminal.",
        manager.name()
    )?;
    Ok(())
}
