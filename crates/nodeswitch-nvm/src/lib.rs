//! nvm and nvm-windows driven through a [`CommandRunner`].

pub mod commands;
mod service;
mod version;

pub use commands::CommandSpec;
pub use service::NvmService;
pub use version::parse_versions;

pub use nodeswitch_backend::{
    CommandRunner, CurrentVersion, ExecutionError, ManagerError, Platform, SemanticVersion,
    VersionManager,
};
