//! Process-level plumbing shared by the version manager crates.
//!
//! - [`Platform`], resolved once per process and injected everywhere else.
//! - [`CommandRunner`], the seam every version manager talks through, and
//!   [`ShellRunner`], its subprocess-backed implementation.
//! - [`AppPaths`] for settings and log locations.

mod commands;
mod error;
mod paths;
mod platform;
mod runner;

pub use commands::HideWindow;
pub use error::ExecutionError;
pub use paths::{AppPaths, AppPathsError};
pub use platform::Platform;
pub use runner::{CommandRunner, DEFAULT_COMMAND_TIMEOUT, PosixInit, RunnerOptions, ShellRunner};
