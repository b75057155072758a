mod error;
mod traits;
mod types;

pub use error::ManagerError;
pub use traits::VersionManager;
pub use types::{CurrentVersion, SemanticVersion, VersionParseError, strip_version_prefix};

pub use nodeswitch_platform::{CommandRunner, ExecutionError, Platform};
