use super::command::CommandSpec;
use crate::entities::intent::{PackageIntent, PackageKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Package not found: {0}")]
    NotFound(String),
    #[error("`{command}` exited with code {exit_code}")]
    CommandFailed { command: String, exit_code: i32 },
    #[error("Failed to run package manager: {0}")]
    Spawn(#[from] std::io::Error),
}

/// The external package manager, seen only through its contract:
/// exit 0 means success, anything else is a failure.
pub trait PackageManager {
    /// Command that installs one intent; the verb depends on the kind.
    fn install_command(&self, intent: &PackageIntent) -> CommandSpec;

    /// Command that refreshes the package index.
    fn update_command(&self) -> CommandSpec;

    /// Command that prunes caches and stale downloads.
    fn cleanup_command(&self) -> CommandSpec;

    /// Whether `name` is a known package of `kind`.
    fn info(&self, name: &str, kind: PackageKind) -> Result<bool, PackageError>;

    /// Names of everything of `kind` currently installed.
    fn list_installed(&self, kind: PackageKind) -> Result<Vec<String>, PackageError>;

    /// Installation prefix of a formula.
    fn prefix(&self, name: &str) -> Result<PathBuf, PackageError>;
}
