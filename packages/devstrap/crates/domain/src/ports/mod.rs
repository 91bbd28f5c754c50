pub mod command;
pub mod package_manager;

pub use command::{CommandOutput, CommandRunner, CommandSpec, Sleeper};
pub use package_manager::{PackageError, PackageManager};
