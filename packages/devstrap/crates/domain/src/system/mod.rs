pub mod platform;
pub mod shell;

pub use platform::{Architecture, OsType, PlatformDetector, PlatformInfo};
pub use shell::ShellKind;
