use super::CliError;
use devstrap::application::preflight;
use devstrap::domain::system::platform::{PlatformDetector, PlatformInfo};
use devstrap::domain::system::shell::ShellKind;
use devstrap::infrastructure::adapters::brew::BrewAdapter;
use std::path::PathBuf;

/// The machine devstrap is about to modify.
#[derive(Debug)]
pub struct Host {
    pub platform: PlatformInfo,
    pub brew: PathBuf,
    pub shell: ShellKind,
    pub profile: PathBuf,
    pub warnings: Vec<String>,
}

impl Host {
    /// Runs the preflight checks; fails before anything is asked or changed.
    pub fn detect() -> Result<Self, CliError> {
        let home = dirs::home_dir().ok_or(CliError::NoHome)?;
        let platform = PlatformDetector::detect();
        let free = PlatformDetector::available_space(&home);

        let report = preflight::run(platform, BrewAdapter::locate, free)?;
        let shell = ShellKind::detect();
        let profile = shell.profile_path(&home, report.platform.os_type);

        Ok(Self {
            platform: report.platform,
            brew: report.brew,
            shell,
            profile,
            warnings: report.warnings,
        })
    }
}
