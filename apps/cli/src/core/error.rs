use devstrap::application::preflight::PreflightError;
use devstrap::domain::entities::brewfile::BrewfileError;
use devstrap::domain::entities::settings::SettingsError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error("Could not load settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Could not read Brewfile: {0}")]
    Brewfile(#[from] BrewfileError),

    #[error("Shell profile {path:?} could not be configured: {reason}")]
    Profile { path: PathBuf, reason: String },

    #[error("{0} package(s) failed to install")]
    InstallFailures(usize),

    #[error("I/O error: {0}")]
    Io(io::Error),

    #[error("Could not find home directory")]
    NoHome,

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        // cliclack reports Esc / Ctrl-C as an interrupted read.
        if e.kind() == io::ErrorKind::Interrupted {
            CliError::Cancelled
        } else {
            CliError::Io(e)
        }
    }
}

impl CliError {
    /// Returns a themed, actionable suggestion for the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Preflight(PreflightError::MissingPackageManager) => Some(
                "Install Homebrew from https://brew.sh and open a new shell.".to_string(),
            ),
            CliError::Preflight(PreflightError::UnsupportedPlatform(_)) => {
                Some("Run devstrap on macOS or Linux.".to_string())
            }
            CliError::Settings(_) => Some(
                "Point --from at a directory written by `devstrap setup --export`.".to_string(),
            ),
            CliError::Profile { .. } => {
                Some("Check the file's permissions, then run setup again.".to_string())
            }
            CliError::InstallFailures(_) => {
                Some("Run setup again; installed packages are skipped.".to_string())
            }
            _ => None,
        }
    }

    pub fn render(&self, log_file: Option<&Path>) {
        eprintln!("\n{} {}", console::style("Error:").red().bold(), self);
        if let Some(s) = self.suggestion() {
            eprintln!("{} {}", console::style("  help:").dim(), s);
        }
        if let Some(log) = log_file {
            eprintln!(
                "{} {}",
                console::style("  log:").dim(),
                console::style(log.display()).underlined()
            );
        }
    }
}
