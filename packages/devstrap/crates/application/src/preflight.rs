use domain::system::platform::PlatformInfo;
use std::path::PathBuf;
use thiserror::Error;

/// Below this much free space on the home volume a warning is raised.
pub const MIN_FREE_SPACE: u64 = 5 * 1024 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum PreflightError {
    #[error("{0} is not supported; devstrap needs macOS or Linux")]
    UnsupportedPlatform(PlatformInfo),

    #[error("Homebrew was not found on PATH or in the standard prefixes")]
    MissingPackageManager,
}

/// What the host looks like once the blocking checks passed.
#[derive(Debug)]
pub struct PreflightReport {
    pub platform: PlatformInfo,
    pub brew: PathBuf,
    pub warnings: Vec<String>,
}

/// Checks the host before any prompt is shown. `locate` finds the package
/// manager binary; `free_space` is the free byte count of the home volume
/// when it could be determined.
pub fn run<F>(
    platform: PlatformInfo,
    locate: F,
    free_space: Option<u64>,
) -> Result<PreflightReport, PreflightError>
where
    F: FnOnce(&PlatformInfo) -> Option<PathBuf>,
{
    if !platform.is_supported() {
        return Err(PreflightError::UnsupportedPlatform(platform));
    }

    let brew = locate(&platform).ok_or(PreflightError::MissingPackageManager)?;

    let mut warnings = Vec::new();
    match free_space {
        Some(bytes) if bytes < MIN_FREE_SPACE => warnings.push(format!(
            "Only {:.1} GiB free; large casks may not fit",
            bytes as f64 / (1024.0 * 1024.0 * 1024.0)
        )),
        Some(_) => {}
        None => tracing::debug!("free space unknown"),
    }

    tracing::info!(platform = %platform, brew = %brew.display(), "preflight passed");
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Ok(PreflightReport {
        platform,
        brew,
        warnings,
    })
}
