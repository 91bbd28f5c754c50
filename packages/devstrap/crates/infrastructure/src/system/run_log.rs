use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix of the line that separates runs in the log.
pub const RUN_BOUNDARY: &str = "===== devstrap run";

/// `~/.devstrap/devstrap.log`
pub fn default_log_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".devstrap").join("devstrap.log"))
}

/// Opens the append-only run log and writes a boundary marker for this run.
pub fn open(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open run log {:?}", path))?;

    writeln!(
        file,
        "{} started {} =====",
        RUN_BOUNDARY,
        chrono::Local::now().to_rfc3339()
    )
    .context("Failed to write run log boundary")?;

    Ok(file)
}
