use super::brewfile::{self, BrewfileError};
use super::intent::PackageKind;
use super::plan::{CustomPaths, Mirror, Plan};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SETTINGS_FILE: &str = "devstrap.toml";
pub const BREWFILE: &str = "Brewfile";
const SETTINGS_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unsupported settings version {0}")]
    UnsupportedVersion(u32),
    #[error("JDK '{0}' is not listed as a formula in the Brewfile")]
    JdkNotInBrewfile(String),
    #[error(transparent)]
    Brewfile(#[from] BrewfileError),
}

/// On-disk snapshot of a plan. Package lists live in the companion Brewfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub version: u32,
    #[serde(default)]
    pub mirror: Mirror,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdk: Option<String>,
    #[serde(default)]
    pub paths: CustomPaths,
    /// Brewfile path, relative to the settings file.
    #[serde(default = "default_brewfile")]
    pub brewfile: String,
}

fn default_brewfile() -> String {
    BREWFILE.to_string()
}

impl Settings {
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            version: SETTINGS_VERSION,
            mirror: plan.mirror,
            jdk: plan.jdk.clone(),
            paths: plan.paths.clone(),
            brewfile: default_brewfile(),
        }
    }
}

/// Writes `devstrap.toml` and `Brewfile` into `dir`, returning the settings path.
pub fn export(dir: &Path, plan: &Plan) -> Result<PathBuf, SettingsError> {
    fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let settings = Settings::from_plan(plan);
    let settings_path = dir.join(SETTINGS_FILE);
    let content = toml::to_string_pretty(&settings)?;

    fs::write(&settings_path, content).map_err(|source| SettingsError::Io {
        path: settings_path.clone(),
        source,
    })?;

    brewfile::save(&dir.join(&settings.brewfile), &plan.packages)?;

    Ok(settings_path)
}

/// Loads a settings file (or a directory containing one) back into a plan.
pub fn import(path: &Path) -> Result<Plan, SettingsError> {
    let settings_path = if path.is_dir() {
        path.join(SETTINGS_FILE)
    } else {
        path.to_path_buf()
    };

    let content = fs::read_to_string(&settings_path).map_err(|source| SettingsError::Io {
        path: settings_path.clone(),
        source,
    })?;
    let settings: Settings = toml::from_str(&content)?;

    if settings.version != SETTINGS_VERSION {
        return Err(SettingsError::UnsupportedVersion(settings.version));
    }

    let base = settings_path.parent().unwrap_or_else(|| Path::new("."));
    let packages = brewfile::load(&base.join(&settings.brewfile))?;

    if let Some(jdk) = &settings.jdk {
        if !packages.contains(jdk, PackageKind::Formula) {
            return Err(SettingsError::JdkNotInBrewfile(jdk.clone()));
        }
    }

    Ok(Plan {
        packages,
        jdk: settings.jdk,
        mirror: settings.mirror,
        paths: settings.paths,
    })
}
