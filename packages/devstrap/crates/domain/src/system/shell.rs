use super::platform::OsType;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// Login shell flavour, used to pick the profile file and the probe shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Zsh,
    Bash,
    Other,
}

impl ShellKind {
    /// Classifies a `$SHELL` value such as `/bin/zsh`.
    pub fn from_shell_path(shell: &str) -> Self {
        let name = Path::new(shell)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        match name {
            "zsh" => ShellKind::Zsh,
            "bash" => ShellKind::Bash,
            _ => ShellKind::Other,
        }
    }

    pub fn detect() -> Self {
        std::env::var("SHELL")
            .map(|s| Self::from_shell_path(&s))
            .unwrap_or(ShellKind::Other)
    }

    /// Profile file sourced by new interactive shells.
    pub fn profile_path(&self, home: &Path, os: OsType) -> PathBuf {
        match (self, os) {
            (ShellKind::Zsh, _) => home.join(".zshrc"),
            (ShellKind::Bash, OsType::MacOS) => home.join(".bash_profile"),
            (ShellKind::Bash, _) => home.join(".bashrc"),
            (ShellKind::Other, _) => home.join(".profile"),
        }
    }

    /// Interpreter used to source the profile before health probes.
    pub fn program(&self) -> &'static str {
        match self {
            ShellKind::Zsh => "zsh",
            ShellKind::Bash => "bash",
            ShellKind::Other => "sh",
        }
    }
}

/// Creates the profile file empty if it does not exist yet.
pub fn ensure_profile_exists(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}
