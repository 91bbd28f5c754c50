use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Operating system type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsType {
    MacOS,
    Linux,
    Windows,
    Unknown,
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsType::MacOS => write!(f, "macOS"),
            OsType::Linux => write!(f, "Linux"),
            OsType::Windows => write!(f, "Windows"),
            OsType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    X86_64,
    Aarch64,
    Unknown,
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::X86_64 => write!(f, "x86_64"),
            Architecture::Aarch64 => write!(f, "arm64"),
            Architecture::Unknown => write!(f, "unknown"),
        }
    }
}

/// Complete platform information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub os_type: OsType,
    pub os_version: String,
    pub arch: Architecture,
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.os_type, self.os_version, self.arch)
    }
}

impl PlatformInfo {
    /// Homebrew only runs on macOS and Linux.
    pub fn is_supported(&self) -> bool {
        matches!(self.os_type, OsType::MacOS | OsType::Linux)
    }

    /// Default Homebrew prefix for this platform.
    pub fn homebrew_prefix(&self) -> PathBuf {
        match (self.os_type, self.arch) {
            (OsType::MacOS, Architecture::Aarch64) => PathBuf::from("/opt/homebrew"),
            (OsType::Linux, _) => PathBuf::from("/home/linuxbrew/.linuxbrew"),
            _ => PathBuf::from("/usr/local"),
        }
    }

    /// Every location `brew` is commonly found at, preferred first.
    pub fn brew_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = vec![self.homebrew_prefix().join("bin").join("brew")];
        for prefix in ["/opt/homebrew", "/usr/local", "/home/linuxbrew/.linuxbrew"] {
            let path = Path::new(prefix).join("bin").join("brew");
            if !candidates.contains(&path) {
                candidates.push(path);
            }
        }
        candidates
    }
}

/// Platform detection service
pub struct PlatformDetector;

impl PlatformDetector {
    /// Detect the current platform information
    pub fn detect() -> PlatformInfo {
        let info = os_info::get();

        PlatformInfo {
            os_type: Self::detect_os_type(&info),
            os_version: info.version().to_string(),
            arch: Self::detect_architecture(),
        }
    }

    fn detect_os_type(info: &os_info::Info) -> OsType {
        match info.os_type() {
            os_info::Type::Macos => OsType::MacOS,
            os_info::Type::Windows => OsType::Windows,
            os_info::Type::Alpine
            | os_info::Type::Arch
            | os_info::Type::CentOS
            | os_info::Type::Debian
            | os_info::Type::Fedora
            | os_info::Type::Linux
            | os_info::Type::Mint
            | os_info::Type::NixOS
            | os_info::Type::openSUSE
            | os_info::Type::OracleLinux
            | os_info::Type::Pop
            | os_info::Type::Raspbian
            | os_info::Type::Redhat
            | os_info::Type::RedHatEnterprise
            | os_info::Type::Solus
            | os_info::Type::Ubuntu => OsType::Linux,
            _ => match std::env::consts::OS {
                "macos" => OsType::MacOS,
                "linux" => OsType::Linux,
                "windows" => OsType::Windows,
                _ => OsType::Unknown,
            },
        }
    }

    fn detect_architecture() -> Architecture {
        match std::env::consts::ARCH {
            "x86_64" => Architecture::X86_64,
            "aarch64" => Architecture::Aarch64,
            _ => Architecture::Unknown,
        }
    }

    /// Free bytes on the disk holding `path`, if any disk matches.
    pub fn available_space(path: &Path) -> Option<u64> {
        let disks = sysinfo::Disks::new_with_refreshed_list();

        disks
            .list()
            .iter()
            .filter(|d| path.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().as_os_str().len())
            .map(|d| d.available_space())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(os_type: OsType, arch: Architecture) -> PlatformInfo {
        PlatformInfo {
            os_type,
            os_version: "test".to_string(),
            arch,
        }
    }

    #[test]
    fn test_supported_platforms() {
        assert!(info(OsType::MacOS, Architecture::Aarch64).is_supported());
        assert!(info(OsType::Linux, Architecture::X86_64).is_supported());
        assert!(!info(OsType::Windows, Architecture::X86_64).is_supported());
    }

    #[test]
    fn test_homebrew_prefix() {
        assert_eq!(
            info(OsType::MacOS, Architecture::Aarch64).homebrew_prefix(),
            PathBuf::from("/opt/homebrew")
        );
        assert_eq!(
            info(OsType::MacOS, Architecture::X86_64).homebrew_prefix(),
            PathBuf::from("/usr/local")
        );
    }

    #[test]
    fn test_brew_candidates_are_unique() {
        let candidates = info(OsType::MacOS, Architecture::Aarch64).brew_candidates();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], PathBuf::from("/opt/homebrew/bin/brew"));
    }
}
