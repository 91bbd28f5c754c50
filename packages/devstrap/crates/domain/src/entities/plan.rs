use super::intent::PackageSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where Homebrew downloads bottles and clones its taps from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mirror {
    #[default]
    Official,
    Tsinghua,
    Ustc,
    Aliyun,
}

/// Endpoints exported for a non-official mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorEndpoints {
    pub api_domain: &'static str,
    pub bottle_domain: &'static str,
    pub brew_git_remote: &'static str,
    pub core_git_remote: &'static str,
    pub pub_hosted_url: &'static str,
    pub flutter_storage_base_url: &'static str,
}

impl Mirror {
    pub const ALL: [Mirror; 4] = [
        Mirror::Official,
        Mirror::Tsinghua,
        Mirror::Ustc,
        Mirror::Aliyun,
    ];

    pub fn endpoints(&self) -> Option<MirrorEndpoints> {
        match self {
            Mirror::Official => None,
            Mirror::Tsinghua => Some(MirrorEndpoints {
                api_domain: "https://mirrors.tuna.tsinghua.edu.cn/homebrew-bottles/api",
                bottle_domain: "https://mirrors.tuna.tsinghua.edu.cn/homebrew-bottles",
                brew_git_remote: "https://mirrors.tuna.tsinghua.edu.cn/git/homebrew/brew.git",
                core_git_remote:
                    "https://mirrors.tuna.tsinghua.edu.cn/git/homebrew/homebrew-core.git",
                pub_hosted_url: "https://mirrors.tuna.tsinghua.edu.cn/dart-pub",
                flutter_storage_base_url: "https://mirrors.tuna.tsinghua.edu.cn/flutter",
            }),
            Mirror::Ustc => Some(MirrorEndpoints {
                api_domain: "https://mirrors.ustc.edu.cn/homebrew-bottles/api",
                bottle_domain: "https://mirrors.ustc.edu.cn/homebrew-bottles",
                brew_git_remote: "https://mirrors.ustc.edu.cn/brew.git",
                core_git_remote: "https://mirrors.ustc.edu.cn/homebrew-core.git",
                pub_hosted_url: "https://mirrors.ustc.edu.cn/dart-pub",
                flutter_storage_base_url: "https://mirrors.ustc.edu.cn/flutter",
            }),
            Mirror::Aliyun => Some(MirrorEndpoints {
                api_domain: "https://mirrors.aliyun.com/homebrew-bottles/api",
                bottle_domain: "https://mirrors.aliyun.com/homebrew/homebrew-bottles",
                brew_git_remote: "https://mirrors.aliyun.com/homebrew/brew.git",
                core_git_remote: "https://mirrors.aliyun.com/homebrew/homebrew-core.git",
                pub_hosted_url: "https://pub.flutter-io.cn",
                flutter_storage_base_url: "https://storage.flutter-io.cn",
            }),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mirror::Official => "Official Homebrew servers",
            Mirror::Tsinghua => "Tsinghua University (TUNA)",
            Mirror::Ustc => "University of Science and Technology of China",
            Mirror::Aliyun => "Alibaba Cloud",
        }
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mirror::Official => "official",
            Mirror::Tsinghua => "tsinghua",
            Mirror::Ustc => "ustc",
            Mirror::Aliyun => "aliyun",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mirror {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mirror::ALL
            .into_iter()
            .find(|m| m.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown mirror '{}' (expected one of: official, tsinghua, ustc, aliyun)",
                    s
                )
            })
    }
}

/// User overrides for SDK locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_sdk: Option<PathBuf>,
}

/// Everything the apply phase needs. Produced once by prompts or import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub packages: PackageSet,
    /// Concrete JDK formula; `None` keeps whatever JDK the system has.
    pub jdk: Option<String>,
    pub mirror: Mirror,
    pub paths: CustomPaths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_parse_roundtrip() {
        for m in Mirror::ALL {
            assert_eq!(m.to_string().parse::<Mirror>(), Ok(m));
        }
        assert!("TUNA".parse::<Mirror>().is_err());
        assert_eq!(" Ustc ".parse::<Mirror>(), Ok(Mirror::Ustc));
    }

    #[test]
    fn test_only_official_has_no_endpoints() {
        assert!(Mirror::Official.endpoints().is_none());
        assert!(Mirror::Aliyun.endpoints().is_some());
    }
}
