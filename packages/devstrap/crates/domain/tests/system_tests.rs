use domain::entities::plan::{CustomPaths, Mirror, Plan};
use domain::entities::{brewfile, settings};
use domain::system::platform::PlatformDetector;
use domain::system::shell::{ensure_profile_exists, ShellKind};
use domain::{PackageKind, PackageSet};
use std::fs;

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn test_platform_detection() {
    let info = PlatformDetector::detect();

    println!("Platform: {}", info);
    assert!(info.is_supported());
    assert!(!info.brew_candidates().is_empty());
}

#[test]
fn test_user_brewfile_import() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Brewfile");
    fs::write(
        &path,
        r#"
tap "homebrew/cask-fonts"

# Shell
brew "git"
brew "zsh-autosuggestions"
brew 'git'

# Apps
cask "visual-studio-code"
cask "font-fira-code"
mas "Xcode", id: 497799835
"#,
    )
    .unwrap();

    let set = brewfile::load(&path).unwrap();

    assert!(set.contains("git", PackageKind::Formula));
    assert!(set.contains("zsh-autosuggestions", PackageKind::Formula));
    assert!(set.contains("font-fira-code", PackageKind::Cask));
    assert!(!set.contains("Xcode", PackageKind::Cask));
    assert_eq!(set.len(), 4);
}

#[test]
fn test_exported_snapshot_is_reloadable() {
    let dir = tempfile::tempdir().unwrap();
    let plan = Plan {
        packages: PackageSet::from_names(["maven", "openjdk@21"], ["android-studio"]),
        jdk: Some("openjdk@21".to_string()),
        mirror: Mirror::Ustc,
        paths: CustomPaths::default(),
    };

    settings::export(dir.path(), &plan).unwrap();
    let reloaded = settings::import(&dir.path().join(settings::SETTINGS_FILE)).unwrap();

    assert_eq!(reloaded, plan);
}

#[test]
fn test_profile_detection_creates_file() {
    let home = tempfile::tempdir().unwrap();
    let profile = ShellKind::Zsh.profile_path(home.path(), PlatformDetector::detect().os_type);

    ensure_profile_exists(&profile).unwrap();
    assert!(profile.exists());
}
