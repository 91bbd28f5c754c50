use anyhow::{Context, Result};
use domain::entities::intent::PackageKind;
use domain::entities::plan::Plan;
use domain::entities::profile::ProfileLine;
use domain::ports::package_manager::PackageManager;
use domain::system::platform::OsType;
use infrastructure::system::ProfileWriter;
use std::path::Path;

const ANDROID_CASKS: &[&str] = &["android-studio", "android-commandlinetools"];
const FLUTTER: &str = "flutter";

/// A named group of profile lines. Lines that could not be derived carry the
/// reason instead.
#[derive(Debug)]
pub struct EnvStep {
    pub name: &'static str,
    pub lines: Result<Vec<ProfileLine>, String>,
}

/// What the configuration phase managed to do.
#[derive(Debug, Default)]
pub struct EnvReport {
    pub written: usize,
    pub applied: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

/// Derives shell environment lines from a plan and writes them to the
/// profile, one isolated step at a time.
pub struct EnvironmentConfigurator<'a, P> {
    pm: &'a P,
    os: OsType,
}

impl<'a, P: PackageManager> EnvironmentConfigurator<'a, P> {
    pub fn new(pm: &'a P, os: OsType) -> Self {
        Self { pm, os }
    }

    pub fn steps(&self, plan: &Plan) -> Vec<EnvStep> {
        let mut steps = Vec::new();

        if let Some(endpoints) = plan.mirror.endpoints() {
            steps.push(EnvStep {
                name: "Homebrew mirror",
                lines: Ok(vec![
                    ProfileLine::export("HOMEBREW_API_DOMAIN", endpoints.api_domain),
                    ProfileLine::export("HOMEBREW_BOTTLE_DOMAIN", endpoints.bottle_domain),
                    ProfileLine::export("HOMEBREW_BREW_GIT_REMOTE", endpoints.brew_git_remote),
                    ProfileLine::export("HOMEBREW_CORE_GIT_REMOTE", endpoints.core_git_remote),
                ]
                .into_iter()
                .map(|l| l.in_section("Homebrew mirror"))
                .collect()),
            });
        }

        if let Some(jdk) = &plan.jdk {
            steps.push(EnvStep {
                name: "Java",
                lines: self.java_lines(jdk),
            });
        }

        let wants_android = plan.paths.android_sdk.is_some()
            || ANDROID_CASKS
                .iter()
                .any(|c| plan.packages.contains(c, PackageKind::Cask));
        if wants_android {
            let sdk = match &plan.paths.android_sdk {
                Some(path) => path.display().to_string(),
                None => self.default_android_sdk().to_string(),
            };
            steps.push(EnvStep {
                name: "Android SDK",
                lines: Ok(vec![
                    ProfileLine::export("ANDROID_HOME", &sdk),
                    ProfileLine::export(
                        "PATH",
                        "$ANDROID_HOME/platform-tools:$ANDROID_HOME/cmdline-tools/latest/bin:$PATH",
                    ),
                ]
                .into_iter()
                .map(|l| l.in_section("Android SDK"))
                .collect()),
            });
        }

        let wants_flutter = plan.packages.contains(FLUTTER, PackageKind::Cask)
            || plan.packages.contains(FLUTTER, PackageKind::Formula);
        if let (true, Some(endpoints)) = (wants_flutter, plan.mirror.endpoints()) {
            steps.push(EnvStep {
                name: "Flutter mirror",
                lines: Ok(vec![
                    ProfileLine::export("PUB_HOSTED_URL", endpoints.pub_hosted_url),
                    ProfileLine::export(
                        "FLUTTER_STORAGE_BASE_URL",
                        endpoints.flutter_storage_base_url,
                    ),
                ]
                .into_iter()
                .map(|l| l.in_section("Flutter mirror"))
                .collect()),
            });
        }

        steps.push(EnvStep {
            name: "Aliases",
            lines: Ok(vec![ProfileLine::alias(
                "brewup",
                "brew update && brew upgrade && brew cleanup",
            )
            .in_section("Aliases")]),
        });

        steps
    }

    /// Writes every step to `profile`. An unusable profile fails the whole
    /// phase; a failing step is recorded and the rest still run.
    pub fn apply(&self, profile: &Path, plan: &Plan) -> Result<EnvReport> {
        let writer = ProfileWriter::open(profile)
            .with_context(|| format!("Shell profile {:?} is not writable", profile))?;

        let mut report = EnvReport::default();

        for step in self.steps(plan) {
            let result = step
                .lines
                .and_then(|lines| writer.ensure_lines(&lines).map_err(|e| e.to_string()));

            match result {
                Ok(written) => {
                    tracing::info!(step = step.name, written, "configured environment");
                    report.written += written;
                    report.applied.push(step.name);
                }
                Err(reason) => {
                    tracing::warn!(step = step.name, %reason, "environment step failed");
                    report.failed.push((step.name, reason));
                }
            }
        }

        Ok(report)
    }

    fn java_lines(&self, jdk: &str) -> Result<Vec<ProfileLine>, String> {
        let prefix = self
            .pm
            .prefix(jdk)
            .map_err(|e| format!("could not locate {}: {}", jdk, e))?;

        let home = match self.os {
            OsType::MacOS => prefix.join("libexec/openjdk.jdk/Contents/Home"),
            _ => prefix.join("libexec"),
        };

        Ok(vec![
            ProfileLine::export("JAVA_HOME", home.display()).in_section("Java"),
            ProfileLine::export("PATH", "$JAVA_HOME/bin:$PATH").in_section("Java"),
        ])
    }

    fn default_android_sdk(&self) -> &'static str {
        match self.os {
            OsType::MacOS => "$HOME/Library/Android/sdk",
            _ => "$HOME/Android/Sdk",
        }
    }
}
