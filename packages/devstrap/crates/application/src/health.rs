use domain::entities::health::HealthResult;
use domain::entities::intent::{PackageKind, PackageSet};
use domain::ports::command::{CommandRunner, CommandSpec};
use domain::system::shell::ShellKind;
use std::path::PathBuf;

/// A version query for one tool implied by the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub tool: String,
    pub invocation: String,
}

impl Probe {
    fn new(tool: impl Into<String>, invocation: &str) -> Self {
        Self {
            tool: tool.into(),
            invocation: invocation.to_string(),
        }
    }
}

/// Which probes a selection implies, in a stable order.
pub fn probes_for(packages: &PackageSet, jdk: Option<&str>) -> Vec<Probe> {
    let has_formula = |name: &str| packages.contains(name, PackageKind::Formula);
    let has_any = |name: &str| has_formula(name) || packages.contains(name, PackageKind::Cask);
    let has_prefixed = |prefix: &str| {
        packages
            .formulas()
            .iter()
            .any(|i| i.name == prefix || i.name.starts_with(&format!("{}@", prefix)))
    };

    let mut probes = Vec::new();

    if has_formula("git") {
        probes.push(Probe::new("git", "git --version"));
    }
    if has_prefixed("node") {
        probes.push(Probe::new("node", "node --version"));
    }
    if has_prefixed("python") {
        probes.push(Probe::new("python", "python3 --version"));
    }
    if has_formula("go") {
        probes.push(Probe::new("go", "go version"));
    }
    if let Some(jdk) = jdk {
        probes.push(Probe::new(jdk, "java -version"));
    }
    if has_any("flutter") {
        probes.push(Probe::new("flutter", "flutter --version"));
    }
    if has_formula("gradle") {
        probes.push(Probe::new("gradle", "gradle --version"));
    }
    if has_formula("maven") {
        probes.push(Probe::new("maven", "mvn -v"));
    }

    probes
}

/// Post-install smoke tests, run in a subshell that has sourced the profile.
pub struct HealthVerifier<R> {
    runner: R,
    shell: ShellKind,
    profile: PathBuf,
}

impl<R: CommandRunner> HealthVerifier<R> {
    pub fn new(runner: R, shell: ShellKind, profile: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            shell,
            profile: profile.into(),
        }
    }

    pub fn check(&self, packages: &PackageSet, jdk: Option<&str>) -> Vec<HealthResult> {
        probes_for(packages, jdk)
            .into_iter()
            .map(|probe| self.run_probe(&probe))
            .collect()
    }

    fn run_probe(&self, probe: &Probe) -> HealthResult {
        let script = format!(
            ". {} >/dev/null 2>&1; {}",
            shell_quote(&self.profile.to_string_lossy()),
            probe.invocation
        );
        let command = CommandSpec::new(self.shell.program()).args(["-c", script.as_str()]);

        let result = match self.runner.run(&command, &mut || {}) {
            Ok(out) if out.success() => {
                let version = out
                    .output
                    .lines()
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .unwrap_or("ok")
                    .to_string();
                HealthResult::healthy(&probe.tool, version)
            }
            Ok(out) => HealthResult::unhealthy(&probe.tool, format!("exit {}", out.exit_code)),
            Err(e) => HealthResult::unhealthy(&probe.tool, e.to_string()),
        };

        tracing::info!(tool = %result.tool, ok = result.ok, detail = %result.detail, "health check");
        result
    }
}

fn shell_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}
