use anyhow::Result;
use std::path::Path;

use domain::entities::health::HealthResult;
use domain::entities::outcome::{InstallReport, Outcome};
use domain::entities::plan::Plan;
use domain::ports::command::{CommandRunner, Sleeper};
use domain::ports::package_manager::PackageManager;
use domain::system::platform::OsType;
use domain::system::shell::ShellKind;

use crate::environment::{EnvReport, EnvironmentConfigurator};
use crate::executor::{RetryingExecutor, DEFAULT_MAX_ATTEMPTS};
use crate::health::HealthVerifier;
use crate::installed_filter;
use crate::plan_executor::PlanExecutor;

/// Carries one plan through the apply phase: index refresh, filtering,
/// installs, the optional bulk retry, environment, health and cleanup.
///
/// Each step is a separate call so the caller can put prompts between them.
pub struct InstallService<'a, P, R, S> {
    pm: &'a P,
    executor: RetryingExecutor<R, S>,
    plan: Plan,
    report: InstallReport,
    max_attempts: u32,
}

impl<'a, P, R, S> InstallService<'a, P, R, S>
where
    P: PackageManager,
    R: CommandRunner,
    S: Sleeper,
{
    pub fn new(pm: &'a P, executor: RetryingExecutor<R, S>, plan: Plan) -> Self {
        Self {
            pm,
            executor,
            plan,
            report: InstallReport::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn report(&self) -> &InstallReport {
        &self.report
    }

    pub fn executor(&self) -> &RetryingExecutor<R, S> {
        &self.executor
    }

    /// Refreshes the package index. A failure only means stale metadata.
    pub fn refresh_index(&self) -> bool {
        let code = self.executor.execute(
            "Updating package index",
            self.max_attempts,
            &self.pm.update_command(),
        );
        if code != 0 {
            tracing::warn!(exit_code = code, "index refresh failed, continuing");
        }
        code == 0
    }

    /// Skips what is already installed and installs the rest.
    pub fn install(&mut self) -> &InstallReport {
        let split = installed_filter::partition(self.pm, &self.plan.packages);

        for intent in split.already_satisfied {
            self.report.record(Outcome::AlreadySatisfied(intent));
        }

        PlanExecutor::new(self.pm, &self.executor)
            .with_max_attempts(self.max_attempts)
            .run_into(&split.to_install, &mut self.report);

        &self.report
    }

    /// Whether a bulk retry could still be offered.
    pub fn can_retry(&self) -> bool {
        self.report.has_failures() && !self.report.bulk_retry_used()
    }

    pub fn retry_failures(&mut self) -> usize {
        PlanExecutor::new(self.pm, &self.executor).retry_failures(&mut self.report)
    }

    pub fn configure_environment(&self, profile: &Path, os: OsType) -> Result<EnvReport> {
        EnvironmentConfigurator::new(self.pm, os).apply(profile, &self.plan)
    }

    pub fn verify(&self, shell: ShellKind, profile: &Path) -> Vec<HealthResult> {
        HealthVerifier::new(self.executor.runner(), shell, profile)
            .check(&self.plan.packages, self.plan.jdk.as_deref())
    }

    /// Single attempt; leftover caches are harmless.
    pub fn cleanup(&self) -> bool {
        self.executor
            .execute("Cleaning up", 1, &self.pm.cleanup_command())
            == 0
    }

    pub fn into_report(self) -> InstallReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingSleeper, FakePackageManager, ScriptedRunner};
    use domain::entities::intent::{PackageIntent, PackageKind, PackageSet};
    use domain::entities::plan::Mirror;
    use std::time::Duration;

    fn service<'a>(
        pm: &'a FakePackageManager,
        runner: ScriptedRunner,
        plan: Plan,
    ) -> InstallService<'a, FakePackageManager, ScriptedRunner, CountingSleeper> {
        let executor = RetryingExecutor::new(runner, CountingSleeper::default())
            .with_delay(Duration::ZERO)
            .hidden();
        InstallService::new(pm, executor, plan)
    }

    fn plan(formulas: &[&str], casks: &[&str]) -> Plan {
        Plan {
            packages: PackageSet::from_names(formulas.iter().copied(), casks.iter().copied()),
            ..Plan::default()
        }
    }

    #[test]
    fn test_installed_packages_are_not_reinstalled() {
        let pm = FakePackageManager::default().with_installed(PackageKind::Formula, &["git"]);
        let mut svc = service(&pm, ScriptedRunner::new(0), plan(&["git", "node"], &[]));

        let report = svc.install();

        assert_eq!(
            report.successes(),
            &[
                Outcome::AlreadySatisfied(PackageIntent::formula("git")),
                Outcome::Success(PackageIntent::formula("node")),
            ]
        );
        assert_eq!(svc.executor().runner().lines(), vec!["brew install node"]);
    }

    #[test]
    fn test_retry_offered_once() {
        let pm = FakePackageManager::default();
        let runner = ScriptedRunner::new(0).script("brew install --cask docker", &[1, 1, 1, 0]);
        let mut svc = service(&pm, runner, plan(&[], &["docker"]));

        svc.install();
        assert!(svc.can_retry());
        assert_eq!(svc.retry_failures(), 1);
        assert!(!svc.can_retry());
        assert!(!svc.report().has_failures());
    }

    #[test]
    fn test_refresh_failure_is_not_fatal() {
        let pm = FakePackageManager::default();
        let runner = ScriptedRunner::new(0).script("brew update", &[1, 1, 1]);
        let mut svc = service(&pm, runner, plan(&["jq"], &[]));

        assert!(!svc.refresh_index());
        svc.install();
        assert_eq!(svc.report().successes().len(), 1);
    }

    #[test]
    fn test_cleanup_is_single_attempt() {
        let pm = FakePackageManager::default();
        let svc = service(&pm, ScriptedRunner::new(1), Plan::default());

        assert!(!svc.cleanup());
        assert_eq!(svc.executor().runner().count("brew cleanup"), 1);
    }

    #[test]
    fn test_full_apply_phase() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".zshrc");
        std::fs::write(&profile, "").unwrap();

        let pm = FakePackageManager::default()
            .with_prefix("openjdk@17", "/home/linuxbrew/.linuxbrew/opt/openjdk@17");
        let plan = Plan {
            jdk: Some("openjdk@17".to_string()),
            mirror: Mirror::Tsinghua,
            ..plan(&["git", "openjdk@17"], &[])
        };
        let mut svc = service(&pm, ScriptedRunner::new(0), plan);

        svc.refresh_index();
        svc.install();
        let env = svc
            .configure_environment(&profile, OsType::Linux)
            .unwrap();
        let health = svc.verify(ShellKind::Bash, &profile);

        assert!(env.failed.is_empty());
        let written = std::fs::read_to_string(&profile).unwrap();
        assert!(written.contains(
            "export JAVA_HOME=\"/home/linuxbrew/.linuxbrew/opt/openjdk@17/libexec\""
        ));
        assert!(written.contains("HOMEBREW_BOTTLE_DOMAIN"));

        let tools: Vec<&str> = health.iter().map(|h| h.tool.as_str()).collect();
        assert_eq!(tools, vec!["git", "openjdk@17"]);
        assert!(health.iter().all(|h| h.ok));
    }
}
