use crate::executor::{RetryingExecutor, DEFAULT_MAX_ATTEMPTS};
use domain::entities::intent::{PackageIntent, PackageSet};
use domain::entities::outcome::{InstallReport, Outcome};
use domain::ports::command::{CommandRunner, Sleeper};
use domain::ports::package_manager::PackageManager;

/// Drives installs for a filtered package set.
///
/// Formulas always go before casks; within each kind the set's sorted order
/// is kept. One package is in flight at a time.
pub struct PlanExecutor<'a, P, R, S> {
    pm: &'a P,
    executor: &'a RetryingExecutor<R, S>,
    max_attempts: u32,
}

impl<'a, P, R, S> PlanExecutor<'a, P, R, S>
where
    P: PackageManager,
    R: CommandRunner,
    S: Sleeper,
{
    pub fn new(pm: &'a P, executor: &'a RetryingExecutor<R, S>) -> Self {
        Self {
            pm,
            executor,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Installs everything in `to_install`, recording into `report`.
    pub fn run_into(&self, to_install: &PackageSet, report: &mut InstallReport) {
        let total = to_install.len();

        for (idx, intent) in to_install.iter().enumerate() {
            let title = format!("({}/{}) Installing {}", idx + 1, total, intent);
            let outcome = self.install(&title, intent, self.max_attempts);
            report.record(outcome);
        }
    }

    pub fn run(&self, to_install: &PackageSet) -> InstallReport {
        let mut report = InstallReport::new();
        self.run_into(to_install, &mut report);
        report
    }

    /// The one-time bulk retry: every failed intent gets a single new
    /// attempt using its original kind. Returns how many recovered; a second
    /// call does nothing.
    pub fn retry_failures(&self, report: &mut InstallReport) -> usize {
        let Some(failed) = report.begin_bulk_retry() else {
            tracing::debug!("bulk retry already used");
            return 0;
        };

        let total = failed.len();
        let mut recovered = 0;

        for (idx, intent) in failed.iter().enumerate() {
            let title = format!("({}/{}) Retrying {}", idx + 1, total, intent);
            let outcome = self.install(&title, intent, 1);
            if !outcome.is_failure() {
                recovered += 1;
            }
            report.resolve_retry(outcome);
        }

        tracing::info!(retried = total, recovered, "bulk retry finished");
        recovered
    }

    fn install(&self, title: &str, intent: &PackageIntent, attempts: u32) -> Outcome {
        let command = self.pm.install_command(intent);

        match self.executor.execute(title, attempts, &command) {
            0 => Outcome::Success(intent.clone()),
            exit_code => Outcome::Failure {
                intent: intent.clone(),
                exit_code,
            },
        }
    }
}
