use super::intent::PackageIntent;
use std::fmt;

/// Terminal classification of one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(PackageIntent),
    AlreadySatisfied(PackageIntent),
    Failure {
        intent: PackageIntent,
        exit_code: i32,
    },
}

impl Outcome {
    pub fn intent(&self) -> &PackageIntent {
        match self {
            Outcome::Success(intent) | Outcome::AlreadySatisfied(intent) => intent,
            Outcome::Failure { intent, .. } => intent,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }

    /// Short annotation used by summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "installed",
            Outcome::AlreadySatisfied(_) => "already present",
            Outcome::Failure { .. } => "failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure { intent, exit_code } => {
                write!(f, "{}: failed (exit {})", intent, exit_code)
            }
            other => write!(f, "{}: {}", other.intent(), other.label()),
        }
    }
}

/// Accumulated results of one run.
///
/// `successes` holds both `Success` and `AlreadySatisfied`; `failures` only
/// holds `Failure`. The bulk retry may be consumed exactly once.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    successes: Vec<Outcome>,
    failures: Vec<Outcome>,
    bulk_retry_used: bool,
}

impl InstallReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        if outcome.is_failure() {
            self.failures.push(outcome);
        } else {
            self.successes.push(outcome);
        }
    }

    pub fn successes(&self) -> &[Outcome] {
        &self.successes
    }

    pub fn failures(&self) -> &[Outcome] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn bulk_retry_used(&self) -> bool {
        self.bulk_retry_used
    }

    /// Marks the bulk retry as consumed and hands back the failed intents.
    /// Returns `None` when the retry was already used.
    pub fn begin_bulk_retry(&mut self) -> Option<Vec<PackageIntent>> {
        if self.bulk_retry_used {
            return None;
        }
        self.bulk_retry_used = true;
        Some(self.failures.iter().map(|o| o.intent().clone()).collect())
    }

    /// Applies a retry result for an intent that is currently failed.
    ///
    /// A recovered intent moves to `successes`; a repeated failure replaces
    /// the old entry in place so ordering is kept.
    pub fn resolve_retry(&mut self, outcome: Outcome) {
        let Some(pos) = self
            .failures
            .iter()
            .position(|o| o.intent() == outcome.intent())
        else {
            return;
        };

        if outcome.is_failure() {
            self.failures[pos] = outcome;
        } else {
            self.failures.remove(pos);
            self.successes.push(outcome);
        }
    }

    /// Every outcome, successes first.
    pub fn all(&self) -> impl Iterator<Item = &Outcome> {
        self.successes.iter().chain(self.failures.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(name: &str, code: i32) -> Outcome {
        Outcome::Failure {
            intent: PackageIntent::formula(name),
            exit_code: code,
        }
    }

    #[test]
    fn test_record_routes_by_outcome() {
        let mut report = InstallReport::new();
        report.record(Outcome::Success(PackageIntent::formula("git")));
        report.record(Outcome::AlreadySatisfied(PackageIntent::formula("wget")));
        report.record(failure("node", 1));

        assert_eq!(report.successes().len(), 2);
        assert_eq!(report.failures().len(), 1);
    }

    #[test]
    fn test_bulk_retry_only_once() {
        let mut report = InstallReport::new();
        report.record(failure("a", 1));

        assert_eq!(report.begin_bulk_retry().map(|v| v.len()), Some(1));
        assert!(report.begin_bulk_retry().is_none());
        assert!(report.bulk_retry_used());
    }

    #[test]
    fn test_resolve_retry_replaces_in_place() {
        let mut report = InstallReport::new();
        report.record(failure("a", 1));
        report.record(failure("b", 1));
        report.record(failure("c", 1));

        report.resolve_retry(failure("b", 2));
        report.resolve_retry(Outcome::Success(PackageIntent::formula("a")));

        assert_eq!(report.failures(), &[failure("b", 2), failure("c", 1)]);
        assert_eq!(
            report.successes(),
            &[Outcome::Success(PackageIntent::formula("a"))]
        );
    }

    #[test]
    fn test_resolve_retry_ignores_unknown_intent() {
        let mut report = InstallReport::new();
        report.record(failure("a", 1));
        report.resolve_retry(Outcome::Success(PackageIntent::cask("a")));

        assert_eq!(report.failures().len(), 1);
        assert!(report.successes().is_empty());
    }
}
