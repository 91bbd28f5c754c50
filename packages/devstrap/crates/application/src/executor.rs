use domain::ports::command::{CommandRunner, CommandSpec, Sleeper};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Exit code recorded when the command could not be started at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Runs one external command at a time with a spinner and a bounded number
/// of attempts separated by a constant delay.
pub struct RetryingExecutor<R, S> {
    runner: R,
    sleeper: S,
    delay: Duration,
    visible: bool,
}

impl<R: CommandRunner, S: Sleeper> RetryingExecutor<R, S> {
    pub fn new(runner: R, sleeper: S) -> Self {
        Self {
            runner,
            sleeper,
            delay: DEFAULT_RETRY_DELAY,
            visible: true,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Suppresses the spinner (tests, non-interactive output).
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Runs `command` up to `max_attempts` times (at least once) and returns
    /// 0 on the first success, otherwise the last non-zero exit code.
    pub fn execute(&self, title: &str, max_attempts: u32, command: &CommandSpec) -> i32 {
        let attempts = max_attempts.max(1);
        let pb = self.spinner(title);
        let mut last_code = 0;
        let mut last_output = String::new();

        for attempt in 1..=attempts {
            pb.set_message(format!("attempt {}/{}", attempt, attempts));
            tracing::debug!(title, attempt, command = %command, "starting attempt");

            let (code, output) = match self.runner.run(command, &mut || pb.tick()) {
                Ok(out) => (out.exit_code, out.output),
                Err(e) => (
                    SPAWN_FAILURE_EXIT_CODE,
                    format!("failed to start `{}`: {}", command, e),
                ),
            };

            if code == 0 {
                tracing::info!(title, attempt, "SUCCESS");
                pb.finish_with_message(format!("{}", console::style("✔ done").green()));
                return 0;
            }

            tracing::warn!(title, attempt, exit_code = code, "FAILURE");
            last_code = code;
            last_output = output;

            if attempt < attempts {
                pb.set_message(format!(
                    "attempt {}/{} failed (exit {}), retrying in {}s",
                    attempt,
                    attempts,
                    code,
                    self.delay.as_secs()
                ));
                self.sleeper.sleep(self.delay);
            }
        }

        // Below `error` so the default console filter never prints raw output.
        tracing::warn!(
            title,
            attempts,
            exit_code = last_code,
            output = %last_output.trim_end(),
            "giving up"
        );
        pb.finish_with_message(format!(
            "{}",
            console::style(format!("✖ failed (exit {})", last_code)).red()
        ));
        last_code
    }

    fn spinner(&self, title: &str) -> ProgressBar {
        let pb = if self.visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "•"])
            .template("{spinner:.cyan} {prefix:.bold} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_prefix(title.to_string());
        pb
    }
}
