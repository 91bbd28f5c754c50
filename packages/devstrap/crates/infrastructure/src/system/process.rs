use domain::ports::command::{CommandOutput, CommandRunner, CommandSpec, Sleeper};
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;

/// Interval between liveness polls while a child runs.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Spawns real child processes.
///
/// Combined stdout/stderr goes to a scratch file that is removed once the
/// child has exited and the output has been read back.
pub struct ProcessRunner {
    tick: Duration,
    scratch_dir: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::with_tick(DEFAULT_TICK)
    }

    pub fn with_tick(tick: Duration) -> Self {
        Self {
            tick,
            scratch_dir: None,
        }
    }

    /// Creates scratch files in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &CommandSpec, on_tick: &mut dyn FnMut()) -> io::Result<CommandOutput> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("devstrap-").suffix(".out");
        let scratch = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let stdout = scratch.as_file().try_clone()?;
        let stderr = scratch.as_file().try_clone()?;

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()?;

        let status = wait_polling(&mut child, self.tick, on_tick, Child::try_wait)?;

        let bytes = std::fs::read(scratch.path())?;
        scratch.close()?;

        Ok(CommandOutput {
            exit_code: exit_code(status),
            output: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Polls `child` until it exits. If polling fails the child is killed and
/// reaped before the error is returned.
fn wait_polling(
    child: &mut Child,
    tick: Duration,
    on_tick: &mut dyn FnMut(),
    mut poll: impl FnMut(&mut Child) -> io::Result<Option<ExitStatus>>,
) -> io::Result<ExitStatus> {
    loop {
        match poll(child) {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {}
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        }
        on_tick();
        std::thread::sleep(tick);
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Sleeps the current thread.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
