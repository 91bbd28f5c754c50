//! Fakes for the command, sleep and package-manager seams, plus an
//! in-memory `tracing` sink.

use domain::entities::intent::{PackageIntent, PackageKind};
use domain::ports::command::{CommandOutput, CommandRunner, CommandSpec, Sleeper};
use domain::ports::package_manager::{PackageError, PackageManager};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer};

/// Returns scripted exit codes per rendered command line; anything without a
/// script (or whose script ran out) exits with `default_code`.
pub struct ScriptedRunner {
    scripts: RefCell<HashMap<String, VecDeque<i32>>>,
    default_code: i32,
    pub calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new(default_code: i32) -> Self {
        Self {
            scripts: RefCell::new(HashMap::new()),
            default_code,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn script(self, command_line: &str, codes: &[i32]) -> Self {
        self.scripts
            .borrow_mut()
            .insert(command_line.to_string(), codes.iter().copied().collect());
        self
    }

    pub fn count(&self, command_line: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.to_string() == command_line)
            .count()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        command: &CommandSpec,
        on_tick: &mut dyn FnMut(),
    ) -> std::io::Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        on_tick();

        let line = command.to_string();
        let code = self
            .scripts
            .borrow_mut()
            .get_mut(&line)
            .and_then(|q| q.pop_front())
            .unwrap_or(self.default_code);

        Ok(CommandOutput {
            exit_code: code,
            output: format!("ran {}", line),
        })
    }
}

/// Records sleeps instead of sleeping.
#[derive(Default)]
pub struct CountingSleeper {
    pub sleeps: Cell<usize>,
}

impl Sleeper for CountingSleeper {
    fn sleep(&self, _duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}

/// In-memory package manager whose install commands are plain `brew ...`
/// lines, so a `ScriptedRunner` can decide their fate.
#[derive(Default)]
pub struct FakePackageManager {
    pub known: HashSet<(String, PackageKind)>,
    pub installed: HashMap<PackageKind, Vec<String>>,
    pub prefixes: HashMap<String, PathBuf>,
    pub list_fails: bool,
    pub list_calls: Cell<usize>,
    pub info_calls: Cell<usize>,
}

impl FakePackageManager {
    pub fn knows(mut self, name: &str, kind: PackageKind) -> Self {
        self.known.insert((name.to_string(), kind));
        self
    }

    pub fn with_installed(mut self, kind: PackageKind, names: &[&str]) -> Self {
        self.installed
            .insert(kind, names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn with_prefix(mut self, name: &str, prefix: &str) -> Self {
        self.prefixes.insert(name.to_string(), PathBuf::from(prefix));
        self
    }
}

impl PackageManager for FakePackageManager {
    fn install_command(&self, intent: &PackageIntent) -> CommandSpec {
        match intent.kind {
            PackageKind::Formula => {
                CommandSpec::new("brew").args(["install", intent.name.as_str()])
            }
            PackageKind::Cask => {
                CommandSpec::new("brew").args(["install", "--cask", intent.name.as_str()])
            }
        }
    }

    fn update_command(&self) -> CommandSpec {
        CommandSpec::new("brew").arg("update")
    }

    fn cleanup_command(&self) -> CommandSpec {
        CommandSpec::new("brew").arg("cleanup")
    }

    fn info(&self, name: &str, kind: PackageKind) -> Result<bool, PackageError> {
        self.info_calls.set(self.info_calls.get() + 1);
        Ok(self.known.contains(&(name.to_string(), kind)))
    }

    fn list_installed(&self, kind: PackageKind) -> Result<Vec<String>, PackageError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.list_fails {
            return Err(PackageError::CommandFailed {
                command: "brew list".to_string(),
                exit_code: 1,
            });
        }
        Ok(self.installed.get(&kind).cloned().unwrap_or_default())
    }

    fn prefix(&self, name: &str) -> Result<PathBuf, PackageError> {
        self.prefixes
            .get(name)
            .cloned()
            .ok_or_else(|| PackageError::NotFound(name.to_string()))
    }
}

/// Collects formatted `tracing` output in memory, one sink per filter.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    fn layer<S>(&self, filter: &str) -> impl Layer<S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let sink = self.clone();
        fmt::layer()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_filter(EnvFilter::new(filter))
    }

    /// Runs `f` with this sink as the only subscriber layer.
    pub fn run<T>(&self, filter: &str, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(self.layer(filter));
        tracing::subscriber::with_default(subscriber, f)
    }

    /// Runs `f` with two sinks side by side, like the file and console layers.
    pub fn run_both<T>(
        first: &Self,
        first_filter: &str,
        second: &Self,
        second_filter: &str,
        f: impl FnOnce() -> T,
    ) -> T {
        let subscriber = tracing_subscriber::registry()
            .with(first.layer(first_filter))
            .with(second.layer(second_filter));
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
