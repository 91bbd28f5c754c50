use crate::system::process::ProcessRunner;
use domain::entities::intent::{PackageIntent, PackageKind};
use domain::entities::plan::Mirror;
use domain::ports::command::{CommandRunner, CommandSpec};
use domain::ports::package_manager::{PackageError, PackageManager};
use domain::system::platform::PlatformInfo;
use std::path::{Path, PathBuf};

/// Homebrew, driven through its command line.
pub struct BrewAdapter<R = ProcessRunner> {
    brew: PathBuf,
    runner: R,
    env: Vec<(String, String)>,
}

impl BrewAdapter<ProcessRunner> {
    pub fn new(brew: impl Into<PathBuf>) -> Self {
        Self::with_runner(brew, ProcessRunner::new())
    }

    /// Finds `brew` on `PATH`, then in the standard Homebrew prefixes.
    pub fn locate(platform: &PlatformInfo) -> Option<PathBuf> {
        which::which("brew")
            .ok()
            .or_else(|| platform.brew_candidates().into_iter().find(|p| p.exists()))
    }
}

impl<R: CommandRunner> BrewAdapter<R> {
    pub fn with_runner(brew: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            brew: brew.into(),
            runner,
            env: vec![("HOMEBREW_NO_AUTO_UPDATE".to_string(), "1".to_string())],
        }
    }

    /// Routes downloads through `mirror` for commands issued by this adapter.
    pub fn with_mirror(mut self, mirror: Mirror) -> Self {
        if let Some(endpoints) = mirror.endpoints() {
            self.env.extend([
                ("HOMEBREW_API_DOMAIN".to_string(), endpoints.api_domain.to_string()),
                ("HOMEBREW_BOTTLE_DOMAIN".to_string(), endpoints.bottle_domain.to_string()),
                ("HOMEBREW_BREW_GIT_REMOTE".to_string(), endpoints.brew_git_remote.to_string()),
                ("HOMEBREW_CORE_GIT_REMOTE".to_string(), endpoints.core_git_remote.to_string()),
            ]);
        }
        self
    }

    pub fn brew_path(&self) -> &Path {
        &self.brew
    }

    fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = CommandSpec::new(self.brew.to_string_lossy()).args(args);
        for (k, v) in &self.env {
            spec = spec.env(k.clone(), v.clone());
        }
        spec
    }

    fn query(&self, spec: &CommandSpec) -> Result<(i32, String), PackageError> {
        let out = self.runner.run(spec, &mut || {})?;
        tracing::debug!(command = %spec, exit_code = out.exit_code, "brew query");
        Ok((out.exit_code, out.output))
    }
}

impl<R: CommandRunner> PackageManager for BrewAdapter<R> {
    fn install_command(&self, intent: &PackageIntent) -> CommandSpec {
        match intent.kind {
            PackageKind::Formula => self.command(["install", intent.name.as_str()]),
            PackageKind::Cask => self.command(["install", "--cask", intent.name.as_str()]),
        }
    }

    fn update_command(&self) -> CommandSpec {
        // Explicit update is the one place auto-update must not be suppressed.
        let mut spec = self.command(["update"]);
        spec.env.retain(|(k, _)| k != "HOMEBREW_NO_AUTO_UPDATE");
        spec
    }

    fn cleanup_command(&self) -> CommandSpec {
        self.command(["cleanup"])
    }

    fn info(&self, name: &str, kind: PackageKind) -> Result<bool, PackageError> {
        let spec = match kind {
            PackageKind::Formula => self.command(["info", "--formula", name]),
            PackageKind::Cask => self.command(["info", "--cask", name]),
        };
        let (code, _) = self.query(&spec)?;
        Ok(code == 0)
    }

    fn list_installed(&self, kind: PackageKind) -> Result<Vec<String>, PackageError> {
        let flag = match kind {
            PackageKind::Formula => "--formula",
            PackageKind::Cask => "--cask",
        };
        let spec = self.command(["list", flag, "-1"]);
        let (code, output) = self.query(&spec)?;

        if code != 0 {
            return Err(PackageError::CommandFailed {
                command: spec.to_string(),
                exit_code: code,
            });
        }

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn prefix(&self, name: &str) -> Result<PathBuf, PackageError> {
        let (code, output) = self.query(&self.command(["--prefix", name]))?;
        let prefix = output.lines().map(str::trim).find(|l| !l.is_empty());

        match prefix {
            Some(p) if code == 0 => Ok(PathBuf::from(p)),
            _ => Err(PackageError::NotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ports::command::CommandOutput;
    use std::cell::RefCell;

    /// Replies with canned output and remembers every command.
    struct CannedRunner {
        reply: CommandOutput,
        seen: RefCell<Vec<CommandSpec>>,
    }

    impl CannedRunner {
        fn new(exit_code: i32, output: &str) -> Self {
            Self {
                reply: CommandOutput {
                    exit_code,
                    output: output.to_string(),
                },
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for CannedRunner {
        fn run(
            &self,
            command: &CommandSpec,
            _on_tick: &mut dyn FnMut(),
        ) -> std::io::Result<CommandOutput> {
            self.seen.borrow_mut().push(command.clone());
            Ok(self.reply.clone())
        }
    }

    fn brew(runner: CannedRunner) -> BrewAdapter<CannedRunner> {
        BrewAdapter::with_runner("/opt/homebrew/bin/brew", runner)
    }

    #[test]
    fn test_install_verb_follows_kind() {
        let adapter = brew(CannedRunner::new(0, ""));

        let formula = adapter.install_command(&PackageIntent::formula("git"));
        let cask = adapter.install_command(&PackageIntent::cask("iterm2"));

        assert_eq!(formula.args, vec!["install", "git"]);
        assert_eq!(cask.args, vec!["install", "--cask", "iterm2"]);
        assert!(formula
            .env
            .contains(&("HOMEBREW_NO_AUTO_UPDATE".to_string(), "1".to_string())));
    }

    #[test]
    fn test_update_allows_auto_update() {
        let adapter = brew(CannedRunner::new(0, ""));
        let update = adapter.update_command();
        assert!(update.env.iter().all(|(k, _)| k != "HOMEBREW_NO_AUTO_UPDATE"));
    }

    #[test]
    fn test_mirror_env_is_attached() {
        let adapter = brew(CannedRunner::new(0, "")).with_mirror(Mirror::Tsinghua);
        let cmd = adapter.install_command(&PackageIntent::formula("git"));

        assert!(cmd.env.iter().any(|(k, v)| k == "HOMEBREW_BOTTLE_DOMAIN"
            && v.contains("tuna.tsinghua")));
    }

    #[test]
    fn test_list_installed_parses_lines() {
        let adapter = brew(CannedRunner::new(0, "git\n  node \n\nwget\n"));
        let list = adapter.list_installed(PackageKind::Formula).unwrap();

        assert_eq!(list, vec!["git", "node", "wget"]);
        assert_eq!(
            adapter.runner.seen.borrow()[0].args,
            vec!["list", "--formula", "-1"]
        );
    }

    #[test]
    fn test_list_installed_failure() {
        let adapter = brew(CannedRunner::new(1, "Error"));
        let err = adapter.list_installed(PackageKind::Cask).unwrap_err();
        assert!(matches!(err, PackageError::CommandFailed { exit_code: 1, .. }));
    }

    #[test]
    fn test_info_maps_exit_code() {
        assert!(brew(CannedRunner::new(0, "")).info("git", PackageKind::Formula).unwrap());
        assert!(!brew(CannedRunner::new(1, "")).info("nope", PackageKind::Cask).unwrap());
    }

    #[test]
    fn test_prefix() {
        let adapter = brew(CannedRunner::new(0, "/opt/homebrew/opt/openjdk@17\n"));
        assert_eq!(
            adapter.prefix("openjdk@17").unwrap(),
            PathBuf::from("/opt/homebrew/opt/openjdk@17")
        );

        let missing = brew(CannedRunner::new(1, "Error: No available formula"));
        assert!(matches!(
            missing.prefix("nope"),
            Err(PackageError::NotFound(_))
        ));
    }
}
