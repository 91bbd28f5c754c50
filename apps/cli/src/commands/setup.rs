use clap::Parser;
use std::path::PathBuf;

use devstrap::application::executor::RetryingExecutor;
use devstrap::application::install_service::InstallService;
use devstrap::application::package_set::{AdhocResult, PackageSetBuilder};
use devstrap::domain::entities::catalog::CATALOG;
use devstrap::domain::entities::intent::PackageKind;
use devstrap::domain::entities::plan::{CustomPaths, Mirror, Plan};
use devstrap::domain::entities::settings;
use devstrap::domain::system::shell;
use devstrap::infrastructure::adapters::brew::BrewAdapter;
use devstrap::infrastructure::system::{ProcessRunner, ThreadSleeper};

use crate::core::{CliError, Host};
use crate::ui::{prompt, summary, Icon, Theme};

const ANDROID_CASKS: &[&str] = &["android-studio", "android-commandlinetools"];

#[derive(Parser, Debug)]
pub struct SetupCommand {
    /// Add every entry of a Brewfile to the selection
    #[arg(long)]
    pub brewfile: Option<PathBuf>,

    /// Replay an exported settings directory (or devstrap.toml) without prompting
    #[arg(long, conflicts_with = "brewfile")]
    pub from: Option<PathBuf>,

    /// Download mirror: official, tsinghua, ustc or aliyun
    #[arg(long)]
    pub mirror: Option<Mirror>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Write devstrap.toml and a Brewfile into this directory after the run
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl SetupCommand {
    pub async fn execute(self) -> Result<(), CliError> {
        cliclack::intro(console::style(" devstrap ").on_cyan().black())?;

        let host = Host::detect()?;
        cliclack::log::info(format!(
            "{} with {}",
            host.platform,
            Theme::muted(host.brew.display())
        ))?;
        for warning in &host.warnings {
            cliclack::log::warning(warning)?;
        }

        let plan = match &self.from {
            Some(path) => {
                let mut plan = settings::import(path)?;
                if let Some(mirror) = self.mirror {
                    plan.mirror = mirror;
                }
                cliclack::log::info(format!("Loaded settings from {}", path.display()))?;
                plan
            }
            None => self.collect(&host)?,
        };

        if plan.packages.is_empty() {
            cliclack::outro("Nothing selected, nothing to do.")?;
            return Ok(());
        }

        cliclack::note("Plan", describe(&plan))?;
        if !prompt::confirm("Install these packages?", self.yes)? {
            cliclack::outro_cancel("Nothing was changed.")?;
            return Ok(());
        }

        // Everything from here on is blocking process work.
        tokio::task::block_in_place(|| self.apply(&host, plan))
    }

    /// Plan phase: prompts and read-only lookups only.
    fn collect(&self, host: &Host) -> Result<Plan, CliError> {
        let mirror = match self.mirror {
            Some(m) => m,
            None => prompt::mirror()?,
        };
        let pm = BrewAdapter::new(&host.brew).with_mirror(mirror);

        let mut builder = PackageSetBuilder::new();
        for category in CATALOG {
            let picked = prompt::catalog(category)?;
            builder.add_catalog_selection(category, picked);
        }

        if builder.needs_jdk_choice() {
            builder.resolve_jdk(prompt::jdk()?);
        }

        if let Some(path) = &self.brewfile {
            let added = builder.add_brewfile(path)?;
            cliclack::log::info(format!("{} entries from {}", added, path.display()))?;
        }

        for kind in [PackageKind::Formula, PackageKind::Cask] {
            let names = prompt::names(&format!("Any other {}s?", kind))?;
            for name in names {
                match builder.add_adhoc(&pm, &name, kind) {
                    Ok(AdhocResult::Accepted) => {}
                    Ok(AdhocResult::Rejected) => cliclack::log::warning(format!(
                        "'{}' is not a known {}, skipped",
                        name, kind
                    ))?,
                    Err(e) => {
                        tracing::warn!(name = %name, error = %e, "lookup failed");
                        cliclack::log::warning(format!("Could not look up '{}': {}", name, e))?
                    }
                }
            }
        }

        let (packages, jdk) = builder.build();

        let wants_android = ANDROID_CASKS
            .iter()
            .any(|c| packages.contains(c, PackageKind::Cask));
        let paths = CustomPaths {
            android_sdk: if wants_android {
                prompt::android_sdk_path()?
            } else {
                None
            },
        };

        Ok(Plan {
            packages,
            jdk,
            mirror,
            paths,
        })
    }

    /// Apply phase: every external effect, strictly in sequence.
    fn apply(&self, host: &Host, plan: Plan) -> Result<(), CliError> {
        let pm = BrewAdapter::new(&host.brew).with_mirror(plan.mirror);
        let executor = RetryingExecutor::new(ProcessRunner::new(), ThreadSleeper);
        let mut service = InstallService::new(&pm, executor, plan);

        cliclack::log::step("Refreshing package index")?;
        if !service.refresh_index() {
            cliclack::log::warning("Index refresh failed; continuing with cached metadata")?;
        }

        cliclack::log::step(format!("{} Installing packages", Icon::Package))?;
        service.install();

        if service.can_retry() {
            let failed = service.report().failures().len();
            let question = format!(
                "{} package(s) failed. Retry them once?",
                Theme::error(failed)
            );
            if prompt::confirm(&question, self.yes)? {
                let recovered = service.retry_failures();
                cliclack::log::info(format!(
                    "Recovered {} of {}",
                    Theme::success(recovered),
                    failed
                ))?;
            }
        }

        cliclack::log::step(format!(
            "{} Configuring {}",
            Icon::Wrench,
            Theme::primary(host.profile.display())
        ))?;
        let profile_error = match shell::ensure_profile_exists(&host.profile)
            .map_err(anyhow::Error::from)
            .and_then(|_| service.configure_environment(&host.profile, host.platform.os_type))
        {
            Ok(env) => {
                for (step, reason) in &env.failed {
                    cliclack::log::warning(format!("{}: {}", step, reason))?;
                }
                cliclack::log::info(format!(
                    "{} line(s) added ({})",
                    env.written,
                    env.applied.join(", ")
                ))?;
                None
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                tracing::warn!(profile = %host.profile.display(), %reason, "environment phase failed");
                cliclack::log::error(&reason)?;
                Some(CliError::Profile {
                    path: host.profile.clone(),
                    reason,
                })
            }
        };

        let health = service.verify(host.shell, &host.profile);

        if !service.cleanup() {
            cliclack::log::warning("Cleanup failed")?;
        }

        println!("{}", summary::outcomes_table(service.report()));
        if !health.is_empty() {
            println!("{}", summary::health_table(&health));
        }

        if let Some(dir) = &self.export {
            let path = settings::export(dir, service.plan())?;
            cliclack::log::success(format!("Settings exported to {}", path.display()))?;
        }

        let failures = service.report().failures().len();
        if let Some(err) = profile_error {
            cliclack::outro_cancel("Finished with errors")?;
            return Err(err);
        }
        if failures > 0 {
            cliclack::outro_cancel("Finished with failures")?;
            return Err(CliError::InstallFailures(failures));
        }

        cliclack::outro(format!(
            "{} Done. Open a new shell or run `source {}`.",
            Icon::Check,
            host.profile.display()
        ))?;
        Ok(())
    }
}

fn describe(plan: &Plan) -> String {
    let list = |kind: &str, names: Vec<&str>| {
        if names.is_empty() {
            None
        } else {
            Some(format!("{}: {}", kind, names.join(", ")))
        }
    };

    let formulas = plan.packages.formulas().iter().map(|i| i.name.as_str()).collect();
    let casks = plan.packages.casks().iter().map(|i| i.name.as_str()).collect();

    let mut lines: Vec<String> = [list("formulas", formulas), list("casks", casks)]
        .into_iter()
        .flatten()
        .collect();
    if let Some(jdk) = &plan.jdk {
        lines.push(format!("JDK: {}", jdk));
    }
    lines.push(format!("mirror: {}", plan.mirror));
    if let Some(sdk) = &plan.paths.android_sdk {
        lines.push(format!("Android SDK: {}", sdk.display()));
    }
    lines.join("\n")
}
