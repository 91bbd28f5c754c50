use clap::Parser;
use std::path::PathBuf;

use devstrap::application::health::HealthVerifier;
use devstrap::domain::entities::catalog;
use devstrap::domain::entities::intent::{PackageKind, PackageSet};
use devstrap::domain::entities::settings;
use devstrap::domain::ports::package_manager::PackageManager;
use devstrap::infrastructure::adapters::brew::BrewAdapter;
use devstrap::infrastructure::system::ProcessRunner;

use crate::core::{CliError, Host};
use crate::ui::summary;

#[derive(Parser, Debug)]
pub struct DoctorCommand {
    /// Check the packages of an exported snapshot instead of everything installed
    #[arg(long)]
    pub from: Option<PathBuf>,
}

impl DoctorCommand {
    pub async fn execute(self) -> Result<(), CliError> {
        cliclack::intro(console::style("devstrap doctor").bold())?;

        let host = Host::detect()?;
        for warning in &host.warnings {
            cliclack::log::warning(warning)?;
        }

        let (packages, jdk) = match &self.from {
            Some(path) => {
                let plan = settings::import(path)?;
                (plan.packages, plan.jdk)
            }
            None => installed(&BrewAdapter::new(&host.brew)),
        };

        let results = tokio::task::block_in_place(|| {
            HealthVerifier::new(ProcessRunner::new(), host.shell, &host.profile)
                .check(&packages, jdk.as_deref())
        });

        if results.is_empty() {
            cliclack::outro("No checkable tools selected or installed.")?;
            return Ok(());
        }

        println!("{}", summary::health_table(&results));

        let unhealthy = results.iter().filter(|r| !r.ok).count();
        if unhealthy == 0 {
            cliclack::outro("All tools respond.")?;
        } else {
            cliclack::outro_cancel(format!("{} tool(s) did not respond", unhealthy))?;
        }
        Ok(())
    }
}

/// The installed inventory as a package set, with the newest catalog JDK.
fn installed(pm: &impl PackageManager) -> (PackageSet, Option<String>) {
    let list = |kind: PackageKind| {
        pm.list_installed(kind).unwrap_or_else(|e| {
            tracing::warn!(%kind, error = %e, "could not list installed packages");
            Vec::new()
        })
    };

    let packages = PackageSet::from_names(list(PackageKind::Formula), list(PackageKind::Cask));
    let jdk = catalog::newest_jdk(&packages).map(str::to_string);

    (packages, jdk)
}
