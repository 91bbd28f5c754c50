use domain::entities::intent::{PackageIntent, PackageKind, PackageSet};
use domain::ports::package_manager::PackageManager;
use std::collections::HashSet;

/// Requested intents split by whether they still need installing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub to_install: PackageSet,
    pub already_satisfied: Vec<PackageIntent>,
}

/// Splits `requested` against the installed inventories.
///
/// Each inventory is listed at most once. A listing failure is logged and
/// treated as an empty inventory, so those intents fall through to install.
pub fn partition(pm: &impl PackageManager, requested: &PackageSet) -> Partition {
    let formulas = inventory(pm, PackageKind::Formula, !requested.formulas().is_empty());
    let casks = inventory(pm, PackageKind::Cask, !requested.casks().is_empty());

    let (to_install, already_satisfied) = requested.split_by(|intent| {
        let installed = match intent.kind {
            PackageKind::Formula => &formulas,
            PackageKind::Cask => &casks,
        };
        !installed.contains(&intent.name)
    });

    tracing::info!(
        requested = requested.len(),
        to_install = to_install.len(),
        already_satisfied = already_satisfied.len(),
        "partitioned requested packages"
    );

    Partition {
        to_install,
        already_satisfied,
    }
}

fn inventory(pm: &impl PackageManager, kind: PackageKind, needed: bool) -> HashSet<String> {
    if !needed {
        return HashSet::new();
    }

    match pm.list_installed(kind) {
        Ok(names) => names.into_iter().collect(),
        Err(e) => {
            tracing::warn!(%kind, error = %e, "could not list installed packages");
            HashSet::new()
        }
    }
}
