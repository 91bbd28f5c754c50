use domain::entities::brewfile::{self, BrewfileError};
use domain::entities::catalog::{self, Category, JAVA_ENTRY};
use domain::entities::intent::{PackageIntent, PackageKind, PackageSet};
use domain::ports::package_manager::{PackageError, PackageManager};
use std::collections::BTreeSet;
use std::path::Path;

/// Result of offering an ad-hoc name to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdhocResult {
    Accepted,
    /// The package manager does not know the name; it was discarded.
    Rejected,
}

/// Merges catalog picks, Brewfile entries and ad-hoc names into one
/// deduplicated, sorted [`PackageSet`].
#[derive(Debug, Default)]
pub struct PackageSetBuilder {
    formulas: BTreeSet<String>,
    casks: BTreeSet<String>,
    java_requested: bool,
    jdk: Option<String>,
}

impl PackageSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, intent: PackageIntent) {
        match intent.kind {
            PackageKind::Formula => self.formulas.insert(intent.name),
            PackageKind::Cask => self.casks.insert(intent.name),
        };
    }

    /// Adds names picked from a catalog category. The generic `java` entry
    /// is held back for the JDK version sub-flow.
    pub fn add_catalog_selection<'n, I>(&mut self, category: &Category, names: I)
    where
        I: IntoIterator<Item = &'n str>,
    {
        for name in names {
            if name.is_empty() {
                continue;
            }
            if name == JAVA_ENTRY && category.kind == PackageKind::Formula {
                self.java_requested = true;
                continue;
            }
            self.add(PackageIntent::new(name, category.kind));
        }
    }

    pub fn add_set(&mut self, set: &PackageSet) {
        for intent in set.iter() {
            self.add(intent.clone());
        }
    }

    pub fn add_brewfile(&mut self, path: &Path) -> Result<usize, BrewfileError> {
        let set = brewfile::load(path)?;
        self.add_set(&set);
        tracing::info!(path = %path.display(), entries = set.len(), "loaded Brewfile");
        Ok(set.len())
    }

    /// Validates `name` with the package manager before accepting it.
    pub fn add_adhoc(
        &mut self,
        pm: &impl PackageManager,
        name: &str,
        kind: PackageKind,
    ) -> Result<AdhocResult, PackageError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AdhocResult::Rejected);
        }

        if !pm.info(name, kind)? {
            tracing::warn!(name, %kind, "rejected unknown package");
            return Ok(AdhocResult::Rejected);
        }

        self.add(PackageIntent::new(name, kind));
        Ok(AdhocResult::Accepted)
    }

    /// Whether the `java` catalog entry was picked and awaits a version.
    pub fn needs_jdk_choice(&self) -> bool {
        self.java_requested && self.jdk.is_none()
    }

    /// Settles the JDK sub-flow. `None` means the user backed out.
    pub fn resolve_jdk(&mut self, choice: Option<String>) {
        self.java_requested = false;
        if let Some(jdk) = choice.filter(|j| !j.trim().is_empty()) {
            self.formulas.insert(jdk.clone());
            self.jdk = Some(jdk);
        }
    }

    /// Finishes the set. If no JDK was chosen explicitly but a known JDK
    /// formula arrived from another source, that one becomes the selection.
    pub fn build(self) -> (PackageSet, Option<String>) {
        let packages = PackageSet::from_names(self.formulas, self.casks);
        let jdk = self
            .jdk
            .or_else(|| catalog::newest_jdk(&packages).map(str::to_string));

        (packages, jdk)
    }
}
