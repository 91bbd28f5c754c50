use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Which flavour of package the manager installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Command-line package.
    Formula,
    /// GUI application.
    Cask,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Formula => write!(f, "formula"),
            PackageKind::Cask => write!(f, "cask"),
        }
    }
}

/// A requested `(name, kind)` pair. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageIntent {
    pub name: String,
    pub kind: PackageKind,
}

impl PackageIntent {
    pub fn new(name: impl Into<String>, kind: PackageKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn formula(name: impl Into<String>) -> Self {
        Self::new(name, PackageKind::Formula)
    }

    pub fn cask(name: impl Into<String>) -> Self {
        Self::new(name, PackageKind::Cask)
    }
}

impl fmt::Display for PackageIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PackageKind::Formula => write!(f, "{}", self.name),
            PackageKind::Cask => write!(f, "{} (cask)", self.name),
        }
    }
}

/// Deduplicated, name-sorted formulas and casks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSet {
    formulas: Vec<PackageIntent>,
    casks: Vec<PackageIntent>,
}

impl PackageSet {
    /// Builds a set from arbitrary names, dropping duplicates (case-sensitive).
    pub fn from_names<F, C>(formulas: F, casks: C) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let formulas: BTreeSet<String> = formulas.into_iter().map(Into::into).collect();
        let casks: BTreeSet<String> = casks.into_iter().map(Into::into).collect();

        Self {
            formulas: formulas.into_iter().map(PackageIntent::formula).collect(),
            casks: casks.into_iter().map(PackageIntent::cask).collect(),
        }
    }

    /// Keeps the given lists as they are. Callers are responsible for ordering.
    pub(crate) fn from_ordered(formulas: Vec<PackageIntent>, casks: Vec<PackageIntent>) -> Self {
        Self { formulas, casks }
    }

    pub fn formulas(&self) -> &[PackageIntent] {
        &self.formulas
    }

    pub fn casks(&self) -> &[PackageIntent] {
        &self.casks
    }

    /// Formulas first, then casks.
    pub fn iter(&self) -> impl Iterator<Item = &PackageIntent> {
        self.formulas.iter().chain(self.casks.iter())
    }

    pub fn len(&self) -> usize {
        self.formulas.len() + self.casks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty() && self.casks.is_empty()
    }

    pub fn contains(&self, name: &str, kind: PackageKind) -> bool {
        let list = match kind {
            PackageKind::Formula => &self.formulas,
            PackageKind::Cask => &self.casks,
        };
        list.iter().any(|i| i.name == name)
    }

    /// Splits the set by a predicate, preserving order inside each half.
    pub fn split_by<P>(&self, mut keep: P) -> (PackageSet, Vec<PackageIntent>)
    where
        P: FnMut(&PackageIntent) -> bool,
    {
        let mut removed = Vec::new();
        let mut formulas = Vec::new();
        let mut casks = Vec::new();

        for intent in self.iter() {
            if keep(intent) {
                match intent.kind {
                    PackageKind::Formula => formulas.push(intent.clone()),
                    PackageKind::Cask => casks.push(intent.clone()),
                }
            } else {
                removed.push(intent.clone());
            }
        }

        (Self::from_ordered(formulas, casks), removed)
    }
}
