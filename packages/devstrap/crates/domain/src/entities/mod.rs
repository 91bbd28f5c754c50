pub mod brewfile;
pub mod catalog;
pub mod health;
pub mod intent;
pub mod outcome;
pub mod plan;
pub mod profile;
pub mod settings;

pub use catalog::{CatalogEntry, Category, CATALOG, JAVA_ENTRY, JDK_OPTIONS};
pub use health::HealthResult;
pub use intent::{PackageIntent, PackageKind, PackageSet};
pub use outcome::{InstallReport, Outcome};
pub use plan::{CustomPaths, Mirror, Plan};
pub use profile::ProfileLine;
