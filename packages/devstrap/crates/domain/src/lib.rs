pub mod entities;
pub mod ports;
pub mod system;

pub use entities::intent::{PackageIntent, PackageKind, PackageSet};
pub use ports::package_manager::PackageManager;
