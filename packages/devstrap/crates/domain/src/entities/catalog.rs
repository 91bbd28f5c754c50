use super::intent::{PackageKind, PackageSet};

/// Catalog name that triggers the JDK version sub-flow instead of being
/// installed as-is.
pub const JAVA_ENTRY: &str = "java";

/// One selectable package in the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
}

/// A group of catalog entries sharing a package kind.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub label: &'static str,
    pub kind: PackageKind,
    pub entries: &'static [CatalogEntry],
}

impl Category {
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

const fn entry(name: &'static str, description: &'static str) -> CatalogEntry {
    CatalogEntry { name, description }
}

const CORE_TOOLS: &[CatalogEntry] = &[
    entry("git", "Distributed version control"),
    entry("wget", "Internet file retriever"),
    entry("tree", "Directory listing as a tree"),
    entry("jq", "Command-line JSON processor"),
    entry("ripgrep", "Fast recursive search"),
    entry("htop", "Interactive process viewer"),
];

const LANGUAGES: &[CatalogEntry] = &[
    entry("node", "Node.js runtime"),
    entry("python@3.12", "Python 3.12 interpreter"),
    entry("go", "Go toolchain"),
    entry("rustup", "Rust toolchain installer"),
    entry(JAVA_ENTRY, "Java Development Kit (choose a version)"),
];

const BUILD_TOOLS: &[CatalogEntry] = &[
    entry("gradle", "Gradle build tool"),
    entry("maven", "Apache Maven build tool"),
    entry("cmake", "Cross-platform make"),
    entry("cocoapods", "Dependency manager for Cocoa projects"),
];

const DESKTOP_APPS: &[CatalogEntry] = &[
    entry("visual-studio-code", "Code editor"),
    entry("iterm2", "Terminal emulator"),
    entry("google-chrome", "Web browser"),
    entry("docker", "Container runtime"),
    entry("postman", "API client"),
];

const MOBILE_SDKS: &[CatalogEntry] = &[
    entry("android-studio", "Android IDE and SDK manager"),
    entry("android-commandlinetools", "Android SDK command-line tools"),
    entry("flutter", "Flutter UI toolkit"),
];

/// Built-in catalog, in display order.
pub const CATALOG: &[Category] = &[
    Category {
        label: "Core tools",
        kind: PackageKind::Formula,
        entries: CORE_TOOLS,
    },
    Category {
        label: "Languages & runtimes",
        kind: PackageKind::Formula,
        entries: LANGUAGES,
    },
    Category {
        label: "Build tools",
        kind: PackageKind::Formula,
        entries: BUILD_TOOLS,
    },
    Category {
        label: "Desktop applications",
        kind: PackageKind::Cask,
        entries: DESKTOP_APPS,
    },
    Category {
        label: "Mobile SDKs",
        kind: PackageKind::Cask,
        entries: MOBILE_SDKS,
    },
];

/// Concrete JDK formulas offered by the version sub-flow.
pub const JDK_OPTIONS: &[CatalogEntry] = &[
    entry("openjdk@21", "Java 21 (LTS)"),
    entry("openjdk@17", "Java 17 (LTS)"),
    entry("openjdk@11", "Java 11 (LTS)"),
    entry("openjdk", "Latest OpenJDK"),
];

pub fn is_jdk_formula(name: &str) -> bool {
    JDK_OPTIONS.iter().any(|e| e.name == name)
}

/// The highest-sorting JDK formula in `packages`, if any.
pub fn newest_jdk(packages: &PackageSet) -> Option<&str> {
    packages
        .formulas()
        .iter()
        .rev()
        .map(|i| i.name.as_str())
        .find(|name| is_jdk_formula(name))
}
