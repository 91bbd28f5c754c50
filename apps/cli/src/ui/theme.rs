use console::style;
use std::fmt;

/// The central theme definition for the devstrap CLI.
pub struct Theme;

impl Theme {
    /// Primary color (cyan): headings, package names.
    pub fn primary(text: impl fmt::Display) -> String {
        style(text).cyan().bold().to_string()
    }

    pub fn success(text: impl fmt::Display) -> String {
        style(text).green().bold().to_string()
    }

    pub fn error(text: impl fmt::Display) -> String {
        style(text).red().bold().to_string()
    }

    /// Metadata, paths, hints.
    pub fn muted(text: impl fmt::Display) -> String {
        style(text).dim().to_string()
    }
}

pub enum Icon {
    Check,
    Package,
    Wrench,
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self {
            Icon::Check => "✔",
            Icon::Package => "📦",
            Icon::Wrench => "🔧",
        };
        write!(f, "{}", icon)
    }
}
