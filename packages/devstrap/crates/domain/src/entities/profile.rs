use std::fmt;

/// Every section header written by the tool starts with this marker.
pub const SECTION_MARKER: &str = "# devstrap:";

/// A single line that must be present in the shell profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLine {
    pub section: Option<String>,
    pub text: String,
}

impl ProfileLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            section: None,
            text: text.into(),
        }
    }

    /// `export VAR="value"`. The value is left unescaped so `$HOME` and
    /// `$PATH` expand when the profile is sourced.
    pub fn export(var: &str, value: impl fmt::Display) -> Self {
        Self::new(format!("export {}=\"{}\"", var, value))
    }

    /// `alias name='value'`.
    pub fn alias(name: &str, value: &str) -> Self {
        Self::new(format!("alias {}='{}'", name, value))
    }

    pub fn in_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    /// Rendered header line for this line's section, if any.
    pub fn header(&self) -> Option<String> {
        self.section
            .as_ref()
            .map(|s| format!("{} {}", SECTION_MARKER, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_and_alias_rendering() {
        assert_eq!(
            ProfileLine::export("JAVA_HOME", "/opt/jdk").text,
            "export JAVA_HOME=\"/opt/jdk\""
        );
        assert_eq!(
            ProfileLine::alias("ll", "ls -la").text,
            "alias ll='ls -la'"
        );
    }

    #[test]
    fn test_header_uses_marker() {
        let line = ProfileLine::new("x").in_section("Java");
        assert_eq!(line.header().as_deref(), Some("# devstrap: Java"));
        assert_eq!(ProfileLine::new("x").header(), None);
    }
}
