use domain::entities::profile::ProfileLine;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Idempotent appender for the user's shell profile.
///
/// Existing content is never rewritten; lines are only appended when they are
/// not already present, so repeated runs leave the file byte-identical.
pub struct ProfileWriter {
    path: PathBuf,
}

impl ProfileWriter {
    /// Opens an existing profile, failing if it cannot be appended to.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        OpenOptions::new().append(true).open(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` (and its section header, if missing). Returns whether
    /// anything was written.
    pub fn ensure_line(&self, line: &ProfileLine) -> io::Result<bool> {
        if line.text.contains('\n') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "profile lines must be single lines",
            ));
        }

        let content = fs::read_to_string(&self.path)?;
        if has_line(&content, &line.text) {
            return Ok(false);
        }

        let mut chunk = String::new();
        if !content.is_empty() && !content.ends_with('\n') {
            chunk.push('\n');
        }

        if let Some(header) = line.header().filter(|h| !has_line(&content, h)) {
            if !content.is_empty() {
                chunk.push('\n');
            }
            chunk.push_str(&header);
            chunk.push('\n');
        }

        chunk.push_str(&line.text);
        chunk.push('\n');

        // One append per call: a crash leaves either the whole chunk or nothing.
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(chunk.as_bytes())?;
        file.flush()?;

        tracing::debug!(profile = %self.path.display(), line = %line.text, "appended profile line");
        Ok(true)
    }

    /// Applies several lines in order, stopping at the first I/O error.
    pub fn ensure_lines(&self, lines: &[ProfileLine]) -> io::Result<usize> {
        let mut written = 0;
        for line in lines {
            if self.ensure_line(line)? {
                written += 1;
            }
        }
        Ok(written)
    }
}

fn has_line(content: &str, needle: &str) -> bool {
    content
        .lines()
        .any(|l| l.trim_end_matches('\r') == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(content: &str) -> (tempfile::TempDir, ProfileWriter) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".zshrc");
        fs::write(&path, content).unwrap();
        let writer = ProfileWriter::open(&path).unwrap();
        (dir, writer)
    }

    fn read(writer: &ProfileWriter) -> String {
        fs::read_to_string(writer.path()).unwrap()
    }

    #[test]
    fn test_second_call_is_a_no_op() {
        let (_dir, writer) = profile_with("export EDITOR=vim\n");
        let line = ProfileLine::export("JAVA_HOME", "/opt/jdk").in_section("Java");

        assert!(writer.ensure_line(&line).unwrap());
        let first = read(&writer);
        assert!(!writer.ensure_line(&line).unwrap());

        assert_eq!(read(&writer), first);
        assert_eq!(
            first,
            "export EDITOR=vim\n\n# devstrap: Java\nexport JAVA_HOME=\"/opt/jdk\"\n"
        );
    }

    #[test]
    fn test_empty_file_gets_no_leading_blank() {
        let (_dir, writer) = profile_with("");
        writer
            .ensure_line(&ProfileLine::alias("brewup", "brew update").in_section("Aliases"))
            .unwrap();

        assert_eq!(
            read(&writer),
            "# devstrap: Aliases\nalias brewup='brew update'\n"
        );
    }

    #[test]
    fn test_repairs_missing_trailing_newline() {
        let (_dir, writer) = profile_with("export A=1");
        writer
            .ensure_line(&ProfileLine::export("B", "2").in_section("Env"))
            .unwrap();

        assert_eq!(read(&writer), "export A=1\n\n# devstrap: Env\nexport B=\"2\"\n");
    }

    #[test]
    fn test_header_written_once_per_file() {
        let (_dir, writer) = profile_with("");
        writer
            .ensure_line(&ProfileLine::export("A", "1").in_section("Env"))
            .unwrap();
        writer
            .ensure_line(&ProfileLine::export("B", "2").in_section("Env"))
            .unwrap();

        assert_eq!(
            read(&writer),
            "# devstrap: Env\nexport A=\"1\"\nexport B=\"2\"\n"
        );
    }

    #[test]
    fn test_existing_user_line_is_respected() {
        let (_dir, writer) = profile_with("alias ll='ls -la'\n");
        assert!(!writer.ensure_line(&ProfileLine::alias("ll", "ls -la")).unwrap());
        assert_eq!(read(&writer), "alias ll='ls -la'\n");
    }

    #[test]
    fn test_repeated_batches_are_stable() {
        let (_dir, writer) = profile_with("# user stuff\n");
        let lines = vec![
            ProfileLine::export("ANDROID_HOME", "$HOME/Library/Android/sdk").in_section("Android"),
            ProfileLine::export("PATH", "$ANDROID_HOME/platform-tools:$PATH").in_section("Android"),
            ProfileLine::alias("brewup", "brew update && brew upgrade").in_section("Aliases"),
        ];

        assert_eq!(writer.ensure_lines(&lines).unwrap(), 3);
        let first = read(&writer);
        assert_eq!(writer.ensure_lines(&lines).unwrap(), 0);
        assert_eq!(read(&writer), first);
    }

    #[test]
    fn test_rejects_multiline_text() {
        let (_dir, writer) = profile_with("");
        let err = writer.ensure_line(&ProfileLine::new("a\nb")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProfileWriter::open(dir.path().join("missing")).is_err());
    }
}
