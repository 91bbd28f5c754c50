//! Minimal Brewfile support.
//!
//! Only two directives are understood: `brew '<name>'` (formula) and
//! `cask '<name>'` (GUI application). Everything else, including `tap`,
//! `mas`, comments and blank lines, is ignored.

use super::intent::{PackageKind, PackageSet};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrewfileError {
    #[error("Failed to read Brewfile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write Brewfile {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parses one line, returning the declared kind and name.
pub fn parse_line(line: &str) -> Option<(PackageKind, String)> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace)?;

    let kind = match verb {
        "brew" => PackageKind::Formula,
        "cask" => PackageKind::Cask,
        _ => return None,
    };

    let rest = rest.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &rest[1..];
    let end = body.find(quote)?;
    let name = &body[..end];

    if name.is_empty() {
        return None;
    }

    Some((kind, name.to_string()))
}

pub fn parse(content: &str) -> PackageSet {
    let mut formulas = Vec::new();
    let mut casks = Vec::new();

    for (kind, name) in content.lines().filter_map(parse_line) {
        match kind {
            PackageKind::Formula => formulas.push(name),
            PackageKind::Cask => casks.push(name),
        }
    }

    PackageSet::from_names(formulas, casks)
}

pub fn load(path: &Path) -> Result<PackageSet, BrewfileError> {
    let content = fs::read_to_string(path).map_err(|source| BrewfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&content))
}

pub fn render(set: &PackageSet) -> String {
    let mut out = String::from("# Generated by devstrap\n");

    for intent in set.iter() {
        let verb = match intent.kind {
            PackageKind::Formula => "brew",
            PackageKind::Cask => "cask",
        };
        let _ = writeln!(out, "{} '{}'", verb, intent.name);
    }

    out
}

pub fn save(path: &Path, set: &PackageSet) -> Result<(), BrewfileError> {
    fs::write(path, render(set)).map_err(|source| BrewfileError::Write {
        path: path.to_path_buf(),
        source,
    })
}
